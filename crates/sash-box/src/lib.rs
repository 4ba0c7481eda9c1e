// Sash box container widget: wires splitter gestures into the layout engine.

pub mod scenario;
pub mod settings;
mod tests;
mod widget;

pub use scenario::Scenario;
pub use settings::SashSettings;
pub use widget::SashBox;
