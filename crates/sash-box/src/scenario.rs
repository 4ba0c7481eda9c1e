// Scenario replay: a sash box configuration plus a recorded list of input
// events, run headless. Used by the `sashbox` binary.

use std::path::Path;

use serde::Deserialize;

use sash_core::{Axis, InputEvent, Rect, SashDescriptor, SashError, Size, SizeMap};
use sash_input::{Document, SharedDocument, SplitterSettings};

use crate::SashBox;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub direction: Axis,
    pub container: Size,
    pub sashes: Vec<SashDescriptor>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Replay every event and collect the size maps emitted along the way.
    pub fn run(&self, settings: SplitterSettings) -> Result<Vec<SizeMap>, SashError> {
        let document: SharedDocument = Document::shared();
        let mut sash_box = SashBox::new(self.direction, &self.sashes, document, settings)?;
        sash_box.set_container(Rect::from_size(self.container));

        let mut maps = Vec::new();
        for event in &self.events {
            if let Some(map) = sash_box.handle(*event)? {
                log::info!("gesture finished: {:?}", map);
                maps.push(map);
            }
        }

        for (key, rect) in sash_box.compute() {
            log::debug!("pane {}: {:?}", key, rect);
        }
        Ok(maps)
    }
}
