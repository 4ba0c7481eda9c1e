use std::fmt;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Main axis
// ──────────────────────────────────────────────

/// Direction panes are laid out in. `Row` stacks panes left to right,
/// `Column` stacks them top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Row,
    Column,
}

impl Axis {
    /// Coordinate of a point along the main axis.
    pub fn main(self, point: Vec2) -> f32 {
        match self {
            Axis::Row => point.x,
            Axis::Column => point.y,
        }
    }

    /// Length of a size along the main axis.
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Row => size.width,
            Axis::Column => size.height,
        }
    }

    pub fn start(self, rect: Rect) -> f32 {
        match self {
            Axis::Row => rect.x,
            Axis::Column => rect.y,
        }
    }

    pub fn end(self, rect: Rect) -> f32 {
        match self {
            Axis::Row => rect.x + rect.width,
            Axis::Column => rect.y + rect.height,
        }
    }

    /// Slice `rect` along the main axis: `offset` is relative to the rect's
    /// start, the cross axis is kept whole.
    pub fn span(self, rect: Rect, offset: f32, len: f32) -> Rect {
        match self {
            Axis::Row => Rect::new(rect.x + offset, rect.y, len, rect.height),
            Axis::Column => Rect::new(rect.x, rect.y + offset, rect.width, len),
        }
    }

    /// Cursor shown on the document while a splitter on this axis is dragged.
    pub fn resize_cursor(self) -> Cursor {
        match self {
            Axis::Row => Cursor::ColResize,
            Axis::Column => Cursor::RowResize,
        }
    }
}

// ──────────────────────────────────────────────
// Lengths and sash sizes
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Parse `"120px"`, `"25%"` or a bare `"120"` (pixels).
    pub fn parse(text: &str) -> Result<Self, SashError> {
        let trimmed = text.trim();
        let invalid = || SashError::InvalidLength(text.to_string());

        let (number, percent) = if let Some(n) = trimmed.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = trimmed.strip_suffix('%') {
            (n, true)
        } else {
            (trimmed, false)
        };

        let value: f32 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }

        Ok(if percent { Length::Percent(value) } else { Length::Px(value) })
    }

    /// Resolve to pixels against the container's main-axis extent.
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{}px", px),
            Length::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// A pane's size as written in configuration: either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredSize {
    Number(f64),
    Text(String),
}

impl Default for DeclaredSize {
    fn default() -> Self {
        DeclaredSize::Number(1.0)
    }
}

impl From<&str> for DeclaredSize {
    fn from(text: &str) -> Self {
        DeclaredSize::Text(text.to_string())
    }
}

impl From<f64> for DeclaredSize {
    fn from(n: f64) -> Self {
        DeclaredSize::Number(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SashSize {
    /// Explicit length; never grows or shrinks.
    Fixed(Length),
    /// Weighted share of the space left after fixed panes.
    Proportional(f32),
}

impl SashSize {
    /// A declared size that parses as a plain number is proportional,
    /// anything else must be a length.
    pub fn parse(declared: &DeclaredSize) -> Result<Self, SashError> {
        match declared {
            DeclaredSize::Number(n) => Ok(SashSize::Proportional(*n as f32)),
            DeclaredSize::Text(text) => match text.trim().parse::<f32>() {
                Ok(weight) => Ok(SashSize::Proportional(weight)),
                Err(_) => Length::parse(text).map(SashSize::Fixed),
            },
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, SashSize::Fixed(_))
    }
}

/// Pane configuration as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SashDescriptor {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub size: DeclaredSize,
    #[serde(default)]
    pub min_size: Option<DeclaredSize>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub animate: bool,
}

fn default_visible() -> bool {
    true
}

impl Default for SashDescriptor {
    fn default() -> Self {
        Self {
            key: None,
            size: DeclaredSize::default(),
            min_size: None,
            visible: true,
            animate: false,
        }
    }
}

impl SashDescriptor {
    pub fn new(size: impl Into<DeclaredSize>) -> Self {
        Self {
            size: size.into(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_min_size(mut self, min: impl Into<DeclaredSize>) -> Self {
        self.min_size = Some(min.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Parsed pane configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Sash {
    pub key: Option<String>,
    pub size: SashSize,
    pub min_size: Option<Length>,
    pub visible: bool,
    pub animate: bool,
}

impl Sash {
    pub fn proportional(weight: f32) -> Self {
        Self {
            key: None,
            size: SashSize::Proportional(weight),
            min_size: None,
            visible: true,
            animate: false,
        }
    }

    pub fn fixed(length: Length) -> Self {
        Self {
            size: SashSize::Fixed(length),
            ..Self::proportional(1.0)
        }
    }

    pub fn from_descriptor(desc: &SashDescriptor) -> Result<Self, SashError> {
        let min_size = match &desc.min_size {
            None => None,
            Some(DeclaredSize::Number(n)) => Some(Length::parse(&n.to_string())?),
            Some(DeclaredSize::Text(text)) => Some(Length::parse(text)?),
        };
        Ok(Self {
            key: desc.key.clone(),
            size: SashSize::parse(&desc.size)?,
            min_size,
            visible: desc.visible,
            animate: desc.animate,
        })
    }
}

/// The three values a box layout needs to place a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlexAttrs {
    pub grow: f32,
    pub shrink: f32,
    pub basis: Length,
}

impl FlexAttrs {
    pub fn fixed(basis: Length) -> Self {
        Self {
            grow: 0.0,
            shrink: 0.0,
            basis,
        }
    }

    pub fn proportional(grow: f32) -> Self {
        Self {
            grow,
            shrink: 1.0,
            basis: Length::Px(0.0),
        }
    }
}

// ──────────────────────────────────────────────
// Identity and results
// ──────────────────────────────────────────────

/// Stable identifier of a pane: its configured key, or its position in the
/// declared pane list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaneKey {
    Key(String),
    Index(usize),
}

impl fmt::Display for PaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaneKey::Key(key) => f.write_str(key),
            PaneKey::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<usize> for PaneKey {
    fn from(idx: usize) -> Self {
        PaneKey::Index(idx)
    }
}

impl From<&str> for PaneKey {
    fn from(key: &str) -> Self {
        PaneKey::Key(key.to_string())
    }
}

/// Final pixel sizes of all visible panes, in layout order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeMap {
    entries: Vec<(PaneKey, f32)>,
}

impl SizeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PaneKey, size: f32) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = size,
            None => self.entries.push((key, size)),
        }
    }

    pub fn get(&self, key: impl Into<PaneKey>) -> Option<f32> {
        let key = key.into();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PaneKey, f32)> {
        self.entries.iter().map(|(k, s)| (k, *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SizeMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, size) in &self.entries {
            map.serialize_entry(&key.to_string(), size)?;
        }
        map.end()
    }
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse(MouseButton),
    Touch,
}

impl Default for PointerKind {
    fn default() -> Self {
        PointerKind::Mouse(MouseButton::Left)
    }
}

/// Pointer and container events delivered by the host. Touch end and touch
/// cancel arrive as `PointerUp` / `PointerCancel`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        position: Vec2,
        #[serde(default)]
        pointer: PointerKind,
        #[serde(default)]
        time_ms: u64,
    },
    PointerMove {
        position: Vec2,
    },
    PointerUp {
        position: Vec2,
    },
    PointerCancel,
    DoubleClick {
        position: Vec2,
    },
    Resize {
        size: Size,
    },
}

// ──────────────────────────────────────────────
// Document
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    ColResize,
    RowResize,
}

pub type ListenerId = u64;

/// Document-wide state a drag needs to own while it runs: the cursor and
/// the move/end listeners that follow the pointer outside the widget.
pub trait DocumentHost {
    fn cursor(&self) -> Cursor;
    fn set_cursor(&mut self, cursor: Cursor);
    fn add_drag_listeners(&mut self) -> ListenerId;
    fn remove_drag_listeners(&mut self, id: ListenerId);
    fn drag_listeners_installed(&self) -> bool;
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SashError {
    #[error("invalid sash size {weight} for pane {index}: proportional sizes must be at least 1")]
    InvalidSashSize { index: usize, weight: f32 },
    #[error("invalid length `{0}`")]
    InvalidLength(String),
    #[error("pane index {index} out of range (have {len})")]
    PaneOutOfRange { index: usize, len: usize },
    #[error("document is already captured by another drag")]
    DocumentBusy,
}
