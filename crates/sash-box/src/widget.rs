use sash_core::{Axis, InputEvent, PaneKey, Rect, SashDescriptor, SashError, SizeMap, Vec2};
use sash_input::{SharedDocument, Splitter, SplitterEvent, SplitterSettings};
use sash_layout::{Divider, SashLayout};

// ──────────────────────────────────────────────
// SashBox
// ──────────────────────────────────────────────

/// A sash box container: the layout engine plus one splitter per divider.
///
/// Only one splitter of a box drags at a time. While one is active every
/// pointer event goes to it, and pointer-downs on other dividers are dropped.
pub struct SashBox {
    layout: SashLayout,
    splitters: Vec<Splitter>,
    document: SharedDocument,
    settings: SplitterSettings,
    active: Option<usize>,
}

impl SashBox {
    pub fn new(
        axis: Axis,
        descriptors: &[SashDescriptor],
        document: SharedDocument,
        settings: SplitterSettings,
    ) -> Result<Self, SashError> {
        let layout = SashLayout::with_sashes(axis, descriptors)?;
        let mut sash_box = Self {
            layout,
            splitters: Vec::new(),
            document,
            settings,
            active: None,
        };
        sash_box.sync_splitters();
        Ok(sash_box)
    }

    pub fn layout(&self) -> &SashLayout {
        &self.layout
    }

    /// Index of the divider currently being dragged.
    pub fn active_splitter(&self) -> Option<usize> {
        self.active
    }

    pub fn dividers(&self) -> Vec<Divider> {
        self.layout.dividers(self.settings.hit_size)
    }

    pub fn compute(&self) -> Vec<(PaneKey, Rect)> {
        self.layout.compute()
    }

    pub fn set_container(&mut self, container: Rect) {
        self.layout.set_container(container);
    }

    /// Replace the pane list. A drag in progress is abandoned.
    pub fn set_sashes(&mut self, descriptors: &[SashDescriptor]) -> Result<(), SashError> {
        self.layout.set_sashes(descriptors)?;
        self.sync_splitters();
        Ok(())
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<(), SashError> {
        self.layout.set_visible(index, visible)?;
        self.sync_splitters();
        Ok(())
    }

    /// Feed one host event. Returns the final size map when a gesture or a
    /// reset completes.
    pub fn handle(&mut self, event: InputEvent) -> Result<Option<SizeMap>, SashError> {
        match event {
            InputEvent::Resize { size } => {
                let container = self.layout.container();
                self.layout
                    .set_container(Rect::new(container.x, container.y, size.width, size.height));
                Ok(None)
            }
            InputEvent::PointerDown { position, .. } | InputEvent::DoubleClick { position } => {
                if let Some(active) = self.active {
                    log::debug!("splitter {} is dragging, ignoring {:?}", active, event);
                    return Ok(None);
                }
                let Some(index) = self.divider_at(position) else {
                    return Ok(None);
                };
                self.dispatch(index, event)
            }
            InputEvent::PointerMove { .. }
            | InputEvent::PointerUp { .. }
            | InputEvent::PointerCancel => match self.active {
                Some(index) => self.dispatch(index, event),
                None => Ok(None),
            },
        }
    }

    fn dispatch(&mut self, index: usize, event: InputEvent) -> Result<Option<SizeMap>, SashError> {
        let splitter = &mut self.splitters[index];
        let response = splitter.handle(event);
        self.active = if splitter.is_dragging() {
            Some(index)
        } else {
            None
        };

        let mut result = None;
        for splitter_event in response.events {
            if let Some(map) = self.apply(index, splitter_event)? {
                result = Some(map);
            }
        }
        Ok(result)
    }

    fn apply(&mut self, index: usize, event: SplitterEvent) -> Result<Option<SizeMap>, SashError> {
        let Some(divider) = self.dividers().get(index).copied() else {
            log::warn!("splitter {} has no divider", index);
            return Ok(None);
        };

        match event {
            SplitterEvent::Start => {
                self.layout.begin_sashing();
                Ok(None)
            }
            SplitterEvent::Move { distance, position } => {
                let axis = self.layout.axis();
                // Hold the boundary until the pointer catches up with it
                // after overshooting a clamp.
                if distance > 0.0 && position < axis.start(divider.rect) {
                    return Ok(None);
                }
                if distance < 0.0 && position > axis.end(divider.rect) {
                    return Ok(None);
                }
                self.layout
                    .resize_pair(divider.before, divider.after, distance)?;
                Ok(None)
            }
            SplitterEvent::End => self.layout.end_sashing().map(Some),
            SplitterEvent::Reset => self.layout.reset_pair(divider.before, divider.after).map(Some),
        }
    }

    fn divider_at(&self, position: Vec2) -> Option<usize> {
        self.dividers()
            .iter()
            .position(|divider| divider.rect.contains(position))
    }

    /// One splitter per divider. Existing splitters are dropped, which
    /// releases the document if one was dragging.
    fn sync_splitters(&mut self) {
        let count = self.dividers().len();
        let axis = self.layout.axis();
        self.active = None;
        self.splitters.clear();
        self.splitters.extend(
            (0..count).map(|_| Splitter::new(axis, self.document.clone(), self.settings)),
        );
    }
}
