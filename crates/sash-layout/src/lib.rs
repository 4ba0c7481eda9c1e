// Sash box layout engine.
// Turns a list of declared sashes into flex attributes, pixel sizes and
// rects, and applies splitter drags to adjacent pairs of panes.

mod flex;
mod pane;

use sash_core::{
    Axis, FlexAttrs, Length, PaneKey, Rect, Sash, SashDescriptor, SashError, SizeMap,
};

use flex::{clamp_size, FlexItem};
use pane::{normalize, visible_weight_total, Committed, PaneSlot};

// ──────────────────────────────────────────────
// SashLayout
// ──────────────────────────────────────────────

/// A divider between two consecutive visible panes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    pub before: usize,
    pub after: usize,
    pub rect: Rect,
}

/// State held while splitters are being dragged.
#[derive(Debug, Clone, Copy)]
struct Sashing {
    /// Container extent when the session started; caps pane sizes.
    extent: f32,
    /// Weight total of the visible proportional panes before pinning.
    weight_total: f32,
}

pub struct SashLayout {
    axis: Axis,
    pub(crate) panes: Vec<PaneSlot>,
    container: Rect,
    sashing: Option<Sashing>,
}

impl SashLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            panes: Vec::new(),
            container: Rect::new(0.0, 0.0, 0.0, 0.0),
            sashing: None,
        }
    }

    pub fn with_sashes(axis: Axis, descriptors: &[SashDescriptor]) -> Result<Self, SashError> {
        let mut layout = Self::new(axis);
        layout.set_sashes(descriptors)?;
        Ok(layout)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Main-axis extent of the container.
    pub fn extent(&self) -> f32 {
        self.axis.extent(self.container.size())
    }

    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn sash(&self, index: usize) -> Option<&Sash> {
        self.panes.get(index).map(|p| &p.sash)
    }

    /// Flex attributes of a visible pane.
    pub fn flex(&self, index: usize) -> Option<FlexAttrs> {
        self.panes
            .get(index)
            .filter(|p| p.is_visible())
            .map(|p| p.flex)
    }

    /// Key the pane is reported under: its configured key, or its position.
    pub fn pane_key(&self, index: usize) -> PaneKey {
        match self.panes.get(index).and_then(|p| p.sash.key.as_ref()) {
            Some(key) => PaneKey::Key(key.clone()),
            None => PaneKey::Index(index),
        }
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.panes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_visible())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether size transitions should run for a pane. Always off mid-drag.
    pub fn transitions_enabled(&self, index: usize) -> bool {
        self.sashing.is_none() && self.panes.get(index).is_some_and(|p| p.sash.animate)
    }

    // ── Pane list ──────────────────────────────

    /// Replace the whole pane list. Committed sizes from earlier gestures are
    /// discarded. On error the previous list is kept.
    pub fn set_sashes(&mut self, descriptors: &[SashDescriptor]) -> Result<(), SashError> {
        let mut panes = descriptors
            .iter()
            .map(|d| Sash::from_descriptor(d).map(PaneSlot::new))
            .collect::<Result<Vec<_>, _>>()?;
        if let Err(e) = normalize(&mut panes) {
            log::warn!("rejecting sash configuration: {}", e);
            return Err(e);
        }
        self.sashing = None;
        self.panes = panes;
        Ok(())
    }

    pub fn push(&mut self, sash: Sash) -> Result<usize, SashError> {
        let index = self.panes.len();
        self.insert(index, sash)?;
        Ok(index)
    }

    pub fn insert(&mut self, index: usize, sash: Sash) -> Result<(), SashError> {
        if index > self.panes.len() {
            return Err(SashError::PaneOutOfRange {
                index,
                len: self.panes.len(),
            });
        }
        self.panes.insert(index, PaneSlot::new(sash));
        if let Err(e) = self.recompute() {
            self.panes.remove(index);
            self.recompute()?;
            return Err(e);
        }
        Ok(())
    }

    /// Remove a pane; the remaining proportional panes are re-normalized so
    /// no gap opens where it was.
    pub fn remove(&mut self, index: usize) -> Result<Sash, SashError> {
        self.check_index(index)?;
        let slot = self.panes.remove(index);
        self.recompute()?;
        Ok(slot.sash)
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<(), SashError> {
        self.check_index(index)?;
        self.panes[index].sash.visible = visible;
        self.recompute()
    }

    /// Recompute every pane's flex attributes. Cancels a running sashing
    /// session.
    pub fn recompute(&mut self) -> Result<(), SashError> {
        if self.sashing.take().is_some() {
            log::debug!("pane list changed mid-drag, dropping pinned sizes");
        }
        normalize(&mut self.panes)
    }

    fn check_index(&self, index: usize) -> Result<(), SashError> {
        if index < self.panes.len() {
            Ok(())
        } else {
            Err(SashError::PaneOutOfRange {
                index,
                len: self.panes.len(),
            })
        }
    }

    // ── Resolution ─────────────────────────────

    /// Pixel size of every visible pane along the main axis.
    pub fn compute_sizes(&self) -> Vec<(usize, f32)> {
        let extent = self.extent();
        let visible = self.visible_indices();
        let items: Vec<FlexItem> = visible
            .iter()
            .map(|&i| {
                let pane = &self.panes[i];
                FlexItem {
                    basis: pane.flex.basis.resolve(extent),
                    grow: pane.flex.grow,
                    shrink: pane.flex.shrink,
                    min: pane.min_px(extent),
                }
            })
            .collect();
        let sizes = flex::resolve(&items, extent);
        visible.into_iter().zip(sizes).collect()
    }

    /// Rect of every visible pane inside the container.
    pub fn compute(&self) -> Vec<(PaneKey, Rect)> {
        let mut offset = 0.0;
        self.compute_sizes()
            .into_iter()
            .map(|(i, size)| {
                let rect = self.axis.span(self.container, offset, size);
                offset += size;
                (self.pane_key(i), rect)
            })
            .collect()
    }

    /// Hit rects of the splitters between consecutive visible panes. Splitters
    /// take no space of their own; each rect is centred on the boundary.
    pub fn dividers(&self, hit_size: f32) -> Vec<Divider> {
        let sizes = self.compute_sizes();
        let mut offset = 0.0;
        let mut out = Vec::with_capacity(sizes.len().saturating_sub(1));
        for pair in sizes.windows(2) {
            let (before, size) = pair[0];
            let (after, _) = pair[1];
            offset += size;
            out.push(Divider {
                before,
                after,
                rect: self.axis.span(self.container, offset - hit_size / 2.0, hit_size),
            });
        }
        out
    }

    pub fn size_map(&self) -> SizeMap {
        let mut map = SizeMap::new();
        for (i, size) in self.compute_sizes() {
            map.insert(self.pane_key(i), size);
        }
        map
    }

    // ── Sashing session ────────────────────────

    pub fn is_sashing(&self) -> bool {
        self.sashing.is_some()
    }

    /// Pin proportional panes to their current pixel sizes so drags can work
    /// in pixel deltas. No-op if a session is already running.
    pub fn begin_sashing(&mut self) {
        if self.sashing.is_some() {
            return;
        }
        let extent = self.extent();
        let weight_total = visible_weight_total(&self.panes);
        for (i, size) in self.compute_sizes() {
            let pane = &mut self.panes[i];
            if !pane.is_fixed() {
                pane.flex = FlexAttrs::fixed(Length::Px(size));
            }
        }
        log::debug!("sashing started, extent {}", extent);
        self.sashing = Some(Sashing {
            extent,
            weight_total,
        });
    }

    /// Move the boundary between `before` and `after` by `distance` pixels.
    /// Both panes are clamped to their minimums and to what the pair can give
    /// up. Returns the new sizes of the pair.
    pub fn resize_pair(
        &mut self,
        before: usize,
        after: usize,
        distance: f32,
    ) -> Result<(f32, f32), SashError> {
        self.check_index(before)?;
        self.check_index(after)?;
        self.begin_sashing();

        let (s1, s2) = self.pair_sizes(before, after);
        let extent = self.extent();
        let cap = self.sashing.map_or(extent, |s| s.extent);
        let m1 = self.panes[before].min_px(extent);
        let m2 = self.panes[after].min_px(extent);

        let size1 = clamp_size((s1 + distance).round(), m1, s1 + s2 - m2).min(cap);
        let size2 = clamp_size((s2 - distance).round(), m2, s1 + s2 - m1).min(cap);

        self.pin(before, size1);
        self.pin(after, size2);
        Ok((size1, size2))
    }

    /// Give two adjacent panes the average of their sizes and commit.
    pub fn reset_pair(&mut self, before: usize, after: usize) -> Result<SizeMap, SashError> {
        self.check_index(before)?;
        self.check_index(after)?;
        self.begin_sashing();

        let (s1, s2) = self.pair_sizes(before, after);
        let average = (s1 + s2) / 2.0;
        self.pin(before, average);
        self.pin(after, average);
        self.end_sashing()
    }

    /// Unpin proportional panes and report the final sizes. Each pane's
    /// final pixel size is scaled back into weight units by the ratio of the
    /// weights to the pixels the proportional panes held, so panes shown or
    /// added later still compare against them by their declared weight.
    pub fn end_sashing(&mut self) -> Result<SizeMap, SashError> {
        let sizes = self.compute_sizes();
        let weight_total = match self.sashing {
            Some(session) => session.weight_total,
            None => visible_weight_total(&self.panes),
        };
        let px_total: f32 = sizes
            .iter()
            .filter(|(i, _)| !self.panes[*i].is_fixed())
            .map(|(_, size)| size)
            .sum();

        let mut map = SizeMap::new();
        for &(i, size) in &sizes {
            let pane = &mut self.panes[i];
            if pane.is_fixed() {
                if pane.resized {
                    pane.committed = Some(Committed::Fixed(size));
                }
            } else if px_total > 0.0 {
                pane.committed = Some(Committed::Share(size * weight_total / px_total));
            }
            map.insert(self.pane_key(i), size);
        }
        self.sashing = None;
        normalize(&mut self.panes)?;
        log::debug!("sashing ended: {:?}", map);
        Ok(map)
    }

    fn pair_sizes(&self, before: usize, after: usize) -> (f32, f32) {
        let sizes = self.compute_sizes();
        let size_of = |index: usize| {
            sizes
                .iter()
                .find(|(i, _)| *i == index)
                .map_or(0.0, |(_, s)| *s)
        };
        (size_of(before), size_of(after))
    }

    fn pin(&mut self, index: usize, size: f32) {
        let pane = &mut self.panes[index];
        pane.flex = FlexAttrs::fixed(Length::Px(size));
        pane.resized = true;
    }
}

impl Default for SashLayout {
    fn default() -> Self {
        Self::new(Axis::Row)
    }
}
