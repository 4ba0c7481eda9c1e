use sash_core::{FlexAttrs, Length, Sash, SashError, SashSize};

// ──────────────────────────────────────────────
// PaneSlot: one declared sash plus derived state
// ──────────────────────────────────────────────

/// Size committed by a finished gesture. Overrides the declared size until
/// the pane list is replaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Committed {
    Fixed(f32),
    Share(f32),
}

#[derive(Debug, Clone)]
pub(crate) struct PaneSlot {
    pub(crate) sash: Sash,
    pub(crate) committed: Option<Committed>,
    pub(crate) flex: FlexAttrs,
    /// Touched by the current sashing session.
    pub(crate) resized: bool,
}

impl PaneSlot {
    pub(crate) fn new(sash: Sash) -> Self {
        Self {
            sash,
            committed: None,
            flex: FlexAttrs::fixed(Length::Px(0.0)),
            resized: false,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.sash.visible
    }

    pub(crate) fn is_fixed(&self) -> bool {
        match self.committed {
            Some(Committed::Fixed(_)) => true,
            Some(Committed::Share(_)) => false,
            None => self.sash.size.is_fixed(),
        }
    }

    /// Growth weight before normalization. Declared weights below 1 are a
    /// configuration error; committed shares are taken as-is.
    pub(crate) fn weight(&self, index: usize) -> Result<Option<f32>, SashError> {
        match (self.committed, self.sash.size) {
            (Some(Committed::Share(share)), _) => Ok(Some(share.max(0.0))),
            (Some(Committed::Fixed(_)), _) | (None, SashSize::Fixed(_)) => Ok(None),
            (None, SashSize::Proportional(weight)) => {
                if weight.is_finite() && weight >= 1.0 {
                    Ok(Some(weight))
                } else {
                    Err(SashError::InvalidSashSize { index, weight })
                }
            }
        }
    }

    /// Basis of a fixed pane; `None` for proportional panes.
    pub(crate) fn fixed_basis(&self) -> Option<Length> {
        match (self.committed, self.sash.size) {
            (Some(Committed::Fixed(px)), _) => Some(Length::Px(px)),
            (Some(Committed::Share(_)), _) => None,
            (None, SashSize::Fixed(length)) => Some(length),
            (None, SashSize::Proportional(_)) => None,
        }
    }

    /// Minimum size in pixels, resolved against the current extent.
    pub(crate) fn min_px(&self, extent: f32) -> f32 {
        self.sash.min_size.map_or(0.0, |min| min.resolve(extent))
    }
}

/// Sum of the growth weights of the visible proportional panes.
pub(crate) fn visible_weight_total(panes: &[PaneSlot]) -> f32 {
    panes
        .iter()
        .enumerate()
        .filter(|(_, pane)| pane.is_visible())
        .filter_map(|(index, pane)| pane.weight(index).ok().flatten())
        .sum()
}

// ──────────────────────────────────────────────
// Normalization
// ──────────────────────────────────────────────

/// Recompute flex attributes for every pane. Proportional panes' growth
/// factors are scaled to sum to 1 across the visible panes. Nothing is
/// written unless every weight validates.
pub(crate) fn normalize(panes: &mut [PaneSlot]) -> Result<(), SashError> {
    let mut weights = Vec::with_capacity(panes.len());
    for (index, pane) in panes.iter().enumerate() {
        weights.push(pane.weight(index)?);
    }

    let total: f32 = panes
        .iter()
        .zip(&weights)
        .filter(|(pane, _)| pane.is_visible())
        .filter_map(|(_, w)| *w)
        .sum();

    for (pane, weight) in panes.iter_mut().zip(weights) {
        pane.resized = false;
        pane.flex = match (weight, pane.fixed_basis()) {
            (Some(w), _) => {
                let grow = if total > 0.0 { w / total } else { 0.0 };
                FlexAttrs::proportional(grow)
            }
            (None, Some(basis)) => FlexAttrs::fixed(basis),
            (None, None) => FlexAttrs::fixed(Length::Px(0.0)),
        };
    }
    Ok(())
}
