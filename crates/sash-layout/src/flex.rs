// Flex resolution along a single line, the way a box layout distributes a
// container's main-axis extent among its children.

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlexItem {
    pub(crate) basis: f32,
    pub(crate) grow: f32,
    pub(crate) shrink: f32,
    pub(crate) min: f32,
}

impl FlexItem {
    /// Weight for distributing free space; shrinking scales by basis.
    fn factor(&self, growing: bool) -> f32 {
        if growing {
            self.grow
        } else {
            self.shrink * self.basis
        }
    }
}

/// Distribute `extent` among `items`.
///
/// Positive free space goes to items by grow factor, negative free space is
/// taken by `shrink * basis`. Any item that would end below its minimum is
/// frozen there and the remaining space is redistributed among the rest.
pub(crate) fn resolve(items: &[FlexItem], extent: f32) -> Vec<f32> {
    let mut sizes: Vec<f32> = items.iter().map(|item| item.basis).collect();
    let mut frozen = vec![false; items.len()];

    for _ in 0..=items.len() {
        let used: f32 = items
            .iter()
            .zip(&sizes)
            .zip(&frozen)
            .map(|((item, size), frozen)| if *frozen { *size } else { item.basis })
            .sum();
        let free = extent - used;

        let growing = free >= 0.0;
        let total_factor: f32 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, frozen)| !**frozen)
            .map(|(item, _)| item.factor(growing))
            .sum();

        for (i, item) in items.iter().enumerate() {
            if frozen[i] {
                continue;
            }
            let share = if total_factor > 0.0 {
                free * item.factor(growing) / total_factor
            } else {
                0.0
            };
            sizes[i] = item.basis + share;
        }

        let mut violated = false;
        for (i, item) in items.iter().enumerate() {
            if !frozen[i] && sizes[i] < item.min {
                sizes[i] = item.min;
                frozen[i] = true;
                violated = true;
            }
        }
        if !violated {
            break;
        }
    }

    for size in &mut sizes {
        *size = size.max(0.0);
    }
    sizes
}

/// Like `f32::clamp`, but `min` takes precedence when `min > max`.
pub(crate) fn clamp_size(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
