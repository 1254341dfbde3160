//! Order maintenance across the visible/hidden partition
//!
//! Visible and hidden panels share one `order` field. After any reorder the
//! visible panels occupy `0..n` and the hidden ones `n..n+m`, each range
//! dense and in its previous relative order, so sorting a whole layout by
//! `order` always yields the visible panels first.

use crate::panel::PanelConfig;

/// Indices into `panels` of the (visible, hidden) partitions, each sorted by
/// current order. Stable for equal order values.
fn partitions(panels: &[PanelConfig]) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..panels.len()).collect();
    indices.sort_by_key(|&i| panels[i].order);
    indices.into_iter().partition(|&i| panels[i].visible)
}

/// Returns whether any order value changed
fn assign(panels: &mut Vec<PanelConfig>, visible: &[usize], hidden: &[usize]) -> bool {
    let mut changed = false;
    for (order, &i) in visible.iter().chain(hidden).enumerate() {
        changed |= panels[i].order != order;
        panels[i].order = order;
    }
    panels.sort_by_key(|p| p.order);
    changed
}

/// Move the panel at visible position `from` to visible position `to`
///
/// Positions index the visible-only sequence, not raw order values. The
/// move has splice semantics: the panel is removed first, shifting later
/// panels down, then inserted at `to`. Out-of-range positions leave the
/// panels untouched and return `false`, as does a move that leaves every
/// order value where it was.
pub fn reorder_visible(panels: &mut Vec<PanelConfig>, from: usize, to: usize) -> bool {
    let (mut visible, hidden) = partitions(panels);
    if from >= visible.len() || to >= visible.len() {
        return false;
    }

    let moved = visible.remove(from);
    visible.insert(to, moved);
    assign(panels, &visible, &hidden)
}

/// Restore dense numbering without moving anything
///
/// Returns whether any order value changed.
pub fn renumber(panels: &mut Vec<PanelConfig>) -> bool {
    let (visible, hidden) = partitions(panels);
    assign(panels, &visible, &hidden)
}

/// Whether `panels` satisfies the ordering invariant
///
/// Order values form `0..len` with every visible panel ahead of every
/// hidden one.
pub fn is_normalized(panels: &[PanelConfig]) -> bool {
    let mut orders: Vec<(usize, bool)> = panels.iter().map(|p| (p.order, p.visible)).collect();
    orders.sort_unstable_by_key(|&(order, _)| order);

    let dense = orders.iter().enumerate().all(|(i, &(order, _))| order == i);
    let visible_first = orders
        .windows(2)
        .all(|pair| pair[0].1 || !pair[1].1);
    dense && visible_first
}
