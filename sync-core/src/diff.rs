//! Change detection between consecutive derived views.

use crate::view::DerivedView;

/// A derived value that changed between two views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    /// Board contents differ.
    BoardChanged,
    /// Whether it is the local participant's turn differs.
    TurnChanged,
}

/// Compare two views and report what changed, board first.
///
/// A missing `previous` counts as an empty board that is not our turn, so
/// the first snapshot reports whatever it brings exactly once. Comparison is
/// by value; an equal recomputation reports nothing.
pub fn diff(previous: Option<&DerivedView>, next: &DerivedView) -> Vec<Change> {
    let baseline;
    let previous = match previous {
        Some(view) => view,
        None => {
            baseline = DerivedView::empty();
            &baseline
        }
    };

    let mut changes = Vec::with_capacity(2);
    if previous.board != next.board {
        changes.push(Change::BoardChanged);
    }
    if previous.is_local_turn != next.is_local_turn {
        changes.push(Change::TurnChanged);
    }
    changes
}
