//! Category policy: which zone an item may be dropped into.

use crate::zone::Zone;

/// Whether an item currently in `source` may move to `target`.
///
/// Rules, first match wins:
/// 1. frozen items may go anywhere;
/// 2. anything may be frozen;
/// 3. an item may stay in (or be reordered within) its own zone;
/// 4. everything else is refused.
pub fn can_move(source: Zone, target: Zone) -> bool {
    match (source, target) {
        (Zone::Freezer, _) => true,
        (_, Zone::Freezer) => true,
        (source, target) => source == target,
    }
}

/// Drop check for a dragged payload whose category may be missing.
///
/// A payload without a category is refused.
pub fn can_drop(source: Option<Zone>, target: Zone) -> bool {
    match source {
        Some(source) => can_move(source, target),
        None => {
            tracing::warn!(target_zone = %target, "dragged item has no category, refusing drop");
            false
        }
    }
}
