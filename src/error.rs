use crate::innerlude::*;

/// Failure of a slot primitive.
///
/// These are not expected under normal operation; the switcher's moves are
/// pure bookkeeping over already-rendered structures. A failing primitive
/// means the part tree was manipulated from outside between updates, and the
/// error propagates to the caller with the tree left as the failed primitive
/// found it.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    #[error("no child part is committed to the slot of part {part:?}")]
    EmptySlot { part: PartId },

    #[error("the slot of part {part:?} already holds committed content")]
    OccupiedSlot { part: PartId },
}
