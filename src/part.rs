//! Slot owners: the live mount point, the dedicated child parts committed under
//! it, and the detached roots the cache stores evicted subtrees in.
//!
//! A part owns its rendered content outright, so relocating a subtree between
//! owners is an ownership move of the part, never a copy or a rebuild.

use crate::innerlude::*;

/// Stable identity of a child part instance, allocated by the [`Renderer`].
///
/// Survives relocation between owners: a subtree restored from the cache keeps
/// the `PartId` it was first rendered with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PartId(pub usize);

/// What a part's single slot currently holds.
#[derive(Debug, Default)]
pub enum Committed {
    /// Nothing has been rendered into the slot yet.
    #[default]
    Nothing,

    /// A rendered leaf value.
    Node(RenderedValue),

    /// The dedicated child part a [`Slotted`] value commits through.
    Slot(Box<ChildPart>),
}

/// An owned, relocatable rendered subtree bound to one slot.
#[derive(Debug)]
pub struct ChildPart {
    id: PartId,
    connected: bool,
    committed: Committed,
}

impl ChildPart {
    pub(crate) fn new(id: PartId, connected: bool) -> Self {
        Self {
            id,
            connected,
            committed: Committed::Nothing,
        }
    }

    pub fn id(&self) -> PartId {
        self.id
    }

    /// Whether this part is attached to the visible tree. Cached subtrees are
    /// marked disconnected so connection-sensitive behavior is suspended while
    /// they sit off-tree.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn committed(&self) -> &Committed {
        &self.committed
    }

    pub(crate) fn committed_mut(&mut self) -> &mut Committed {
        &mut self.committed
    }

    pub(crate) fn replace_committed(&mut self, committed: Committed) -> Committed {
        std::mem::replace(&mut self.committed, committed)
    }

    pub(crate) fn into_committed(self) -> Committed {
        self.committed
    }

    /// The dedicated child part committed to this slot, if any.
    pub fn slot(&self) -> Option<&ChildPart> {
        match &self.committed {
            Committed::Slot(child) => Some(child),
            _ => None,
        }
    }

    pub fn has_slot(&self) -> bool {
        matches!(self.committed, Committed::Slot(_))
    }

    /// Detach the committed child part from this slot, leaving it empty.
    ///
    /// Fails if no child part is committed, which means the slot bookkeeping
    /// was corrupted from outside.
    pub fn take_slot(&mut self) -> Result<Box<ChildPart>, SlotError> {
        match std::mem::take(&mut self.committed) {
            Committed::Slot(child) => Ok(child),
            other => {
                self.committed = other;
                Err(SlotError::EmptySlot { part: self.id })
            }
        }
    }

    /// Attach an existing child part to this slot and record it as committed.
    ///
    /// The child adopts this part's connectedness, recursively. Fails if the
    /// slot already holds content.
    pub fn insert_child(&mut self, mut child: Box<ChildPart>) -> Result<(), SlotError> {
        if !matches!(self.committed, Committed::Nothing) {
            return Err(SlotError::OccupiedSlot { part: self.id });
        }
        child.set_connected(self.connected);
        self.committed = Committed::Slot(child);
        Ok(())
    }

    /// Mark this part and everything committed under it connected or not.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        if let Committed::Slot(child) = &mut self.committed {
            child.set_connected(connected);
        }
    }
}

/// An off-tree render root used purely as cache storage, never part of the
/// visible tree. Created disconnected by [`Renderer::render_nothing_root`].
#[derive(Debug)]
pub struct RootPart {
    part: ChildPart,
}

impl RootPart {
    pub(crate) fn new(part: ChildPart) -> Self {
        Self { part }
    }

    pub(crate) fn into_part(self) -> ChildPart {
        self.part
    }
}

impl std::ops::Deref for RootPart {
    type Target = ChildPart;

    fn deref(&self) -> &Self::Target {
        &self.part
    }
}

impl std::ops::DerefMut for RootPart {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.part
    }
}
