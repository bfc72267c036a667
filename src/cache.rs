//! Fast switching between templates at one mount point, by parking rendered
//! subtrees off-tree instead of destroying them.

use rustc_hash::FxHashMap;

use crate::innerlude::*;

/// A cache switcher bound to one mount point.
///
/// On every update the switcher compares the identity key of the new value
/// against the previous one. When the template changes, the live subtree is
/// moved into an off-tree detached root keyed by its template, and any subtree
/// previously cached for the new template is moved back in. Toggling back to a
/// template therefore reuses its earlier instance verbatim instead of
/// rebuilding it.
///
/// The cache holds at most one subtree per distinct template and has no
/// eviction policy, no size bound, and no expiry: entries live until the
/// switcher is torn down with its mount point. A mount point that cycles
/// through many distinct templates grows the table accordingly; that is an
/// accepted trade-off of memory for avoided rebuild cost.
#[derive(Default)]
pub struct CacheSwitcher {
    /// One detached root per template seen at this mount point, created lazily
    /// on first eviction.
    table: FxHashMap<Template, RootPart>,

    /// Identity key of the previously rendered value. `None` after an opaque
    /// value: those are never cached and their identity is not tracked.
    previous: Option<Template>,
}

impl CacheSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to the mount point receiving a new value.
    ///
    /// Moves subtrees between the mount point and the cache as the identity
    /// keys dictate, then returns the [`Slotted`] instruction the engine must
    /// commit to `container` to finish the pass. A fresh subtree for a
    /// never-seen (or opaque) value is built on that normal render path, not
    /// here.
    ///
    /// Errors surface corruption of the part tree between updates and are not
    /// locally recoverable; the tree is left as the failed primitive found it.
    pub fn update(
        &mut self,
        renderer: &mut Renderer,
        container: &mut ChildPart,
        value: Value,
    ) -> Result<Slotted, SlotError> {
        let prev_key = self.previous;
        let new_key = value.template_key();

        // The previous value was identified and the new one is a different
        // template (or opaque): park the live child part in the cache.
        if let Some(prev) = prev_key {
            if new_key != Some(prev) {
                let child = container.take_slot()?;
                tracing::trace!(template = prev.name, "moving live subtree into cache");
                let root = self
                    .table
                    .entry(prev)
                    .or_insert_with(|| renderer.render_nothing_root());
                root.insert_child(child)?;
            }
        }

        // The new value is identified and differs from the previous template:
        // pull its cached subtree back into the mount point, if one exists.
        if let Some(new) = new_key {
            if prev_key != Some(new) {
                if let Some(root) = self.table.get_mut(&new) {
                    let cached = root.take_slot()?;
                    tracing::trace!(template = new.name, "restoring cached subtree");
                    renderer.clear(container);
                    container.insert_child(cached)?;
                }
            }
        }

        self.previous = new_key;

        Ok(Slotted::new(value))
    }

    /// The detached root holding this template's cached subtree, if the
    /// template has ever been evicted at this mount point. The root stays in
    /// the table, empty, while its subtree is live.
    pub fn cached_root(&self, template: &Template) -> Option<&RootPart> {
        self.table.get(template)
    }

    /// Whether a subtree for this template is currently parked in the cache.
    pub fn is_cached(&self, template: &Template) -> bool {
        self.cached_root(template).is_some_and(|root| root.has_slot())
    }

    /// Number of distinct templates with a detached root in the table.
    pub fn cached(&self) -> usize {
        self.table.len()
    }

    /// Drop every cached subtree and detached root, reclaiming their ids.
    ///
    /// Entries otherwise live exactly as long as the switcher; call this when
    /// the owning mount point is torn down.
    pub fn teardown(&mut self, renderer: &mut Renderer) {
        for (_, root) in self.table.drain() {
            renderer.reclaim_root(root);
        }
        self.previous = None;
    }
}
