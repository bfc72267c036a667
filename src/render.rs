//! The minimal host engine the switcher consumes: id allocation, the normal
//! render path for values, and the commit path for [`Slotted`] instructions.
//!
//! The switcher itself never builds or destroys rendered content. It only
//! relocates already-rendered child parts; everything that touches rendered
//! nodes goes through here.

use slab::Slab;

use crate::innerlude::*;

/// Stable identity of a rendered node, allocated from the renderer's arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ElementId(pub usize);

/// Allocates part and element ids and renders values into parts.
///
/// Rendering a value over an existing instance of the *same* template patches
/// the dynamic holes in place and keeps every id, which is what makes cached
/// subtrees observably reused rather than rebuilt.
#[derive(Default)]
pub struct Renderer {
    parts: Slab<()>,
    elements: Slab<()>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a live mount point attached to the visible tree.
    pub fn create_root(&mut self) -> ChildPart {
        let id = self.next_part();
        ChildPart::new(id, true)
    }

    /// Render an inert value into a fresh off-tree root and mark it
    /// disconnected. The cache parks evicted subtrees in roots like this one.
    pub fn render_nothing_root(&mut self) -> RootPart {
        let id = self.next_part();
        let mut part = ChildPart::new(id, true);
        self.render(&mut part, Value::Nothing);
        part.set_connected(false);
        RootPart::new(part)
    }

    /// Materialize or maintain the dedicated child part a [`Slotted`]
    /// instruction commits through, then render the wrapped value into it.
    ///
    /// If the child part already holds an instance of the wrapped value's
    /// template (because the switcher restored it from the cache, or because
    /// the template never changed), the render is an in-place patch.
    pub fn commit(&mut self, container: &mut ChildPart, slotted: Slotted) -> Result<(), SlotError> {
        let value = slotted.into_value();
        let mut child = match container.take_slot() {
            Ok(child) => child,
            // No dedicated child yet: dispose whatever else the slot holds and
            // allocate one.
            Err(_) => {
                self.clear(container);
                let id = self.next_part();
                Box::new(ChildPart::new(id, false))
            }
        };
        self.render(&mut child, value);
        container.insert_child(child)
    }

    /// The normal render path: show `value` in `part`, reusing the committed
    /// instance when the value's shape allows it.
    pub fn render(&mut self, part: &mut ChildPart, value: Value) {
        match (part.committed_mut(), &value) {
            (Committed::Node(RenderedValue::Text { text, .. }), Value::Text(new)) => {
                text.clone_from(new);
                return;
            }
            (
                Committed::Node(RenderedValue::Template {
                    template,
                    roots,
                    dynamic,
                }),
                Value::Template(new),
            ) if *template == new.template => {
                patch_roots(roots, template.roots, &new.dynamic);
                dynamic.clone_from(&new.dynamic);
                return;
            }
            (Committed::Nothing, Value::Nothing) => return,
            _ => {}
        }

        tracing::trace!(?value, "rendering fresh instance");
        let committed = self.create_value(value);
        let old = part.replace_committed(committed);
        self.reclaim_committed(old);
    }

    /// Remove and dispose a part's current content without caching it,
    /// reclaiming every id in the subtree. The part itself stays alive.
    pub fn clear(&mut self, part: &mut ChildPart) {
        let old = part.replace_committed(Committed::Nothing);
        self.reclaim_committed(old);
    }

    pub(crate) fn reclaim_root(&mut self, root: RootPart) {
        self.reclaim_part(root.into_part());
    }

    fn next_part(&mut self) -> PartId {
        PartId(self.parts.insert(()))
    }

    fn next_element(&mut self) -> ElementId {
        ElementId(self.elements.insert(()))
    }

    fn create_value(&mut self, value: Value) -> Committed {
        match value {
            Value::Nothing => Committed::Nothing,
            Value::Text(text) => Committed::Node(RenderedValue::Text {
                id: self.next_element(),
                text,
            }),
            Value::Template(value) => {
                let roots = value
                    .template
                    .roots
                    .iter()
                    .map(|node| self.create_node(node, &value.dynamic))
                    .collect();
                Committed::Node(RenderedValue::Template {
                    template: value.template,
                    roots,
                    dynamic: value.dynamic,
                })
            }
        }
    }

    fn create_node(&mut self, shape: &TemplateNode, dynamic: &[String]) -> RenderedNode {
        match *shape {
            TemplateNode::Element {
                tag,
                attrs,
                children,
            } => RenderedNode::Element {
                id: self.next_element(),
                tag,
                attrs: attrs
                    .iter()
                    .map(|attr| match *attr {
                        TemplateAttribute::Static { name, value } => RenderedAttribute {
                            name,
                            value: value.to_string(),
                        },
                        TemplateAttribute::Dynamic { name, id } => RenderedAttribute {
                            name,
                            value: dynamic_param(dynamic, id),
                        },
                    })
                    .collect(),
                children: children
                    .iter()
                    .map(|child| self.create_node(child, dynamic))
                    .collect(),
            },
            TemplateNode::Text(text) => RenderedNode::Text {
                id: self.next_element(),
                text: text.to_string(),
            },
            TemplateNode::Dynamic(id) => RenderedNode::Text {
                id: self.next_element(),
                text: dynamic_param(dynamic, id),
            },
        }
    }

    fn reclaim_committed(&mut self, committed: Committed) {
        match committed {
            Committed::Nothing => {}
            Committed::Node(value) => self.reclaim_value(value),
            Committed::Slot(child) => self.reclaim_part(*child),
        }
    }

    fn reclaim_part(&mut self, part: ChildPart) {
        let _ = self.parts.try_remove(part.id().0);
        self.reclaim_committed(part.into_committed());
    }

    fn reclaim_value(&mut self, value: RenderedValue) {
        match value {
            RenderedValue::Text { id, .. } => {
                let _ = self.elements.try_remove(id.0);
            }
            RenderedValue::Template { roots, .. } => {
                for node in roots {
                    self.reclaim_node(node);
                }
            }
        }
    }

    fn reclaim_node(&mut self, node: RenderedNode) {
        match node {
            RenderedNode::Element { id, children, .. } => {
                let _ = self.elements.try_remove(id.0);
                for child in children {
                    self.reclaim_node(child);
                }
            }
            RenderedNode::Text { id, .. } => {
                let _ = self.elements.try_remove(id.0);
            }
        }
    }
}

fn patch_roots(roots: &mut [RenderedNode], shape: &[TemplateNode], dynamic: &[String]) {
    debug_assert_eq!(roots.len(), shape.len());
    for (node, shape) in roots.iter_mut().zip(shape) {
        patch_node(node, shape, dynamic);
    }
}

fn patch_node(node: &mut RenderedNode, shape: &TemplateNode, dynamic: &[String]) {
    match (node, shape) {
        (
            RenderedNode::Element {
                attrs, children, ..
            },
            TemplateNode::Element {
                attrs: attr_shapes,
                children: child_shapes,
                ..
            },
        ) => {
            for (attr, shape) in attrs.iter_mut().zip(*attr_shapes) {
                if let TemplateAttribute::Dynamic { id, .. } = shape {
                    attr.value = dynamic_param(dynamic, *id);
                }
            }
            for (child, shape) in children.iter_mut().zip(*child_shapes) {
                patch_node(child, shape, dynamic);
            }
        }
        (RenderedNode::Text { text, .. }, TemplateNode::Dynamic(id)) => {
            *text = dynamic_param(dynamic, *id);
        }
        // Static text never changes between renders of the same template.
        (RenderedNode::Text { .. }, TemplateNode::Text(_)) => {}
        (node, shape) => {
            debug_assert!(
                false,
                "rendered node {node:?} does not match template shape {shape:?}"
            );
        }
    }
}

// Missing params render as empty text, same as a hole that was never filled.
fn dynamic_param(dynamic: &[String], id: usize) -> String {
    dynamic.get(id).cloned().unwrap_or_default()
}
