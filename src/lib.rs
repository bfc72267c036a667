//! Template-keyed caching of rendered subtrees, for fast switching between
//! multiple pieces of content at a single mount point.
//!
//! Rebuilding a subtree every time a mount point toggles between two templates
//! wastes the work that went into rendering each of them. [`CacheSwitcher`]
//! keeps the previously shown subtree alive in an off-tree [`RootPart`] keyed
//! by the template it was built from, and moves it back in verbatim the next
//! time that template shows up. The trade is memory for avoided rebuild cost.
//!
//! Identity is structural: a [`Template`] is a `static` description of a
//! template's fixed shape, and every [`Value`] built from the same definition
//! shares a cache key no matter what dynamic parameters it carries. Values
//! without a template (plain text, nothing) are opaque and never touch the
//! cache.
//!
//! ```rust
//! use subtree_cache::prelude::*;
//!
//! static CHECKED: Template = Template {
//!     name: "demo.rs:checked",
//!     roots: &[TemplateNode::Text("input is checked")],
//! };
//! static UNCHECKED: Template = Template {
//!     name: "demo.rs:unchecked",
//!     roots: &[TemplateNode::Text("input is not checked")],
//! };
//!
//! # fn main() -> Result<(), subtree_cache::SlotError> {
//! let mut renderer = Renderer::new();
//! let mut mount = renderer.create_root();
//! let mut switcher = CacheSwitcher::new();
//!
//! let slotted = switcher.update(&mut renderer, &mut mount, TemplateValue::new(CHECKED).into())?;
//! renderer.commit(&mut mount, slotted)?;
//! let first = mount.slot().unwrap().id();
//!
//! let slotted = switcher.update(&mut renderer, &mut mount, TemplateValue::new(UNCHECKED).into())?;
//! renderer.commit(&mut mount, slotted)?;
//!
//! let slotted = switcher.update(&mut renderer, &mut mount, TemplateValue::new(CHECKED).into())?;
//! renderer.commit(&mut mount, slotted)?;
//!
//! // The subtree for CHECKED was reused, not rebuilt.
//! assert_eq!(mount.slot().unwrap().id(), first);
//! # Ok(()) }
//! ```

mod cache;
mod error;
mod nodes;
mod part;
mod render;
mod template;

pub(crate) mod innerlude {
    pub use crate::cache::*;
    pub use crate::error::*;
    pub use crate::nodes::*;
    pub use crate::part::*;
    pub use crate::render::*;
    pub use crate::template::*;
}

pub use crate::innerlude::{
    CacheSwitcher, ChildPart, Committed, ElementId, PartId, RenderedAttribute, RenderedNode,
    RenderedValue, Renderer, RootPart, SlotError, Slotted, Template, TemplateAttribute,
    TemplateNode, TemplateValue, Value,
};

pub mod prelude {
    pub use crate::innerlude::{
        CacheSwitcher, ChildPart, Committed, ElementId, PartId, RenderedNode, RenderedValue,
        Renderer, RootPart, SlotError, Slotted, Template, TemplateAttribute, TemplateNode,
        TemplateValue, Value,
    };
}
