use crate::innerlude::*;

/// A content value handed to the switcher on every update of its mount point.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An identified render of a template: static shape plus dynamic parameters.
    Template(TemplateValue),

    /// Opaque content with no stable identity. Never cached.
    Text(String),

    /// An inert value that renders nothing. Used to seed detached roots and to
    /// clear a slot.
    Nothing,
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Value::Template(_))
    }

    /// Extract the identity key of this value.
    ///
    /// Only identified template values carry a key. Two renders of the same
    /// template with different parameters share a key; opaque values have none.
    pub fn template_key(&self) -> Option<Template> {
        match self {
            Value::Template(value) => Some(value.template),
            _ => None,
        }
    }
}

impl From<TemplateValue> for Value {
    fn from(value: TemplateValue) -> Self {
        Value::Template(value)
    }
}

/// A reference to a template along with the dynamic parameters needed to
/// hydrate it.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateValue {
    /// The static shape this value was built from. This is the cache key.
    pub template: Template,

    /// The dynamic parts of the template, indexed by the holes in its shape.
    pub dynamic: Box<[String]>,
}

impl TemplateValue {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            dynamic: Box::default(),
        }
    }

    pub fn with_dynamic<I, S>(mut self, dynamic: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dynamic = dynamic.into_iter().map(Into::into).collect();
        self
    }
}

/// A rendering instruction that wraps the value handed to
/// [`CacheSwitcher::update`](crate::CacheSwitcher::update).
///
/// Committing a `Slotted` value forces the engine to keep a dedicated child
/// part under the mount point, so the switcher can address "the one child slot
/// under my control" even when the mount point manages other children.
#[derive(Debug)]
pub struct Slotted(Value);

impl Slotted {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub(crate) fn into_value(self) -> Value {
        self.0
    }
}

/// The materialized instance of a value, owned by the part it was rendered
/// into. Moving the owning part between a mount point and a cache root moves
/// this instance with it, untouched.
#[derive(Debug)]
pub enum RenderedValue {
    /// A rendered template instance.
    Template {
        template: Template,
        roots: Vec<RenderedNode>,

        /// The parameters currently shown, patched in place when the same
        /// template is re-rendered.
        dynamic: Box<[String]>,
    },

    /// A rendered opaque text node.
    Text { id: ElementId, text: String },
}

impl RenderedValue {
    /// The template this instance was hydrated from, if any.
    pub fn template(&self) -> Option<Template> {
        match self {
            RenderedValue::Template { template, .. } => Some(*template),
            RenderedValue::Text { .. } => None,
        }
    }
}

/// A node created at render time.
#[derive(Debug)]
pub enum RenderedNode {
    Element {
        id: ElementId,
        tag: &'static str,
        attrs: Vec<RenderedAttribute>,
        children: Vec<RenderedNode>,
    },
    Text {
        id: ElementId,
        text: String,
    },
}

impl RenderedNode {
    pub fn id(&self) -> ElementId {
        match self {
            RenderedNode::Element { id, .. } | RenderedNode::Text { id, .. } => *id,
        }
    }
}

#[derive(Debug)]
pub struct RenderedAttribute {
    pub name: &'static str,
    pub value: String,
}
