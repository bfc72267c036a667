use std::hash::Hash;

/// A template's static structure, created once and shared by every render of it.
///
/// Templates are meant to live in `static` data: two [`Value`](crate::Value)s
/// built from the same `static` definition compare equal here no matter what
/// dynamic parameters they carry, which is exactly the property the cache
/// table keys on.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// A unique identifier for this template, usually `file:line:col`.
    pub name: &'static str,

    /// All the roots of the template.
    pub roots: &'static [TemplateNode],
}

impl Eq for Template {}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Template {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// A node in a template's static shape, with numbered holes for dynamic parts.
#[derive(Debug, Clone, Copy)]
pub enum TemplateNode {
    Element {
        tag: &'static str,
        attrs: &'static [TemplateAttribute],
        children: &'static [TemplateNode],
    },
    Text(&'static str),

    /// A hole filled at render time from the value's dynamic parameter table.
    Dynamic(usize),
}

#[derive(Debug, Clone, Copy)]
pub enum TemplateAttribute {
    Static {
        name: &'static str,
        value: &'static str,
    },

    /// A hole filled at render time from the value's dynamic parameter table.
    Dynamic { name: &'static str, id: usize },
}
