//! Prove that switching a mount point between templates reuses cached
//! subtrees instead of rebuilding them.

use pretty_assertions::assert_eq;
use subtree_cache::prelude::*;

static T1: Template = Template {
    name: "cache_switch.rs:t1",
    roots: &[TemplateNode::Element {
        tag: "label",
        attrs: &[TemplateAttribute::Static {
            name: "class",
            value: "status",
        }],
        children: &[TemplateNode::Text("input is "), TemplateNode::Dynamic(0)],
    }],
};

static T2: Template = Template {
    name: "cache_switch.rs:t2",
    roots: &[TemplateNode::Element {
        tag: "div",
        attrs: &[],
        children: &[TemplateNode::Dynamic(0)],
    }],
};

fn t1(state: &str) -> Value {
    TemplateValue::new(T1).with_dynamic([state]).into()
}

fn t2(state: &str) -> Value {
    TemplateValue::new(T2).with_dynamic([state]).into()
}

/// Run one full engine pass: the switcher reacts to the new value, then the
/// returned instruction is committed. Returns the id of the mount point's
/// dedicated child part.
fn update(
    switcher: &mut CacheSwitcher,
    renderer: &mut Renderer,
    mount: &mut ChildPart,
    value: Value,
) -> PartId {
    let slotted = switcher.update(renderer, mount, value).unwrap();
    renderer.commit(mount, slotted).unwrap();
    mount.slot().unwrap().id()
}

/// Every text currently shown under the mount point, in tree order.
fn shown_texts(mount: &ChildPart) -> Vec<String> {
    fn walk(node: &RenderedNode, out: &mut Vec<String>) {
        match node {
            RenderedNode::Text { text, .. } => out.push(text.clone()),
            RenderedNode::Element { children, .. } => {
                for child in children {
                    walk(child, out);
                }
            }
        }
    }
    let mut out = Vec::new();
    match mount.slot().expect("mount has a dedicated child").committed() {
        Committed::Node(RenderedValue::Template { roots, .. }) => {
            for root in roots {
                walk(root, &mut out);
            }
        }
        Committed::Node(RenderedValue::Text { text, .. }) => out.push(text.clone()),
        _ => {}
    }
    out
}

#[test]
fn round_trip_reuses_cached_instance() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    let first = update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    let second = update(&mut switcher, &mut renderer, &mut mount, t2("unchecked"));
    assert_ne!(first, second);

    let third = update(
        &mut switcher,
        &mut renderer,
        &mut mount,
        t1("checked again"),
    );
    assert_eq!(first, third);
    assert_eq!(
        shown_texts(&mount),
        ["input is ".to_string(), "checked again".to_string()]
    );
}

#[test]
fn same_template_update_is_a_no_op_for_the_cache() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    let first = update(&mut switcher, &mut renderer, &mut mount, t1("on"));
    let second = update(&mut switcher, &mut renderer, &mut mount, t1("off"));

    assert_eq!(first, second);
    assert_eq!(switcher.cached(), 0);
    assert_eq!(
        shown_texts(&mount),
        ["input is ".to_string(), "off".to_string()]
    );
}

#[test]
fn opaque_values_never_touch_the_cache() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    let first = update(
        &mut switcher,
        &mut renderer,
        &mut mount,
        Value::text("plain"),
    );
    let second = update(
        &mut switcher,
        &mut renderer,
        &mut mount,
        Value::text("still plain"),
    );

    assert_eq!(first, second);
    assert_eq!(switcher.cached(), 0);
    assert_eq!(shown_texts(&mount), ["still plain".to_string()]);
}

#[test]
fn identified_to_opaque_evicts_only() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    update(
        &mut switcher,
        &mut renderer,
        &mut mount,
        Value::text("plain text"),
    );

    assert!(switcher.is_cached(&T1));
    assert_eq!(switcher.cached(), 1);
    assert_eq!(shown_texts(&mount), ["plain text".to_string()]);
}

#[test]
fn opaque_to_identified_restores_only() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    let first = update(&mut switcher, &mut renderer, &mut mount, t1("a"));
    update(&mut switcher, &mut renderer, &mut mount, Value::text("x"));
    let third = update(&mut switcher, &mut renderer, &mut mount, t1("b"));

    assert_eq!(first, third);
    assert!(!switcher.is_cached(&T1));
    assert_eq!(
        shown_texts(&mount),
        ["input is ".to_string(), "b".to_string()]
    );
}

/// The template currently shown live under the mount point, if any.
fn live_template(mount: &ChildPart) -> Option<Template> {
    match mount.slot()?.committed() {
        Committed::Node(value) => value.template(),
        _ => None,
    }
}

#[test]
fn a_subtree_lives_in_exactly_one_place() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    assert_eq!(live_template(&mount), Some(T1));
    assert!(!switcher.is_cached(&T1));

    update(&mut switcher, &mut renderer, &mut mount, t2("unchecked"));
    assert_eq!(live_template(&mount), Some(T2));
    assert!(switcher.is_cached(&T1));
    assert!(!switcher.is_cached(&T2));

    update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    assert_eq!(live_template(&mount), Some(T1));
    assert!(!switcher.is_cached(&T1));
    assert!(switcher.is_cached(&T2));
}

#[test]
fn cached_subtrees_are_disconnected_while_parked() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    assert!(mount.slot().unwrap().is_connected());

    update(&mut switcher, &mut renderer, &mut mount, t2("unchecked"));
    let root = switcher.cached_root(&T1).unwrap();
    assert!(!root.is_connected());
    assert!(!root.slot().unwrap().is_connected());

    // Restoring reattaches it to the live tree.
    update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    assert!(mount.slot().unwrap().is_connected());
}

#[test]
fn detached_root_is_created_once_per_template() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    update(&mut switcher, &mut renderer, &mut mount, t1("a"));
    update(&mut switcher, &mut renderer, &mut mount, t2("b"));
    let root = switcher.cached_root(&T1).unwrap().id();

    update(&mut switcher, &mut renderer, &mut mount, t1("c"));
    update(&mut switcher, &mut renderer, &mut mount, t2("d"));

    // The second eviction of T1 reuses the root made for the first one.
    assert_eq!(switcher.cached_root(&T1).unwrap().id(), root);
    assert_eq!(switcher.cached(), 2);
}

#[test]
fn full_switching_scenario() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    let t1_part = update(&mut switcher, &mut renderer, &mut mount, t1("checked"));
    assert_eq!(
        shown_texts(&mount),
        ["input is ".to_string(), "checked".to_string()]
    );

    let t2_part = update(&mut switcher, &mut renderer, &mut mount, t2("unchecked"));
    assert!(switcher.is_cached(&T1));
    assert_eq!(shown_texts(&mount), ["unchecked".to_string()]);

    let restored = update(
        &mut switcher,
        &mut renderer,
        &mut mount,
        t1("checked again"),
    );
    assert_eq!(restored, t1_part);
    assert!(switcher.is_cached(&T2));
    assert!(!switcher.is_cached(&T1));

    update(
        &mut switcher,
        &mut renderer,
        &mut mount,
        Value::text("plain text"),
    );
    assert!(switcher.is_cached(&T1));
    assert!(switcher.is_cached(&T2));
    assert_eq!(shown_texts(&mount), ["plain text".to_string()]);

    // Coming back from opaque restores the cached T2 instance.
    let back = update(&mut switcher, &mut renderer, &mut mount, t2("unchecked"));
    assert_eq!(back, t2_part);
}

#[test]
fn update_returns_the_wrapped_value_unchanged() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    let slotted = switcher
        .update(&mut renderer, &mut mount, t1("checked"))
        .unwrap();
    assert_eq!(slotted.value(), &t1("checked"));
    renderer.commit(&mut mount, slotted).unwrap();
}

#[test]
fn external_interference_surfaces_as_an_error() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    update(&mut switcher, &mut renderer, &mut mount, t1("checked"));

    // Something outside the switcher clears the mount point between updates.
    renderer.clear(&mut mount);

    let err = switcher
        .update(&mut renderer, &mut mount, t2("unchecked"))
        .unwrap_err();
    assert!(matches!(err, SlotError::EmptySlot { .. }));
}

#[test]
fn teardown_drops_every_cached_subtree() {
    let mut renderer = Renderer::new();
    let mut mount = renderer.create_root();
    let mut switcher = CacheSwitcher::new();

    update(&mut switcher, &mut renderer, &mut mount, t1("a"));
    update(&mut switcher, &mut renderer, &mut mount, t2("b"));
    assert_eq!(switcher.cached(), 1);

    switcher.teardown(&mut renderer);
    assert_eq!(switcher.cached(), 0);
    assert!(switcher.cached_root(&T1).is_none());
}
