//! Integration tests for gilt-elements.
//!
//! These tests exercise the public API from outside the crate: components
//! defined through the metadata builder, driven by the runtime and the
//! testing Pilot.

use gilt_elements::component::{Component, ComponentMetadata, Context, LifecycleState, PropValue};
use gilt_elements::config::{MissingTargetPolicy, RuntimeConfig};
use gilt_elements::dom::ShadowRootMode;
use gilt_elements::error::{DefineError, Error};
use gilt_elements::event::{Event, EventTarget};
use gilt_elements::render::{RenderSink, Renderer};
use gilt_elements::runtime::Runtime;
use gilt_elements::template::{Markup, Template};
use gilt_elements::testing::{Pilot, RecordingShim};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// Disclosure widget: observed `open` and `summary`, watched `open`.
#[derive(Default)]
struct Disclosure {
    open: bool,
    summary: String,
    changes: Vec<String>,
    connected: usize,
}

fn toggle(ctx: &mut Context<'_, Disclosure>, _event: &Event) {
    let open = !ctx.component().open;
    ctx.set("open", open);
}

fn on_open_changed(d: &mut Disclosure, old: &PropValue, new: &PropValue) {
    d.changes.push(format!("{old}->{new}"));
}

impl Component for Disclosure {
    fn metadata() -> ComponentMetadata<Self> {
        ComponentMetadata::<Self>::builder()
            .attribute("open", |d| d.open.into(), |d, v| d.open = v.is_truthy())
            .attribute(
                "summary",
                |d| d.summary.clone().into(),
                |d, v| d.summary = v.to_string(),
            )
            .listen("click", "toggle", toggle)
            .watch("open", "on_open_changed", on_open_changed)
            .build()
    }

    fn render(&self) -> Option<Template> {
        let details = Markup::element("details")
            .flag_if("open", self.open)
            .child(Markup::element("summary").text(&self.summary));
        Some(details.into())
    }

    fn connected(&mut self) {
        self.connected += 1;
    }
}

/// Listens on the window and on a light-DOM element by id.
#[derive(Default)]
struct Tracker {
    resizes: usize,
    outside_clicks: usize,
}

impl Component for Tracker {
    fn metadata() -> ComponentMetadata<Self> {
        ComponentMetadata::<Self>::builder()
            .listen("window:resize", "on_resize", |ctx, _| {
                ctx.component_mut().resizes += 1
            })
            .listen("#outside:click", "on_outside", |ctx, _| {
                ctx.component_mut().outside_clicks += 1
            })
            .build()
    }
}

/// Keeps every render's output by appending instead of replacing.
struct AppendRenderer;

impl Renderer for AppendRenderer {
    fn render(&self, template: &dyn Fn() -> Option<Template>, sink: &mut RenderSink) {
        if let Some(template) = template() {
            sink.append(template);
        }
    }
}

#[derive(Default)]
struct Ticker {
    tick: f64,
}

impl Component for Ticker {
    fn metadata() -> ComponentMetadata<Self> {
        ComponentMetadata::<Self>::builder()
            .property("tick", |t| t.tick.into(), |t, v| t.tick = v.as_number().unwrap_or(0.0))
            .renderer(AppendRenderer)
            .build()
    }

    fn render(&self) -> Option<Template> {
        Some(Markup::element("li").text(self.tick).into())
    }
}

/// No render function at all.
#[derive(Default)]
struct Silent;

impl Component for Silent {
    fn metadata() -> ComponentMetadata<Self> {
        ComponentMetadata::<Self>::builder().observe("data-x").build()
    }
}

/// Route `tracing` output to the test harness; `RUST_LOG=gilt_elements=debug` shows it.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pilot() -> Pilot {
    let mut pilot = Pilot::new();
    pilot.define::<Disclosure>("x-disclosure");
    pilot
}

// ---------------------------------------------------------------------------
// Attribute reflection and coalescing
// ---------------------------------------------------------------------------

#[test]
fn test_empty_attribute_sets_true_with_one_render() {
    let mut pilot = pilot();
    let el = pilot.mount("x-disclosure");
    assert_eq!(pilot.render_count(el), 1);

    pilot.runtime_mut().task(|rt| {
        rt.set_attribute(el, "open", "").unwrap();
        rt.set_attribute(el, "summary", "One").unwrap();
        rt.set_attribute(el, "summary", "Two").unwrap();
        rt.set_attribute(el, "title", "ignored").unwrap();
    });

    assert_eq!(pilot.runtime().property(el, "open"), Some(PropValue::Bool(true)));
    assert_eq!(pilot.render_count(el), 2);
    insta::assert_snapshot!(pilot.html(el), @"<details open><summary>Two</summary></details>");
}

#[test]
fn test_later_invalidation_renders_once_more() {
    let mut pilot = pilot();
    let el = pilot.mount("x-disclosure");
    pilot.set_attribute(el, "summary", "A").unwrap();
    pilot.set_attribute(el, "summary", "B").unwrap();
    assert_eq!(pilot.render_count(el), 3);
    assert_eq!(pilot.process(), 0);
}

#[test]
fn test_removing_attribute_sets_false() {
    let mut pilot = pilot();
    let el = pilot
        .mount_with("x-disclosure", &[("open", ""), ("summary", "S")])
        .unwrap();
    assert!(pilot.component::<Disclosure>(el).unwrap().open);

    pilot.remove_attribute(el, "open").unwrap();
    assert!(!pilot.component::<Disclosure>(el).unwrap().open);
    assert_eq!(pilot.html(el), "<details><summary>S</summary></details>");
}

#[test]
fn test_repeated_text_value_writes_nothing() {
    let mut pilot = pilot();
    let el = pilot.mount_with("x-disclosure", &[("summary", "same")]).unwrap();
    let before = pilot.render_count(el);
    pilot.set_attribute(el, "summary", "same").unwrap();
    assert_eq!(pilot.render_count(el), before);
}

// ---------------------------------------------------------------------------
// Upgrade, defaults and watchers
// ---------------------------------------------------------------------------

#[test]
fn test_upgrade_replays_staged_properties() {
    init_tracing();
    let mut rt = Runtime::new();
    let el = rt.create_element("x-disclosure");
    rt.set_property(el, "summary", "staged").unwrap();
    rt.set_property(el, "bogus", 1.0).unwrap();
    rt.task(|rt| rt.append_child(rt.document(), el).unwrap());
    assert!(!rt.is_upgraded(el));

    rt.task(|rt| rt.define::<Disclosure>("x-disclosure").unwrap());
    assert_eq!(rt.lifecycle_state(el), Some(LifecycleState::Connected));
    assert_eq!(rt.property(el, "summary"), Some(PropValue::from("staged")));
    assert_eq!(rt.property(el, "bogus"), None);
    assert_eq!(
        rt.shadow_html(el).unwrap(),
        "<details><summary>staged</summary></details>"
    );
}

#[test]
fn test_watchers_fire_only_after_first_connect() {
    let mut rt = Runtime::new();
    rt.define::<Disclosure>("x-disclosure").unwrap();
    let el = rt.create_element("x-disclosure");
    rt.set_attribute(el, "open", "").unwrap();
    assert!(rt.component::<Disclosure>(el).unwrap().changes.is_empty());

    rt.task(|rt| rt.append_child(rt.document(), el).unwrap());
    rt.task(|rt| rt.remove_attribute(el, "open").unwrap());

    let changes = &rt.component::<Disclosure>(el).unwrap().changes;
    assert_eq!(changes, &["true->true", "true->false"]);
}

#[test]
fn test_reconnect_runs_defaults_once() {
    let mut pilot = pilot();
    let el = pilot.mount("x-disclosure");
    let doc = pilot.runtime().document();
    pilot.remove(el).unwrap();
    assert_eq!(pilot.state(el), Some(LifecycleState::Disconnected));
    pilot.append(doc, el).unwrap();

    let stats = pilot.runtime().stats(el).unwrap();
    assert_eq!(stats.defaults_runs, 1);
    assert_eq!(stats.binds, 2);
    assert_eq!(stats.unbinds, 1);
    assert_eq!(pilot.component::<Disclosure>(el).unwrap().connected, 2);
    assert_eq!(pilot.runtime().bound_listener_count(el), 1);
}

#[test]
fn test_write_after_detached_upgrade_wins_over_staged_value() {
    let mut rt = Runtime::new();
    let el = rt.create_element("x-disclosure");
    rt.set_property(el, "summary", "early").unwrap();
    rt.define::<Disclosure>("x-disclosure").unwrap();
    assert!(rt.is_upgraded(el));
    assert_eq!(rt.property(el, "summary"), Some(PropValue::from("early")));

    rt.set_property(el, "summary", "late").unwrap();
    assert_eq!(rt.property(el, "summary"), Some(PropValue::from("late")));

    rt.task(|rt| rt.append_child(rt.document(), el).unwrap());
    assert_eq!(rt.property(el, "summary"), Some(PropValue::from("late")));
    assert_eq!(rt.component::<Disclosure>(el).unwrap().summary, "late");
    assert_eq!(
        rt.shadow_html(el).unwrap(),
        "<details><summary>late</summary></details>"
    );
}

#[test]
fn test_rejected_move_keeps_subtree_connected() {
    let mut pilot = pilot();
    let el = pilot.mount("x-disclosure");
    let inner = pilot.runtime_mut().create_element("div");
    pilot.runtime_mut().append_child(el, inner).unwrap();
    let bound = pilot.runtime().bound_listener_count(el);
    let stats = pilot.runtime().stats(el).unwrap();

    let result = pilot.runtime_mut().append_child(inner, el);
    assert!(matches!(result, Err(Error::Dom(_))));

    assert_eq!(pilot.state(el), Some(LifecycleState::Connected));
    assert_eq!(pilot.runtime().bound_listener_count(el), bound);
    assert_eq!(pilot.runtime().stats(el).unwrap().disconnects, stats.disconnects);
    assert!(pilot.runtime().dom().is_connected(el));
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

#[test]
fn test_click_inside_shadow_toggles() {
    let mut pilot = pilot();
    let el = pilot.mount("x-disclosure");
    let summary = pilot.query_shadow(el, "summary").unwrap();

    assert_eq!(pilot.click(summary), 1);
    let disclosure = pilot.component::<Disclosure>(el).unwrap();
    assert!(disclosure.open);
    assert_eq!(disclosure.changes.last().map(String::as_str), Some("false->true"));
    assert_eq!(pilot.html(el), "<details open><summary></summary></details>");
}

#[test]
fn test_window_and_document_fallback_listeners() {
    let mut rt = Runtime::new();
    rt.define::<Tracker>("x-tracker").unwrap();
    let doc = rt.document();
    let outside = rt.create_element("button");
    rt.set_attribute(outside, "id", "outside").unwrap();
    rt.append_child(doc, outside).unwrap();

    let tracker = rt.create_element("x-tracker");
    rt.append_child(doc, tracker).unwrap();
    assert_eq!(rt.bound_listener_count(tracker), 2);
    assert_eq!(rt.listener_count_on(EventTarget::Window), 1);
    assert_eq!(rt.listener_count_on(outside), 1);

    rt.dispatch_event(EventTarget::Window, Event::new("resize"));
    rt.dispatch_event(outside, Event::new("click"));
    rt.dispatch_event(outside, Event::bubbling("click"));
    let state = rt.component::<Tracker>(tracker).unwrap();
    assert_eq!(state.resizes, 1);
    assert_eq!(state.outside_clicks, 2);

    rt.remove_child(tracker).unwrap();
    assert_eq!(rt.listener_count(), 0);
    assert_eq!(rt.dispatch_event(EventTarget::Window, Event::new("resize")), 0);
}

#[test]
fn test_missing_target_is_skipped_under_both_policies() {
    init_tracing();
    for policy in [MissingTargetPolicy::Silent, MissingTargetPolicy::Warn] {
        let mut rt = Runtime::with_config(RuntimeConfig::new().with_missing_target(policy));
        rt.define::<Tracker>("x-tracker").unwrap();
        let tracker = rt.create_element("x-tracker");
        rt.append_child(rt.document(), tracker).unwrap();
        assert_eq!(rt.bound_listener_count(tracker), 1);
    }
}

// ---------------------------------------------------------------------------
// Rendering extension points
// ---------------------------------------------------------------------------

#[test]
fn test_renderer_hook_appends() {
    let mut pilot = Pilot::new();
    pilot.define::<Ticker>("x-ticker");
    let el = pilot.mount("x-ticker");
    pilot.set_property(el, "tick", 1.0);
    pilot.set_property(el, "tick", 2.0);
    assert_eq!(pilot.html(el), "<li>0</li><li>1</li><li>2</li>");
}

#[test]
fn test_style_shim_sees_each_render() {
    let shim = RecordingShim::new();
    let mut pilot = Pilot::new().with_style_shim(shim.clone());
    pilot.define::<Disclosure>("x-disclosure");
    pilot.define::<Silent>("x-silent");
    let el = pilot.mount("x-disclosure");
    pilot.mount("x-silent");
    pilot.set_attribute(el, "summary", "S").unwrap();

    let tags: Vec<_> = shim.calls().into_iter().map(|(tag, _)| tag).collect();
    assert_eq!(tags, ["x-disclosure", "x-disclosure"]);
}

#[test]
fn test_component_without_render_leaves_shadow_alone() {
    let mut pilot = Pilot::new();
    pilot.define::<Silent>("x-silent");
    let el = pilot.mount("x-silent");
    assert_eq!(pilot.render_count(el), 1);
    assert_eq!(pilot.html(el), "");
}

#[test]
fn test_closed_shadow_root_is_not_exposed() {
    let config = RuntimeConfig::new().with_shadow_mode(ShadowRootMode::Closed);
    let mut pilot = Pilot::with_config(config);
    pilot.define::<Disclosure>("x-disclosure");
    let el = pilot.mount("x-disclosure");
    assert_eq!(pilot.runtime().shadow_root(el), None);
    insta::assert_snapshot!(pilot.outline(), @r#"
    #document
      x-disclosure
        #shadow-root (closed)
          details
            summary
    "#);
}

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

#[test]
fn test_define_errors() {
    let mut rt = Runtime::new();
    assert_eq!(
        rt.define::<Silent>("silent"),
        Err(Error::Define(DefineError::InvalidName("silent".into())))
    );
    rt.define::<Silent>("x-silent").unwrap();
    assert_eq!(
        rt.define::<Disclosure>("x-silent"),
        Err(Error::Define(DefineError::AlreadyDefined("x-silent".into())))
    );
}

// ---------------------------------------------------------------------------
// html! macro
// ---------------------------------------------------------------------------

#[cfg(feature = "macros")]
mod html_macro {
    use super::*;
    use gilt_elements::html;

    #[derive(Default)]
    struct Card {
        title: String,
        highlighted: bool,
    }

    impl Component for Card {
        fn metadata() -> ComponentMetadata<Self> {
            ComponentMetadata::<Self>::builder()
                .attribute("card-title", |c| c.title.clone().into(), |c, v| c.title = v.to_string())
                .attribute("highlighted", |c| c.highlighted.into(), |c, v| c.highlighted = v.is_truthy())
                .build()
        }

        fn render(&self) -> Option<Template> {
            Some(html! {
                <h2 class="title" ?data-highlighted={self.highlighted}>{self.title}</h2>
                <slot />
            })
        }
    }

    #[test]
    fn test_html_macro_renders_into_shadow() {
        let mut pilot = Pilot::new();
        pilot.define::<Card>("x-card");
        let el = pilot
            .mount_with("x-card", &[("card-title", "Hello"), ("highlighted", "")])
            .unwrap();
        assert_eq!(
            pilot.html(el),
            r#"<h2 class="title" data-highlighted>Hello</h2><slot></slot>"#
        );
    }

    #[test]
    fn test_html_macro_nested_custom_elements() {
        let template = html! {
            <x-card card-title="Inner" />
            "tail"
        };
        assert_eq!(template.to_html(), r#"<x-card card-title="Inner"></x-card>tail"#);
    }
}
