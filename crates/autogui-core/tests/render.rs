//! Integration tests for the render engine.

use autogui_core::{
    Annotation, Event, Map, Node, RealKind, Record, RenderError, RenderHook, Renderer, Result,
    ScriptedBackend, Selection, Session, Value, WidgetKind,
};

fn sample() -> Value {
    Record::new("Sample")
        .with("a", 1)
        .with_annotated("b", vec![1.0, 2.0], Annotation::list_of(Annotation::Real(RealKind::F64)))
        .into()
}

/// Draws a color record as a single label.
struct Swatch;

impl RenderHook for Swatch {
    fn render(&self, ui: &mut Renderer<'_>, value: &mut Value, node: &Node) -> Result<()> {
        let hex = value
            .as_record()
            .and_then(|r| r.get("hex"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        ui.backend().label(&format!("{}: #{hex}", node.display_name()));
        Ok(())
    }
}

/// Adds a label, then renders the record the default way.
struct Framed;

impl RenderHook for Framed {
    fn render(&self, ui: &mut Renderer<'_>, value: &mut Value, node: &Node) -> Result<()> {
        ui.backend().label("framed");
        ui.render_node(value, &node.clone().ignoring_custom())
    }
}

struct Broken;

impl RenderHook for Broken {
    fn render(&self, _: &mut Renderer<'_>, _: &mut Value, _: &Node) -> Result<()> {
        Err(RenderError::hook("Broken", std::io::Error::other("no data")))
    }
}

fn render_once(session: &mut Session, backend: &mut ScriptedBackend, value: &mut Value) -> bool {
    session.frame(backend).render(value, "").unwrap()
}

#[test]
fn test_unedited_render_returns_input() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value = sample();

    let modified = render_once(&mut session, &mut backend, &mut value);

    assert!(!modified);
    assert_eq!(value, sample());
    assert_eq!(backend.group_labels(), vec!["b [2]", "0", "1"]);
    assert_eq!(backend.widget_count(WidgetKind::DragInt), 1);
    assert_eq!(backend.widget_count(WidgetKind::DragReal), 2);
}

#[test]
fn test_append_declared_element() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value = sample();
    backend.pick("b#menu", "New");

    let modified = render_once(&mut session, &mut backend, &mut value);

    assert!(modified);
    let expected: Value = Record::new("Sample")
        .with("a", 1)
        .with_annotated(
            "b",
            vec![1.0, 2.0, 0.0],
            Annotation::list_of(Annotation::Real(RealKind::F64)),
        )
        .into();
    assert_eq!(value, expected);
}

#[test]
fn test_append_then_remove_restores_list() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value = sample();

    backend.pick("b#menu", "New");
    assert!(render_once(&mut session, &mut backend, &mut value));
    backend.next_frame();

    backend.pick("b/2#menu", "Remove");
    assert!(render_once(&mut session, &mut backend, &mut value));
    assert_eq!(value, sample());
}

#[test]
fn test_rerender_is_idempotent() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value = sample();

    render_once(&mut session, &mut backend, &mut value);
    let first: Vec<Event> = backend.events().to_vec();
    backend.next_frame();
    render_once(&mut session, &mut backend, &mut value);

    assert_eq!(backend.events(), first.as_slice());
    assert_eq!(value, sample());
}

#[test]
fn test_leaf_edits_are_cast_back() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Record::new("Leaves")
        .with("small", 3u8)
        .with("ratio", 0.5f32)
        .with("label", "old")
        .with("on", false)
        .into();

    backend
        .edit("small", 300i64)
        .edit("ratio", 0.1)
        .edit("label", "new")
        .edit("on", true);
    assert!(render_once(&mut session, &mut backend, &mut value));

    let record = value.as_record().unwrap();
    assert_eq!(record.get("small").and_then(Value::as_i64), Some(255));
    assert_eq!(record.get("ratio").and_then(Value::as_f64), Some(f64::from(0.1f32)));
    assert_eq!(record.get("label").and_then(Value::as_str), Some("new"));
    assert_eq!(record.get("on").and_then(Value::as_bool), Some(true));
}

#[test]
fn test_read_only_field_is_left_alone() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Record::new("Probe")
        .with_read_only("serial", 7)
        .with("gain", 1.0)
        .into();

    backend.edit("serial", 9i64).edit("gain", 2.0);
    render_once(&mut session, &mut backend, &mut value);

    let record = value.as_record().unwrap();
    assert_eq!(record.get("serial").and_then(Value::as_i64), Some(7));
    assert_eq!(record.get("gain").and_then(Value::as_f64), Some(2.0));
}

#[test]
fn test_null_and_empty_record_placeholders() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("nothing", Value::Null)
        .with("empty_state", Record::new("Empty"))
        .into();

    render_once(&mut session, &mut backend, &mut value);

    assert_eq!(backend.labels(), vec!["nothing: None", "empty state: {}"]);
}

#[test]
fn test_empty_list_keeps_group_and_menu() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new().with("items", Value::List(vec![])).into();

    render_once(&mut session, &mut backend, &mut value);

    assert_eq!(backend.group_labels(), vec!["items [0]"]);
    assert!(backend.events().iter().any(|e| matches!(
        e,
        Event::Menu { id, items } if id.as_str() == "items#menu" && items == &["Clear".to_string()]
    )));
}

#[test]
fn test_clear_empties_list() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("xs", vec![Value::int(1), Value::int(2), Value::int(3)])
        .into();

    backend.pick("xs#menu", "Clear");
    assert!(render_once(&mut session, &mut backend, &mut value));

    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    assert_eq!(map.get("xs"), Some(&Value::List(vec![])));
    assert!(!backend.has_pending());
}

#[test]
fn test_slash_key_and_nested_path_are_distinct_widgets() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("a/b", 1i64)
        .with("a", Map::new().with("b", 2i64))
        .into();

    backend.edit("a/b", 9i64);
    assert!(render_once(&mut session, &mut backend, &mut value));

    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    assert_eq!(map.get("a/b"), Some(&Value::int(1)));
    let nested = map.get("a").and_then(|a| match a {
        Value::Map(inner) => inner.get("b"),
        _ => None,
    });
    assert_eq!(nested, Some(&Value::int(9)));
}

#[test]
fn test_digit_key_and_index_are_distinct_widgets() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("0", 1i64)
        .with("xs", vec![Value::int(5)])
        .into();

    backend.edit("\\0", 7i64).edit("xs/0", 6i64);
    assert!(render_once(&mut session, &mut backend, &mut value));

    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    assert_eq!(map.get("0"), Some(&Value::int(7)));
    assert_eq!(map.get("xs"), Some(&Value::from(vec![Value::int(6)])));
}

#[test]
fn test_ignore_custom_covers_whole_subtree() {
    let mut session = Session::default();
    session.register_hook("Color", Swatch);
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("tint", Record::new("Color").with("hex", "ff8800"))
        .into();

    session
        .frame(&mut backend)
        .render_node(&mut value, &Node::root("root").ignoring_custom())
        .unwrap();

    assert!(backend.labels().is_empty());
    assert_eq!(backend.group_labels(), vec!["root", "tint"]);
    assert_eq!(backend.widget_count(WidgetKind::TextEdit), 1);
}

#[test]
fn test_duplicate_inserts_copy_before_original() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("xs", vec![Value::int(1), Value::int(2)])
        .into();

    backend.pick("xs/1#menu", "Duplicate").pick("xs/0#menu", "Remove");
    assert!(render_once(&mut session, &mut backend, &mut value));

    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    assert_eq!(map.get("xs"), Some(&Value::from(vec![Value::int(2), Value::int(2)])));
}

#[test]
fn test_tuple_elements_use_name_hint() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with(
            "pair",
            Value::Tuple(vec![
                Map::new().with("name", "left").with("gain", 1.0).into(),
                Value::int(4),
            ]),
        )
        .into();

    backend.edit("pair/1", 5i64);
    assert!(render_once(&mut session, &mut backend, &mut value));

    assert_eq!(backend.group_labels(), vec!["pair [2]-tuple", "0 left", "1"]);
    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    let Some(Value::Tuple(items)) = map.get("pair") else {
        panic!("expected a tuple");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[1], Value::int(5));
}

#[test]
fn test_collapsed_group_is_not_traversed() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value = sample();
    backend.collapse("b").edit("b/0", 9.0);

    assert!(!render_once(&mut session, &mut backend, &mut value));
    assert_eq!(value, sample());
    assert!(backend.has_pending());
}

#[test]
fn test_custom_hook_replaces_default_rendering() {
    let mut session = Session::default();
    session.register_hook("Color", Swatch);
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("tint", Record::new("Color").with("hex", "ff8800"))
        .into();

    render_once(&mut session, &mut backend, &mut value);

    assert_eq!(backend.labels(), vec!["tint: #ff8800"]);
    assert_eq!(backend.widget_count(WidgetKind::TextEdit), 0);
}

#[test]
fn test_hook_can_fall_back_to_default() {
    let mut session = Session::default();
    session.register_hook("Framed", Framed);
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("inner", Record::new("Framed").with("x", 1i64))
        .into();

    backend.edit("inner/x", 2i64);
    assert!(render_once(&mut session, &mut backend, &mut value));

    assert_eq!(backend.labels(), vec!["framed"]);
    assert_eq!(backend.group_labels(), vec!["inner"]);
    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    assert_eq!(
        map.get("inner").and_then(Value::as_record).and_then(|r| r.get("x")),
        Some(&Value::int(2))
    );
}

#[test]
fn test_error_sink_isolates_failing_hook() {
    let mut session = Session::default();
    session.register_hook("Broken", Broken);
    let mut backend = ScriptedBackend::new();
    let mut broken: Value = Record::new("Broken").into();
    let mut fine: Value = Record::new("Fine").with("n", 1i64).into();
    backend.edit("fine/n", 3i64);

    {
        let mut ui = session.frame(&mut backend);
        ui.error_sink(|ui| ui.render(&mut broken, "broken").map(|_| ()));
        ui.error_sink(|ui| ui.render(&mut fine, "fine").map(|_| ()));
    }

    assert_eq!(backend.errors(), vec!["Broken: no data"]);
    assert_eq!(
        fine.as_record().and_then(|r| r.get("n")),
        Some(&Value::int(3))
    );
    assert_eq!(session.mods().depth(), 0);
}

#[test]
fn test_selection_combo_and_options() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value: Value = Map::new()
        .with("mode", Selection::new(vec!["fast".into(), "slow".into()], 1))
        .into();

    render_once(&mut session, &mut backend, &mut value);
    assert_eq!(backend.widget_count(WidgetKind::Combo), 1);
    assert_eq!(backend.group_labels(), vec!["options [2]", "0", "1"]);
    backend.next_frame();

    backend.edit("mode", 0i64);
    assert!(render_once(&mut session, &mut backend, &mut value));

    let Value::Map(map) = &value else {
        panic!("expected a map");
    };
    let selection = map.get("mode").and_then(Value::as_record).unwrap();
    assert_eq!(Selection::selected(selection), Some(&Value::text("fast")));
}

#[test]
fn test_root_scalar_uses_name() {
    let mut session = Session::default();
    let mut backend = ScriptedBackend::new();
    let mut value = Value::real(1.5);
    backend.edit("speed", 3.0);

    let modified = session.frame(&mut backend).render(&mut value, "speed").unwrap();

    assert!(modified);
    assert_eq!(value, Value::real(3.0));
    assert!(backend.events().iter().any(|e| matches!(
        e,
        Event::Widget { label, .. } if label == "speed"
    )));
}
