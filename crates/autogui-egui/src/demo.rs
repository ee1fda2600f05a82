//! Object graph shown by the demo application.

use anyhow::Context;
use autogui_core::{
    Annotation, IntKind, Map, NdArray, Node, RealKind, Record, RenderError, RenderHook, Renderer,
    Selection, ShapeError, Value,
};

pub const FORMULA: &str = r"e^{i\pi} + 1 = 0";

/// Record type handled by [`ColorHook`].
pub const COLOR: &str = "Color";

pub fn color(r: u8, g: u8, b: u8) -> Record {
    Record::new(COLOR).with("r", r).with("g", g).with("b", b)
}

/// Shows a color as its hex code above the default channel editors.
pub struct ColorHook;

impl ColorHook {
    fn hex(value: &Value) -> anyhow::Result<String> {
        let record = value.as_record().context("color is not a record")?;
        let mut hex = String::from("#");
        for channel in ["r", "g", "b"] {
            let level = record
                .get(channel)
                .and_then(Value::as_i64)
                .with_context(|| format!("missing channel '{channel}'"))?;
            hex.push_str(&format!("{level:02x}"));
        }
        Ok(hex)
    }
}

impl RenderHook for ColorHook {
    fn render(&self, ui: &mut Renderer<'_>, value: &mut Value, node: &Node) -> autogui_core::Result<()> {
        let hex = Self::hex(value).map_err(|e| RenderError::hook(COLOR, e))?;
        ui.backend().label(&format!("{} {hex}", node.display_name()));
        ui.render_node(value, &node.clone().ignoring_custom())
    }
}

/// A small scene description touching every kind of value the engine
/// renders.
pub fn demo_state() -> Result<Value, ShapeError> {
    let light = Record::new("Light")
        .with("name", "key")
        .with("intensity", 1.0)
        .with("enabled", true);

    let probe = Record::new("Probe")
        .with_read_only("serial", 1042)
        .with("gain", 0.5f32)
        .with("channels", 4u8);

    let transform = NdArray::from_reals(
        vec![3, 3],
        vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    )?;
    let volume = NdArray::from_ints(vec![2, 2, 3], (0..12).collect())?;

    let scene = Record::new("Scene")
        .with("title", "Untitled scene")
        .with("frame", 0)
        .with("exposure", 1.25)
        .with("visible", true)
        .with(
            "frame_range",
            Value::Tuple(vec![Value::int(0), Value::int(240)]),
        )
        .with(
            "resolution",
            Value::Tuple(vec![Value::int(1920), Value::int(1080)]),
        )
        .with_annotated(
            "lights",
            vec![Value::from(light.clone())],
            Annotation::list_of(Annotation::Record(Box::new(light))),
        )
        .with_annotated(
            "weights",
            vec![0.25, 0.75],
            Annotation::list_of(Annotation::Real(RealKind::F64)),
        )
        .with_annotated(
            "tags",
            Vec::<Value>::new(),
            Annotation::list_of(Annotation::Int(IntKind::U16)),
        )
        .with_annotated(
            "palette",
            vec![color(255, 136, 0), color(32, 64, 128)],
            Annotation::list_of(Annotation::Record(Box::new(color(0, 0, 0)))),
        )
        .with("probe", probe)
        .with("transform", transform)
        .with("volume", volume)
        .with(
            "quality",
            Selection::new(vec!["draft".into(), "preview".into(), "final".into()], 1),
        )
        .with(
            "metadata",
            Map::new()
                .with("author", "")
                .with("notes", Value::Null)
                .with("background", color(0, 0, 0)),
        );

    Ok(scene.into())
}
