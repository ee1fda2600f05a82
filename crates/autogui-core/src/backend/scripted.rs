//! Headless backend driven by a script of edits.
//!
//! Edits, menu activations and key presses are queued per widget identity
//! and consumed the first time the matching widget is drawn. Everything the
//! engine draws is appended to an event log for assertions.

use super::{KeyEvent, WidgetBackend};
use crate::path::WidgetId;
use crate::value::Value;
use image::RgbaImage;
use std::collections::{HashMap, HashSet};

/// Editing widget kinds, as recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Checkbox,
    DragInt,
    DragReal,
    TextEdit,
    Combo,
}

/// One entry of the [`ScriptedBackend`] event log.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Label(String),
    Error(String),
    Widget {
        kind: WidgetKind,
        id: WidgetId,
        label: String,
        width: Option<f32>,
    },
    Group {
        id: WidgetId,
        label: String,
        open: bool,
    },
    GroupEnd,
    RowBegin,
    RowEnd,
    Menu {
        id: WidgetId,
        items: Vec<String>,
    },
    Image {
        id: WidgetId,
        width: u32,
        height: u32,
    },
}

#[derive(Debug)]
pub struct ScriptedBackend {
    edits: HashMap<WidgetId, Value>,
    picks: HashMap<WidgetId, String>,
    collapsed: HashSet<WidgetId>,
    keys: Vec<KeyEvent>,
    width: f32,
    next_width: Option<f32>,
    log: Vec<Event>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            edits: HashMap::new(),
            picks: HashMap::new(),
            collapsed: HashSet::new(),
            keys: Vec::new(),
            width: 800.0,
            next_width: None,
            log: Vec::new(),
        }
    }

    /// Width reported by [`WidgetBackend::available_width`].
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Queue a user edit for the widget `id`.
    pub fn edit(&mut self, id: &str, value: impl Into<Value>) -> &mut Self {
        self.edits.insert(WidgetId::new(id), value.into());
        self
    }

    /// Queue activation of the context menu entry `item` on menu `id`.
    pub fn pick(&mut self, id: &str, item: &str) -> &mut Self {
        self.picks.insert(WidgetId::new(id), item.to_string());
        self
    }

    /// Keep the group `id` closed. Groups are expanded by default.
    pub fn collapse(&mut self, id: &str) -> &mut Self {
        self.collapsed.insert(WidgetId::new(id));
        self
    }

    /// Queue a key event for the next frame.
    pub fn key(&mut self, event: KeyEvent) -> &mut Self {
        self.keys.push(event);
        self
    }

    /// Start a new frame: drop last frame's key events and log.
    pub fn next_frame(&mut self) {
        self.keys.clear();
        self.log.clear();
        self.next_width = None;
    }

    pub fn events(&self) -> &[Event] {
        &self.log
    }

    /// Whether any scripted edit or menu pick is still unconsumed.
    pub fn has_pending(&self) -> bool {
        !self.edits.is_empty() || !self.picks.is_empty()
    }

    /// Labels of all groups drawn this frame, in order.
    pub fn group_labels(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Event::Group { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of editing widgets of `kind` drawn this frame.
    pub fn widget_count(&self, kind: WidgetKind) -> usize {
        self.log
            .iter()
            .filter(|e| matches!(e, Event::Widget { kind: k, .. } if *k == kind))
            .count()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Event::Label(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|e| match e {
                Event::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn widget(&mut self, kind: WidgetKind, id: &WidgetId, label: &str) -> Option<Value> {
        let width = self.next_width.take();
        self.log.push(Event::Widget {
            kind,
            id: id.clone(),
            label: label.to_string(),
            width,
        });
        self.edits.remove(id)
    }
}

impl WidgetBackend for ScriptedBackend {
    fn label(&mut self, text: &str) {
        self.log.push(Event::Label(text.to_string()));
    }

    fn error_label(&mut self, message: &str, _detail: &str) {
        self.log.push(Event::Error(message.to_string()));
    }

    fn checkbox(&mut self, id: &WidgetId, label: &str, value: &mut bool) -> bool {
        match self.widget(WidgetKind::Checkbox, id, label).and_then(|v| v.as_bool()) {
            Some(edited) => {
                *value = edited;
                true
            }
            None => false,
        }
    }

    fn drag_int(&mut self, id: &WidgetId, label: &str, value: &mut i64) -> bool {
        match self.widget(WidgetKind::DragInt, id, label).and_then(|v| v.as_i64()) {
            Some(edited) => {
                *value = edited;
                true
            }
            None => false,
        }
    }

    fn drag_real(&mut self, id: &WidgetId, label: &str, value: &mut f64) -> bool {
        match self.widget(WidgetKind::DragReal, id, label).and_then(|v| v.as_f64()) {
            Some(edited) => {
                *value = edited;
                true
            }
            None => false,
        }
    }

    fn text_edit(&mut self, id: &WidgetId, label: &str, value: &mut String) -> bool {
        match self.widget(WidgetKind::TextEdit, id, label) {
            Some(Value::Text(edited)) => {
                *value = edited;
                true
            }
            _ => false,
        }
    }

    fn combo(
        &mut self,
        id: &WidgetId,
        label: &str,
        options: &[String],
        selected: &mut usize,
    ) -> bool {
        let edited = self
            .widget(WidgetKind::Combo, id, label)
            .and_then(|v| v.as_i64())
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < options.len());
        match edited {
            Some(index) => {
                *selected = index;
                true
            }
            None => false,
        }
    }

    fn collapsing(
        &mut self,
        id: &WidgetId,
        label: &str,
        body: &mut dyn FnMut(&mut dyn WidgetBackend),
    ) -> bool {
        let open = !self.collapsed.contains(id);
        self.log.push(Event::Group {
            id: id.clone(),
            label: label.to_string(),
            open,
        });
        if open {
            body(self);
            self.log.push(Event::GroupEnd);
        }
        open
    }

    fn row(&mut self, body: &mut dyn FnMut(&mut dyn WidgetBackend)) {
        self.log.push(Event::RowBegin);
        body(self);
        self.log.push(Event::RowEnd);
    }

    fn context_menu(&mut self, id: &WidgetId, items: &[&str]) -> Option<usize> {
        self.log.push(Event::Menu {
            id: id.clone(),
            items: items.iter().map(ToString::to_string).collect(),
        });
        let pick = self.picks.get(id)?;
        let index = items.iter().position(|item| item == pick)?;
        self.picks.remove(id);
        Some(index)
    }

    fn available_width(&self) -> f32 {
        self.width
    }

    fn set_next_item_width(&mut self, width: f32) {
        self.next_width = Some(width);
    }

    fn image(&mut self, id: &WidgetId, image: &RgbaImage) {
        self.log.push(Event::Image {
            id: id.clone(),
            width: image.width(),
            height: image.height(),
        });
    }

    fn key_events(&self) -> Vec<KeyEvent> {
        self.keys.clone()
    }
}
