//! Custom render hooks.
//!
//! A hook replaces default structural rendering for every record of one
//! type name. Hooks can still fall back to the default rendering for (parts
//! of) their value by rendering a node with `ignore_custom` set.

use crate::error::Result;
use crate::render::{Node, Renderer};
use crate::value::{Int, IntKind, Record, Value, ValueKind};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub trait RenderHook {
    /// Render `value` (a record of the registered type) in place.
    fn render(&self, ui: &mut Renderer<'_>, value: &mut Value, node: &Node) -> Result<()>;
}

impl<F> RenderHook for F
where
    F: Fn(&mut Renderer<'_>, &mut Value, &Node) -> Result<()>,
{
    fn render(&self, ui: &mut Renderer<'_>, value: &mut Value, node: &Node) -> Result<()> {
        self(ui, value, node)
    }
}

/// Hooks keyed by record type name.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: HashMap<String, Rc<dyn RenderHook>>,
}

impl Default for HookRegistry {
    /// Registry with the built-in [`Selection`] hook.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Selection::TYPE_NAME, SelectionHook);
        registry
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.hooks.keys().collect();
        names.sort();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}

impl HookRegistry {
    /// Registry without any hooks, not even the built-in ones.
    pub fn empty() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Register `hook` for records named `type_name`, replacing any
    /// previous hook.
    pub fn register(&mut self, type_name: impl Into<String>, hook: impl RenderHook + 'static) {
        self.hooks.insert(type_name.into(), Rc::new(hook));
    }

    pub fn unregister(&mut self, type_name: &str) -> bool {
        self.hooks.remove(type_name).is_some()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.hooks.contains_key(type_name)
    }

    pub fn get(&self, type_name: &str) -> Option<Rc<dyn RenderHook>> {
        self.hooks.get(type_name).cloned()
    }
}

/// A combo box choice over an editable list of options.
///
/// Stored as a `Selection` record with an `options` list and an `index`.
pub struct Selection;

impl Selection {
    pub const TYPE_NAME: &'static str = "Selection";

    /// Build a selection. `index` is kept as given.
    pub fn new(options: Vec<Value>, index: usize) -> Record {
        Record::new(Self::TYPE_NAME)
            .with("options", Value::List(options))
            .with("index", Value::Int(Int::new(index as i64, IntKind::U64)))
    }

    /// Currently selected option, if the index is in range.
    pub fn selected(record: &Record) -> Option<&Value> {
        let index = usize::try_from(record.get("index")?.as_i64()?).ok()?;
        record.get("options")?.as_list()?.get(index)
    }
}

struct SelectionHook;

impl RenderHook for SelectionHook {
    fn render(&self, ui: &mut Renderer<'_>, value: &mut Value, node: &Node) -> Result<()> {
        let Some(record) = value.as_record_mut() else {
            return ui.render_node(value, &node.clone().ignoring_custom());
        };

        let options: Vec<String> = record
            .get("options")
            .and_then(Value::as_list)
            .map(|items| items.iter().map(ToString::to_string).collect())
            .unwrap_or_default();

        if !options.is_empty() {
            let current = record
                .get("index")
                .and_then(Value::as_i64)
                .and_then(|i| usize::try_from(i).ok())
                .unwrap_or(0);
            let mut selected = current.min(options.len() - 1);
            let id = node.id();
            let label = node.display_name();
            if ui.backend().combo(&id, &label, &options, &mut selected) {
                if let Some(Value::Int(index)) = record.get_mut("index") {
                    index.value = index.kind.cast(selected as i64);
                }
                ui.mark_modified();
            }
        }

        let Some(options) = record.get_mut("options") else {
            return Ok(());
        };
        let child = node.child("options", "options", ValueKind::Record, None);
        ui.render_node(options, &child)
    }
}
