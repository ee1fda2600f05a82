//! The render engine.
//!
//! [`Renderer::render_node`] inspects a [`Value`], draws the matching
//! widgets through the [`WidgetBackend`] and writes edits back in place.
//! Dispatch order, first match wins:
//!
//! 1. a custom hook registered for the record's type name
//! 2. null, as a display-only label
//! 3. bool, int, real and text leaves
//! 4. tuples and lists
//! 5. n-dimensional arrays
//! 6. records and maps
//!
//! Leaves report edits through the modification flag; containers learn
//! about edits below them from [`Renderer::scoped`].

mod array;
mod node;
mod record;
mod scope;
mod sequence;

pub use node::Node;

use crate::backend::WidgetBackend;
use crate::error::Result;
use crate::path::WidgetId;
use crate::session::Session;
use crate::value::Value;

/// One frame's view of a backend and a session.
pub struct Renderer<'a> {
    backend: &'a mut dyn WidgetBackend,
    session: &'a mut Session,
}

impl<'a> Renderer<'a> {
    pub fn new(backend: &'a mut dyn WidgetBackend, session: &'a mut Session) -> Self {
        Self { backend, session }
    }

    pub fn backend(&mut self) -> &mut dyn WidgetBackend {
        &mut *self.backend
    }

    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        self.session
    }

    /// Record an edit in the innermost scope.
    pub fn mark_modified(&mut self) {
        self.session.mods.mark_modified();
    }

    /// Run `body` in its own modification scope. Returns its result and
    /// whether anything inside was modified. The scope is closed even when
    /// `body` returns an error.
    pub fn scoped<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> (T, bool) {
        self.session.mods.push_scope();
        let result = body(self);
        let modified = self.session.mods.pop_scope();
        (result, modified)
    }

    /// Render `value` as the root of a traversal. Returns whether anything
    /// was modified.
    pub fn render(&mut self, value: &mut Value, name: &str) -> Result<bool> {
        let (result, modified) = self.scoped(|ui| ui.render_node(value, &Node::root(name)));
        result.map(|()| modified)
    }

    /// Render `value` at `node`, mutating it in place.
    pub fn render_node(&mut self, value: &mut Value, node: &Node) -> Result<()> {
        let hook = match &*value {
            Value::Record(record) if !node.ignore_custom => {
                self.session.hooks.get(record.type_name())
            }
            _ => None,
        };
        if let Some(hook) = hook {
            return hook.render(self, value, node);
        }

        match value {
            Value::Null => {
                self.backend.label(&format!("{}: None", node.display_name()));
            }
            Value::Bool(b) => {
                if self.backend.checkbox(&node.id(), &node.label(), b) {
                    self.mark_modified();
                }
            }
            Value::Int(int) => {
                let mut edited = int.value;
                if self.backend.drag_int(&node.id(), &node.label(), &mut edited) {
                    int.value = int.kind.cast(edited);
                    self.mark_modified();
                }
            }
            Value::Real(real) => {
                let mut edited = real.value;
                if self.backend.drag_real(&node.id(), &node.label(), &mut edited) {
                    real.value = real.kind.cast(edited);
                    self.mark_modified();
                }
            }
            Value::Text(text) => {
                if self.backend.text_edit(&node.id(), &node.label(), text) {
                    self.mark_modified();
                }
            }
            Value::Tuple(items) => self.render_tuple(items, node)?,
            Value::List(items) => self.render_list(items, node)?,
            Value::Array(array) => self.render_array_at(array, node, &[])?,
            Value::Map(map) => self.render_fields(map, node)?,
            Value::Record(record) => self.render_fields(record, node)?,
        }
        Ok(())
    }

    /// Collapsible group whose body renders through this session.
    /// Returns whether the group is expanded.
    pub fn group(
        &mut self,
        id: &WidgetId,
        label: &str,
        body: impl FnOnce(&mut Renderer<'_>) -> Result<()>,
    ) -> Result<bool> {
        let session = &mut *self.session;
        let mut body = Some(body);
        let mut outcome = Ok(());
        let open = self.backend.collapsing(id, label, &mut |backend| {
            if let Some(body) = body.take() {
                outcome = body(&mut Renderer {
                    backend,
                    session: &mut *session,
                });
            }
        });
        outcome.map(|()| open)
    }

    /// Lay out everything `body` draws on one row.
    pub fn row(&mut self, body: impl FnOnce(&mut Renderer<'_>) -> Result<()>) -> Result<()> {
        let session = &mut *self.session;
        let mut body = Some(body);
        let mut outcome = Ok(());
        self.backend.row(&mut |backend| {
            if let Some(body) = body.take() {
                outcome = body(&mut Renderer {
                    backend,
                    session: &mut *session,
                });
            }
        });
        outcome
    }

    /// A group headed by the node's name, or the body inline for unnamed
    /// values.
    fn titled(
        &mut self,
        node: &Node,
        label: &str,
        body: impl FnOnce(&mut Renderer<'_>) -> Result<()>,
    ) -> Result<bool> {
        if node.name.is_empty() {
            body(self)?;
            Ok(true)
        } else {
            self.group(&node.id(), label, body)
        }
    }
}
