//! Scopes layered on the modification flag: undo history, autosave, error
//! sinks, and cached LaTeX images.

use super::Renderer;
use crate::error::{RenderError, Result};
use crate::path::WidgetId;
use crate::storage::Storage;
use crate::value::Value;
use std::path::Path;

impl Renderer<'_> {
    /// Render `body` under the undo/redo history named `name`.
    ///
    /// On entry a pending undo or redo for this history is applied to
    /// `value` (marking the enclosing scope modified) and this frame's key
    /// events are offered for arbitration. On exit, edits made by `body`
    /// are snapshotted once the history's quiet period has elapsed.
    pub fn mod_history(
        &mut self,
        name: &str,
        value: &mut Value,
        body: impl FnOnce(&mut Renderer<'_>, &mut Value) -> Result<()>,
    ) -> Result<()> {
        let id = WidgetId::new(name).with("history");

        self.session.histories.ensure(&id, value);
        if let Some(restored) = self.session.histories.take_pending(&id) {
            *value = restored;
            self.mark_modified();
        }

        let events = self.backend.key_events();
        let session = &mut *self.session;
        session
            .histories
            .offer(&id, &events, &session.config.shortcuts);

        let (result, modified) = self.scoped(|ui| body(ui, value));

        let now = self.session.clock.now();
        let policy = self.session.config.history.policy();
        self.session
            .histories
            .settle(&id, modified, now, &policy, value);
        result
    }

    /// Render `body` with `value` autosaved to `path`.
    ///
    /// The first time `path` is seen, `value` is replaced by the stored
    /// state, if any. Edits are flushed after the autosave quiet period.
    pub fn autosave(
        &mut self,
        value: &mut Value,
        path: &Path,
        storage: &mut dyn Storage,
        body: impl FnOnce(&mut Renderer<'_>, &mut Value) -> Result<()>,
    ) -> Result<()> {
        self.session.autosaves.enter(path, value, storage);

        let (result, modified) = self.scoped(|ui| body(ui, value));

        let now = self.session.clock.now();
        let policy = self.session.config.autosave.policy();
        self.session
            .autosaves
            .exit(path, modified, now, &policy, value, storage);
        result
    }

    /// Run `body`, showing any error it returns inline instead of passing
    /// it on. Widgets drawn before the failure stay on screen.
    pub fn error_sink(&mut self, body: impl FnOnce(&mut Renderer<'_>) -> Result<()>) {
        if let Err(e) = body(self) {
            tracing::warn!("render error: {}", e);
            let message = error_message(&e);
            self.backend.error_label(&message, &e.detail());
        }
    }

    /// Draw the LaTeX formula `text` as an image.
    pub fn latex(&mut self, text: &str) -> Result<()> {
        let latex = self.session.latex_mut();
        let key = latex.key(text);
        let image = latex.render(text)?;
        self.backend.image(&WidgetId::new(key), image);
        Ok(())
    }
}

fn error_message(error: &RenderError) -> String {
    match error {
        RenderError::Storage(e) => e.user_message(),
        other => other.to_string(),
    }
}
