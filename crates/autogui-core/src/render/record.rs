//! Records and maps.

use super::{Node, Renderer};
use crate::error::Result;
use crate::value::{Fields, Map, Record, ValueKind};

/// Parent kind recorded for the fields of a container.
pub(super) trait FieldContainer: Fields {
    const KIND: ValueKind;
}

impl FieldContainer for Record {
    const KIND: ValueKind = ValueKind::Record;
}

impl FieldContainer for Map {
    const KIND: ValueKind = ValueKind::Map;
}

impl Renderer<'_> {
    /// Render every field, checked out and written back one at a time.
    /// Rejected write-backs (read-only fields) are skipped silently.
    pub(super) fn render_fields<F: FieldContainer>(
        &mut self,
        fields: &mut F,
        node: &Node,
    ) -> Result<()> {
        let keys = fields.keys();
        if keys.is_empty() {
            self.backend.label(&format!("{}: {{}}", node.display_name()));
            return Ok(());
        }

        self.titled(node, &node.display_name(), |ui| {
            for key in keys {
                let Some(mut value) = fields.checkout(&key) else {
                    continue;
                };
                let annotation = fields.annotation(&key).cloned();
                let child = node.child(key.as_str(), key.as_str(), F::KIND, annotation);

                let result = ui.render_node(&mut value, &child);
                if let Err(e) = fields.write_back(&key, value) {
                    tracing::trace!(field = %child.id(), "write-back skipped: {}", e);
                }
                result?;
            }
            Ok(())
        })?;
        Ok(())
    }
}
