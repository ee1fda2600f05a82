//! Tuples and lists.

use super::{Node, Renderer};
use crate::error::Result;
use crate::value::{Annotation, Value, ValueKind};

const NEW: &str = "New";
const CLEAR: &str = "Clear";
const DUPLICATE: &str = "Duplicate";
const REMOVE: &str = "Remove";

/// Structural edit requested from an element's context menu. Applied after
/// the traversal so indices stay valid while iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementOp {
    Duplicate(usize),
    Remove(usize),
}

impl ElementOp {
    fn index(self) -> usize {
        match self {
            Self::Duplicate(i) | Self::Remove(i) => i,
        }
    }
}

/// Group label for element `index`: its shape (lists only) and `name`.
fn element_label(index: usize, item: &Value, with_shape: bool) -> String {
    let mut label = index.to_string();
    if with_shape && let Some(shape) = item.shape() {
        label.push_str(&format!(" {shape:?}"));
    }
    if let Some(name) = item.name_hint() {
        label.push(' ');
        label.push_str(name);
    }
    label
}

impl Renderer<'_> {
    pub(super) fn render_tuple(&mut self, items: &mut [Value], node: &Node) -> Result<()> {
        let label = format!("{} [{}]-tuple", node.display_name(), items.len());
        self.titled(node, &label, |ui| {
            for (i, item) in items.iter_mut().enumerate() {
                let child = node.child(i, "", ValueKind::Tuple, None);
                let label = element_label(i, item, false);
                ui.group(&child.id(), &label, |ui| ui.render_node(item, &child))?;
            }
            Ok(())
        })?;
        Ok(())
    }

    pub(super) fn render_list(&mut self, items: &mut Vec<Value>, node: &Node) -> Result<()> {
        if node.name.is_empty() {
            return self.render_elements(items, node);
        }

        let id = node.id();
        let label = format!("{} [{}]", node.display_name(), items.len());
        let rendered = self.group(&id, &label, |ui| ui.render_elements(items, node));

        let element = node.annotation.as_ref().and_then(Annotation::element);
        let mut entries = Vec::with_capacity(2);
        if element.is_some() {
            entries.push(NEW);
        }
        entries.push(CLEAR);

        let picked = self
            .backend
            .context_menu(&id.with("menu"), &entries)
            .and_then(|i| entries.get(i).copied());
        match (picked, element) {
            (Some(NEW), Some(element)) => {
                items.push(element.default_value());
                self.mark_modified();
            }
            (Some(CLEAR), _) => {
                items.clear();
                self.mark_modified();
            }
            _ => {}
        }

        rendered.map(|_| ())
    }

    fn render_elements(&mut self, items: &mut Vec<Value>, node: &Node) -> Result<()> {
        let mut ops = Vec::new();
        let mut result = Ok(());

        for (i, item) in items.iter_mut().enumerate() {
            let child = node.child(i, "", ValueKind::List, None);
            let id = child.id();
            let label = element_label(i, item, true);
            let rendered = self.group(&id, &label, |ui| ui.render_node(item, &child));

            match self.backend.context_menu(&id.with("menu"), &[DUPLICATE, REMOVE]) {
                Some(0) => ops.push(ElementOp::Duplicate(i)),
                Some(1) => ops.push(ElementOp::Remove(i)),
                _ => {}
            }

            if let Err(e) = rendered {
                result = Err(e);
                break;
            }
        }

        ops.sort_by_key(|op| std::cmp::Reverse(op.index()));
        for op in ops {
            match op {
                ElementOp::Duplicate(i) => {
                    let copy = items[i].clone();
                    items.insert(i, copy);
                }
                ElementOp::Remove(i) => {
                    items.remove(i);
                }
            }
            tracing::debug!(list = %node.id(), ?op, "applied list edit");
            self.mark_modified();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NdArray;

    #[test]
    fn test_element_label() {
        let array = Value::from(NdArray::zeros(vec![2, 3]));
        assert_eq!(element_label(0, &array, true), "0 [2, 3]");
        assert_eq!(element_label(0, &array, false), "0");

        let named = Value::from(crate::value::Map::new().with("name", "left"));
        assert_eq!(element_label(4, &named, true), "4 left");
    }
}
