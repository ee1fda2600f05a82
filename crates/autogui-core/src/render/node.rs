use crate::path::{Path, Segment, WidgetId};
use crate::value::{Annotation, ValueKind};

/// Where a value sits in the graph being rendered.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Field name; empty for sequence elements and the default root.
    pub name: String,
    pub path: Path,
    /// Kinds of the ancestor containers, parallel to `path`.
    pub parents: Vec<ValueKind>,
    /// Declared type of the value, if the parent record has one.
    pub annotation: Option<Annotation>,
    /// Skip custom hooks for this value and everything below it.
    pub ignore_custom: bool,
    /// Drawn inside a grid row, without a label.
    pub inline: bool,
}

impl Node {
    /// Root of a traversal. A non-empty name becomes the first path segment.
    pub fn root(name: &str) -> Self {
        let path = if name.is_empty() {
            Path::root()
        } else {
            Path::root().child(name)
        };
        Self {
            name: name.to_string(),
            path,
            ..Default::default()
        }
    }

    /// Node for a child of this node's value. `ignore_custom` carries over.
    pub fn child(
        &self,
        segment: impl Into<Segment>,
        name: impl Into<String>,
        parent: ValueKind,
        annotation: Option<Annotation>,
    ) -> Self {
        let mut parents = self.parents.clone();
        parents.push(parent);
        Self {
            name: name.into(),
            path: self.path.child(segment),
            parents,
            annotation,
            ignore_custom: self.ignore_custom,
            inline: false,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn ignoring_custom(mut self) -> Self {
        self.ignore_custom = true;
        self
    }

    pub(crate) fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn id(&self) -> WidgetId {
        WidgetId::for_path(&self.path)
    }

    /// Name shown to the user: underscores become spaces, and an unnamed
    /// value is labelled by its last path segment.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            return self.path.last().map(ToString::to_string).unwrap_or_default();
        }
        self.name.replace('_', " ")
    }

    /// Label for a leaf widget.
    pub(crate) fn label(&self) -> String {
        if self.inline {
            String::new()
        } else {
            self.display_name()
        }
    }
}
