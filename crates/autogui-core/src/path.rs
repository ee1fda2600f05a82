//! Traversal paths and the widget identities derived from them.

use std::fmt;

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl Segment {
    /// Append this segment's widget-id form to `out`.
    ///
    /// Keys escape `\`, `/` and `#` with a backslash. An all-digit key also
    /// gets a leading backslash so it cannot read as an index.
    fn encode_into(&self, out: &mut String) {
        match self {
            Self::Index(i) => out.push_str(&i.to_string()),
            Self::Key(k) => {
                if !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()) {
                    out.push('\\');
                }
                for c in k.chars() {
                    if matches!(c, '\\' | '/' | '#') {
                        out.push('\\');
                    }
                    out.push(c);
                }
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Ordered keys/indices locating a value from the traversal root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    /// New path extended by one segment.
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Stable identity of a widget across frames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity of the widget showing the value at `path`. Distinct paths
    /// always give distinct identities.
    pub fn for_path(path: &Path) -> Self {
        let mut id = String::new();
        for (i, segment) in path.segments().iter().enumerate() {
            if i > 0 {
                id.push('/');
            }
            segment.encode_into(&mut id);
        }
        Self(id)
    }

    /// Derived identity for a secondary widget (e.g. a context menu).
    pub fn with(&self, suffix: &str) -> Self {
        Self(format!("{}#{suffix}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = Path::root().child("b").child(1usize);
        assert_eq!(path.to_string(), "b/1");
        assert_eq!(path.last(), Some(&Segment::Index(1)));
    }

    #[test]
    fn test_widget_id_for_path() {
        let path = Path::root().child("grid").child(0usize).child(2usize);
        assert_eq!(WidgetId::for_path(&path).as_str(), "grid/0/2");
        assert_eq!(WidgetId::for_path(&Path::root()).as_str(), "");
        assert_eq!(WidgetId::new("a").with("menu").as_str(), "a#menu");
    }

    #[test]
    fn test_widget_ids_do_not_collide() {
        let id = |segments: Vec<Segment>| WidgetId::for_path(&Path(segments));
        let key = |k: &str| Segment::Key(k.to_string());

        let slash_key = id(vec![key("a/b")]);
        let nested = id(vec![key("a"), key("b")]);
        assert_ne!(slash_key, nested);
        assert_eq!(slash_key.as_str(), "a\\/b");

        assert_ne!(id(vec![key("0")]), id(vec![Segment::Index(0)]));
        assert_ne!(id(vec![key("\\0")]), id(vec![key("0")]));
        assert_ne!(id(vec![key("a#menu")]), WidgetId::new("a").with("menu"));
        assert_eq!(id(vec![key("x1"), Segment::Index(3)]).as_str(), "x1/3");
    }
}
