//! Scoped "did anything change" signal.
//!
//! Every rendering scope pushes a fresh frame on entry and pops it on exit;
//! popping ORs the result into the enclosing frame, so a container learns
//! whether any descendant changed without per-child plumbing. Use
//! [`Renderer::scoped`](crate::Renderer::scoped) rather than pairing the
//! calls by hand.

#[derive(Debug, Default)]
pub struct ModStack {
    frames: Vec<bool>,
}

impl ModStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.frames.push(false);
    }

    /// Record a mutation in the innermost scope.
    pub fn mark_modified(&mut self) {
        match self.frames.last_mut() {
            Some(top) => *top = true,
            None => tracing::trace!("modification outside of any scope"),
        }
    }

    /// Close the innermost scope, propagating its flag to the parent.
    pub fn pop_scope(&mut self) -> bool {
        let modified = self.frames.pop().unwrap_or(false);
        if modified && let Some(parent) = self.frames.last_mut() {
            *parent = true;
        }
        modified
    }

    /// Flag of the innermost scope.
    pub fn is_modified(&self) -> bool {
        self.frames.last().copied().unwrap_or(false)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drop all scopes. Called at the start of every frame; returns `false`
    /// if the previous frame left scopes open.
    pub fn reset(&mut self) -> bool {
        let balanced = self.frames.is_empty();
        if !balanced {
            tracing::warn!(depth = self.frames.len(), "unbalanced modification scopes");
        }
        self.frames.clear();
        balanced
    }
}
