//! Current location and back-navigation history.

use crate::models::RemotePath;

/// Owns the current path and the stack of previously visited paths.
///
/// There is always exactly one current path (the root by default). History is
/// pushed on every move and popped by [`PathModel::go_back`].
#[derive(Clone, Debug, Default)]
pub struct PathModel {
    current: RemotePath,
    history: Vec<RemotePath>,
}

impl PathModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &RemotePath {
        &self.current
    }

    pub fn history(&self) -> &[RemotePath] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Descends into the child folder `name` and returns the new path.
    pub fn navigate_into(&mut self, name: &str) -> RemotePath {
        let next = self.current.join(name);
        self.move_to(next);
        self.current.clone()
    }

    /// Jumps to an arbitrary path (breadcrumb navigation).
    ///
    /// Returns `None` if `path` is already current; nothing is pushed then.
    pub fn navigate_to(&mut self, path: RemotePath) -> Option<RemotePath> {
        if path == self.current {
            return None;
        }
        self.move_to(path);
        Some(self.current.clone())
    }

    /// Returns to the previously visited path. No-op on empty history.
    pub fn go_back(&mut self) -> Option<RemotePath> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(self.current.clone())
    }

    fn move_to(&mut self, next: RemotePath) {
        let previous = std::mem::replace(&mut self.current, next);
        if previous != self.current {
            self.history.push(previous);
        }
    }
}
