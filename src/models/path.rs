//! Structured paths into the remote store.

use std::fmt;

/// Location in the remote hierarchy as an ordered list of folder names.
///
/// The empty sequence is the store root. Paths are compared and joined by
/// segment, so a name is never split or merged with its neighbours no matter
/// which characters it contains. The `/`-joined form only exists at the edges
/// (display and wire format).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemotePath {
    segments: Vec<String>,
}

impl RemotePath {
    /// The store root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from already-split segments. Empty segments are dropped.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
        Self { segments }
    }

    /// Final segment (`None` at the root).
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Ancestor made of the first `depth` segments.
    pub fn prefix(&self, depth: usize) -> Self {
        Self {
            segments: self.segments[..depth.min(self.segments.len())].to_vec(),
        }
    }

    /// `/`-joined form used for display and as the backend `path` value.
    ///
    /// The root renders as the empty string.
    pub fn display(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let root = RemotePath::root();
        assert!(root.is_root());
        assert_eq!(root.display(), "");
        assert_eq!(root.name(), None);
    }

    #[test]
    fn test_join_and_display() {
        let path = RemotePath::from_segments(["a", "b"]);
        let joined = path.join("c");
        assert_eq!(joined.segments(), ["a", "b", "c"]);
        assert_eq!(joined.display(), "a/b/c");
        assert_eq!(joined.to_string(), "a/b/c");
        // original is untouched
        assert_eq!(path.display(), "a/b");
    }

    #[test]
    fn test_join_empty_segment_is_ignored() {
        let path = RemotePath::from_segments(["a"]);
        assert_eq!(path.join(""), path);
    }

    #[test]
    fn test_segments_compare_structurally() {
        // "a b" as one segment is not the same location as ["a", "b"]
        let spaced = RemotePath::root().join("a b");
        let nested = RemotePath::from_segments(["a", "b"]);
        assert_ne!(spaced, nested);
        assert_eq!(spaced.depth(), 1);
    }

    #[test]
    fn test_name() {
        let path = RemotePath::from_segments(["Docs", "2024", "report.pdf"]);
        assert_eq!(path.name(), Some("report.pdf"));
    }

    #[test]
    fn test_prefix() {
        let path = RemotePath::from_segments(["a", "b", "c"]);
        assert_eq!(path.prefix(0), RemotePath::root());
        assert_eq!(path.prefix(2).display(), "a/b");
        assert_eq!(path.prefix(10), path);
    }

    #[test]
    fn test_from_segments_drops_empty() {
        let path = RemotePath::from_segments(["", "a", "", "b"]);
        assert_eq!(path.display(), "a/b");
    }
}
