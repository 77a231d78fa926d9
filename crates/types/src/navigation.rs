//! Navigation path and slide direction owned by a drawer session.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chain of entry ids chosen from the root. Empty means the root level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationPath(Vec<String>);

impl NavigationPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, id: impl Into<String>) {
        self.0.push(id.into());
    }

    /// Removes and returns the last segment, if any.
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns a copy extended by one segment.
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.push(id);
        next
    }
}

impl From<Vec<String>> for NavigationPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<const N: usize> From<[&str; N]> for NavigationPath {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|segment| segment.to_string()).collect())
    }
}

impl fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        f.write_str(&self.0.join(" / "))
    }
}

/// Parses `a/b/c`; blank segments are dropped so `""` and `"/"` are the root.
impl FromStr for NavigationPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split('/')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }
}

/// Which way the next panel transition animates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    /// Drilling down: the new level enters from the right.
    #[default]
    Forward,
    /// Going back: the previous level enters from the left.
    Backward,
}

impl SlideDirection {
    /// `+1` for forward, `-1` for backward.
    pub fn sign(self) -> f32 {
        match self {
            SlideDirection::Forward => 1.0,
            SlideDirection::Backward => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_track_depth() {
        let mut path = NavigationPath::new();
        assert!(path.is_root());
        path.push("a");
        path.push("b");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.last(), Some("b"));
        assert_eq!(path.pop().as_deref(), Some("b"));
        assert_eq!(path.segments(), ["a".to_string()]);
    }

    #[test]
    fn parses_slash_separated_segments() {
        let path: NavigationPath = " settings / display/".parse().unwrap();
        assert_eq!(path, NavigationPath::from(["settings", "display"]));
        let root: NavigationPath = "/".parse().unwrap();
        assert!(root.is_root());
    }

    #[test]
    fn display_uses_separators_and_root_marker() {
        assert_eq!(NavigationPath::new().to_string(), "/");
        assert_eq!(NavigationPath::from(["a", "b"]).to_string(), "a / b");
    }

    #[test]
    fn direction_sign_matches_slide_side() {
        assert_eq!(SlideDirection::default(), SlideDirection::Forward);
        assert_eq!(SlideDirection::Forward.sign(), 1.0);
        assert_eq!(SlideDirection::Backward.sign(), -1.0);
    }
}
