//! Location tracking for validation errors
//!
//! A [`KeyChain`] is the ordered path of object keys and array indices from
//! the root of the validated value to the value currently being inspected.
//! It lives on the stack of a single validation call and is never shared.

use std::fmt;

/// Placeholder shown when an error is located at the root of the value
pub const ROOT_LEVEL: &str = "<root level>";

const SEPARATOR: char = '.';

/// Ordered path of keys/indices locating a value within the root value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChain {
    segments: Vec<String>,
}

impl KeyChain {
    /// Create an empty key chain (the root)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key chain from existing segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this key chain points at the root
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Append a segment
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Remove the last segment
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// Run `f` with `segment` appended, restoring the chain afterwards
    pub fn with_segment<R>(&mut self, segment: impl Into<String>, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push(segment);
        let result = f(self);
        self.pop();
        result
    }

    /// Render the chain, or `None` at the root
    ///
    /// `["foo", "bar"]` renders as `foo.bar`, `["foo", "1"]` as `foo[1]` and
    /// `["f.oo", "bar"]` as `["f.oo"].bar`.
    pub fn render(&self) -> Option<String> {
        let (first, rest) = self.segments.split_first()?;

        let mut out = String::new();
        push_segment(&mut out, first, false);
        for segment in rest {
            push_segment(&mut out, segment, true);
        }
        Some(out)
    }
}

fn push_segment(out: &mut String, segment: &str, separated: bool) {
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('[');
        out.push_str(segment);
        out.push(']');
    } else if segment.contains(SEPARATOR) {
        out.push_str("[\"");
        out.push_str(segment);
        out.push_str("\"]");
    } else {
        if separated {
            out.push(SEPARATOR);
        }
        out.push_str(segment);
    }
}

impl fmt::Display for KeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(rendered) => f.write_str(&rendered),
            None => f.write_str(ROOT_LEVEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let chain = KeyChain::from_segments(["foo", "bar"]);
        assert_eq!(chain.render().as_deref(), Some("foo.bar"));
    }

    #[test]
    fn test_render_root() {
        let chain = KeyChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.render(), None);
        assert_eq!(chain.to_string(), ROOT_LEVEL);
    }

    #[test]
    fn test_render_dotted_segments() {
        let chain = KeyChain::from_segments(["f.oo", "bar"]);
        assert_eq!(chain.render().as_deref(), Some("[\"f.oo\"].bar"));

        let chain = KeyChain::from_segments(["foo", "b.ar"]);
        assert_eq!(chain.render().as_deref(), Some("foo[\"b.ar\"]"));
    }

    #[test]
    fn test_render_indices() {
        let chain = KeyChain::from_segments(["foo", "1"]);
        assert_eq!(chain.render().as_deref(), Some("foo[1]"));

        let chain = KeyChain::from_segments(["2dArray", "2", "0"]);
        assert_eq!(chain.render().as_deref(), Some("[2dArray][2][0]"));
    }

    #[test]
    fn test_with_segment_restores() {
        let mut chain = KeyChain::from_segments(["a"]);
        let inner = chain.with_segment("b", |c| c.to_string());
        assert_eq!(inner, "a.b");
        assert_eq!(chain.len(), 1);
    }
}
