use std::fmt;

/// One step of a [`Path`]: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member lookup by key.
    Key(String),
    /// Array element lookup by current index.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Ordered list of segments identifying one node in a configuration tree.
///
/// The string form is dot-separated with numeric segments addressing array
/// indices, e.g. `nop.pages.0.field_a.data_key`. The empty path addresses
/// the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, addressing the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-and-index string into a path.
    ///
    /// An all-digit segment parses as an array index; everything else is an
    /// object key. The empty string parses as the root path.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Self::root();
        }
        let segments = s
            .split('.')
            .map(|seg| {
                if !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()) {
                    match seg.parse() {
                        Ok(i) => Segment::Index(i),
                        Err(_) => Segment::Key(seg.to_string()),
                    }
                } else {
                    Segment::Key(seg.to_string())
                }
            })
            .collect();
        Self { segments }
    }

    /// The segments of this path, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this path addresses the root.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Extend this path with an object key segment.
    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(Segment::Key(key.into()));
    }

    /// Extend this path with an array index segment.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    /// A new path with `key` appended.
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut p = self.clone();
        p.push_key(key);
        p
    }

    /// A new path with `index` appended.
    pub fn child_index(&self, index: usize) -> Self {
        let mut p = self.clone();
        p.push_index(index);
        p
    }

    /// The first `len` segments as a new path.
    ///
    /// Used to report where a walk failed.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mixed_segments() {
        let path = Path::parse("nop.pages.0.field_a.data_key");
        assert_eq!(path.len(), 5);
        assert_eq!(path.segments()[2], Segment::Index(0));
        assert_eq!(path.segments()[3], Segment::Key("field_a".to_string()));
    }

    #[test]
    fn display_round_trip() {
        for s in ["a.b.0.c", "field_mappings", "pages.12.page one.f"] {
            assert_eq!(Path::parse(s).to_string(), s);
        }
    }

    #[test]
    fn empty_is_root() {
        assert!(Path::parse("").is_empty());
        assert_eq!(Path::root().to_string(), "");
    }

    #[test]
    fn child_builders() {
        let p = Path::parse("a").child_key("b").child_index(3);
        assert_eq!(p.to_string(), "a.b.3");
    }

    #[test]
    fn prefix_reports_partial_path() {
        let p = Path::parse("a.b.c");
        assert_eq!(p.prefix(2).to_string(), "a.b");
        assert_eq!(p.prefix(10).to_string(), "a.b.c");
    }
}
