/// Start position of a syntax node: 1-based line, 0-based column (in bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of every line start, for offset to line/column lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source_text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source_text
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self { starts }
    }

    pub fn location(&self, offset: u32) -> Location {
        let line = self.starts.partition_point(|&start| start <= offset);
        Location {
            line,
            column: (offset - self.starts[line - 1]) as usize,
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_offset() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.location(0), Location { line: 1, column: 0 });
        assert_eq!(index.location(1), Location { line: 1, column: 1 });
        assert_eq!(index.location(3), Location { line: 2, column: 0 });
        assert_eq!(index.location(6), Location { line: 3, column: 0 });
        assert_eq!(index.location(8), Location { line: 4, column: 1 });
        assert_eq!(index.line_count(), 4);
    }

    #[test]
    fn test_location_display() {
        let location = Location { line: 14, column: 2 };
        assert_eq!(location.to_string(), "14:2");
    }
}
