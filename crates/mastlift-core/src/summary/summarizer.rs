use std::collections::HashSet;

/// Condenses the lines of one bucket into readable text.
///
/// Passed into the pipeline, so a model-backed implementation can replace the
/// builtin one without any process-wide state.
pub trait Summarizer: Send + Sync {
    /// Summarize non-empty input. Callers handle the empty case.
    fn summarize(&self, lines: &[String]) -> String;
}

/// Joins distinct trimmed lines in document order, capped at a character budget.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    max_chars: usize,
}

impl ExtractiveSummarizer {
    pub const DEFAULT_MAX_CHARS: usize = 1000;

    pub fn new(max_chars: usize) -> Self {
        ExtractiveSummarizer { max_chars }
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_CHARS)
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, lines: &[String]) -> String {
        let mut seen = HashSet::new();
        let joined = lines
            .iter()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|l| !l.is_empty() && seen.insert(l.clone()))
            .collect::<Vec<_>>()
            .join("; ");

        if joined.chars().count() <= self.max_chars {
            return joined;
        }
        let mut cut: String = joined.chars().take(self.max_chars).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_joins_distinct_lines() {
        let s = ExtractiveSummarizer::default().summarize(&lines(&[
            "  Tower   height 30 m ",
            "RRU 22 kg",
            "Tower height 30 m",
        ]));
        assert_eq!(s, "Tower height 30 m; RRU 22 kg");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let s = ExtractiveSummarizer::new(5).summarize(&lines(&["ÅÄÖåäöé"]));
        assert_eq!(s, "ÅÄÖåä…");
    }

    #[test]
    fn test_blank_lines_dropped() {
        let s = ExtractiveSummarizer::default().summarize(&lines(&["   ", "dish"]));
        assert_eq!(s, "dish");
    }
}
