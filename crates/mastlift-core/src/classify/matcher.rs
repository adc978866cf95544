use crate::error::MastliftError;
use crate::rules::schema::MatchStrategy;
use regex::{RegexBuilder, RegexSet, RegexSetBuilder};

/// Decides whether a case-folded line belongs to a category.
pub trait LinePredicate: Send + Sync {
    fn matches(&self, folded_line: &str) -> bool;
}

/// Plain substring containment of any keyword.
pub struct SubstringPredicate {
    keywords: Vec<String>,
}

impl SubstringPredicate {
    pub fn new(keywords: &[String]) -> Self {
        SubstringPredicate {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl LinePredicate for SubstringPredicate {
    fn matches(&self, folded_line: &str) -> bool {
        self.keywords.iter().any(|k| folded_line.contains(k.as_str()))
    }
}

/// Any keyword as a whole word (or phrase) delimited by word boundaries.
pub struct WordPredicate {
    pattern: regex::Regex,
}

impl WordPredicate {
    pub fn new(keywords: &[String]) -> Result<Self, MastliftError> {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(&k.to_lowercase()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| MastliftError::KeywordTableInvalid(e.to_string()))?;
        Ok(WordPredicate { pattern })
    }
}

impl LinePredicate for WordPredicate {
    fn matches(&self, folded_line: &str) -> bool {
        self.pattern.is_match(folded_line)
    }
}

/// Keywords interpreted as case-insensitive regular expressions.
pub struct RegexPredicate {
    patterns: RegexSet,
}

impl RegexPredicate {
    pub fn new(keywords: &[String]) -> Result<Self, MastliftError> {
        let patterns = RegexSetBuilder::new(keywords)
            .case_insensitive(true)
            .build()
            .map_err(|e| MastliftError::KeywordTableInvalid(e.to_string()))?;
        Ok(RegexPredicate { patterns })
    }
}

impl LinePredicate for RegexPredicate {
    fn matches(&self, folded_line: &str) -> bool {
        self.patterns.is_match(folded_line)
    }
}

/// Build the predicate for a keyword list under the given strategy.
pub fn build_predicate(
    strategy: MatchStrategy,
    keywords: &[String],
) -> Result<Box<dyn LinePredicate>, MastliftError> {
    Ok(match strategy {
        MatchStrategy::Substring => Box::new(SubstringPredicate::new(keywords)),
        MatchStrategy::Word => Box::new(WordPredicate::new(keywords)?),
        MatchStrategy::Regex => Box::new(RegexPredicate::new(keywords)?),
    })
}
