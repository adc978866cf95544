pub mod bucket;
pub mod matcher;

pub use bucket::{CategoryLines, ClassifiedBucket};
pub use matcher::LinePredicate;

use crate::error::MastliftError;
use crate::model::TextDocument;
use crate::rules::schema::KeywordTable;
use tracing::debug;

/// Buckets document lines into the categories of one keyword table.
pub struct Classifier {
    name: String,
    categories: Vec<(String, Box<dyn LinePredicate>)>,
    exclusive: bool,
}

impl Classifier {
    /// Compile a keyword table with its configured matching strategy.
    pub fn new(table: &KeywordTable) -> Result<Self, MastliftError> {
        let categories = table
            .categories
            .iter()
            .map(|c| {
                let predicate = matcher::build_predicate(table.matching, &c.keywords)?;
                Ok((c.name.clone(), predicate))
            })
            .collect::<Result<Vec<_>, MastliftError>>()?;

        Ok(Classifier {
            name: table.name.clone(),
            categories,
            exclusive: table.exclusive,
        })
    }

    /// Build a classifier from hand-made predicates.
    pub fn from_predicates(
        name: impl Into<String>,
        categories: Vec<(String, Box<dyn LinePredicate>)>,
        exclusive: bool,
    ) -> Self {
        Classifier {
            name: name.into(),
            categories,
            exclusive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classify every line of a document.
    ///
    /// A line joins each category whose predicate accepts it, or only the
    /// first such category when the classifier is exclusive.
    pub fn classify(&self, document: &TextDocument) -> ClassifiedBucket {
        let mut bucket =
            ClassifiedBucket::with_categories(self.categories.iter().map(|(n, _)| n.as_str()));

        for line in document.lines() {
            let folded = line.to_lowercase();
            let mut hit = false;
            for (i, (_, predicate)) in self.categories.iter().enumerate() {
                if predicate.matches(&folded) {
                    bucket.push(i, line);
                    hit = true;
                    if self.exclusive {
                        break;
                    }
                }
            }
            if hit {
                bucket.record_match(line);
            }
        }

        debug!(
            table = %self.name,
            matched = bucket.matched_lines().len(),
            lines = document.lines().len(),
            "classified document"
        );
        bucket
    }
}
