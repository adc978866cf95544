use serde::ser::{Serialize, SerializeMap, Serializer};

/// Lines collected under one category, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLines {
    pub category: String,
    pub lines: Vec<String>,
}

/// Category → matched lines, with categories kept in table order.
///
/// Serializes as a JSON object whose keys follow the table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedBucket {
    entries: Vec<CategoryLines>,
    matched: Vec<String>,
}

impl ClassifiedBucket {
    pub(crate) fn with_categories<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        ClassifiedBucket {
            entries: names
                .map(|name| CategoryLines {
                    category: name.to_string(),
                    lines: Vec::new(),
                })
                .collect(),
            matched: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, index: usize, line: &str) {
        self.entries[index].lines.push(line.to_string());
    }

    pub(crate) fn record_match(&mut self, line: &str) {
        self.matched.push(line.to_string());
    }

    /// Lines of one category, if the category exists.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.lines.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryLines> {
        self.entries.iter()
    }

    /// Every line that landed in at least one category, once, in document order.
    pub fn matched_lines(&self) -> &[String] {
        &self.matched
    }

    /// True when no line matched any category.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

impl Serialize for ClassifiedBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.lines)?;
        }
        map.end()
    }
}
