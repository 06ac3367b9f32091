//! Entry draft: the text of the four STAR fields plus tags, and the small
//! editing helpers the form offers around suggestions.

use star_journal_core::field::Field;

/// Tags offered by the local tag completer, in display order.
pub const COMMON_TAGS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "nodejs",
    "express",
    "mongodb",
    "postgresql",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "debugging",
    "optimization",
    "refactoring",
    "testing",
    "ci/cd",
];

const MAX_QUICK_TAGS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
    pub tags: Vec<String>,
}

impl EntryDraft {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Situation => &self.situation,
            Field::Task => &self.task,
            Field::Action => &self.action,
            Field::Result => &self.result,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Situation => &mut self.situation,
            Field::Task => &mut self.task,
            Field::Action => &mut self.action,
            Field::Result => &mut self.result,
        }
    }

    /// Append a clicked suggestion to `field`, separated by a space.
    pub fn insert_into_field(&mut self, field: Field, snippet: &str) {
        let text = self.field_mut(field);
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(snippet);
    }

    /// Add a tag unless it is blank or already present. Returns whether it
    /// was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }
}

/// Local tag completion for the tag input box.
pub fn quick_tag_suggestions(input: &str) -> Vec<&'static str> {
    if input.chars().count() <= 1 {
        return Vec::new();
    }
    let needle = input.to_lowercase();
    COMMON_TAGS
        .iter()
        .copied()
        .filter(|tag| tag.contains(&needle))
        .take(MAX_QUICK_TAGS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_into_empty_and_filled_field() {
        let mut draft = EntryDraft::default();
        draft.insert_into_field(Field::Task, "memoization");
        assert_eq!(draft.task, "memoization");
        draft.insert_into_field(Field::Task, "code-splitting");
        assert_eq!(draft.field(Field::Task), "memoization code-splitting");
        assert!(draft.situation.is_empty());
    }

    #[test]
    fn test_add_tag_trims_and_dedupes() {
        let mut draft = EntryDraft::default();
        assert!(draft.add_tag("  redis "));
        assert!(!draft.add_tag("redis"));
        assert!(!draft.add_tag("   "));
        assert!(draft.add_tag("caching"));
        assert_eq!(draft.tags, vec!["redis", "caching"]);

        draft.remove_tag("redis");
        assert_eq!(draft.tags, vec!["caching"]);
    }

    #[test]
    fn test_quick_tags_require_two_chars() {
        assert!(quick_tag_suggestions("").is_empty());
        assert!(quick_tag_suggestions("j").is_empty());
        assert_eq!(quick_tag_suggestions("ja"), vec!["javascript", "java"]);
    }

    #[test]
    fn test_quick_tags_case_insensitive_in_list_order() {
        assert_eq!(quick_tag_suggestions("REACT"), vec!["react"]);
        assert_eq!(
            quick_tag_suggestions("in"),
            vec!["debugging", "refactoring", "testing"]
        );
        assert_eq!(
            quick_tag_suggestions("es"),
            vec!["express", "postgresql", "kubernetes", "testing"]
        );
    }
}
