//! Keyword intent classification.
//!
//! Distinguishes a single focused product request ("brass floor lamp")
//! from a general improve-this-space request ("make my living room cozy").
//! The signal only gates how wide the query set goes — it is advisory and
//! never filters later results.

use serde::{Serialize, Serializer};

/// Furnishing categories and the keywords that mark them.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("lamp", &["lamp", "sconce", "light fixture", "pendant light"]),
    ("sofa", &["sofa", "couch", "loveseat", "sectional"]),
    ("table", &["table", "nightstand"]),
    ("rug", &["rug", "carpet"]),
    (
        "wall art",
        &["wall art", "painting", "poster", "art print", "artwork"],
    ),
    ("plant", &["plant", "planter", "succulent"]),
    ("shelving", &["shelf", "shelving", "bookcase", "bookshelf"]),
    ("chair", &["chair", "armchair", "stool", "recliner"]),
    ("desk", &["desk", "workstation"]),
    ("bed", &["bed", "mattress", "headboard"]),
    ("dresser", &["dresser", "wardrobe", "chest of drawers"]),
    ("mirror", &["mirror"]),
];

/// The classified request intent. Serializes as a plain string: the
/// category name, or `"general"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Exactly one category matched; holds the category name.
    Specific(String),
    /// Zero or multiple categories matched.
    General,
}

impl Intent {
    #[must_use]
    pub fn is_general(&self) -> bool {
        matches!(self, Intent::General)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Intent::Specific(category) => category,
            Intent::General => "general",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classifies an idea string by keyword presence: exactly one matching
/// category makes the request specific to it, anything else is general.
#[must_use]
pub fn classify(idea: &str) -> Intent {
    let lower = idea.to_lowercase();
    let mut matched: Option<&str> = None;

    for (category, keywords) in CATEGORIES {
        if keywords.iter().any(|k| contains_word(&lower, k)) {
            if matched.is_some() {
                return Intent::General;
            }
            matched = Some(category);
        }
    }

    match matched {
        Some(category) => Intent::Specific(category.to_string()),
        None => Intent::General,
    }
}

/// Substring match on word boundaries with plural tolerance: "lamps"
/// counts as "lamp", but "comfortable" does not count as "table" and
/// "bedroom" does not count as "bed".
fn contains_word(text: &str, keyword: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = text[from..].find(keyword) {
        let start = from + pos;
        let end = start + keyword.len();
        let left_ok = start == 0
            || !text[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
        let rest = &text[end..];
        let right_ok = match rest.chars().next() {
            None => true,
            Some('s') => !rest[1..].chars().next().is_some_and(char::is_alphanumeric),
            Some(c) => !c.is_alphanumeric(),
        };
        if left_ok && right_ok {
            return true;
        }
        from = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_category_is_specific() {
        assert_eq!(classify("floor lamp"), Intent::Specific("lamp".to_string()));
        assert_eq!(
            classify("A big comfy sectional"),
            Intent::Specific("sofa".to_string())
        );
    }

    #[test]
    fn no_category_is_general() {
        assert_eq!(classify("make my living room cozy"), Intent::General);
    }

    #[test]
    fn multiple_categories_are_general() {
        assert_eq!(classify("a lamp for my desk"), Intent::General);
        assert_eq!(classify("sofa and coffee table set"), Intent::General);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("BRASS LAMP"), Intent::Specific("lamp".to_string()));
    }

    #[test]
    fn keywords_respect_word_boundaries() {
        assert_eq!(classify("something comfortable and cozy"), Intent::General);
        assert_eq!(classify("refresh my bedroom"), Intent::General);
    }

    #[test]
    fn plurals_still_match() {
        assert_eq!(
            classify("reading lamps"),
            Intent::Specific("lamp".to_string())
        );
    }

    #[test]
    fn intent_renders_as_plain_string() {
        assert_eq!(Intent::Specific("lamp".to_string()).as_str(), "lamp");
        assert_eq!(Intent::General.as_str(), "general");
    }
}
