use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Category key: the lowercase, dash-joined words of the category name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// `"Home & Garden"` becomes `home-garden`.
    pub fn from_name(name: &str) -> Self {
        let words: Vec<String> = name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self(words.join("-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A product category offered in the creation form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: CategoryId::from_name(&name),
            name,
        }
    }

    /// True when `value` names this category by key or by display name.
    pub fn matches(&self, value: &str) -> bool {
        self.id == CategoryId::from_name(value)
    }
}

/// Payload for adding a category.
#[derive(Debug, Clone)]
pub struct CategoryCreate {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_ignores_case_and_punctuation() {
        assert_eq!(CategoryId::from_name("Home & Garden").as_str(), "home-garden");
        assert_eq!(CategoryId::from_name("  tools ").as_str(), "tools");
        assert!(Category::new("Home & Garden").matches("home-garden"));
        assert!(Category::new("Home & Garden").matches("HOME garden"));
        assert!(!Category::new("Tools").matches("toys"));
    }
}
