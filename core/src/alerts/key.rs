use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identity of one indicator slot, independent of which alert fills it.
///
/// Categorized keys compare by category alone, so "low health" and
/// "critical health" occupy the same slot. Uncategorized keys compare by
/// their discriminator (the alert id) and never equal a categorized key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertKey {
    pub category: Option<String>,
    pub discriminator: Option<String>,
}

impl AlertKey {
    pub fn new(category: Option<&str>, discriminator: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_string),
            discriminator: discriminator.map(str::to_string),
        }
    }

    /// Key matching any alert in `category`
    pub fn for_category(category: &str) -> Self {
        Self::new(Some(category), None)
    }
}

impl PartialEq for AlertKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.category, &other.category) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.discriminator == other.discriminator,
            _ => false,
        }
    }
}

impl Eq for AlertKey {}

impl Hash for AlertKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.category {
            Some(category) => {
                0u8.hash(state);
                category.hash(state);
            }
            None => {
                1u8.hash(state);
                self.discriminator.hash(state);
            }
        }
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.category, &self.discriminator) {
            (Some(category), _) => write!(f, "{}", category),
            (None, Some(id)) => write!(f, "<{}>", id),
            (None, None) => write!(f, "<none>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_equality_ignores_discriminator() {
        assert_eq!(AlertKey::new(Some("health"), Some("x")), AlertKey::new(Some("health"), Some("y")));
        assert_eq!(AlertKey::new(Some("health"), None), AlertKey::for_category("health"));
        assert_eq!(AlertKey::new(Some("health"), Some("ignored")), AlertKey::for_category("health"));
    }

    #[test]
    fn test_uncategorized_never_matches_category() {
        assert_ne!(AlertKey::new(None, Some("health")), AlertKey::for_category("health"));
        assert_ne!(AlertKey::new(None, Some("buckled")), AlertKey::new(None, Some("pulled")));
        assert_eq!(AlertKey::new(None, Some("buckled")), AlertKey::new(None, Some("buckled")));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(AlertKey::new(Some("health"), Some("humanhealth")));
        assert!(set.contains(&AlertKey::for_category("health")));
        assert!(!set.contains(&AlertKey::new(None, Some("health"))));
    }

    #[test]
    fn test_display() {
        assert_eq!(AlertKey::for_category("pressure").to_string(), "pressure");
        assert_eq!(AlertKey::new(None, Some("buckled")).to_string(), "<buckled>");
    }
}
