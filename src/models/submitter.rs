//! Submitter identity and profile.

use serde::{Deserialize, Serialize};

/// Value shown for profile fields the remote source did not provide.
pub const PLACEHOLDER: &str = "--";

/// A resolved submitter. Exactly one exists per identifier in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submitter {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub country_name: String,
    pub country_code: String,
}

impl Submitter {
    /// Create a submitter whose profile fields are all placeholders.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: PLACEHOLDER.to_string(),
            last_name: PLACEHOLDER.to_string(),
            country_name: PLACEHOLDER.to_string(),
            country_code: PLACEHOLDER.to_string(),
        }
    }

    /// Country name with its code, e.g. `Canada (CA)`.
    pub fn country_with_code(&self) -> String {
        if self.country_name == PLACEHOLDER {
            return PLACEHOLDER.to_string();
        }
        format!("{} ({})", self.country_name, self.country_code)
    }

    /// Fill placeholder fields from another profile of the same submitter.
    ///
    /// Fields that already hold a real value are kept.
    pub fn fill_missing_from(&mut self, other: &Submitter) {
        fn fill(field: &mut String, candidate: &str) {
            if field == PLACEHOLDER && candidate != PLACEHOLDER {
                *field = candidate.to_string();
            }
        }

        fill(&mut self.first_name, &other.first_name);
        fill(&mut self.last_name, &other.last_name);
        fill(&mut self.country_name, &other.country_name);
        fill(&mut self.country_code, &other.country_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_with_code() {
        let mut submitter = Submitter::unknown("u1");
        assert_eq!(submitter.country_with_code(), "--");

        submitter.country_name = "Canada".to_string();
        submitter.country_code = "CA".to_string();
        assert_eq!(submitter.country_with_code(), "Canada (CA)");
    }

    #[test]
    fn test_fill_missing_keeps_existing_values() {
        let mut first = Submitter::unknown("u1");
        first.last_name = "Noether".to_string();

        let mut second = Submitter::unknown("u1");
        second.first_name = "Emmy".to_string();
        second.last_name = "Other".to_string();

        first.fill_missing_from(&second);
        assert_eq!(first.first_name, "Emmy");
        assert_eq!(first.last_name, "Noether");
        assert_eq!(first.country_name, PLACEHOLDER);
    }
}
