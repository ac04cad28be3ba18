//! Health advice for people with pre-existing conditions.
//!
//! The bundled table groups conditions by category; each condition carries
//! a list of things to do and things to avoid on polluted days.

use crate::error::VayuError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

const HEALTH_ADVICE_JSON: &str = include_str!("../../../data/health-advice.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceBook {
    pub name: String,
    pub categories: Vec<AdviceCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceCategory {
    #[serde(default)]
    pub icon: String,
    pub name: String,
    pub conditions: Vec<Advice>,
}

/// Do and don't lists for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    /// Full condition name, e.g. "Chronic Obstructive Pulmonary Disease (COPD)".
    pub name: String,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

impl Advice {
    /// True if `query` names this condition.
    ///
    /// Matches, ignoring case, the full name, the name without its
    /// parenthetical, or the parenthetical itself ("copd", "asthma",
    /// "high blood pressure").
    pub fn matches(&self, query: &str) -> bool {
        let wanted = query.trim().to_lowercase();
        if wanted.is_empty() {
            return false;
        }
        let full = self.name.to_lowercase();
        if full == wanted {
            return true;
        }
        match full.split_once(" (") {
            Some((base, paren)) => base.trim() == wanted || paren.trim_end_matches(')') == wanted,
            None => false,
        }
    }
}

static BOOK: LazyLock<AdviceBook> = LazyLock::new(|| {
    parse_advice_str(HEALTH_ADVICE_JSON).expect("bundled health advice must be valid")
});

/// The bundled advice table.
pub fn book() -> &'static AdviceBook {
    &BOOK
}

/// All condition names, grouped by category in table order.
pub fn conditions() -> Vec<&'static str> {
    BOOK.categories
        .iter()
        .flat_map(|c| c.conditions.iter().map(|a| a.name.as_str()))
        .collect()
}

/// Look up advice for a condition; see [`Advice::matches`].
pub fn advice_for(condition: &str) -> Option<&'static Advice> {
    BOOK.categories
        .iter()
        .flat_map(|c| c.conditions.iter())
        .find(|a| a.matches(condition))
}

/// Like [`advice_for`], but an unknown condition is an error.
pub fn require_advice(condition: &str) -> Result<&'static Advice, VayuError> {
    advice_for(condition).ok_or_else(|| VayuError::UnknownCondition(condition.trim().to_string()))
}

/// Parse an advice table from a JSON string.
pub fn parse_advice_str(json: &str) -> Result<AdviceBook, VayuError> {
    let book: AdviceBook = serde_json::from_str(json)?;
    validate_advice(&book)?;
    Ok(book)
}

/// Validate that every category has conditions, every condition has some
/// advice, and condition names are unique.
pub fn validate_advice(book: &AdviceBook) -> Result<(), VayuError> {
    if book.categories.is_empty() {
        return Err(VayuError::AdviceInvalid("categories must not be empty".into()));
    }

    let mut names = HashSet::new();
    for category in &book.categories {
        if category.conditions.is_empty() {
            return Err(VayuError::AdviceInvalid(format!(
                "category '{}' has no conditions",
                category.name
            )));
        }
        for advice in &category.conditions {
            if advice.name.trim().is_empty() {
                return Err(VayuError::AdviceInvalid(format!(
                    "unnamed condition in category '{}'",
                    category.name
                )));
            }
            if advice.dos.is_empty() && advice.donts.is_empty() {
                return Err(VayuError::AdviceInvalid(format!(
                    "condition '{}' has no advice",
                    advice.name
                )));
            }
            if !names.insert(advice.name.to_lowercase()) {
                return Err(VayuError::AdviceInvalid(format!(
                    "condition '{}' appears more than once",
                    advice.name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_loads() {
        assert_eq!(book().categories.len(), 6);
        assert_eq!(conditions().len(), 20);
        assert_eq!(book().categories[0].name, "Respiratory Diseases");
        assert_eq!(
            conditions()[0],
            "Chronic Obstructive Pulmonary Disease (COPD)"
        );
    }

    #[test]
    fn test_lookup_by_abbreviation_and_base_name() {
        let copd = advice_for("copd").unwrap();
        assert_eq!(copd.name, "Chronic Obstructive Pulmonary Disease (COPD)");
        assert_eq!(advice_for("Chronic Obstructive Pulmonary Disease"), Some(copd));
        assert_eq!(advice_for("  ASTHMA ").unwrap().name, "Asthma");
        assert_eq!(
            advice_for("high blood pressure").unwrap().name,
            "Hypertension (High Blood Pressure)"
        );
    }

    #[test]
    fn test_every_condition_has_both_lists() {
        for category in &book().categories {
            for advice in &category.conditions {
                assert!(!advice.dos.is_empty(), "{}", advice.name);
                assert!(!advice.donts.is_empty(), "{}", advice.name);
            }
        }
    }

    #[test]
    fn test_unknown_condition() {
        assert!(advice_for("gout").is_none());
        assert!(advice_for("").is_none());
        assert!(matches!(
            require_advice("gout"),
            Err(VayuError::UnknownCondition(c)) if c == "gout"
        ));
    }

    #[test]
    fn test_duplicate_condition_rejected() {
        let json = r#"{
            "name": "dup",
            "categories": [
                { "name": "A", "conditions": [ { "name": "Asthma", "dos": ["x"], "donts": [] } ] },
                { "name": "B", "conditions": [ { "name": "asthma", "dos": [], "donts": ["y"] } ] }
            ]
        }"#;
        assert!(matches!(parse_advice_str(json), Err(VayuError::AdviceInvalid(_))));
    }

    #[test]
    fn test_empty_condition_rejected() {
        let json = r#"{
            "name": "empty",
            "categories": [ { "name": "A", "conditions": [ { "name": "X", "dos": [], "donts": [] } ] } ]
        }"#;
        assert!(matches!(parse_advice_str(json), Err(VayuError::AdviceInvalid(_))));
    }
}
