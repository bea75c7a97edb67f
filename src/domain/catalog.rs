//! Difficulty catalog - the fixed label-to-points mapping
//!
//! Loaded once at startup (from config or the built-in table) and immutable
//! afterwards. Lookup tolerates surrounding whitespace and is
//! case-insensitive; an unknown label is a hard rejection on the submission
//! path, never a silent zero score.

use std::collections::HashMap;

/// Built-in difficulty table, in display order
const DEFAULT_TIERS: &[(&str, i64)] = &[
    ("easy", 1),
    ("normal", 2),
    ("hard", 3),
    ("insane", 4),
    ("extreme", 5),
];

/// Error type for catalog construction
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate difficulty label after normalization: {0}")]
    DuplicateLabel(String),

    #[error("difficulty {label} has negative point value {points}")]
    NegativePoints { label: String, points: i64 },
}

/// Immutable mapping from difficulty label to point value
#[derive(Debug, Clone)]
pub struct DifficultyCatalog {
    /// Normalized labels with their point values, in configuration order
    tiers: Vec<(String, u64)>,

    /// Lookup index over normalized labels
    index: HashMap<String, u64>,
}

impl DifficultyCatalog {
    /// Build a catalog from (label, points) pairs.
    ///
    /// Fails fast on a negative point value or on two labels that collide
    /// after normalization, so a bad config never reaches the ledger.
    pub fn new(tiers: impl IntoIterator<Item = (String, i64)>) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            tiers: Vec::new(),
            index: HashMap::new(),
        };

        for (label, points) in tiers {
            let normalized = normalize(&label);
            if points < 0 {
                return Err(CatalogError::NegativePoints {
                    label: normalized,
                    points,
                });
            }
            if catalog.index.contains_key(&normalized) {
                return Err(CatalogError::DuplicateLabel(normalized));
            }
            catalog.index.insert(normalized.clone(), points as u64);
            catalog.tiers.push((normalized, points as u64));
        }

        Ok(catalog)
    }

    /// Look up the point value for a difficulty label.
    ///
    /// Matching ignores case and surrounding whitespace. Returns `None` for
    /// unknown labels; the caller must reject the submission.
    pub fn lookup(&self, label: &str) -> Option<u64> {
        self.index.get(&normalize(label)).copied()
    }

    /// Resolve a label to its normalized form and point value
    pub fn resolve(&self, label: &str) -> Option<(String, u64)> {
        let normalized = normalize(label);
        let points = self.index.get(&normalized).copied()?;
        Some((normalized, points))
    }

    /// Tiers in display order
    pub fn tiers(&self) -> impl Iterator<Item = (&str, u64)> {
        self.tiers.iter().map(|(label, points)| (label.as_str(), *points))
    }

    /// The built-in (label, points) table, for config defaults
    pub fn default_tiers() -> impl Iterator<Item = (&'static str, i64)> {
        DEFAULT_TIERS.iter().copied()
    }
}

impl Default for DifficultyCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TIERS.iter().map(|(l, p)| (l.to_string(), *p)))
            .expect("built-in difficulty table is valid")
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_values() {
        let catalog = DifficultyCatalog::default();
        assert_eq!(catalog.lookup("easy"), Some(1));
        assert_eq!(catalog.lookup("normal"), Some(2));
        assert_eq!(catalog.lookup("hard"), Some(3));
        assert_eq!(catalog.lookup("insane"), Some(4));
        assert_eq!(catalog.lookup("extreme"), Some(5));
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        let catalog = DifficultyCatalog::default();
        assert_eq!(catalog.lookup("  Hard "), Some(3));
        assert_eq!(catalog.lookup("EXTREME"), Some(5));
    }

    #[test]
    fn test_unknown_label_is_none() {
        let catalog = DifficultyCatalog::default();
        assert_eq!(catalog.lookup("impossible"), None);
        assert_eq!(catalog.lookup(""), None);
    }

    #[test]
    fn test_resolve_returns_normalized_label() {
        let catalog = DifficultyCatalog::default();
        let (label, points) = catalog.resolve(" Insane ").unwrap();
        assert_eq!(label, "insane");
        assert_eq!(points, 4);
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = DifficultyCatalog::new(vec![
            ("easy".to_string(), 1),
            (" EASY ".to_string(), 2),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateLabel(l)) if l == "easy"));
    }

    #[test]
    fn test_negative_points_rejected() {
        let result = DifficultyCatalog::new(vec![("cursed".to_string(), -3)]);
        assert!(matches!(
            result,
            Err(CatalogError::NegativePoints { points: -3, .. })
        ));
    }

    #[test]
    fn test_zero_points_allowed() {
        let catalog = DifficultyCatalog::new(vec![("tutorial".to_string(), 0)]).unwrap();
        assert_eq!(catalog.lookup("tutorial"), Some(0));
    }

    #[test]
    fn test_tiers_preserve_order() {
        let catalog = DifficultyCatalog::default();
        let labels: Vec<&str> = catalog.tiers().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["easy", "normal", "hard", "insane", "extreme"]);
    }
}
