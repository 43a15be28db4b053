//! Engine error taxonomy.
//!
//! Every failure the engine itself can detect. Provider failures live in
//! [`crate::data::ProviderError`] and are never reinterpreted here.

use thiserror::Error;

/// What kind of entity a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Team,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Player => f.write_str("player"),
            EntityKind::Team => f.write_str("team"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("{kind} '{query}' not found")]
    NotFound { kind: EntityKind, query: String },

    #[error("multiple {kind}s found for '{query}': {}", candidates.join(", "))]
    Ambiguous {
        kind: EntityKind,
        query: String,
        candidates: Vec<String>,
    },

    #[error("no games found{}", scope.as_deref().map(|s| format!(" for {s}")).unwrap_or_default())]
    NoData { scope: Option<String> },

    #[error("invalid season '{0}': expected YYYY-YY (e.g. 2023-24)")]
    InvalidSeason(String),
}

impl AnalysisError {
    /// An unscoped `NoData`, as raised by the calculators.
    pub fn no_data() -> Self {
        AnalysisError::NoData { scope: None }
    }

    /// Attach a human-readable scope ("LeBron James vs GSW in 2023-24") to a
    /// `NoData` error. Other variants pass through unchanged.
    pub fn in_scope(self, scope: impl Into<String>) -> Self {
        match self {
            AnalysisError::NoData { .. } => AnalysisError::NoData {
                scope: Some(scope.into()),
            },
            other => other,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, AnalysisError::NoData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_lists_candidates() {
        let err = AnalysisError::Ambiguous {
            kind: EntityKind::Player,
            query: "Payton".into(),
            candidates: vec!["Gary Payton".into(), "Gary Payton II".into()],
        };
        assert_eq!(
            err.to_string(),
            "multiple players found for 'Payton': Gary Payton, Gary Payton II"
        );
    }

    #[test]
    fn test_no_data_scope() {
        assert_eq!(AnalysisError::no_data().to_string(), "no games found");
        let scoped = AnalysisError::no_data().in_scope("Stephen Curry vs Lakers in 2023-24");
        assert_eq!(
            scoped.to_string(),
            "no games found for Stephen Curry vs Lakers in 2023-24"
        );
        assert!(scoped.is_no_data());
    }

    #[test]
    fn test_in_scope_leaves_other_variants() {
        let err = AnalysisError::NotFound {
            kind: EntityKind::Team,
            query: "Sonics".into(),
        };
        assert_eq!(err.clone().in_scope("ignored"), err);
    }
}
