//! Scope choices
//!
//! Scopes come from the allowed branch names when they are configured,
//! otherwise from the local branches.

use std::fmt;

use crate::utils::title_case;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeChoice {
    pub value: String,
    pub label: String,
}

impl ScopeChoice {
    #[must_use]
    pub fn new(value: &str) -> Self {
        ScopeChoice {
            value: value.to_string(),
            label: title_case(value),
        }
    }
}

impl fmt::Display for ScopeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[must_use]
pub fn scope_choices(names: &[String]) -> Vec<ScopeChoice> {
    names.iter().map(|name| ScopeChoice::new(name)).collect()
}

/// Index of the first scope contained in `branch`, or 0.
#[must_use]
pub fn default_scope_index(scopes: &[ScopeChoice], branch: &str) -> usize {
    scopes
        .iter()
        .position(|scope| branch.contains(&scope.value))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scopes() -> Vec<ScopeChoice> {
        scope_choices(&["feature".to_string(), "fix".to_string(), "docs".to_string()])
    }

    #[test]
    fn test_scope_labels() {
        let scopes = scope_choices(&["hot-fix".to_string()]);

        assert_eq!(scopes[0].value, "hot-fix");
        assert_eq!(scopes[0].label, "Hot Fix");
    }

    #[test]
    fn test_default_scope_follows_branch() {
        assert_eq!(default_scope_index(&scopes(), "fix-login-timeout"), 1);
        assert_eq!(default_scope_index(&scopes(), "docs-readme"), 2);
    }

    #[test]
    fn test_default_scope_falls_back_to_first() {
        assert_eq!(default_scope_index(&scopes(), "random123"), 0);
        assert_eq!(default_scope_index(&[], "fix-1"), 0);
    }
}
