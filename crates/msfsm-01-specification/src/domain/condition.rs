//! # Guard Conditions
//!
//! Conditions are written as `<namespace>__<name>__<member>`:
//!
//! | Namespace | Meaning | Example |
//! |-----------|---------|---------|
//! | `package` | function `<member>` of package `<name>` | `package__p1__is_paid` |
//! | `automata` | predicate `<member>` of automaton `<name>` | `automata__Shipping__is_completed` |
//!
//! The string is parsed once at load time into [`Condition`]; the
//! canonical string form is recovered through `Display`, and it is also the
//! name of the Solidity function that implements the guard.

use super::specification::AutomatonId;
use crate::errors::SpecificationError;
use std::fmt;

/// Separator between condition segments.
pub const CONDITION_SEPARATOR: &str = "__";

const PACKAGE_NAMESPACE: &str = "package";
const AUTOMATA_NAMESPACE: &str = "automata";

/// A parsed guard condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Calls a function shipped by a package.
    Package { package: String, function: String },
    /// Queries a predicate of another automaton through a delegated call.
    Automaton {
        automaton: AutomatonId,
        name: String,
        predicate: String,
    },
}

impl Condition {
    /// Parses `raw`, resolving automaton names through `lookup`.
    ///
    /// The namespace is checked before the rest of the grammar so that
    /// `unknown__x__y` is reported as an unknown condition type.
    pub fn parse(
        raw: &str,
        lookup: impl Fn(&str) -> Option<AutomatonId>,
    ) -> Result<Self, SpecificationError> {
        let segments: Vec<&str> = raw.split(CONDITION_SEPARATOR).collect();
        let namespace = segments.first().copied().unwrap_or_default();
        if namespace != PACKAGE_NAMESPACE && namespace != AUTOMATA_NAMESPACE {
            return Err(SpecificationError::UnknownConditionType {
                condition: raw.to_string(),
                namespace: namespace.to_string(),
            });
        }

        let (name, member) = match segments.as_slice() {
            [_, name, member] if is_segment(name) && is_segment(member) => (*name, *member),
            _ => {
                return Err(SpecificationError::schema(
                    format!("condition `{raw}`"),
                    "expected `<namespace>__<name>__<member>`",
                ))
            }
        };

        if namespace == PACKAGE_NAMESPACE {
            return Ok(Self::Package {
                package: name.to_string(),
                function: member.to_string(),
            });
        }

        let automaton = lookup(name)
            .ok_or_else(|| SpecificationError::unresolved(name, format!("condition `{raw}`")))?;
        Ok(Self::Automaton {
            automaton,
            name: name.to_string(),
            predicate: member.to_string(),
        })
    }

    /// Referenced package id, for package conditions.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Package { package, .. } => Some(package),
            Self::Automaton { .. } => None,
        }
    }

    /// Referenced automaton, for automaton conditions.
    #[must_use]
    pub fn automaton(&self) -> Option<AutomatonId> {
        match self {
            Self::Package { .. } => None,
            Self::Automaton { automaton, .. } => Some(*automaton),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package { package, function } => {
                write!(f, "{PACKAGE_NAMESPACE}__{package}__{function}")
            }
            Self::Automaton {
                name, predicate, ..
            } => write!(f, "{AUTOMATA_NAMESPACE}__{name}__{predicate}"),
        }
    }
}

/// `[A-Za-z0-9_]+`
pub(crate) fn is_segment(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
