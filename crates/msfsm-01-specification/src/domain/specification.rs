//! # Specifications
//!
//! A specification names a set of automatons and the packages they need.
//!
//! The serde-facing `*Document` types mirror the JSON input. Loading turns
//! them into an arena: automatons live in a `Vec` indexed by [`AutomatonId`]
//! (their position in the document), states are referenced by [`StateId`],
//! and conditions are parsed into [`Condition`]s.

use super::condition::{is_segment, Condition};
use crate::errors::SpecificationError;
use serde::{Deserialize, Serialize};
use shared_types::OrderedMap;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::debug;

// =============================================================================
// DOCUMENTS
// =============================================================================

/// Transition as written in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDocument {
    pub source: String,
    pub destination: String,
    pub trigger: String,
    pub conditions: Vec<String>,
}

/// Automaton as written in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    pub states: Vec<String>,
    pub transitions: Vec<TransitionDocument>,
}

/// Specification as written in the input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationDocument {
    pub name: String,
    pub automatons: OrderedMap<AutomatonDocument>,
    pub required_packages: Vec<String>,
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Index of an automaton: its position in the specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AutomatonId(pub usize);

impl AutomatonId {
    /// Raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AutomatonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a state within its automaton. `StateId(0)` is the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub usize);

// =============================================================================
// ARENA
// =============================================================================

/// A validated transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub source: StateId,
    pub destination: StateId,
    pub trigger: String,
    pub conditions: Vec<Condition>,
}

/// A validated automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub id: AutomatonId,
    pub name: String,
    pub states: Vec<String>,
    pub transitions: Vec<Transition>,
}

impl Automaton {
    /// Name of `state`.
    #[must_use]
    pub fn state_name(&self, state: StateId) -> &str {
        self.states.get(state.0).map_or("", String::as_str)
    }

    /// Name of the initial state.
    #[must_use]
    pub fn initial_state(&self) -> &str {
        self.state_name(StateId(0))
    }

    /// Distinct trigger names in order of first use.
    #[must_use]
    pub fn triggers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.transitions
            .iter()
            .map(|t| t.trigger.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Transitions fired by `trigger`, in document order.
    pub fn transitions_for<'a>(&'a self, trigger: &'a str) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| t.trigger == trigger)
    }

    /// Distinct conditions in order of first reference across transitions.
    #[must_use]
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut seen = HashSet::new();
        self.transitions
            .iter()
            .flat_map(|t| t.conditions.iter())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Package ids referenced by `package` conditions, duplicates collapsed,
    /// in order of first reference.
    #[must_use]
    pub fn used_packages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.conditions()
            .into_iter()
            .filter_map(Condition::package)
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Automatons this one depends on, deduplicated, ascending.
    #[must_use]
    pub fn dependencies(&self) -> Vec<AutomatonId> {
        let mut deps: Vec<AutomatonId> = self
            .conditions()
            .into_iter()
            .filter_map(Condition::automaton)
            .collect();
        deps.sort_unstable();
        deps.dedup();
        deps
    }

    fn to_document(&self) -> AutomatonDocument {
        AutomatonDocument {
            states: self.states.clone(),
            transitions: self
                .transitions
                .iter()
                .map(|t| TransitionDocument {
                    source: self.state_name(t.source).to_string(),
                    destination: self.state_name(t.destination).to_string(),
                    trigger: t.trigger.clone(),
                    conditions: t.conditions.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        }
    }
}

/// A validated specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    pub name: String,
    automatons: Vec<Automaton>,
    index: HashMap<String, AutomatonId>,
    pub required_packages: Vec<String>,
}

impl Specification {
    /// Loads and validates a specification from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SpecificationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SpecificationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates JSON text, keeping automaton document order.
    pub fn from_json_str(text: &str) -> Result<Self, SpecificationError> {
        let document: SpecificationDocument = serde_json::from_str(text)
            .map_err(|e| SpecificationError::schema("specification", e.to_string()))?;
        Self::from_document(document)
    }

    /// Loads and validates a specification from an already-parsed object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpecificationError> {
        let document: SpecificationDocument = serde_json::from_value(value)
            .map_err(|e| SpecificationError::schema("specification", e.to_string()))?;
        Self::from_document(document)
    }

    /// Validates a document and builds the automaton arena.
    pub fn from_document(document: SpecificationDocument) -> Result<Self, SpecificationError> {
        let SpecificationDocument {
            name,
            automatons: automaton_documents,
            required_packages,
        } = document;

        let spec_context = format!("specification `{name}`");
        if automaton_documents.is_empty() {
            return Err(SpecificationError::schema(
                spec_context,
                "at least one automaton is required",
            ));
        }

        let mut index = HashMap::with_capacity(automaton_documents.len());
        for (position, automaton_name) in automaton_documents.keys().enumerate() {
            if !is_identifier(automaton_name) || automaton_name.contains("__") {
                return Err(SpecificationError::schema(
                    spec_context,
                    format!("invalid automaton name `{automaton_name}`"),
                ));
            }
            index.insert(automaton_name.to_string(), AutomatonId(position));
        }

        let mut seen_packages = HashSet::new();
        for package in &required_packages {
            if !seen_packages.insert(package.as_str()) {
                return Err(SpecificationError::schema(
                    spec_context,
                    format!("package `{package}` is required twice"),
                ));
            }
        }

        let lookup = |n: &str| index.get(n).copied();
        let automatons = automaton_documents
            .into_iter()
            .enumerate()
            .map(|(position, (automaton_name, doc))| {
                build_automaton(AutomatonId(position), automaton_name, doc, &lookup)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            specification = %name,
            automatons = automatons.len(),
            "Specification loaded"
        );

        Ok(Self {
            name,
            automatons,
            index,
            required_packages,
        })
    }

    /// Re-serializes the specification to its document form.
    #[must_use]
    pub fn to_document(&self) -> SpecificationDocument {
        SpecificationDocument {
            name: self.name.clone(),
            automatons: self
                .automatons
                .iter()
                .map(|a| (a.name.clone(), a.to_document()))
                .collect(),
            required_packages: self.required_packages.clone(),
        }
    }

    /// Number of automatons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.automatons.len()
    }

    /// Always false for a loaded specification.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.automatons.is_empty()
    }

    /// Index assigned to `name` (first-seen document order).
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<AutomatonId> {
        self.index.get(name).copied()
    }

    /// Automaton at `id`.
    #[must_use]
    pub fn automaton(&self, id: AutomatonId) -> Option<&Automaton> {
        self.automatons.get(id.0)
    }

    /// Automaton named `name`.
    #[must_use]
    pub fn automaton_by_name(&self, name: &str) -> Option<&Automaton> {
        self.id_of(name).and_then(|id| self.automaton(id))
    }

    /// Automatons in index order.
    pub fn automatons(&self) -> impl Iterator<Item = &Automaton> {
        self.automatons.iter()
    }

    /// Package ids used by each automaton, keyed by automaton name.
    #[must_use]
    pub fn used_packages(&self) -> Vec<(&str, Vec<&str>)> {
        self.automatons
            .iter()
            .map(|a| (a.name.as_str(), a.used_packages()))
            .collect()
    }
}

fn build_automaton(
    id: AutomatonId,
    name: String,
    doc: AutomatonDocument,
    lookup: &impl Fn(&str) -> Option<AutomatonId>,
) -> Result<Automaton, SpecificationError> {
    let context = format!("automaton `{name}`");
    if doc.states.is_empty() {
        return Err(SpecificationError::schema(
            context,
            "at least one state is required",
        ));
    }

    // Enum members are uppercased, so uniqueness is checked case-insensitively.
    let mut state_index = HashMap::with_capacity(doc.states.len());
    let mut upper = HashSet::with_capacity(doc.states.len());
    for (position, state) in doc.states.iter().enumerate() {
        if !is_identifier(state) {
            return Err(SpecificationError::schema(
                context,
                format!("invalid state name `{state}`"),
            ));
        }
        if !upper.insert(state.to_uppercase()) {
            return Err(SpecificationError::schema(
                context,
                format!("duplicate state `{state}`"),
            ));
        }
        state_index.insert(state.as_str(), StateId(position));
    }

    let resolve_state = |state: &str| {
        state_index
            .get(state)
            .copied()
            .ok_or_else(|| SpecificationError::schema(&context, format!("undeclared state `{state}`")))
    };

    let mut transitions = Vec::with_capacity(doc.transitions.len());
    for t in &doc.transitions {
        if !is_identifier(&t.trigger) {
            return Err(SpecificationError::schema(
                &context,
                format!("invalid trigger name `{}`", t.trigger),
            ));
        }
        let conditions = t
            .conditions
            .iter()
            .map(|raw| Condition::parse(raw, lookup))
            .collect::<Result<Vec<_>, _>>()?;
        transitions.push(Transition {
            source: resolve_state(&t.source)?,
            destination: resolve_state(&t.destination)?,
            trigger: t.trigger.clone(),
            conditions,
        });
    }

    Ok(Automaton {
        id,
        name,
        states: doc.states,
        transitions,
    })
}

/// Solidity identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
