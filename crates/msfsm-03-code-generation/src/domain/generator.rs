//! # Solidity Generator
//!
//! References are resolved first (packages, package functions, dependency
//! addresses), then the contract is written in a single infallible pass.
//!
//! ## Ordering
//!
//! | Section | Order |
//! |---------|-------|
//! | structs / variables | packages in first-reference order, structs before variables |
//! | guard conditions | first reference across all transitions, each once |
//! | trigger functions | first use of the trigger |
//! | `if` / `else if` branches | transition document order, first match wins |
//! | default functions | `required_packages` order, then function document order |

use super::writer::SourceWriter;
use crate::config::GeneratorConfig;
use crate::errors::CodegenError;
use msfsm_01_specification::{
    Automaton, AutomatonId, Condition, Package, PackageSet, Specification, Transition,
};
use serde::Serialize;
use shared_types::{Address, DeploymentResult};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Source of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContract {
    /// Contract name, equal to the automaton name.
    pub name: String,
    pub source: String,
}

/// Resolved implementation of one guard condition.
enum GuardBody<'a> {
    /// Package function snippet, emitted verbatim.
    Snippet(&'a str),
    /// Delegated call into an already-deployed automaton.
    Delegate {
        function: String,
        target: Address,
        predicate: &'a str,
    },
}

/// Generates contracts for the automatons of one specification.
#[derive(Debug, Clone)]
pub struct SolidityGenerator<'a> {
    specification: &'a Specification,
    packages: &'a PackageSet,
    config: GeneratorConfig,
}

impl<'a> SolidityGenerator<'a> {
    pub fn new(
        specification: &'a Specification,
        packages: &'a PackageSet,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            specification,
            packages,
            config,
        }
    }

    /// Generates the contract for automaton `id`.
    ///
    /// Every automaton referenced by an `automata` condition must already
    /// have an address in `deployed`.
    #[instrument(skip(self, deployed), fields(automaton = id.index()))]
    pub fn generate(
        &self,
        id: AutomatonId,
        deployed: &DeploymentResult,
    ) -> Result<GeneratedContract, CodegenError> {
        let automaton = self
            .specification
            .automaton(id)
            .ok_or(CodegenError::UnknownAutomaton(id.index()))?;

        let packages = self.referenced_packages(automaton)?;
        let guards = self.guard_bodies(automaton, deployed)?;
        let defaults = self.default_functions(automaton)?;

        let mut w = SourceWriter::new();
        if let Some(license) = &self.config.license {
            w.line(format!("// SPDX-License-Identifier: {license}"));
        }
        w.line(format!("pragma solidity ^{};", self.config.solidity_version));
        w.blank();
        w.block(format!("contract {}", automaton.name), |w| {
            write_states(w, automaton);
            write_declarations(w, &packages);
            write_guards(w, &guards);
            for trigger in automaton.triggers() {
                w.blank();
                write_trigger(w, automaton, trigger);
            }
            for code in &defaults {
                w.blank();
                w.snippet(code);
            }
        });

        let source = w.finish();
        debug!(
            contract = %automaton.name,
            bytes = source.len(),
            guards = guards.len(),
            "Contract source generated"
        );
        Ok(GeneratedContract {
            name: automaton.name.clone(),
            source,
        })
    }

    fn package(&self, id: &str) -> Result<&'a Package, CodegenError> {
        self.packages
            .get(id)
            .ok_or_else(|| CodegenError::UnresolvedPackage {
                package: id.to_string(),
            })
    }

    fn referenced_packages(&self, automaton: &Automaton) -> Result<Vec<&'a Package>, CodegenError> {
        automaton
            .used_packages()
            .into_iter()
            .map(|id| self.package(id))
            .collect()
    }

    fn guard_bodies<'b>(
        &self,
        automaton: &'b Automaton,
        deployed: &DeploymentResult,
    ) -> Result<Vec<GuardBody<'b>>, CodegenError>
    where
        'a: 'b,
    {
        automaton
            .conditions()
            .into_iter()
            .map(|condition| -> Result<GuardBody<'b>, CodegenError> {
                match condition {
                    Condition::Package { package, function } => {
                        let code = self
                            .package(package)?
                            .function(function)
                            .ok_or_else(|| CodegenError::UnresolvedFunction {
                                package: package.clone(),
                                function: function.clone(),
                            })?;
                        Ok(GuardBody::Snippet(code.code.as_str()))
                    }
                    Condition::Automaton {
                        name, predicate, ..
                    } => {
                        let target =
                            deployed
                                .address_of(name)
                                .ok_or_else(|| CodegenError::MissingDependency {
                                    automaton: automaton.name.clone(),
                                    dependency: name.clone(),
                                })?;
                        Ok(GuardBody::Delegate {
                            function: condition.to_string(),
                            target,
                            predicate: predicate.as_str(),
                        })
                    }
                }
            })
            .collect()
    }

    /// Default functions of every required package, skipping those already
    /// emitted as guard conditions.
    fn default_functions(&self, automaton: &Automaton) -> Result<Vec<&'a str>, CodegenError> {
        let emitted: HashSet<(&str, &str)> = automaton
            .conditions()
            .into_iter()
            .filter_map(|c| match c {
                Condition::Package { package, function } => {
                    Some((package.as_str(), function.as_str()))
                }
                Condition::Automaton { .. } => None,
            })
            .collect();

        let mut defaults = Vec::new();
        for id in &self.specification.required_packages {
            let package = self.package(id)?;
            for (name, function) in package.default_functions() {
                if !emitted.contains(&(id.as_str(), name)) {
                    defaults.push(function.code.as_str());
                }
            }
        }
        Ok(defaults)
    }
}

fn state_member(name: &str) -> String {
    name.to_uppercase()
}

fn write_states(w: &mut SourceWriter, automaton: &Automaton) {
    let members: Vec<String> = automaton.states.iter().map(|s| state_member(s)).collect();
    w.line(format!("enum State {{ {} }}", members.join(", ")));
    w.line(format!(
        "State currentState = State.{};",
        state_member(automaton.initial_state())
    ));
}

fn write_declarations(w: &mut SourceWriter, packages: &[&Package]) {
    for package in packages {
        if package.structs.is_empty() && package.variables.is_empty() {
            continue;
        }
        w.blank();
        for declaration in package.structs.iter().chain(&package.variables) {
            w.snippet(&declaration.code);
        }
    }
}

fn write_guards(w: &mut SourceWriter, guards: &[GuardBody<'_>]) {
    for guard in guards {
        w.blank();
        match guard {
            GuardBody::Snippet(code) => w.snippet(code),
            GuardBody::Delegate {
                function,
                target,
                predicate,
            } => {
                w.block(format!("function {function}() public returns (bool)"), |w| {
                    w.line(format!(
                        "(bool success, ) = address({}).delegatecall(abi.encodeWithSignature(\"{predicate}()\"));",
                        target.to_checksum()
                    ));
                    w.line("return success;");
                });
            }
        }
    }
}

fn branch_condition(automaton: &Automaton, transition: &Transition) -> String {
    let mut terms: Vec<String> = transition
        .conditions
        .iter()
        .map(|c| format!("{c}()"))
        .collect();
    terms.push(format!(
        "currentState == State.{}",
        state_member(automaton.state_name(transition.source))
    ));
    terms.join(" && ")
}

fn write_trigger(w: &mut SourceWriter, automaton: &Automaton, trigger: &str) {
    let transitions: Vec<&Transition> = automaton.transitions_for(trigger).collect();

    let mut sources = Vec::new();
    for t in &transitions {
        if !sources.contains(&t.source) {
            sources.push(t.source);
        }
    }
    let require = sources
        .iter()
        .map(|s| format!("currentState == State.{}", state_member(automaton.state_name(*s))))
        .collect::<Vec<_>>()
        .join(" || ");

    w.block(format!("function {trigger}() public"), |w| {
        w.line(format!("require({require});"));
        for (i, t) in transitions.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "} else if" };
            w.line(format!("{keyword} ({}) {{", branch_condition(automaton, t)));
            w.indent();
            w.line(format!(
                "currentState = State.{};",
                state_member(automaton.state_name(t.destination))
            ));
            w.dedent();
        }
        w.line("}");
    });
}
