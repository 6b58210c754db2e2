//! # Package Repository
//!
//! Packages are stored one per file as `<dir>/<id>.json`. A specification's
//! `required_packages` are loaded into a [`PackageSet`], which then checks
//! every `package` condition against the loaded functions.

use crate::domain::condition::Condition;
use crate::domain::package::Package;
use crate::domain::specification::Specification;
use crate::errors::SpecificationError;
use shared_types::OrderedMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Directory of package documents.
#[derive(Debug, Clone)]
pub struct PackageRepository {
    root: PathBuf,
}

impl PackageRepository {
    /// Repository rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File expected to hold package `id`.
    #[must_use]
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Loads package `id`. The document's own id must match the file name.
    pub fn load(&self, id: &str) -> Result<Package, SpecificationError> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Err(SpecificationError::unresolved(
                id,
                format!("package directory {}", self.root.display()),
            ));
        }
        let package = Package::load_from_file(&path)?;
        if package.id != id {
            return Err(SpecificationError::schema(
                format!("package file {}", path.display()),
                format!("declares id `{}`, expected `{id}`", package.id),
            ));
        }
        Ok(package)
    }

    /// Loads every package the specification requires.
    #[instrument(skip(self, specification), fields(specification = %specification.name))]
    pub fn load_required(&self, specification: &Specification) -> Result<PackageSet, SpecificationError> {
        let packages = specification
            .required_packages
            .iter()
            .map(|id| self.load(id))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = packages.len(), "Required packages loaded");
        PackageSet::from_packages(packages)
    }
}

/// Loaded packages keyed by id, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSet {
    packages: OrderedMap<Package>,
}

impl PackageSet {
    /// Builds a set, rejecting duplicate ids.
    pub fn from_packages(packages: impl IntoIterator<Item = Package>) -> Result<Self, SpecificationError> {
        let mut set = OrderedMap::new();
        for package in packages {
            let id = package.id.clone();
            set.insert(id.clone(), package).map_err(|_| {
                SpecificationError::schema("package set", format!("duplicate package id `{id}`"))
            })?;
        }
        Ok(Self { packages: set })
    }

    /// Package `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Package> {
        self.packages.get(id)
    }

    /// Number of packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// True if no package is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Packages in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Checks that `specification` only references what this set provides.
    ///
    /// - every required package is loaded
    /// - every `package` condition names a required package
    /// - the named function exists in that package
    pub fn resolve(&self, specification: &Specification) -> Result<(), SpecificationError> {
        for id in &specification.required_packages {
            if self.get(id).is_none() {
                return Err(SpecificationError::unresolved(
                    id,
                    format!("required packages of `{}`", specification.name),
                ));
            }
        }

        for automaton in specification.automatons() {
            for condition in automaton.conditions() {
                let Condition::Package { package, function } = condition else {
                    continue;
                };
                let context = format!("condition `{condition}` of automaton `{}`", automaton.name);
                if !specification.required_packages.iter().any(|p| p == package) {
                    return Err(SpecificationError::unresolved(package, context));
                }
                let found = self.get(package).and_then(|p| p.function(function));
                if found.is_none() {
                    return Err(SpecificationError::unresolved(
                        format!("{package}.{function}"),
                        context,
                    ));
                }
            }
        }
        Ok(())
    }
}
