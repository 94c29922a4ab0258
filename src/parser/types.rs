//! Shared types for manifest parsing.
//!
//! This module defines the data structures used to represent a
//! workspace project's `package.json` and the dependencies it declares.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Represents the structure of a package.json file.
///
/// Only the fields needed to place a project in the workspace graph and
/// to run its scripts are captured; everything else is ignored.
///
/// Dependency tables use `BTreeMap` so iteration is always sorted by
/// package name, which keeps graph construction reproducible.
///
/// # Example
///
/// ```
/// use monoseq::parser::types::PackageJson;
///
/// let json = r#"{"name": "@acme/client", "version": "1.0.0"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.name, Some("@acme/client".to_string()));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// Scripts runnable through the package manager, by name.
    pub scripts: Option<BTreeMap<String, String>>,

    /// Production dependencies required at runtime.
    pub dependencies: Option<BTreeMap<String, String>>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,

    /// Peer dependencies that the host package must provide.
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<BTreeMap<String, String>>,

    /// Optional dependencies that enhance functionality if available.
    #[serde(rename = "optionalDependencies")]
    pub optional_dependencies: Option<BTreeMap<String, String>>,
}

impl PackageJson {
    /// Iterates the populated dependency tables in priority order.
    pub(crate) fn tables(&self) -> impl Iterator<Item = (DependencyType, &BTreeMap<String, String>)> {
        [
            (DependencyType::Production, self.dependencies.as_ref()),
            (DependencyType::Development, self.dev_dependencies.as_ref()),
            (DependencyType::Peer, self.peer_dependencies.as_ref()),
            (DependencyType::Optional, self.optional_dependencies.as_ref()),
        ]
        .into_iter()
        .filter_map(|(dep_type, table)| table.map(|t| (dep_type, t)))
    }
}

/// Categorizes the type of dependency relationship.
///
/// Every kind produces a build-order edge between workspace projects;
/// the kind is kept on the edge for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// Production dependencies - required at runtime.
    #[default]
    Production,

    /// Development dependencies - only needed during development.
    Development,

    /// Peer dependencies - expected to be provided by the consumer.
    Peer,

    /// Optional dependencies - enhance functionality if available.
    Optional,
}

impl DependencyType {
    /// Returns a short label for the dependency type.
    pub fn label(&self) -> &'static str {
        match self {
            DependencyType::Production => "prod",
            DependencyType::Development => "dev",
            DependencyType::Peer => "peer",
            DependencyType::Optional => "optional",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
            DependencyType::Peer => "peer",
            DependencyType::Optional => "optional",
        };
        write!(f, "{}", s)
    }
}

/// A single dependency declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// The package name (e.g., "react", "@acme/iso").
    pub name: String,

    /// The version specifier (e.g., "^18.0.0", "workspace:*").
    pub version: String,

    /// The table this dependency was declared in.
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dep_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.dep_type)
    }
}
