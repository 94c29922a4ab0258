//! Parser for npm package.json files.
//!
//! This module reads a workspace project's manifest and extracts the
//! dependency names the graph builder cross-references against other
//! projects.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::types::{Dependency, PackageJson};

/// Errors that can occur during package.json parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The package.json structure is invalid or missing required fields.
    #[error("Invalid package.json: {0}")]
    InvalidPackage(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json file from a file path.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use monoseq::parser::package_json::parse_file;
///
/// let pkg = parse_file(Path::new("packages/client/package.json")).unwrap();
/// println!("Package: {:?}", pkg.name);
/// ```
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use monoseq::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Validates a parsed manifest for use as a workspace project.
///
/// A workspace project must carry a non-empty package name, since that
/// name is what other projects list in their dependency tables.
pub fn validate(pkg: &PackageJson) -> ParseResult<()> {
    match pkg.name.as_deref() {
        Some(name) if !name.trim().is_empty() => Ok(()),
        Some(_) => Err(ParseError::InvalidPackage(
            "package.json has an empty name".to_string(),
        )),
        None => Err(ParseError::InvalidPackage(
            "package.json has no name".to_string(),
        )),
    }
}

/// Extracts every declared dependency, one entry per package name.
///
/// A package listed in more than one table is reported once, tagged
/// with the first table in priority order (production, development,
/// peer, optional). The result is sorted by package name.
///
/// # Example
///
/// ```
/// use monoseq::parser::package_json::{parse_str, extract_dependencies};
/// use monoseq::parser::types::DependencyType;
///
/// let json = r#"{
///     "name": "client",
///     "dependencies": {"iso": "workspace:*"},
///     "devDependencies": {"iso": "workspace:*", "assets": "workspace:*"}
/// }"#;
///
/// let pkg = parse_str(json).unwrap();
/// let deps = extract_dependencies(&pkg);
///
/// assert_eq!(deps.len(), 2);
/// assert_eq!(deps[0].name, "assets");
/// assert_eq!(deps[1].name, "iso");
/// assert_eq!(deps[1].dep_type, DependencyType::Production);
/// ```
pub fn extract_dependencies(pkg: &PackageJson) -> Vec<Dependency> {
    let mut by_name: BTreeMap<&str, Dependency> = BTreeMap::new();

    for (dep_type, table) in pkg.tables() {
        for (name, version) in table {
            by_name
                .entry(name.as_str())
                .or_insert_with(|| Dependency::new(name, version, dep_type));
        }
    }

    by_name.into_values().collect()
}
