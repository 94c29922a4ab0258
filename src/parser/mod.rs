//! Parser module for monoseq.
//!
//! Workspace projects are npm packages; this module reads their
//! `package.json` manifests so the graph builder can discover which
//! projects depend on which.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use monoseq::parser::{extract_dependencies, parse_file};
//!
//! let pkg = parse_file(Path::new("packages/client/package.json")).unwrap();
//! for dep in extract_dependencies(&pkg) {
//!     println!("{dep}");
//! }
//! ```

pub mod package_json;
pub mod types;

// Re-export commonly used types for convenience
pub use package_json::{
    extract_dependencies, parse_file, parse_str, validate, ParseError, ParseResult,
};

pub use types::{Dependency, DependencyType, PackageJson};
