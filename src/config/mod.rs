//! Workspace configuration.
//!
//! A workspace is described by a `monoseq.toml` file mapping short
//! project aliases to directories. Loading resolves every project path
//! against the directory holding the config file, so the rest of the
//! crate only ever sees absolute locations.

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use schema::{OrderingConfig, ProjectConfig, ToolsConfig, WorkspaceConfig};

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "monoseq.toml";

/// Errors raised while locating or reading the workspace config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file in the start directory or any parent
    #[error("No {} found in '{}' or any parent directory", CONFIG_FILE_NAME, start.display())]
    NotFound { start: PathBuf },

    /// Failed to read config file
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse config file
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Semantically invalid config
    #[error("Invalid config '{}': {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Walks from `start` upwards until a directory holds [`CONFIG_FILE_NAME`].
pub fn discover(start: &Path) -> ConfigResult<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ConfigError::NotFound {
            start: start.to_path_buf(),
        })
}

/// Reads, parses, and validates a config file.
///
/// Project paths in the returned config are absolute.
pub fn load(path: &Path) -> ConfigResult<WorkspaceConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = parse_str(&content, &base).map_err(|err| match err {
        ParseFailure::Toml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Invalid(message) => ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        },
    })?;

    tracing::debug!(
        "Loaded {} project(s) from {}",
        config.projects.len(),
        path.display()
    );
    Ok(config)
}

/// Failure modes of [`parse_str`], mapped onto [`ConfigError`] by [`load`].
#[derive(Error, Debug)]
pub enum ParseFailure {
    /// Not valid TOML, or not shaped like a workspace config
    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    /// Well-formed but rejected by validation
    #[error("{0}")]
    Invalid(String),
}

/// Parses config text, resolving relative project paths against `base`.
pub fn parse_str(content: &str, base: &Path) -> Result<WorkspaceConfig, ParseFailure> {
    let mut config: WorkspaceConfig = toml::from_str(content)?;

    if config.ordering.safety_limit == 0 {
        return Err(ParseFailure::Invalid(
            "ordering.safety-limit must be at least 1".to_string(),
        ));
    }

    for (alias, project) in &mut config.projects {
        if alias.trim().is_empty() {
            return Err(ParseFailure::Invalid("project alias cannot be empty".to_string()));
        }
        if project.path.as_os_str().is_empty() {
            return Err(ParseFailure::Invalid(format!(
                "project '{alias}' has an empty path"
            )));
        }
        if project.path.is_relative() {
            project.path = base.join(&project.path);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
        [tools]
        pull = "pnpm link {package}"

        [projects.iso]
        path = "packages/iso"

        [projects.client]
        path = "/abs/client"
        scripts = { build = "npm run build:client" }
    "#;

    #[test]
    fn test_parse_resolves_relative_paths() {
        let config = parse_str(SAMPLE, Path::new("/repo")).unwrap();

        assert_eq!(config.projects.len(), 2);
        assert_eq!(
            config.projects["iso"].path,
            PathBuf::from("/repo/packages/iso")
        );
        assert_eq!(config.projects["client"].path, PathBuf::from("/abs/client"));
        assert_eq!(
            config.projects["client"].scripts["build"],
            "npm run build:client"
        );
    }

    #[test]
    fn test_parse_fills_defaults() {
        let config = parse_str(SAMPLE, Path::new("/repo")).unwrap();

        assert_eq!(config.tools.pull, "pnpm link {package}");
        assert_eq!(config.tools.push, "yalc push");
        assert_eq!(config.ordering.safety_limit, crate::order::DEFAULT_SAFETY_LIMIT);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = parse_str("[projects.a]\npath = \"a\"\ncolour = \"red\"\n", Path::new("/"));
        assert!(matches!(result, Err(ParseFailure::Toml(_))));
    }

    #[test]
    fn test_parse_rejects_zero_safety_limit() {
        let err = parse_str("[ordering]\nsafety-limit = 0\n", Path::new("/")).unwrap_err();
        assert!(matches!(err, ParseFailure::Invalid(_)));
        assert_eq!(err.to_string(), "ordering.safety-limit must be at least 1");
    }

    #[test]
    fn test_parse_rejects_empty_path() {
        let result = parse_str("[projects.a]\npath = \"\"\n", Path::new("/"));
        assert!(matches!(result, Err(ParseFailure::Invalid(_))));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), SAMPLE).unwrap();
        let nested = dir.path().join("packages").join("iso");
        fs::create_dir_all(&nested).unwrap();

        let found = discover(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_discover_not_found() {
        let dir = TempDir::new().unwrap();
        // Only fails if no ancestor of the temp dir carries a config either
        if dir.path().ancestors().skip(1).any(|d| d.join(CONFIG_FILE_NAME).is_file()) {
            return;
        }
        assert!(matches!(
            discover(dir.path()),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[projects\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, SAMPLE).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.projects["iso"].path, dir.path().join("packages/iso"));
    }
}
