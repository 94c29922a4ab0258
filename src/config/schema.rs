//! Workspace schema types.
//!
//! Mirrors the layout of `monoseq.toml`:
//!
//! ```toml
//! [ordering]
//! safety-limit = 20
//!
//! [tools]
//! install = "npm install"
//! pull = "yalc add {package}"
//! push = "yalc push"
//! run = "npm run {script}"
//!
//! [projects.iso]
//! path = "packages/iso"
//!
//! [projects.client]
//! path = "packages/client"
//! scripts = { build = "npm run build:client" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::order::DEFAULT_SAFETY_LIMIT;

/// Placeholder replaced by a dependency's package name in `tools.pull`.
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Placeholder replaced by the script name in `tools.run`.
pub const SCRIPT_PLACEHOLDER: &str = "{script}";

/// Root of the workspace schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Ordering bounds
    #[serde(default)]
    pub ordering: OrderingConfig,

    /// External commands run per project
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Projects keyed by alias
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

/// Ordering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OrderingConfig {
    /// Round bound for the multi-project harvest and merge loops
    #[serde(default = "default_safety_limit")]
    pub safety_limit: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            safety_limit: default_safety_limit(),
        }
    }
}

/// Command templates for the per-project steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolsConfig {
    /// Installs a project's packages (`--install`)
    #[serde(default = "default_install")]
    pub install: String,

    /// Links one workspace dependency into a project; `{package}` is substituted
    #[serde(default = "default_pull")]
    pub pull: String,

    /// Publishes a project to its consumers
    #[serde(default = "default_push")]
    pub push: String,

    /// Runs a manifest script; `{script}` is substituted
    #[serde(default = "default_run")]
    pub run: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            install: default_install(),
            pull: default_pull(),
            push: default_push(),
            run: default_run(),
        }
    }
}

impl ToolsConfig {
    /// Renders the pull command for one dependency package.
    pub fn pull_command(&self, package: &str) -> String {
        self.pull.replace(PACKAGE_PLACEHOLDER, package)
    }

    /// Renders the run command for a manifest script.
    pub fn run_command(&self, script: &str) -> String {
        self.run.replace(SCRIPT_PLACEHOLDER, script)
    }
}

/// One project entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project directory, relative to the config file unless absolute
    pub path: PathBuf,

    /// Commands that replace `tools.run` for the named scripts
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

fn default_safety_limit() -> usize {
    DEFAULT_SAFETY_LIMIT
}

fn default_install() -> String {
    "npm install".to_string()
}

fn default_pull() -> String {
    format!("yalc add {PACKAGE_PLACEHOLDER}")
}

fn default_push() -> String {
    "yalc push".to_string()
}

fn default_run() -> String {
    format!("npm run {SCRIPT_PLACEHOLDER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_defaults() {
        let tools = ToolsConfig::default();
        assert_eq!(tools.install, "npm install");
        assert_eq!(tools.pull_command("@acme/iso"), "yalc add @acme/iso");
        assert_eq!(tools.push, "yalc push");
        assert_eq!(tools.run_command("build"), "npm run build");
    }

    #[test]
    fn test_custom_templates() {
        let tools = ToolsConfig {
            pull: "pnpm link {package}".to_string(),
            run: "pnpm {script} --silent".to_string(),
            ..ToolsConfig::default()
        };
        assert_eq!(tools.pull_command("iso"), "pnpm link iso");
        assert_eq!(tools.run_command("lint"), "pnpm lint --silent");
    }

    #[test]
    fn test_ordering_default_limit() {
        assert_eq!(OrderingConfig::default().safety_limit, DEFAULT_SAFETY_LIMIT);
    }
}
