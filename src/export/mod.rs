//! Workspace listing for the `list` command.
//!
//! Supports plain text, JSON and Markdown.

pub mod json;
pub mod markdown;
pub mod text;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::graph::{CycleInfo, ProjectGraph};
use crate::parser::DependencyType;

/// Listing format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text - one block per project
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown format: '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// One in-graph dependency of a listed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedProject {
    pub alias: String,
    pub dep_type: DependencyType,
}

/// One project as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    pub alias: String,
    pub package: String,
    pub version: Option<String>,
    pub path: PathBuf,
    /// Workspace projects this one requires
    pub dependencies: Vec<LinkedProject>,
    /// Workspace projects that require this one
    pub consumers: Vec<String>,
    /// Scripts declared in the manifest or overridden in config
    pub scripts: Vec<String>,
}

/// Data container for the listing.
#[derive(Debug, Clone, Default)]
pub struct ExportData {
    /// Projects in alias order
    pub projects: Vec<ProjectRow>,
    /// Detected dependency cycles
    pub cycles: Vec<CycleInfo>,
}

impl ExportData {
    /// Collects the listing from a built graph.
    pub fn from_graph(graph: &ProjectGraph) -> Self {
        let projects = graph
            .all_projects()
            .into_iter()
            .map(|node| {
                let mut scripts: Vec<String> = node
                    .manifest
                    .scripts
                    .iter()
                    .chain(node.scripts.keys())
                    .cloned()
                    .collect();
                scripts.sort();
                scripts.dedup();

                ProjectRow {
                    alias: node.alias.clone(),
                    package: node.manifest.name.clone(),
                    version: node.manifest.version.clone(),
                    path: node.path.clone(),
                    dependencies: graph
                        .dependencies_of(&node.alias)
                        .into_iter()
                        .map(|(dep, dep_type)| LinkedProject {
                            alias: dep.alias.clone(),
                            dep_type,
                        })
                        .collect(),
                    consumers: graph
                        .consumers_of(&node.alias)
                        .into_iter()
                        .map(|c| c.alias.clone())
                        .collect(),
                    scripts,
                }
            })
            .collect();

        Self {
            projects,
            cycles: graph.detect_cycles(),
        }
    }

    /// Number of in-graph dependency links.
    pub fn link_count(&self) -> usize {
        self.projects.iter().map(|p| p.dependencies.len()).sum()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    /// assets, iso, server -> iso, client -> iso + server
    pub(crate) fn web() -> ProjectGraph {
        GraphBuilder::new()
            .with_project("assets", "@web/assets", &[])
            .with_project("iso", "@web/iso", &[])
            .with_project("server", "@web/server", &["@web/iso"])
            .with_project("client", "@web/client", &["@web/iso", "@web/server"])
            .build()
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert!("csv".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Text), "text");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_from_graph() {
        let data = ExportData::from_graph(&web());

        let aliases: Vec<_> = data.projects.iter().map(|p| p.alias.as_str()).collect();
        assert_eq!(aliases, vec!["assets", "client", "iso", "server"]);

        let iso = &data.projects[2];
        assert_eq!(iso.package, "@web/iso");
        assert!(iso.dependencies.is_empty());
        assert_eq!(iso.consumers, vec!["client", "server"]);

        let client = &data.projects[1];
        let deps: Vec<_> = client.dependencies.iter().map(|d| d.alias.as_str()).collect();
        assert_eq!(deps, vec!["iso", "server"]);

        assert_eq!(data.link_count(), 3);
        assert!(data.cycles.is_empty());
    }
}
