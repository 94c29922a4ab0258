//! JSON listing.
//!
//! Machine-readable form of the workspace: a summary, every project
//! with its in-graph links, and any dependency cycles.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonExport<'a> {
    summary: JsonSummary,
    projects: Vec<JsonProject<'a>>,
    cycles: Vec<JsonCycle<'a>>,
}

#[derive(Serialize)]
struct JsonSummary {
    projects: usize,
    links: usize,
    cycles: usize,
}

#[derive(Serialize)]
struct JsonProject<'a> {
    alias: &'a str,
    package: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    path: String,
    dependencies: Vec<JsonLink<'a>>,
    consumers: &'a [String],
    scripts: &'a [String],
}

#[derive(Serialize)]
struct JsonLink<'a> {
    alias: &'a str,
    #[serde(rename = "type")]
    dep_type: String,
}

#[derive(Serialize)]
struct JsonCycle<'a> {
    projects: &'a [String],
    path: String,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let projects = data
            .projects
            .iter()
            .map(|p| JsonProject {
                alias: &p.alias,
                package: &p.package,
                version: p.version.as_deref(),
                path: p.path.display().to_string(),
                dependencies: p
                    .dependencies
                    .iter()
                    .map(|d| JsonLink {
                        alias: &d.alias,
                        dep_type: d.dep_type.to_string(),
                    })
                    .collect(),
                consumers: &p.consumers,
                scripts: &p.scripts,
            })
            .collect();

        let cycles = data
            .cycles
            .iter()
            .map(|c| JsonCycle {
                projects: &c.nodes,
                path: c.cycle_path(),
            })
            .collect();

        let export = JsonExport {
            summary: JsonSummary {
                projects: data.projects.len(),
                links: data.link_count(),
                cycles: data.cycles.len(),
            },
            projects,
            cycles,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::web;
    use crate::graph::GraphBuilder;

    fn parse(data: &ExportData) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(data, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = parse(&ExportData::from_graph(&web()));

        assert_eq!(parsed["summary"]["projects"], 4);
        assert_eq!(parsed["summary"]["links"], 3);
        assert_eq!(parsed["summary"]["cycles"], 0);
    }

    #[test]
    fn test_json_export_projects() {
        let parsed = parse(&ExportData::from_graph(&web()));

        let projects = parsed["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 4);

        let client = &projects[1];
        assert_eq!(client["alias"], "client");
        assert_eq!(client["package"], "@web/client");
        assert!(client.get("version").is_none());
        assert_eq!(client["dependencies"][0]["alias"], "iso");
        assert_eq!(client["dependencies"][0]["type"], "production");
        assert_eq!(projects[2]["consumers"][1], "server");
    }

    #[test]
    fn test_json_export_with_cycles() {
        let graph = GraphBuilder::new()
            .with_project("a", "a", &["b"])
            .with_project("b", "b", &["a"])
            .build();

        let parsed = parse(&ExportData::from_graph(&graph));

        assert_eq!(parsed["summary"]["cycles"], 1);
        assert_eq!(parsed["cycles"][0]["path"], "a -> b -> a");
    }
}
