//! Markdown listing for documentation and reporting.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Workspace Projects")?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Projects | {} |", data.projects.len())?;
        writeln!(writer, "| Dependency Links | {} |", data.link_count())?;
        writeln!(writer, "| Circular Dependencies | {} |", data.cycles.len())?;
        writeln!(writer)?;

        if !data.projects.is_empty() {
            writeln!(writer, "## Projects")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "| Project | Package | Version | Depends On | Used By |"
            )?;
            writeln!(
                writer,
                "|---------|---------|---------|------------|---------|"
            )?;
            for project in &data.projects {
                let depends_on: Vec<String> = project
                    .dependencies
                    .iter()
                    .map(|d| format!("{} ({})", d.alias, d.dep_type.label()))
                    .collect();
                writeln!(
                    writer,
                    "| {} | `{}` | {} | {} | {} |",
                    project.alias,
                    project.package,
                    project.version.as_deref().unwrap_or("-"),
                    or_dash(&depends_on.join(", ")),
                    or_dash(&project.consumers.join(", ")),
                )?;
            }
            writeln!(writer)?;
        }

        if !data.cycles.is_empty() {
            writeln!(writer, "## Issues")?;
            writeln!(writer)?;
            writeln!(writer, "### Circular Dependencies")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "The following circular dependencies were detected:"
            )?;
            writeln!(writer)?;
            for (i, cycle) in data.cycles.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle.cycle_path())?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by monoseq*")?;

        Ok(())
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::web;
    use crate::graph::GraphBuilder;

    fn render(data: &ExportData) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_basic() {
        let md = render(&ExportData::from_graph(&web()));

        assert!(md.contains("# Workspace Projects"));
        assert!(md.contains("| Projects | 4 |"));
        assert!(md.contains("| Dependency Links | 3 |"));
        assert!(md.contains("| client | `@web/client` | - | iso (prod), server (prod) | - |"));
        assert!(md.contains("| iso | `@web/iso` | - | - | client, server |"));
        assert!(!md.contains("## Issues"));
    }

    #[test]
    fn test_markdown_export_with_cycles() {
        let graph = GraphBuilder::new()
            .with_project("a", "a", &["b"])
            .with_project("b", "b", &["a"])
            .build();

        let md = render(&ExportData::from_graph(&graph));

        assert!(md.contains("### Circular Dependencies"));
        assert!(md.contains("1. `a -> b -> a`"));
    }

    #[test]
    fn test_markdown_export_empty() {
        let md = render(&ExportData::default());

        assert!(md.contains("| Projects | 0 |"));
        assert!(!md.contains("## Projects"));
    }
}
