//! Plain text listing, the default for `list`.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        for project in &data.projects {
            match &project.version {
                Some(version) => writeln!(
                    writer,
                    "{} ({}@{})",
                    project.alias, project.package, version
                )?,
                None => writeln!(writer, "{} ({})", project.alias, project.package)?,
            }
            writeln!(writer, "  path: {}", project.path.display())?;

            if !project.dependencies.is_empty() {
                let deps: Vec<&str> = project
                    .dependencies
                    .iter()
                    .map(|d| d.alias.as_str())
                    .collect();
                writeln!(writer, "  depends on: {}", deps.join(", "))?;
            }
            if !project.consumers.is_empty() {
                writeln!(writer, "  used by: {}", project.consumers.join(", "))?;
            }
        }

        writeln!(
            writer,
            "{} project(s), {} dependency link(s)",
            data.projects.len(),
            data.link_count()
        )?;

        for cycle in &data.cycles {
            writeln!(writer, "cycle: {}", cycle.cycle_path())?;
        }

        Ok(())
    }
}
