//! Report rendering for the command line: plain text, JSON or CSV.

use projectsleuth_core::import::ProjectCandidate;
use projectsleuth_core::model::{ScanDiagnostic, ScanReport};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    directories_visited: u64,
    projects: &'a [ProjectCandidate],
    diagnostics: &'a [ScanDiagnostic],
}

pub fn write_report<W: Write>(
    mut out: W,
    format: Format,
    root: &Path,
    report: &ScanReport,
    plan: &[ProjectCandidate],
) -> anyhow::Result<()> {
    match format {
        Format::Text => {
            for candidate in plan {
                let name = candidate.name.as_deref().unwrap_or("<unnamed>");
                writeln!(out, "{name}\t{}", candidate.location.display())?;
            }
            for diagnostic in &report.diagnostics {
                writeln!(
                    out,
                    "skipped\t{}\t{}: {}",
                    diagnostic.path.display(),
                    diagnostic.kind.label(),
                    diagnostic.message
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(
                &mut out,
                &JsonReport {
                    root,
                    directories_visited: report.directories_visited,
                    projects: plan,
                    diagnostics: &report.diagnostics,
                },
            )?;
            writeln!(out)?;
        }
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for candidate in plan {
                writer.serialize(candidate)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> (ScanReport, Vec<ProjectCandidate>) {
        let plan = vec![
            ProjectCandidate {
                name: Some("alpha".into()),
                location: PathBuf::from("/r/alpha"),
                descriptor: Some(PathBuf::from("/r/alpha/.project")),
                use_default_location: false,
            },
            ProjectCandidate {
                name: None,
                location: PathBuf::from("/r/beta"),
                descriptor: Some(PathBuf::from("/r/beta/.project")),
                use_default_location: false,
            },
        ];
        (ScanReport::default(), plan)
    }

    fn render(format: Format) -> String {
        let (report, plan) = sample();
        let mut buf = Vec::new();
        write_report(&mut buf, format, Path::new("/r"), &report, &plan).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_marks_unnamed_projects() {
        let text = render(Format::Text);
        assert_eq!(text, "alpha\t/r/alpha\n<unnamed>\t/r/beta\n");
    }

    #[test]
    fn json_lists_projects() {
        let value: serde_json::Value = serde_json::from_str(&render(Format::Json)).unwrap();
        assert_eq!(value["projects"][0]["name"], "alpha");
        assert!(value["projects"][1]["name"].is_null());
    }

    #[test]
    fn csv_has_header_and_one_row_per_project() {
        let csv = render(Format::Csv);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("name,location,descriptor,use_default_location")
        );
        assert_eq!(lines.count(), 2);
    }
}
