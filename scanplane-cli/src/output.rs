//! Terminal presentation
//!
//! The status board prints status lines to stdout, plan panels are printed
//! below it, and diagrams are written to a file mount point.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use colored::*;
use scanplane_client::session::{StatusBoard, StatusKind, StatusLine};
use scanplane_core::diagram::{self, FlowDiagram, MountPoint};
use scanplane_core::domain::plan::Plan;
use scanplane_core::panel;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Status board printing to the terminal
#[derive(Default)]
pub struct TerminalBoard {
    busy: AtomicBool,
}

impl TerminalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Formats a status line; lines shown while busy carry a gutter
    fn format_line(&self, line: &StatusLine) -> String {
        let text = line.to_string();
        if !self.is_busy() {
            return colorize(line.kind, &text).to_string();
        }
        text.lines()
            .map(|l| format!("{} {}", "│".dimmed(), colorize(line.kind, l)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StatusBoard for TerminalBoard {
    fn show(&self, line: StatusLine) {
        println!("{}", self.format_line(&line));
    }

    fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
        debug!("busy: {}", busy);
    }
}

/// Colorize status text by kind
fn colorize(kind: StatusKind, text: &str) -> ColoredString {
    match kind {
        StatusKind::Info => text.normal(),
        StatusKind::Progress => text.cyan(),
        StatusKind::Warning => text.yellow(),
        StatusKind::Error => text.red(),
    }
}

/// Diagram mount point backed by a file
#[derive(Debug)]
pub struct FileMount {
    path: PathBuf,
    written: bool,
}

impl FileMount {
    /// Resolves an output path into a mount point
    ///
    /// A path whose parent directory does not exist has no mount point.
    pub fn resolve(path: Option<&Path>) -> Option<Self> {
        let path = path?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            warn!(
                "Diagram directory {} does not exist, skipping diagram",
                parent.display()
            );
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            written: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the last mount reached the file
    pub fn written(&self) -> bool {
        self.written
    }
}

impl MountPoint for FileMount {
    fn mount(&mut self, diagram: &FlowDiagram) {
        match fs::write(&self.path, diagram.markup()) {
            Ok(()) => {
                self.written = true;
                info!("Wrote diagram to {}", self.path.display());
            }
            Err(e) => {
                self.written = false;
                warn!("Failed to write diagram to {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Renders the plan's flow into an optional file
pub fn mount_diagram(plan: &Plan, out: Option<&Path>) {
    let mut mount = FileMount::resolve(out);
    diagram::render_into(
        mount.as_mut().map(|m| m as &mut dyn MountPoint),
        Some(plan.bill_of_materials.as_slice()),
    );
    if let Some(mount) = mount.filter(FileMount::written) {
        println!("{} {}", "Diagram:".bold(), mount.path().display());
    }
}

/// Print the plan panels
pub fn print_plan(plan: &Plan) {
    println!();
    println!("{} {}", "Plan:".bold(), panel::plan_meta(plan).cyan());
    println!("{} {}", "Flow:".bold(), panel::flow_line(plan));

    println!("\n{}", "Files:".bold());
    println!("{}", panel::file_bundle(plan));

    println!("\n{}", "Commands:".bold());
    println!("{}", panel::command_list(plan));
}

/// Print a JSON payload as-is
pub fn print_json(title: &str, value: &Value) {
    println!("\n{}", title.bold());
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty),
        Err(_) => println!("{}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_has_no_mount() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("flow.svg");
        assert!(FileMount::resolve(Some(path.as_path())).is_none());
        assert!(FileMount::resolve(None).is_none());
    }

    #[test]
    fn test_file_mount_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.svg");
        let plan = Plan {
            bill_of_materials: vec!["fetch".into(), "analyze".into(), "report".into()],
            ..Plan::default()
        };

        mount_diagram(&plan, Some(path.as_path()));

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with(r#"<svg width="708" height="92""#));
    }

    #[test]
    fn test_empty_plan_mounts_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.svg");

        mount_diagram(&Plan::default(), Some(path.as_path()));

        assert_eq!(fs::read_to_string(&path).unwrap(), "N/A");
    }

    #[test]
    fn test_busy_lines_get_gutter() {
        colored::control::set_override(false);
        let board = TerminalBoard::new();
        let line = StatusLine::progress("Job: abc123\nState: running");

        board.set_busy(true);
        assert!(board.is_busy());
        assert_eq!(
            board.format_line(&line),
            "│ ⏳ Job: abc123\n│ State: running"
        );

        board.set_busy(false);
        assert!(!board.is_busy());
        assert_eq!(board.format_line(&line), "⏳ Job: abc123\nState: running");
    }
}
