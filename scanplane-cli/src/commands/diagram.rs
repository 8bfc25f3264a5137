//! Diagram command
//!
//! Renders the flow diagram of a scan report or job results saved as JSON.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use scanplane_core::diagram;
use scanplane_core::domain::plan::Plan;
use scanplane_core::panel;
use serde_json::Value;

use crate::output;

/// Arguments of `scanplane diagram`
#[derive(Args)]
pub struct DiagramArgs {
    /// JSON file holding a scan report or job results
    pub input: PathBuf,

    /// Write the SVG to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Render a saved payload's plan
///
/// Unreadable input is an error; a payload without steps renders the
/// placeholder.
pub fn handle_diagram(args: DiagramArgs) -> Result<bool> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let plan = Plan::from_payload(&payload);

    match args.out {
        Some(out) => {
            println!("{} {}", "Flow:".bold(), panel::flow_line(&plan));
            output::mount_diagram(&plan, Some(out.as_path()));
        }
        None => {
            let rendered = diagram::render(Some(plan.bill_of_materials.as_slice()));
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered.markup()).context("Failed to write diagram")?;
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_saved_results() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.json");
        let out = dir.path().join("flow.svg");
        fs::write(
            &input,
            r#"{"plan":{"selected_plan":"basic","bill_of_materials":["fetch","analyze","report"]}}"#,
        )
        .unwrap();

        let ok = handle_diagram(DiagramArgs {
            input,
            out: Some(out.clone()),
        })
        .unwrap();

        assert!(ok);
        let svg = fs::read_to_string(out).unwrap();
        assert_eq!(svg.matches("<text ").count(), 3);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, "{not json").unwrap();

        let err = handle_diagram(DiagramArgs { input, out: None }).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }
}
