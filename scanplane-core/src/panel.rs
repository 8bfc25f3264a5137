//! Text panels for a provisioning plan
//!
//! Each panel falls back to [`PLACEHOLDER`] when the plan has nothing to show.

use crate::diagram::PLACEHOLDER;
use crate::domain::plan::Plan;

/// Name of the selected plan
pub fn plan_meta(plan: &Plan) -> &str {
    plan.selected_plan.as_deref().unwrap_or(PLACEHOLDER)
}

/// All provisioning files as `# name` headed blocks
pub fn file_bundle(plan: &Plan) -> String {
    let files = &plan.provisioning.files;
    if files.is_empty() {
        return PLACEHOLDER.to_string();
    }
    files
        .iter()
        .map(|(name, content)| format!("# {}\n{}", name, content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Provisioning commands, one per line
pub fn command_list(plan: &Plan) -> String {
    let joined = plan.provisioning.commands.join("\n");
    if joined.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        joined
    }
}

/// One-line text rendering of the flow, for terminals
pub fn flow_line(plan: &Plan) -> String {
    if plan.bill_of_materials.is_empty() {
        return PLACEHOLDER.to_string();
    }
    plan.bill_of_materials.join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::Provisioning;

    fn sample_plan() -> Plan {
        Plan {
            selected_plan: Some("basic".to_string()),
            bill_of_materials: vec!["fetch".into(), "analyze".into(), "report".into()],
            provisioning: Provisioning {
                files: vec![
                    ("Dockerfile".into(), "FROM nginx:alpine".into()),
                    ("run.sh".into(), "echo hi".into()),
                ],
                commands: vec!["terraform init".into(), "terraform apply".into()],
            },
        }
    }

    #[test]
    fn test_panels_for_full_plan() {
        let plan = sample_plan();
        assert_eq!(plan_meta(&plan), "basic");
        assert_eq!(
            file_bundle(&plan),
            "# Dockerfile\nFROM nginx:alpine\n\n# run.sh\necho hi"
        );
        assert_eq!(command_list(&plan), "terraform init\nterraform apply");
        assert_eq!(flow_line(&plan), "fetch → analyze → report");
    }

    #[test]
    fn test_panels_for_empty_plan() {
        let plan = Plan::default();
        assert_eq!(plan_meta(&plan), "N/A");
        assert_eq!(file_bundle(&plan), "N/A");
        assert_eq!(command_list(&plan), "N/A");
        assert_eq!(flow_line(&plan), "N/A");
    }

    #[test]
    fn test_blank_commands_fall_back() {
        let mut plan = Plan::default();
        plan.provisioning.commands = vec![String::new()];
        assert_eq!(command_list(&plan), "N/A");
    }
}
