//! Provisioning plan domain types
//!
//! Scan reports and job results both carry a `plan` object. The payload is
//! otherwise opaque, so extraction is lenient: anything missing or of the
//! wrong shape falls back to an empty value instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provisioning plan selected by the control plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub selected_plan: Option<String>,
    /// Ordered step labels, in execution order
    pub bill_of_materials: Vec<String>,
    pub provisioning: Provisioning,
}

/// Files and commands needed to apply a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provisioning {
    /// File name and content pairs, in server order
    pub files: Vec<(String, String)>,
    pub commands: Vec<String>,
}

impl Plan {
    /// Extracts the plan from a scan report or job results payload
    pub fn from_payload(payload: &Value) -> Self {
        match payload.get("plan") {
            Some(plan) => Self::from_plan_value(plan),
            None => Self::default(),
        }
    }

    /// Extracts a plan from the `plan` object itself
    pub fn from_plan_value(plan: &Value) -> Self {
        let selected_plan = plan
            .get("selected_plan")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let bill_of_materials: Vec<String> = plan
            .get("bill_of_materials")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(label_text).collect())
            .unwrap_or_default();

        let provisioning = plan
            .get("provisioning")
            .map(Provisioning::from_value)
            .unwrap_or_default();

        Self {
            selected_plan,
            bill_of_materials,
            provisioning,
        }
    }

    /// Whether the plan carries any diagram steps
    pub fn has_steps(&self) -> bool {
        !self.bill_of_materials.is_empty()
    }
}

impl Provisioning {
    fn from_value(value: &Value) -> Self {
        let files: Vec<(String, String)> = value
            .get("files")
            .and_then(Value::as_object)
            .map(|files| {
                files
                    .iter()
                    .map(|(name, content)| (name.clone(), label_text(content)))
                    .collect()
            })
            .unwrap_or_default();

        let commands: Vec<String> = value
            .get("commands")
            .and_then(Value::as_array)
            .map(|cmds| cmds.iter().map(label_text).collect())
            .unwrap_or_default();

        Self { files, commands }
    }
}

/// Strings are used as-is, anything else as its JSON text
fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_full_plan() {
        let payload = json!({
            "plan": {
                "selected_plan": "gcp_cloud_run_container",
                "bill_of_materials": ["Artifact Registry", "Cloud Run", "Logging"],
                "provisioning": {
                    "files": {
                        "Dockerfile": "FROM nginx:alpine",
                        "app.yaml": "runtime: custom"
                    },
                    "commands": ["gcloud builds submit", "gcloud run deploy web"]
                }
            }
        });

        let plan = Plan::from_payload(&payload);
        assert_eq!(plan.selected_plan.as_deref(), Some("gcp_cloud_run_container"));
        assert_eq!(
            plan.bill_of_materials,
            vec!["Artifact Registry", "Cloud Run", "Logging"]
        );
        assert_eq!(plan.provisioning.files[0].0, "Dockerfile");
        assert_eq!(plan.provisioning.files[1].0, "app.yaml");
        assert_eq!(plan.provisioning.commands.len(), 2);
        assert!(plan.has_steps());
    }

    #[test]
    fn test_missing_plan_is_empty() {
        let plan = Plan::from_payload(&json!({"status": "done"}));
        assert_eq!(plan, Plan::default());
        assert!(!plan.has_steps());
    }

    #[test]
    fn test_wrong_shapes_fall_back() {
        let payload = json!({
            "plan": {
                "selected_plan": 7,
                "bill_of_materials": "fetch",
                "provisioning": {"files": ["x"], "commands": "make"}
            }
        });

        let plan = Plan::from_payload(&payload);
        assert_eq!(plan.selected_plan, None);
        assert!(plan.bill_of_materials.is_empty());
        assert!(plan.provisioning.files.is_empty());
        assert!(plan.provisioning.commands.is_empty());
    }

    #[test]
    fn test_non_string_steps_use_json_text() {
        let plan = Plan::from_payload(&json!({"plan": {"bill_of_materials": ["fetch", 2, null]}}));
        assert_eq!(plan.bill_of_materials, vec!["fetch", "2", "null"]);
    }
}
