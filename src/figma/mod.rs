use serde::Deserialize;

/// One design node to render and the local file it is saved as
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetRequest {
    #[serde(rename = "nodeId")]
    pub identifier: String,
    pub filename: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl AssetRequest {
    pub fn new(identifier: &str, filename: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            filename: filename.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Host-intro page illustrations
pub fn default_assets() -> Vec<AssetRequest> {
    vec![
        AssetRequest::new("6246:114484", "pain-point-1.png")
            .with_description("man at desk with worried expression"),
        AssetRequest::new("6246:114482", "pain-point-2.png")
            .with_description("woman in bed at night with laptop"),
        AssetRequest::new("6246:113974", "value-illustration.png")
            .with_description("apartment building illustration"),
        AssetRequest::new("6246:113782", "dashboard-preview.png")
            .with_description("host dashboard screenshot"),
        AssetRequest::new("6246:114571", "dashboard-circle.png")
            .with_description("dashboard in circle"),
        AssetRequest::new("6246:114575", "operations-preview.png")
            .with_description("operations management screenshot"),
        AssetRequest::new("6246:113883", "eligibility-1.png")
            .with_description("short-term accommodation card with woman"),
        AssetRequest::new("6246:113891", "eligibility-2.png")
            .with_description("long-term residential card with man"),
    ]
}

pub mod credentials;
pub mod images;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_assets_have_unique_ids_and_filenames() {
        let assets = default_assets();
        assert_eq!(assets.len(), 8);

        let ids: HashSet<_> = assets.iter().map(|a| &a.identifier).collect();
        let names: HashSet<_> = assets.iter().map(|a| &a.filename).collect();
        assert_eq!(ids.len(), assets.len());
        assert_eq!(names.len(), assets.len());
        assert!(assets.iter().all(|a| a.filename.ends_with(".png")));
    }

    #[test]
    fn asset_request_deserializes_node_id_key() {
        let asset: AssetRequest =
            serde_json::from_str(r#"{"nodeId": "1:2", "filename": "a.png"}"#).unwrap();
        assert_eq!(asset, AssetRequest::new("1:2", "a.png"));
    }
}
