use crate::config::{FetchConfig, IMAGE_FORMAT, IMAGE_SCALE};
use crate::error::FetchError;
use crate::figma::credentials::Credential;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

/// Node id → signed download URL. A `None` value means the node failed to render.
pub type AssetUrlMap = HashMap<String, Option<String>>;

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<Value>,
    #[serde(default)]
    images: AssetUrlMap,
}

fn error_message(err: &Value) -> String {
    match err {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ask the render endpoint for download URLs of every configured node in one request
pub async fn fetch_image_urls(
    client: &reqwest::Client,
    config: &FetchConfig,
    credential: &Credential,
) -> Result<AssetUrlMap, FetchError> {
    let url = format!("{}/v1/images/{}", config.api_base, config.file_key);
    let ids = config.identifiers().join(",");
    let scale = IMAGE_SCALE.to_string();

    info!(
        "Requesting {} image URLs from {}",
        config.assets.len(),
        url
    );

    let response = client
        .get(&url)
        .query(&[
            ("ids", ids.as_str()),
            ("format", IMAGE_FORMAT),
            ("scale", scale.as_str()),
        ])
        .header("X-Figma-Token", credential.token())
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("err").filter(|e| !e.is_null()).map(error_message))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(FetchError::Status { status, message });
    }

    let parsed: ImagesResponse =
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(err) = parsed.err.filter(|e| !e.is_null()) {
        return Err(FetchError::Api(error_message(&err)));
    }

    info!("Got {} image URLs", parsed.images.len());
    Ok(parsed.images)
}
