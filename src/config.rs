use crate::error::ConfigError;
use crate::figma::{default_assets, AssetRequest};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_FILE_KEY: &str = "sW8fM05nHmqIKarRGqYS1Z";
pub const DEFAULT_OUTPUT_DIR: &str = "apps/web/public/images/host-intro";
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Raster format requested from the render endpoint
pub const IMAGE_FORMAT: &str = "png";
/// Render scale factor
pub const IMAGE_SCALE: u8 = 2;

/// Everything a fetch run needs besides the access token
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub file_key: String,
    pub output_dir: PathBuf,
    pub assets: Vec<AssetRequest>,
    pub api_base: String,
}

impl FetchConfig {
    pub fn new(
        file_key: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        assets: Vec<AssetRequest>,
    ) -> Result<Self, ConfigError> {
        if assets.is_empty() {
            return Err(ConfigError::NoAssets);
        }

        Ok(Self {
            file_key: file_key.into(),
            output_dir: output_dir.into(),
            assets,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.identifier.as_str()).collect()
    }

    pub fn target_path(&self, asset: &AssetRequest) -> PathBuf {
        self.output_dir.join(&asset.filename)
    }
}

/// Load the asset list from a manifest file, or fall back to the built-in list
pub fn load_assets(manifest: Option<&Path>) -> Result<Vec<AssetRequest>, ConfigError> {
    let Some(path) = manifest else {
        return Ok(default_assets());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let assets: Vec<AssetRequest> =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if assets.is_empty() {
        return Err(ConfigError::NoAssets);
    }

    for asset in &assets {
        validate_filename(&asset.filename)?;
    }

    Ok(assets)
}

/// A filename must be a single normal path component so it stays inside the output directory
pub fn validate_filename(filename: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => Ok(()),
        _ => Err(ConfigError::InvalidFilename(filename.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn no_manifest_uses_builtin_assets() {
        let assets = load_assets(None).unwrap();
        assert_eq!(assets, default_assets());
    }

    #[test]
    fn manifest_replaces_builtin_assets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(
            &path,
            r#"[
                {"nodeId": "1:1", "filename": "hero.png", "description": "hero banner"},
                {"nodeId": "1:2", "filename": "footer.png"}
            ]"#,
        )
        .unwrap();

        let assets = load_assets(Some(&path)).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].identifier, "1:1");
        assert_eq!(assets[0].description.as_deref(), Some("hero banner"));
        assert_eq!(assets[1].filename, "footer.png");
        assert!(assets[1].description.is_none());
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(&path, "[]").unwrap();

        assert!(matches!(
            load_assets(Some(&path)),
            Err(ConfigError::NoAssets)
        ));
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            load_assets(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn manifest_filenames_must_stay_in_output_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.json");

        for bad in ["/abs.png", "../up.png", "", "nested/a.png", ".", "a.png/"] {
            let body = serde_json::json!([
                {"nodeId": "1:1", "filename": "ok.png"},
                {"nodeId": "1:2", "filename": bad}
            ]);
            fs::write(&path, body.to_string()).unwrap();

            match load_assets(Some(&path)) {
                Err(ConfigError::InvalidFilename(name)) => assert_eq!(name, bad),
                other => panic!("expected InvalidFilename for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn plain_filenames_are_accepted() {
        assert!(validate_filename("hero.png").is_ok());
        assert!(validate_filename("hero.final.png").is_ok());
        assert!(default_assets()
            .iter()
            .all(|a| validate_filename(&a.filename).is_ok()));
    }

    #[test]
    fn missing_manifest_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            load_assets(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn config_requires_assets_and_joins_paths() {
        assert!(matches!(
            FetchConfig::new("key", "out", Vec::new()),
            Err(ConfigError::NoAssets)
        ));

        let config = FetchConfig::new("key", "out", vec![AssetRequest::new("1:1", "a.png")])
            .unwrap()
            .with_api_base("http://localhost:1234/");
        assert_eq!(config.api_base, "http://localhost:1234");
        assert_eq!(config.identifiers(), vec!["1:1"]);
        assert_eq!(
            config.target_path(&config.assets[0]),
            PathBuf::from("out").join("a.png")
        );
    }
}
