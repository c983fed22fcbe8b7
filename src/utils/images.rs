use crate::config::FetchConfig;
use crate::error::DownloadError;
use crate::figma::images::AssetUrlMap;
use crate::figma::AssetRequest;
use crate::utils::files::{ensure_output_dir, format_bytes, saved_file_size};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use tracing::warn;

/// Terminal state of one asset
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The node id was not in the URL map
    MissingUrl,
    /// The node id mapped to a null or empty URL
    EmptyUrl,
    Failed(DownloadError),
    Saved { bytes: u64 },
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

/// Per-asset outcomes, in configured order
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub items: Vec<(AssetRequest, DownloadOutcome)>,
}

impl DownloadReport {
    pub fn saved(&self) -> usize {
        self.items.iter().filter(|(_, o)| o.is_saved()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, o)| matches!(o, DownloadOutcome::MissingUrl | DownloadOutcome::EmptyUrl))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, o)| matches!(o, DownloadOutcome::Failed(_)))
            .count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.items
            .iter()
            .map(|(_, o)| match o {
                DownloadOutcome::Saved { bytes } => *bytes,
                _ => 0,
            })
            .sum()
    }

    #[cfg(test)]
    pub fn outcome(&self, filename: &str) -> Option<&DownloadOutcome> {
        self.items
            .iter()
            .find(|(a, _)| a.filename == filename)
            .map(|(_, o)| o)
    }
}

/// Fetch a URL and write the body to `target`, overwriting any existing file
pub async fn download_image(
    client: &reqwest::Client,
    url: &str,
    target: &Path,
) -> Result<u64, DownloadError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(DownloadError::Status {
            status: response.status(),
            url: url.to_string(),
        });
    }

    let bytes = response.bytes().await?;

    tokio::fs::write(target, &bytes)
        .await
        .map_err(|source| DownloadError::Io {
            path: target.to_path_buf(),
            source,
        })?;

    saved_file_size(target).ok_or_else(|| DownloadError::NotCreated(target.to_path_buf()))
}

/// Download every configured asset in order.
///
/// A failure on one asset never stops the rest. Only failing to create the
/// output directory aborts the loop, before anything is downloaded.
pub async fn download_assets(
    client: &reqwest::Client,
    config: &FetchConfig,
    urls: &AssetUrlMap,
) -> io::Result<DownloadReport> {
    ensure_output_dir(&config.output_dir)?;

    let pb = ProgressBar::new(config.assets.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut report = DownloadReport::default();

    for asset in &config.assets {
        pb.set_message(asset.filename.clone());

        let outcome = match urls.get(&asset.identifier) {
            None => {
                warn!(node = %asset.identifier, "No URL returned");
                pb.suspend(|| {
                    println!(
                        "✗ No URL found for {} (node: {})",
                        asset.filename, asset.identifier
                    )
                });
                DownloadOutcome::MissingUrl
            }
            Some(url) if url.as_deref().map_or(true, str::is_empty) => {
                warn!(node = %asset.identifier, "Empty URL returned");
                pb.suspend(|| println!("✗ Empty URL for {}", asset.filename));
                DownloadOutcome::EmptyUrl
            }
            Some(url) => {
                let url = url.as_deref().unwrap_or_default();
                let target = config.target_path(asset);

                match download_image(client, url, &target).await {
                    Ok(bytes) => {
                        pb.suspend(|| {
                            println!(
                                "✓ {} saved successfully ({} bytes)",
                                asset.filename,
                                format_bytes(bytes)
                            )
                        });
                        DownloadOutcome::Saved { bytes }
                    }
                    Err(e) => {
                        warn!(node = %asset.identifier, error = %e, "Download failed");
                        pb.suspend(|| eprintln!("✗ Error downloading {}: {}", asset.filename, e));
                        DownloadOutcome::Failed(e)
                    }
                }
            }
        };

        report.items.push((asset.clone(), outcome));
        pb.inc(1);
    }

    pb.finish_with_message("Download complete!");
    Ok(report)
}
