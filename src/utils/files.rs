use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Ensure the output directory (and its parents) exists
pub fn ensure_output_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        println!("Created directory: {}", path.display());
    } else {
        debug!("Output directory {} already exists", path.display());
    }
    Ok(())
}

/// Size of a file on disk, or `None` if it does not exist
pub fn saved_file_size(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len())
}

/// Format a byte count with thousands separators
pub fn format_bytes(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
