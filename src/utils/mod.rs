//! Utility modules for figma-fetch
//!
//! - `files`: Output directory and file helpers
//! - `images`: Downloading rendered images to disk
//! - `http`: HTTP client utilities

pub mod files;
pub mod http;
pub mod images;
