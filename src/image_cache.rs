//! Local image cache.
//!
//! Generated images arrive as remote URLs, data URLs, or raw base64; placed
//! canvas images render from local files. `materialize` turns any reference
//! into a cached file, content-addressed by the reference so repeated
//! placements reuse the same bytes. Network fetches run on background
//! workers, never the UI thread.

use crate::constants::IMAGE_FETCH_TIMEOUT_SECS;
use anyhow::{Context as _, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Refuse to buffer remote images beyond this size.
const MAX_FETCH_BYTES: u64 = 50 * 1024 * 1024;

pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new() -> Result<Self> {
        let dir = dirs::cache_dir()
            .context("no cache directory available")?
            .join("promptboard")
            .join("images");
        Self::with_dir(dir)
    }

    /// Build over an explicit directory (tests point this at a temp dir).
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Turn an image reference into a local file. Accepts `data:` URLs,
    /// `http(s)` URLs, and bare base64 (the shapes the API hands back).
    pub fn materialize(&self, reference: &str) -> Result<PathBuf> {
        if reference.is_empty() {
            bail!("empty image reference");
        }

        let (bytes, ext) = if let Some(rest) = reference.strip_prefix("data:") {
            decode_data_url(rest)?
        } else if reference.starts_with("http://") || reference.starts_with("https://") {
            fetch_remote(reference)?
        } else {
            let bytes = BASE64
                .decode(reference)
                .context("reference is neither a URL nor valid base64")?;
            (bytes, "png")
        };

        let path = self.cache_path(reference, ext);
        if path.exists() {
            debug!(path = %path.display(), "Image cache hit");
            return Ok(path);
        }

        let tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        fs::write(tmp.path(), &bytes)?;
        tmp.persist(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Image materialized");
        Ok(path)
    }

    /// Pixel dimensions of a cached file, if it decodes as an image.
    pub fn dimensions(path: &Path) -> Option<(u32, u32)> {
        image::image_dimensions(path).ok()
    }

    fn cache_path(&self, reference: &str, ext: &str) -> PathBuf {
        let digest = Sha256::digest(reference.as_bytes());
        let name: String = digest
            .iter()
            .take(16)
            .map(|b| format!("{:02x}", b))
            .collect();
        self.dir.join(format!("{}.{}", name, ext))
    }
}

/// Inline a disk file as a data URL, the shape the edit endpoint accepts
/// for its conditioning image.
pub fn file_to_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

fn decode_data_url(rest: &str) -> Result<(Vec<u8>, &'static str)> {
    let (header, payload) = rest
        .split_once(";base64,")
        .context("data URL is not base64-encoded")?;
    let bytes = BASE64.decode(payload).context("invalid base64 in data URL")?;
    Ok((bytes, ext_for_mime(header)))
}

fn fetch_remote(url: &str) -> Result<(Vec<u8>, &'static str)> {
    let response = ureq::get(url)
        .timeout(Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS))
        .call()
        .with_context(|| format!("fetching {}", url))?;
    let ext = ext_for_mime(response.content_type());
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_FETCH_BYTES)
        .read_to_end(&mut bytes)
        .context("reading image body")?;
    if bytes.is_empty() {
        bail!("image response was empty");
    }
    Ok((bytes, ext))
}

fn ext_for_mime(mime: &str) -> &'static str {
    if mime.contains("jpeg") || mime.contains("jpg") {
        "jpg"
    } else if mime.contains("webp") {
        "webp"
    } else if mime.contains("gif") {
        "gif"
    } else {
        "png"
    }
}
