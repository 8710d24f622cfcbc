use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use percent_encoding::percent_decode_str;
use reqwest::blocking::Client as HttpClient;
use sha1::{Digest, Sha1};
use url::Url;

// Final URL path segment when it carries an extension, otherwise a
// digest of the URL plus an extension guessed from the content type.
pub fn file_name_for(url: &str, content_type: Option<&str>) -> String {
    if let Some(name) = segment_name(url) {
        return name;
    }
    format!("{}{}", sha1_hex(url.as_bytes()), extension_for(content_type))
}

fn segment_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    let name = decoded.trim();
    if name.is_empty() || !name.contains('.') {
        return None;
    }
    Some(name.to_string())
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .map(|value| value.split(';').next().unwrap_or("").trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some("video/mp4") => ".mp4",
        Some("video/webm") => ".webm",
        Some("video/quicktime") => ".mov",
        _ => ".bin",
    }
}

fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

pub fn fetch_to_dir(client: &HttpClient, url: &str, dir: &Path) -> Result<PathBuf> {
    if url.trim().is_empty() {
        return Err(anyhow!("download: url required"));
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("download: create directory {}", dir.display()))?;

    let response = client.get(url).send().context("download: request")?;
    if !response.status().is_success() {
        return Err(anyhow!("download: request failed: {}", response.status()));
    }
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|val| val.to_str().ok())
        .map(|value| value.to_string());
    let bytes = response.bytes().context("download: body")?;

    let path = dir.join(file_name_for(url, content_type.as_deref()));
    fs::write(&path, &bytes).with_context(|| format!("download: write {}", path.display()))?;
    Ok(path)
}
