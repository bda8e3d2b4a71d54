use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http_client::with_retries;

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "fpl_transfer_terminal";
const CACHE_FILE: &str = "http_cache.json";
/// Bodies younger than this are served without touching the network.
pub const CACHE_TTL_SECS: u64 = 3600;

static CACHE: Mutex<Option<HttpCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct HttpCacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

impl CacheEntry {
    fn is_fresh(&self, now: u64) -> bool {
        now.saturating_sub(self.fetched_at) < CACHE_TTL_SECS
    }
}

/// GET `url` as text, served from the disk cache while fresh and revalidated
/// with ETag / Last-Modified once stale.
pub fn fetch_json_cached(client: &Client, url: &str) -> Result<String> {
    let now = now_secs();
    let cached_entry = {
        let mut guard = CACHE.lock().expect("http cache lock poisoned");
        let cache = guard.get_or_insert_with(load_cache_file);
        cache.entries.get(url).cloned()
    };
    if let Some(entry) = cached_entry.as_ref()
        && entry.is_fresh(now)
    {
        debug!(url, "serving cached body");
        return Ok(entry.body.clone());
    }
    with_retries(url, || fetch_once(client, url, cached_entry.as_ref()))
}

fn fetch_once(client: &Client, url: &str, cached: Option<&CacheEntry>) -> Result<String> {
    let mut req = client
        .get(url)
        .header(USER_AGENT, concat!("fpl_transfer_terminal/", env!("CARGO_PKG_VERSION")));
    if let Some(entry) = cached {
        if let Some(etag) = entry.etag.as_ref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = entry.last_modified.as_ref() {
            req = req.header(IF_MODIFIED_SINCE, last_modified);
        }
    }

    let resp = req.send().context("request failed")?;
    let status = resp.status();
    let headers = resp.headers().clone();
    if status == StatusCode::NOT_MODIFIED {
        if let Some(entry) = cached {
            let mut entry = entry.clone();
            entry.fetched_at = now_secs();
            let body = entry.body.clone();
            refresh_cache_entry(url, entry);
            return Ok(body);
        }
        return Err(anyhow::anyhow!("received 304 without cache body"));
    }

    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, truncate(&body, 200)));
    }

    let header_str = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let entry = CacheEntry {
        body: body.clone(),
        etag: header_str(ETAG),
        last_modified: header_str(LAST_MODIFIED),
        fetched_at: now_secs(),
    };
    refresh_cache_entry(url, entry);
    Ok(body)
}

fn refresh_cache_entry(key: &str, entry: CacheEntry) {
    let mut guard = CACHE.lock().expect("http cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.entries.insert(key.to_string(), entry);
    if let Err(err) = save_cache_file(cache) {
        debug!(error = %err, "http cache not saved");
    }
}

fn load_cache_file() -> HttpCacheFile {
    let Some(path) = cache_path() else {
        return HttpCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return HttpCacheFile::default();
    };
    let cache = serde_json::from_str::<HttpCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return HttpCacheFile::default();
    }
    cache
}

fn save_cache_file(cache: &HttpCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir).ok();
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize http cache")?;
    fs::write(&tmp, json).context("write http cache")?;
    fs::rename(&tmp, &path).context("swap http cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

pub fn app_cache_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_window() {
        let entry = CacheEntry {
            body: "{}".to_string(),
            etag: None,
            last_modified: None,
            fetched_at: 1_000,
        };
        assert!(entry.is_fresh(1_000 + CACHE_TTL_SECS - 1));
        assert!(!entry.is_fresh(1_000 + CACHE_TTL_SECS));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
