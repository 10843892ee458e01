use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the published JSON feeds are read from.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, name: &str) -> Result<String, FeedError>;

    fn describe(&self) -> String;
}

pub fn fetch_json<T: DeserializeOwned>(source: &dyn FeedSource, name: &str) -> Result<T, FeedError> {
    let body = source.fetch(name)?;
    Ok(serde_json::from_str(&body)?)
}

/// `?t=` defeats intermediate caches of the static hosting.
pub fn feed_url(base: &str, name: &str, stamp_millis: u128) -> String {
    format!("{}/{}?t={}", base.trim_end_matches('/'), name.trim_start_matches('/'), stamp_millis)
}

pub struct HttpSource {
    client: Client,
    base: String,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Duration) -> Result<HttpSource, FeedError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;
        Ok(HttpSource {
            client,
            base: base.to_string(),
        })
    }
}

impl FeedSource for HttpSource {
    fn fetch(&self, name: &str) -> Result<String, FeedError> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let url = feed_url(&self.base, name, stamp);
        tracing::debug!(%url, "fetching feed");
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        Ok(body)
    }

    fn describe(&self) -> String {
        self.base.clone()
    }
}

/// A directory holding the feed files, as published under `public/`.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> DirSource {
        DirSource { root: root.into() }
    }
}

impl FeedSource for DirSource {
    fn fetch(&self, name: &str) -> Result<String, FeedError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|source| FeedError::Io { path, source })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

pub fn open(location: &str, timeout: Duration) -> Result<Box<dyn FeedSource>, FeedError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(DirSource::new(location)))
    }
}
