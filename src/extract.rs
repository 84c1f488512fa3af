//! Pulls the JSON blobs the site server-renders into html attributes.
//!
//! Every page is matched against a bounded pattern and the first capture is
//! unescaped before it is decoded. A missing marker or a blob that does not
//! decode is an ordinary outcome and yields `None`.

use std::borrow::Cow;
use std::sync::Arc;

use regex::Regex;
use serde::de::DeserializeOwned;

pub trait Extractor: Send + Sync {
    /// Returns the first payload found in `body`, already unescaped.
    fn capture<'a>(&self, body: &'a str) -> Option<Cow<'a, str>>;
}

impl<F> Extractor for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn capture<'a>(&self, body: &'a str) -> Option<Cow<'a, str>> {
        self(body).map(Cow::Owned)
    }
}

/// Decodes the payload captured by `extractor` as `T`.
pub fn decode<T: DeserializeOwned>(extractor: &dyn Extractor, body: &str) -> Option<T> {
    let raw = extractor.capture(body)?;

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%err, "embedded payload is not valid json");
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unescape {
    /// Capture is used as is.
    Raw,
    /// `&quot;` and `&#039;`.
    Entities,
    /// `Entities` plus escaped slashes.
    EntitiesAndSlashes,
}

pub fn unescape(raw: &str, mode: Unescape) -> Cow<'_, str> {
    match mode {
        Unescape::Raw => Cow::Borrowed(raw),
        Unescape::Entities => Cow::Owned(raw.replace("&quot;", "\"").replace("&#039;", "'")),
        Unescape::EntitiesAndSlashes => Cow::Owned(
            raw.replace("&quot;", "\"")
                .replace("&#039;", "'")
                .replace("\\/", "/"),
        ),
    }
}

/// Regex based extractor: first capture group of the first match.
#[derive(Clone, Debug)]
pub struct Pattern {
    name: &'static str,
    regex: Regex,
    unescape: Unescape,
}

impl Pattern {
    pub fn new(name: &'static str, pattern: &str, unescape: Unescape) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            unescape,
        })
    }

    fn from_static(name: &'static str, pattern: &'static str, unescape: Unescape) -> Self {
        match Self::new(name, pattern, unescape) {
            Ok(p) => p,
            Err(_) => panic!("unable to compile pattern {pattern}"),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Extractor for Pattern {
    fn capture<'a>(&self, body: &'a str) -> Option<Cow<'a, str>> {
        let Some(group) = self.regex.captures(body).and_then(|c| c.get(1)) else {
            tracing::debug!(pattern = self.name, "marker not found in page");
            return None;
        };

        Some(unescape(group.as_str(), self.unescape))
    }
}

/// The extractors used by `CatalogClient`, one per page marker.
#[derive(Clone)]
pub struct Patterns {
    /// `animes="..."` on listing pages.
    pub listing: Arc<dyn Extractor>,
    /// `video-player anime="{...}"` on detail and random pages.
    pub player: Arc<dyn Extractor>,
    /// `episodes="[...]"` on detail pages.
    pub episodes: Arc<dyn Extractor>,
    /// `downloadUrl = '...'` on the embed page.
    pub download: Arc<dyn Extractor>,
}

impl Default for Patterns {
    fn default() -> Self {
        Self {
            listing: Arc::new(Pattern::from_static(
                "listing",
                r#"animes="([^"]+)""#,
                Unescape::Entities,
            )),
            player: Arc::new(Pattern::from_static(
                "player",
                r#"video-player anime="(\{[^"]+\})""#,
                Unescape::EntitiesAndSlashes,
            )),
            episodes: Arc::new(Pattern::from_static(
                "episodes",
                r#"episodes="(\[[^\]]+\])""#,
                Unescape::Entities,
            )),
            download: Arc::new(Pattern::from_static(
                "download",
                r"downloadUrl\s*=\s*'([^']+)'",
                Unescape::Raw,
            )),
        }
    }
}
