use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};

/// Referer the video host expects on every media request.
pub const VIDEO_REFERER: &str = "https://vixcloud.co/";

/// Qualities derived from the discovered download url, best first.
pub const QUALITIES: [&str; 3] = ["1080p", "720p", "480p"];

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub thumbnail_url: String,
    pub path: String,
}

impl CatalogEntry {
    pub fn new(id: &str, slug: &str, title: &str, thumbnail_url: &str) -> Self {
        Self {
            id: id.to_owned(),
            slug: slug.to_owned(),
            title: title.to_owned(),
            thumbnail_url: thumbnail_url.to_owned(),
            path: format!("/anime/{id}-{slug}"),
        }
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Completed,
    #[default]
    Unknown,
}

impl Status {
    /// Maps the italian labels used by the site; anything else is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "In Corso" => Status::Ongoing,
            "Terminato" | "Completato" => Status::Completed,
            _ => Status::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Ongoing => "Ongoing",
            Status::Completed => "Completed",
            Status::Unknown => "Unknown",
        };

        f.write_str(s)
    }
}

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct AnimeDetail {
    pub entry: CatalogEntry,
    pub description: String,
    pub studio: String,
    pub genres: Vec<String>,
    pub status: Status,
}

impl AnimeDetail {
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }
}

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Episode {
    pub number: f32,
    pub name: String,
    /// Pseudo-url `{detail_url}/{number}`, parsed again when resolving videos.
    pub url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Video {
    pub quality: String,
    pub url: String,
    pub headers: HeaderMap,
}

impl Video {
    /// Fans a `1080p.mp4` download url out into one video per quality.
    ///
    /// Lower qualities are guessed by renaming the file; nothing checks that
    /// the host actually serves them.
    pub fn variants(download_url: &str) -> Vec<Video> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(VIDEO_REFERER));

        QUALITIES
            .iter()
            .map(|quality| Video {
                quality: quality.to_string(),
                url: download_url.replace("1080p.mp4", &format!("{quality}.mp4")),
                headers: headers.clone(),
            })
            .collect()
    }

    pub fn referer(&self) -> Option<&str> {
        self.headers.get(REFERER).and_then(|v| v.to_str().ok())
    }
}

/// A page of catalog entries and whether another page follows.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct AnimePage {
    pub entries: Vec<CatalogEntry>,
    pub has_next: bool,
}

impl AnimePage {
    pub fn new(entries: Vec<CatalogEntry>, has_next: bool) -> Self {
        Self { entries, has_next }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
