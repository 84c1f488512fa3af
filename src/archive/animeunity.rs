use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, Url};

use super::Archive;
use crate::anime::{AnimeDetail, AnimePage, CatalogEntry, Episode, Video};
use crate::errors::{Error, Result};
use crate::extract::{Extractor, Patterns};
use crate::filters::FilterState;
use crate::parser;
use crate::session::SearchSession;

/// Scraping client for the AnimeUnity catalog.
///
/// Holds no state besides its collaborators: each call issues its requests
/// one after the other and rebuilds every entity from the responses.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
    patterns: Patterns,
}

impl CatalogClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, Self::REFERRER)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Self {
            client,
            base_url,
            patterns: Patterns::default(),
        }
    }

    /// Like [`CatalogClient::with_base_url`], rejecting anything that is not
    /// an absolute http(s) url.
    pub fn try_with_base_url(client: Client, base_url: &str) -> Result<Self> {
        match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Ok(Self::with_base_url(client, base_url))
            }
            _ => Err(Error::InvalidUrl(base_url.to_owned())),
        }
    }

    pub fn with_patterns(mut self, patterns: Patterns) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `Referer` pointing at the site root, plus the ajax marker when asked.
    fn site_headers(&self, ajax: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_str(&format!("{}/", self.base_url))?,
        );
        if ajax {
            headers.insert(
                HeaderName::from_static("x-requested-with"),
                HeaderValue::from_static("XMLHttpRequest"),
            );
        }

        Ok(headers)
    }

    async fn send_get(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        tracing::debug!(%url, "GET");

        Ok(self.client.get(url).headers(headers).send().await?)
    }

    async fn get_response(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        Ok(self.send_get(url, headers).await?.error_for_status()?)
    }

    async fn get_text(&self, url: &str, headers: HeaderMap) -> Result<String> {
        let response = self.get_response(url, headers).await?;

        Ok(response.text().await?)
    }

    /// Body of the response whatever its status. The player steps judge the
    /// content instead, so an error page ends the chain without failing it.
    async fn get_text_any_status(&self, url: &str, headers: HeaderMap) -> Result<String> {
        let response = self.send_get(url, headers).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, %status, "player step answered with an error status");
        }

        Ok(response.text().await?)
    }

    async fn random(&self) -> Result<AnimePage> {
        let body = self.get_text(&self.url("/randomanime"), HeaderMap::new()).await?;

        Ok(parser::parse_random(self.patterns.player.as_ref(), &body))
    }

    async fn handshake(&self) -> Result<SearchSession> {
        let response = self.get_response(&self.url("/archivio"), HeaderMap::new()).await?;
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(SearchSession::parse(&body, &headers))
    }

    async fn embed_url(&self, episode_id: &str) -> Result<Option<String>> {
        let url = self.url(&format!("/embed-url/{episode_id}"));
        let body = self.get_text_any_status(&url, self.site_headers(true)?).await?;
        let embed = body.trim();

        if !embed.starts_with("http") {
            tracing::warn!(episode_id, "embed url missing from response");
            return Ok(None);
        }

        Ok(Some(embed.to_owned()))
    }
}

impl Archive for CatalogClient {
    const NAME: &'static str = "AnimeUnity";
    const LANG: &'static str = "it";
    const REFERRER: &'static str = "https://www.animeunity.so";

    async fn popular(&self, page: u32) -> Result<AnimePage> {
        let url = self.url(&format!("/top-anime?popular=true&page={page}"));
        let body = self.get_text(&url, HeaderMap::new()).await?;

        Ok(parser::parse_popular(self.patterns.listing.as_ref(), &body))
    }

    async fn latest(&self, page: u32) -> Result<AnimePage> {
        let url = self.url(&format!("/?anime={page}"));
        let body = self.get_text(&url, HeaderMap::new()).await?;

        Ok(parser::parse_latest(&body, page))
    }

    async fn search(&self, page: u32, query: &str, filters: &FilterState) -> Result<AnimePage> {
        let params = filters.params();
        if params.random {
            return self.random().await;
        }

        let session = self.handshake().await?;
        let offset = parser::search_offset(page);
        let body = params.body(query, offset);

        let url = self.url("/archivio/get-animes");
        tracing::debug!(%url, offset, "POST");

        let response = self
            .client
            .post(&url)
            .headers(session.headers(&self.base_url)?)
            .body(body.to_string())
            .send()
            .await?
            .error_for_status()?;

        Ok(parser::parse_search(&response.text().await?, page))
    }

    async fn detail(&self, entry: &CatalogEntry) -> Result<AnimeDetail> {
        let body = self.get_text(&self.url(&entry.path), HeaderMap::new()).await?;

        Ok(parser::parse_detail(self.patterns.player.as_ref(), &body, entry))
    }

    async fn episodes(&self, entry: &CatalogEntry) -> Result<Vec<Episode>> {
        let url = self.url(&entry.path);
        let body = self.get_text(&url, HeaderMap::new()).await?;

        Ok(parser::parse_episodes(self.patterns.episodes.as_ref(), &body, &url))
    }

    async fn videos(&self, episode: &Episode) -> Result<Vec<Video>> {
        let body = self.get_text(&episode.url, HeaderMap::new()).await?;

        let number = parser::episode_number(&episode.url);
        let Some(id) = parser::find_episode_id(self.patterns.episodes.as_ref(), &body, number) else {
            tracing::warn!(number, "episode no longer listed");
            return Ok(vec![]);
        };

        let Some(embed) = self.embed_url(&id).await? else {
            return Ok(vec![]);
        };

        let page = self.get_text_any_status(&embed, self.site_headers(false)?).await?;
        let Some(download) = self.patterns.download.capture(&page) else {
            return Ok(vec![]);
        };

        Ok(Video::variants(&download))
    }
}
