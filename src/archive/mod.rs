pub mod animeunity;

use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::anime::{AnimeDetail, AnimePage, CatalogEntry, Episode, Video};
use crate::errors::{Error, Result};
use crate::filters::{self, Filter, FilterState};

pub use animeunity::CatalogClient;

/// Operations a host drives a content source through.
#[allow(async_fn_in_trait)]
pub trait Archive {
    const NAME: &'static str;
    const LANG: &'static str;
    const REFERRER: &'static str;

    async fn popular(&self, page: u32) -> Result<AnimePage>;

    async fn latest(&self, page: u32) -> Result<AnimePage>;

    /// Synchronous request builder for the search. The archive search needs a
    /// session handshake first, so sources only provide [`Archive::search`].
    fn search_request(
        &self,
        _page: u32,
        _query: &str,
        _filters: &FilterState,
    ) -> Result<reqwest::Request> {
        Err(Error::Unsupported("search_request"))
    }

    async fn search(&self, page: u32, query: &str, filters: &FilterState) -> Result<AnimePage>;

    async fn detail(&self, entry: &CatalogEntry) -> Result<AnimeDetail>;

    async fn episodes(&self, entry: &CatalogEntry) -> Result<Vec<Episode>>;

    async fn videos(&self, episode: &Episode) -> Result<Vec<Video>>;

    fn filters(&self) -> Vec<Filter> {
        filters::filter_list()
    }
}

#[rustfmt::skip]
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml; q=0.9,image/webp,*/*; q=0.8";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0";

/// Http client with the browser-like defaults the site expects.
pub fn default_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("it"));

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;

    Ok(client)
}

pub(crate) mod selector {
    use scraper::Selector;

    pub fn from(s: &str) -> Selector {
        match Selector::parse(s) {
            Ok(s) => s,
            Err(_) => panic!("unable to parse selector {s}"),
        }
    }
}
