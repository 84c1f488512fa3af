use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use scraper::Html;

use crate::archive::selector;
use crate::errors::Result;

pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
pub const SESSION_COOKIE: &str = "animeunity_session";

/// Tokens the archive search requires, acquired fresh for every search.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct SearchSession {
    pub csrf_token: String,
    pub xsrf_token: String,
    /// Full `animeunity_session=...` pair, sent back as the `Cookie` header.
    pub session_cookie: String,
}

impl SearchSession {
    /// Builds the session from the `/archivio` page and its response headers.
    /// Anything missing is left empty.
    pub fn parse(html: &str, headers: &HeaderMap) -> Self {
        let mut session = Self {
            csrf_token: parse_csrf_token(html).unwrap_or_default(),
            ..Default::default()
        };

        let cookies = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());

        for cookie in cookies {
            if cookie.starts_with(XSRF_COOKIE) {
                let value = cookie.split_once('=').map(|(_, v)| v).unwrap_or(cookie);
                session.xsrf_token = before_attributes(value).replace("%3D", "=");
            }
            if cookie.starts_with(SESSION_COOKIE) {
                session.session_cookie = before_attributes(cookie).replace("%3D", "=");
            }
        }

        session
    }

    /// Headers of the search POST.
    pub fn headers(&self, base_url: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            HeaderName::from_static("x-csrf-token"),
            HeaderValue::from_str(&self.csrf_token)?,
        );
        headers.insert(
            HeaderName::from_static("x-xsrf-token"),
            HeaderValue::from_str(&self.xsrf_token)?,
        );
        headers.insert(header::COOKIE, HeaderValue::from_str(&self.session_cookie)?);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=utf-8"),
        );
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(header::ORIGIN, HeaderValue::from_str(base_url)?);
        headers.insert(
            header::REFERER,
            HeaderValue::from_str(&format!("{base_url}/archivio"))?,
        );

        Ok(headers)
    }
}

fn before_attributes(cookie: &str) -> &str {
    cookie.split(';').next().unwrap_or(cookie)
}

fn parse_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let meta = selector::from(r#"meta[name="csrf-token"]"#);

    document
        .select(&meta)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|c| c.to_owned())
}
