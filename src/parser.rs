//! Pure mapping from page bodies to catalog entities.

use scraper::Html;
use serde::Deserialize;
use serde_json::Value;

use crate::anime::{AnimeDetail, AnimePage, CatalogEntry, Episode, Status};
use crate::archive::selector;
use crate::extract::{Extractor, decode};

/// Records per page of the archive search.
pub const PAGE_SIZE: u32 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Record {
    id: Option<Value>,
    slug: Option<Value>,
    title_eng: Option<Value>,
    title: Option<Value>,
    imageurl: Option<Value>,
    plot: Option<Value>,
    studio: Option<Value>,
    genres: Option<Value>,
    status: Option<Value>,
}

impl Record {
    fn title(&self) -> Option<String> {
        self.title_eng
            .as_ref()
            .and_then(content)
            .or_else(|| self.title.as_ref().and_then(content))
    }

    fn entry(&self) -> Option<CatalogEntry> {
        let id = self.id.as_ref().and_then(content)?;
        let slug = self.slug.as_ref().and_then(content)?;
        let title = self.title()?;
        let thumbnail = self.imageurl.as_ref().and_then(content).unwrap_or_default();

        Some(CatalogEntry::new(&id, &slug, &title, &thumbnail))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    data: Option<Value>,
    current_page: Option<Value>,
    last_page: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    records: Option<Value>,
    tot: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EpisodeRecord {
    id: Option<Value>,
    number: Option<Value>,
}

/// Textual content of a json primitive: strings as they are, numbers and
/// booleans printed.
fn content(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn entries(records: &[Value]) -> Vec<CatalogEntry> {
    records
        .iter()
        .filter_map(|r| serde_json::from_value::<Record>(r.clone()).ok())
        .filter_map(|r| r.entry())
        .collect()
}

fn episode_records(extractor: &dyn Extractor, body: &str) -> Vec<EpisodeRecord> {
    decode::<Vec<Value>>(extractor, body)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| serde_json::from_value(e).ok())
        .collect()
}

pub fn parse_popular(extractor: &dyn Extractor, body: &str) -> AnimePage {
    let Some(listing) = decode::<Listing>(extractor, body) else {
        return AnimePage::empty();
    };
    let Some(records) = listing.data.as_ref().and_then(Value::as_array) else {
        return AnimePage::empty();
    };

    let current = listing.current_page.as_ref().and_then(int).unwrap_or(1);
    let last = listing.last_page.as_ref().and_then(int).unwrap_or(1);
    tracing::debug!(current, last, "popular pagination");

    AnimePage::new(entries(records), current < last)
}

pub fn parse_latest(html: &str, page: u32) -> AnimePage {
    let document = Html::parse_document(html);
    let container = selector::from("div.latest-anime-container");
    let link = selector::from(r#"a[href*="/anime/"]"#);
    let img = selector::from("img");
    let title = selector::from("strong.latest-anime-title");

    let entries = document
        .select(&container)
        .filter_map(|c| {
            let href = c.select(&link).next()?.value().attr("href")?;
            let title = c.select(&title).next()?.text().collect::<String>();
            let thumbnail = c
                .select(&img)
                .next()
                .and_then(|i| i.value().attr("src"))
                .unwrap_or_default();

            let (id, slug) = parse_anime_path(href)?;
            let title = title
                .trim()
                .replace("&#039;", "'")
                .replace("&amp;", "&");

            Some(CatalogEntry::new(id, slug, &title, thumbnail))
        })
        .collect();

    AnimePage::new(entries, has_latest_next(html, page))
}

/// The latest page exposes no pagination data: another page is assumed when
/// the markup links to it.
pub fn has_latest_next(html: &str, page: u32) -> bool {
    page.checked_add(1)
        .is_some_and(|next| html.contains(&format!("?anime={next}")))
}

/// Saturates for pages past the addressable range.
pub fn search_offset(page: u32) -> u32 {
    (page.max(1) - 1).saturating_mul(PAGE_SIZE)
}

pub fn parse_search(body: &str, page: u32) -> AnimePage {
    let response = match serde_json::from_str::<SearchResponse>(body) {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(%err, "search response is not valid json");
            return AnimePage::empty();
        }
    };
    let Some(records) = response.records.as_ref().and_then(Value::as_array) else {
        return AnimePage::empty();
    };

    let total = response.tot.as_ref().and_then(int).unwrap_or(0);
    let offset = i64::from(search_offset(page));
    tracing::debug!(offset, total, "search pagination");

    AnimePage::new(entries(records), offset + i64::from(PAGE_SIZE) < total)
}

pub fn parse_random(extractor: &dyn Extractor, body: &str) -> AnimePage {
    let entry = decode::<Record>(extractor, body).and_then(|r| r.entry());

    AnimePage::new(entry.into_iter().collect(), false)
}

/// Detail of `entry` as described by the player blob. Fields the page does not
/// carry keep the values of `entry` or their defaults.
pub fn parse_detail(extractor: &dyn Extractor, body: &str, entry: &CatalogEntry) -> AnimeDetail {
    let Some(record) = decode::<Record>(extractor, body) else {
        return AnimeDetail {
            entry: entry.clone(),
            ..Default::default()
        };
    };

    let mut detail_entry = record.entry().unwrap_or_else(|| entry.clone());
    if let Some(title) = record.title() {
        detail_entry.title = title;
    }

    let genres = record
        .genres
        .as_ref()
        .and_then(Value::as_array)
        .map(|g| {
            g.iter()
                .filter_map(|g| g.get("name").and_then(content))
                .collect()
        })
        .unwrap_or_default();

    let status = record
        .status
        .as_ref()
        .and_then(content)
        .map(|s| Status::from_label(&s))
        .unwrap_or_default();

    AnimeDetail {
        entry: detail_entry,
        description: record.plot.as_ref().and_then(content).unwrap_or_default(),
        studio: record.studio.as_ref().and_then(content).unwrap_or_default(),
        genres,
        status,
    }
}

/// Episodes in ascending order; the page lists them newest first.
pub fn parse_episodes(extractor: &dyn Extractor, body: &str, detail_url: &str) -> Vec<Episode> {
    let mut episodes: Vec<_> = episode_records(extractor, body)
        .into_iter()
        .filter_map(|e| {
            let number = e.number.as_ref().and_then(content)?;

            Some(Episode {
                number: number.parse().unwrap_or(0.0),
                name: format!("Episodio {number}"),
                url: format!("{detail_url}/{number}"),
            })
        })
        .collect();
    episodes.reverse();

    episodes
}

/// Id of the episode whose `number` text equals `number`.
pub fn find_episode_id(extractor: &dyn Extractor, body: &str, number: &str) -> Option<String> {
    episode_records(extractor, body)
        .into_iter()
        .find(|e| e.number.as_ref().and_then(content).as_deref() == Some(number))
        .and_then(|e| e.id.as_ref().and_then(content))
}

/// Episode number carried by an episode pseudo-url.
pub fn episode_number(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Splits the `{id}-{slug}` segment of an `/anime/` path or url.
pub fn parse_anime_path(input: &str) -> Option<(&str, &str)> {
    let (_, rest) = input.split_once("/anime/")?;
    let segment = rest.split(['/', '?', '#']).next()?;
    let (id, slug) = segment.split_once('-')?;

    match (id, slug) {
        ("", _) | (_, "") => None,
        pair => Some(pair),
    }
}

pub fn entry_from_path(input: &str) -> Option<CatalogEntry> {
    parse_anime_path(input).map(|(id, slug)| CatalogEntry::new(id, slug, "", ""))
}

pub fn parse_filename(input: &str) -> Option<String> {
    reqwest::Url::parse(input)
        .ok()?
        .path_segments()
        .and_then(|mut s| s.next_back())
        .filter(|s| !s.is_empty())
        .map(|s| s.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Patterns;

    fn listing_page(blob: &str) -> String {
        let attr = blob.replace('"', "&quot;").replace('\'', "&#039;");
        format!(r#"<html><body><top-anime animes="{attr}"></top-anime></body></html>"#)
    }

    fn player_page(anime: &str, episodes: &str) -> String {
        let anime = anime.replace('"', "&quot;").replace('/', "\\/");
        let episodes = episodes.replace('"', "&quot;");
        format!(
            r#"<html><body><video-player anime="{anime}" episodes="{episodes}" embed_url=""></video-player></body></html>"#
        )
    }

    #[test]
    fn test_parse_popular() {
        let page = listing_page(
            r#"{"data":[{"id":5,"slug":"demo","title_eng":"Demo","imageurl":"x.jpg"}],"current_page":1,"last_page":2}"#,
        );
        let patterns = Patterns::default();
        let res = parse_popular(patterns.listing.as_ref(), &page);

        assert_eq!(
            res,
            AnimePage::new(vec![CatalogEntry::new("5", "demo", "Demo", "x.jpg")], true)
        );
        assert_eq!(res.entries[0].path, "/anime/5-demo");
    }

    #[test]
    fn test_parse_popular_pagination() {
        let patterns = Patterns::default();
        let cases = [
            (r#"{"data":[],"current_page":2,"last_page":2}"#, false),
            (r#"{"data":[],"current_page":3,"last_page":2}"#, false),
            (r#"{"data":[],"current_page":1,"last_page":9}"#, true),
            (r#"{"data":[],"current_page":"1","last_page":"9"}"#, true),
            (r#"{"data":[]}"#, false),
            (r#"{"data":[],"current_page":"one","last_page":4}"#, true),
            (r#"{"data":[],"current_page":1,"last_page":null}"#, false),
        ];

        for (blob, has_next) in cases {
            let res = parse_popular(patterns.listing.as_ref(), &listing_page(blob));
            assert_eq!(res.has_next, has_next, "{blob}");
        }
    }

    #[test]
    fn test_parse_popular_filters_records() {
        let page = listing_page(
            r#"{"data":[
                {"id":1,"slug":"a","title":"Only Title"},
                {"id":2,"title_eng":"No Slug"},
                {"slug":"c","title_eng":"No Id"},
                {"id":4,"slug":"d"},
                {"id":"5","slug":"e","title_eng":null,"title":"Fallback","imageurl":null},
                42
            ],"current_page":1,"last_page":1}"#,
        );
        let patterns = Patterns::default();
        let res = parse_popular(patterns.listing.as_ref(), &page);

        assert_eq!(
            res.entries,
            vec![
                CatalogEntry::new("1", "a", "Only Title", ""),
                CatalogEntry::new("5", "e", "Fallback", ""),
            ]
        );
        assert!(!res.has_next);
    }

    #[test]
    fn test_parse_popular_is_pure() {
        let page = listing_page(
            r#"{"data":[{"id":5,"slug":"demo","title_eng":"Demo"},{"id":6,"slug":"two","title_eng":"Two"}],"current_page":1,"last_page":1}"#,
        );
        let patterns = Patterns::default();

        let first = parse_popular(patterns.listing.as_ref(), &page);
        let second = parse_popular(patterns.listing.as_ref(), &page);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_popular_without_marker() {
        let patterns = Patterns::default();

        let res = parse_popular(patterns.listing.as_ref(), "<html>maintenance</html>");
        assert_eq!(res, AnimePage::empty());

        let res = parse_popular(patterns.listing.as_ref(), &listing_page(r#"{"data":{}}"#));
        assert_eq!(res, AnimePage::empty());
    }

    #[test]
    fn test_parse_latest() {
        let html = r#"
            <div class="home-wrapper-body">
                <div class="latest-anime-container">
                    <a href="https://www.animeunity.so/anime/4521-girls-last-tour/67890">
                        <img src="https://img.animeunity.so/anime/girls.jpg">
                    </a>
                    <strong class="latest-anime-title"> Girls&#039; Last Tour </strong>
                </div>
                <div class="latest-anime-container">
                    <a href="/anime/12-kiss-x-sis">
                        <img src="kiss.jpg">
                    </a>
                    <strong class="latest-anime-title">Kiss &amp; Sis</strong>
                </div>
                <div class="latest-anime-container">
                    <a href="/anime/13-no-title"><img src="a.jpg"></a>
                </div>
                <div class="latest-anime-container">
                    <a href="/news/14-not-anime"></a>
                    <strong class="latest-anime-title">Not anime</strong>
                </div>
                <div class="latest-anime-container">
                    <a href="/anime/15-no-image"></a>
                    <strong class="latest-anime-title">No Image</strong>
                </div>
            </div>
            <ul class="pagination">
                <li><a href="https://www.animeunity.so/?anime=2">2</a></li>
            </ul>"#;

        let res = parse_latest(html, 1);
        assert_eq!(
            res.entries,
            vec![
                CatalogEntry::new(
                    "4521",
                    "girls-last-tour",
                    "Girls' Last Tour",
                    "https://img.animeunity.so/anime/girls.jpg"
                ),
                CatalogEntry::new("12", "kiss-x-sis", "Kiss & Sis", "kiss.jpg"),
                CatalogEntry::new("15", "no-image", "No Image", ""),
            ]
        );
        assert!(res.has_next);

        let res = parse_latest(html, 2);
        assert!(!res.has_next);
    }

    #[test]
    fn test_has_latest_next() {
        assert!(has_latest_next(r#"<a href="/?anime=3">"#, 2));
        assert!(!has_latest_next(r#"<a href="/?anime=2">"#, 2));
        assert!(!has_latest_next("", 1));
        assert!(!has_latest_next(r#"<a href="/?anime=1">"#, u32::MAX));
    }

    #[test]
    fn test_search_offset() {
        assert_eq!(search_offset(0), 0);
        assert_eq!(search_offset(1), 0);
        assert_eq!(search_offset(2), 30);
        assert_eq!(search_offset(5), 120);
        assert_eq!(search_offset(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_parse_search() {
        let body = r#"{"records":[{"id":5,"slug":"demo","title_eng":"Demo","imageurl":"x.jpg"}],"tot":45}"#;

        let res = parse_search(body, 1);
        assert_eq!(res.entries, vec![CatalogEntry::new("5", "demo", "Demo", "x.jpg")]);
        assert!(res.has_next);

        let res = parse_search(body, 2);
        assert!(!res.has_next);
    }

    #[test]
    fn test_parse_search_pagination() {
        for tot in [0, 29, 30, 31, 60, 61, 1000] {
            for page in 1..=40u32 {
                let body = format!(r#"{{"records":[],"tot":{tot}}}"#);
                let offset = (page - 1) * 30;
                let res = parse_search(&body, page);

                assert_eq!(res.has_next, offset + 30 < tot, "page {page}, tot {tot}");
            }
        }
    }

    #[test]
    fn test_parse_search_malformed() {
        assert_eq!(parse_search("<html>", 1), AnimePage::empty());
        assert_eq!(parse_search(r#"{"tot":100}"#, 1), AnimePage::empty());

        let res = parse_search(r#"{"records":[]}"#, 1);
        assert!(!res.has_next);
    }

    #[test]
    fn test_parse_random() {
        let patterns = Patterns::default();
        let html = player_page(
            r#"{"id":77,"slug":"bocchi","title":"Bocchi","title_eng":"Bocchi the Rock!","imageurl":"https://img.tld/b.jpg"}"#,
            "[]",
        );

        let res = parse_random(patterns.player.as_ref(), &html);
        assert_eq!(
            res,
            AnimePage::new(
                vec![CatalogEntry::new(
                    "77",
                    "bocchi",
                    "Bocchi the Rock!",
                    "https://img.tld/b.jpg"
                )],
                false
            )
        );

        let res = parse_random(patterns.player.as_ref(), "<html></html>");
        assert_eq!(res, AnimePage::empty());
    }

    #[test]
    fn test_parse_detail() {
        let patterns = Patterns::default();
        let html = player_page(
            r#"{"id":5,"slug":"demo","title_eng":"Demo","imageurl":"https://img.tld/d.jpg","plot":"A short plot","studio":"Kyoto Animation","genres":[{"id":51,"name":"Action"},{"id":37,"name":"Comedy"},{"id":1}],"status":"In Corso"}"#,
            "[]",
        );
        let entry = CatalogEntry::new("5", "demo", "", "");

        let detail = parse_detail(patterns.player.as_ref(), &html, &entry);
        assert_eq!(
            detail,
            AnimeDetail {
                entry: CatalogEntry::new("5", "demo", "Demo", "https://img.tld/d.jpg"),
                description: "A short plot".into(),
                studio: "Kyoto Animation".into(),
                genres: vec!["Action".into(), "Comedy".into()],
                status: Status::Ongoing,
            }
        );
        assert_eq!(detail.genre_line(), "Action, Comedy");
    }

    #[test]
    fn test_parse_detail_defaults() {
        let patterns = Patterns::default();
        let entry = CatalogEntry::new("5", "demo", "Demo", "");

        let detail = parse_detail(patterns.player.as_ref(), "<html></html>", &entry);
        assert_eq!(detail.entry, entry);
        assert_eq!(detail.status, Status::Unknown);
        assert!(detail.genres.is_empty());

        let html = player_page(r#"{"title":"Solo","status":"Sospeso"}"#, "[]");
        let detail = parse_detail(patterns.player.as_ref(), &html, &entry);
        assert_eq!(detail.entry.path, "/anime/5-demo");
        assert_eq!(detail.entry.title, "Solo");
        assert_eq!(detail.status, Status::Unknown);
        assert_eq!(detail.description, "");
    }

    #[test]
    fn test_parse_episodes() {
        let patterns = Patterns::default();
        let html = player_page(
            r#"{"id":5}"#,
            r#"[{"id":103,"number":"3"},{"id":102,"number":"2.5"},{"id":101,"number":"2"},{"id":100,"number":1},{"id":99}]"#,
        );
        let url = "https://www.animeunity.so/anime/5-demo";

        let episodes = parse_episodes(patterns.episodes.as_ref(), &html, url);
        let numbers: Vec<_> = episodes.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1.0, 2.0, 2.5, 3.0]);
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(
            episodes[2],
            Episode {
                number: 2.5,
                name: "Episodio 2.5".into(),
                url: "https://www.animeunity.so/anime/5-demo/2.5".into(),
            }
        );

        let mut twice = episodes.clone();
        twice.reverse();
        let upstream: Vec<_> = twice.iter().map(|e| e.number).collect();
        assert_eq!(upstream, vec![3.0, 2.5, 2.0, 1.0]);
    }

    #[test]
    fn test_parse_episodes_non_numeric() {
        let patterns = Patterns::default();
        let html = player_page("{}", r#"[{"id":9,"number":"Special"}]"#);

        let episodes = parse_episodes(patterns.episodes.as_ref(), &html, "u");
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].number, 0.0);
        assert_eq!(episodes[0].url, "u/Special");

        let episodes = parse_episodes(patterns.episodes.as_ref(), "<html></html>", "u");
        assert!(episodes.is_empty());
    }

    #[test]
    fn test_find_episode_id() {
        let patterns = Patterns::default();
        let html = player_page(
            "{}",
            r#"[{"id":103,"number":"3"},{"id":"102","number":"2"},{"id":100,"number":1}]"#,
        );

        assert_eq!(
            find_episode_id(patterns.episodes.as_ref(), &html, "2").as_deref(),
            Some("102")
        );
        assert_eq!(
            find_episode_id(patterns.episodes.as_ref(), &html, "1").as_deref(),
            Some("100")
        );
        assert_eq!(find_episode_id(patterns.episodes.as_ref(), &html, "4"), None);
        assert_eq!(find_episode_id(patterns.episodes.as_ref(), "", "1"), None);
    }

    #[test]
    fn test_episode_number() {
        assert_eq!(episode_number("https://www.animeunity.so/anime/5-demo/12"), "12");
        assert_eq!(episode_number("https://www.animeunity.so/anime/5-demo/12.5"), "12.5");
        assert_eq!(episode_number("12"), "12");
    }

    #[test]
    fn test_parse_anime_path() {
        assert_eq!(parse_anime_path("/anime/5-demo"), Some(("5", "demo")));
        assert_eq!(
            parse_anime_path("https://www.animeunity.so/anime/4521-girls-last-tour/67890"),
            Some(("4521", "girls-last-tour"))
        );
        assert_eq!(parse_anime_path("/anime/5-demo?x=1"), Some(("5", "demo")));
        assert_eq!(parse_anime_path("/anime/5"), None);
        assert_eq!(parse_anime_path("/anime/-demo"), None);
        assert_eq!(parse_anime_path("/manga/5-demo"), None);

        let entry = entry_from_path("/anime/5-demo").unwrap();
        assert_eq!(entry.path, "/anime/5-demo");
    }

    #[test]
    fn test_parse_filename() {
        let url = "https://au-d1-01.scws-content.net/download/1/ab/Demo_Ep_01_SUB_ITA_1080p.mp4?token=x";
        assert_eq!(parse_filename(url).as_deref(), Some("Demo_Ep_01_SUB_ITA_1080p.mp4"));
        assert_eq!(parse_filename("ciao ciao"), None);
    }
}
