//! Catalog client for the AnimeUnity streaming site.
//!
//! [`CatalogClient`] scrapes listings, anime details, episodes and video links
//! and exposes them through the [`Archive`] trait.

pub mod anime;
pub mod archive;
pub mod errors;
pub mod extract;
pub mod filters;
pub mod parser;
pub mod session;

pub use anime::{AnimeDetail, AnimePage, CatalogEntry, Episode, Status, Video};
pub use archive::{Archive, CatalogClient, default_client};
pub use errors::{Error, Result};
pub use filters::{Filter, FilterState, SearchParams};
pub use session::SearchSession;
