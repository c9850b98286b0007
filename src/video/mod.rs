//! Video-platform metadata via oEmbed.
//!
//! Lookups here never fail loudly: any problem yields `None` and the caller
//! falls back to scraping the page itself.

pub mod youtube;

pub use youtube::{is_youtube_host, video_id, OEmbedClient};
