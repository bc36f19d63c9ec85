//! Client for the public stats endpoints: season listings, play-by-play and box scores.

mod core;
mod fetch_utils;
pub mod http_client;
pub mod models;
pub mod urls;

pub use self::core::*;
pub use http_client::*;
pub use urls::*;
