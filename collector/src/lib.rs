//! Collects YouTube search results for a region and video category into a CSV
//! file, enriched with per-video statistics and channel subscriber counts.
//!
//! The pieces, leaves first:
//!
//! - [`key`] loads the API key,
//! - [`youtube_api`] talks to the five read-only endpoints,
//! - [`quota`] keeps the running cost of a run,
//! - [`extract`] turns a page of search hits into [`extract::VideoRecord`]s,
//! - [`output`] appends records to the CSV and writes the listings,
//! - [`collect`] drives the page loop.

pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod key;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod output;
pub mod quota;
pub mod youtube_api;

pub use error::{Error, Result};
