//! Position fetch client.
//!
//! One request per call to a satellite-position endpoint returning JSON with
//! `latitude` and `longitude`. Failures are reported as [`FetchError`] and
//! never retried here.

mod client;
mod config;
mod error;
mod response;

pub use client::{BlockingPositionClient, HttpPositionClient, PositionClient};
pub use config::{
    default_user_agent, PositionClientConfig, DEFAULT_POSITION_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use error::FetchError;
pub use response::parse_position;
