//! Error taxonomy shared by the fetchers, the extractor and the collection loop.

use crate::quota::Endpoint;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The credential file is missing, unreadable or empty, or a setting is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response (DNS, refused connection, timeout, ...).
    #[error("{endpoint} request failed")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but did not carry the payload we asked for, usually
    /// because the API answered with an error object (quota, bad key, deleted
    /// resource).
    #[error("{endpoint} returned no usable payload: {message}")]
    Api { endpoint: Endpoint, message: String },

    #[error("write video record")]
    Persist(#[from] csv::Error),

    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn api(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self::Api {
            endpoint,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that only concern the resource that was asked for, as
    /// opposed to the connection or the local filesystem.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
