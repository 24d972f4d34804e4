//! Book existence checks against the books service.
//!
//! A review must reference a book that exists upstream at the time it is
//! created or re-pointed. There is no shared database and no foreign key;
//! this check is the only enforcement, so drift after the fact is accepted.

use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::client::envelope::Payload;
use crate::client::remote::{ClientError, Params, RemoteServiceClient};

/// Client for the books service.
///
/// A validation gate first: callers care that the lookup succeeded. The
/// fetched representation is returned as a side channel; some callers ignore
/// it.
#[derive(Debug, Clone)]
pub struct BookClient {
    remote: RemoteServiceClient,
}

impl BookClient {
    pub fn new(remote: RemoteServiceClient) -> Self {
        Self { remote }
    }

    /// Fetch `/books/{id}`. A `RemoteClient` failure (typically 404) is the
    /// intended rejection signal for a review referencing a nonexistent
    /// book: propagate it, don't treat it as an anomaly.
    pub async fn ensure_exists(&self, book_id: u64) -> Result<Payload, ClientError> {
        self.remote
            .perform_request(
                Method::GET,
                &format!("/books/{book_id}"),
                &Params::new(),
                HeaderMap::new(),
            )
            .await
    }
}
