extern crate async_trait;
extern crate reqwest;
extern crate serde;

pub mod error;
pub mod model;

pub use error::{Error, Kind, Result};
pub use model::{Problem, Submission, User, Verdict};

use crate::config::FetchConfig;
use async_trait::async_trait;
use error::{api_error, builder_error, decode_error, network_error, status_error};
use model::{Envelope, Status};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The two codeforces calls the analyzer depends on.
#[async_trait]
pub trait SubmissionSource: Sync {
    /// One page of `user.status`, newest first. `from` is 1-based.
    async fn user_status(&self, handle: &str, from: usize, count: usize)
        -> Result<Vec<Submission>>;
    async fn user_info(&self, handle: &str) -> Result<User>;
}

pub struct Client {
    client: reqwest::Client,
    base_url: String,
}
impl Client {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Client {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(config.timeout)
                .build()
                .map_err(builder_error)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, method))
            .query(query)
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        decode_response(status, &body)
    }
}

/// Codeforces answers `FAILED` with a 4xx status, so the envelope is read before the status.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => unwrap_envelope(envelope),
        Err(_) if !status.is_success() => Err(status_error(status)),
        Err(e) => Err(decode_error(e)),
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T> {
    match (envelope.status, envelope.result) {
        (Status::Ok, Some(v)) => Ok(v),
        (Status::Ok, None) => Err(api_error(Some(String::from(
            "response has no result field",
        )))),
        (Status::Failed, _) => Err(api_error(envelope.comment)),
    }
}

#[async_trait]
impl SubmissionSource for Client {
    async fn user_status(
        &self,
        handle: &str,
        from: usize,
        count: usize,
    ) -> Result<Vec<Submission>> {
        self.call(
            "user.status",
            &[
                ("handle", handle.to_string()),
                ("from", from.to_string()),
                ("count", count.to_string()),
            ],
        )
        .await
    }
    async fn user_info(&self, handle: &str) -> Result<User> {
        self.call::<Vec<User>>("user.info", &[("handles", handle.to_string())])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| api_error(Some(format!("no user info returned for {}", handle))))
    }
}
