//! HTTP implementation of [`SubjectService`]: every call is a JSON `POST` of an
//! [`Action`] to a single endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Subject, SubjectId},
    protocol::Action,
};
use tracing::{debug, error};
use url::Url;

use crate::SubjectService;

pub struct HttpSubjectService {
    http: Client,
    api_url: Url,
}

impl HttpSubjectService {
    pub fn new(api_url: Url) -> Self {
        Self {
            http: Client::new(),
            api_url,
        }
    }

    /// Like [`HttpSubjectService::new`], but every request fails once `timeout` elapses.
    pub fn with_timeout(api_url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, api_url })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    async fn post_action(&self, action: &Action) -> Result<Response> {
        debug!(action = action.name(), url = %self.api_url, "sending action");
        let response = self
            .http
            .post(self.api_url.clone())
            .json(action)
            .send()
            .await
            .and_then(Response::error_for_status);
        response
            .map_err(|error| {
                error!(action = action.name(), %error, "error sending action");
                error
            })
            .with_context(|| format!("{} request to {} failed", action.name(), self.api_url))
    }

    async fn query<R: DeserializeOwned>(&self, action: &Action) -> Result<R> {
        let response = self.post_action(action).await?;
        response
            .json::<R>()
            .await
            .map_err(|error| {
                error!(action = action.name(), %error, "malformed response body");
                error
            })
            .with_context(|| format!("malformed {} response", action.name()))
    }
}

#[async_trait]
impl SubjectService for HttpSubjectService {
    async fn fetch_subject_ids(&self) -> Result<Vec<SubjectId>> {
        self.query(&Action::GetSubjectIds).await
    }

    async fn fetch_subject(&self, id: &SubjectId) -> Result<Subject> {
        self.query(&Action::GetSubjectInfo { id: id.clone() }).await
    }

    async fn update_subject(&self, subject: &Subject) -> Result<()> {
        self.post_action(&Action::Update {
            json: subject.clone(),
        })
        .await?;
        Ok(())
    }
}

/// Resolves a subject's image path against the asset base the service serves images from.
///
/// The path is appended below the base path, even when the base lacks a trailing slash.
pub fn image_url(asset_base: &Url, image_path: &str) -> Result<Url, url::ParseError> {
    let mut base = asset_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(image_path.trim_start_matches('/'))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
