// This file is part of the terraform-provider-backupdr project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde_json::{Map, Value as Json};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::TransportError;

const USER_PROJECT_HEADER: &str = "X-Goog-User-Project";

/// HTTP client for the Backup and DR API
#[derive(Debug, Clone, Default)]
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    /// Send an authenticated GET request and decode the JSON object it returns
    pub async fn get(
        &self,
        config: &ClientConfig,
        url: &str,
        billing_project: Option<&str>,
    ) -> Result<Map<String, Json>, TransportError> {
        let parsed = Url::parse(url).map_err(|err| TransportError::InvalidUrl {
            url: url.to_owned(),
            detail: err.to_string(),
        })?;
        let token = config
            .access_token
            .as_deref()
            .ok_or(TransportError::MissingToken)?;

        let mut request = self
            .client
            .get(parsed)
            .bearer_auth(token)
            .header(USER_AGENT, config.user_agent.as_str())
            .header(ACCEPT, "application/json");
        if let Some(billing_project) = billing_project {
            request = request.header(USER_PROJECT_HEADER, billing_project);
        }

        debug!(url, "GET");
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(url, status = status.as_u16(), len = body.len(), "response");

        if !status.is_success() {
            let err = api_error(status, &body);
            warn!(url, "{err}");
            return Err(err);
        }

        match serde_json::from_slice::<Json>(&body)? {
            Json::Object(fields) => Ok(fields),
            _ => Err(TransportError::NotAnObject),
        }
    }
}

/// Extract the message of a Google API error body
fn api_error(status: StatusCode, body: &[u8]) -> TransportError {
    let message = serde_json::from_slice::<Json>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/message")
                .and_then(Json::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_owned();
            if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_owned()
            } else {
                text
            }
        });

    TransportError::Api {
        status: status.as_u16(),
        message,
    }
}
