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

use thiserror::Error;
use tf_provider::AttributePath;

/// Configuration could not be resolved
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("project: required field is not set")]
    MissingProject,
    #[error("Cannot determine location: set location in this data source or at provider-level")]
    MissingLocation,
    #[error("location: `{0}` does not end with a location name")]
    MalformedLocation(String),
    #[error("{0}: required field is not set")]
    MissingField(&'static str),
    #[error("Invalid endpoint `{endpoint}`: {detail}")]
    InvalidEndpoint { endpoint: String, detail: String },
    #[error("Invalid URL template `{template}`: {detail}")]
    Template { template: String, detail: String },
}

impl ConfigError {
    /// Attribute the error should be reported on
    pub fn attribute_path(&self) -> AttributePath {
        match self {
            ConfigError::MissingProject => AttributePath::new("project"),
            ConfigError::MissingLocation | ConfigError::MalformedLocation(_) => {
                AttributePath::new("location")
            }
            ConfigError::MissingField(field) => AttributePath::new(*field),
            ConfigError::InvalidEndpoint { .. } => AttributePath::new("backup_dr_custom_endpoint"),
            ConfigError::Template { .. } => AttributePath::root(),
        }
    }
}

/// Request could not be sent, or its response could not be decoded
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request URL `{url}`: {detail}")]
    InvalidUrl { url: String, detail: String },
    #[error("no access token available")]
    MissingToken,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("googleapi: Error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response body is not a JSON object")]
    NotAnObject,
}

/// Flattened value was refused by the attribute it is assigned to
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{path}: {detail}")]
pub struct AssignError {
    pub path: AttributePath,
    pub detail: String,
}

impl AssignError {
    pub fn new(path: AttributePath, detail: impl Into<String>) -> Self {
        Self {
            path,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error reading DataSource: {0}")]
    Transport(#[from] TransportError),
    #[error("Error reading DataSource: {0}")]
    Assign(#[from] AssignError),
}

impl ReadError {
    /// Attribute the error should be reported on
    pub fn attribute_path(&self) -> AttributePath {
        match self {
            ReadError::Config(err) => err.attribute_path(),
            ReadError::Transport(_) => AttributePath::root(),
            ReadError::Assign(err) => err.path.clone(),
        }
    }
}
