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

use std::sync::Arc;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tf_provider::map;
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::{ValueBool, ValueString};
use tokio::sync::RwLock;

use crate::error::ConfigError;
use crate::utils::WithSchema;

pub const DEFAULT_BASE_PATH: &str = "https://backupdr.googleapis.com/v1/";

const PROJECT_ENVS: &[&str] = &[
    "GOOGLE_PROJECT",
    "GOOGLE_CLOUD_PROJECT",
    "GCLOUD_PROJECT",
    "CLOUDSDK_CORE_PROJECT",
];
const REGION_ENVS: &[&str] = &["GOOGLE_REGION", "GCLOUD_REGION", "CLOUDSDK_COMPUTE_REGION"];
const ZONE_ENVS: &[&str] = &["GOOGLE_ZONE", "GCLOUD_ZONE", "CLOUDSDK_COMPUTE_ZONE"];
const BILLING_PROJECT_ENVS: &[&str] = &["GOOGLE_BILLING_PROJECT"];
const USER_PROJECT_OVERRIDE_ENVS: &[&str] = &["USER_PROJECT_OVERRIDE"];
const ACCESS_TOKEN_ENVS: &[&str] = &["GOOGLE_OAUTH_ACCESS_TOKEN"];
const ENDPOINT_ENVS: &[&str] = &["GOOGLE_BACKUP_DR_CUSTOM_ENDPOINT"];

/// Provider block, as written in the Terraform configuration
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    #[serde(borrow = "'a")]
    pub project: ValueString<'a>,
    pub region: ValueString<'a>,
    pub zone: ValueString<'a>,
    pub billing_project: ValueString<'a>,
    pub user_project_override: ValueBool,
    pub access_token: ValueString<'a>,
    pub backup_dr_custom_endpoint: ValueString<'a>,
}

impl<'a> WithSchema for ProviderConfig<'a> {
    fn schema() -> Schema {
        let optional = |description: &str| Attribute {
            attr_type: AttributeType::String,
            description: Description::plain(description),
            constraint: AttributeConstraint::Optional,
            ..Default::default()
        };
        Schema {
            version: 1,
            block: Block {
                version: 1,
                description: Description::plain("Google Cloud Backup and DR"),
                attributes: map! {
                    "project" => optional("Default project of the data sources"),
                    "region" => optional("Default location of the data sources"),
                    "zone" => optional("Location of the data sources when neither `location` nor `region` is set"),
                    "billing_project" => optional("Project billed for the requests when `user_project_override` is set"),
                    "user_project_override" => Attribute {
                        attr_type: AttributeType::Bool,
                        description: Description::plain("Send the billing project along with the requests"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "access_token" => Attribute {
                        sensitive: true,
                        ..optional("OAuth 2.0 access token used to authenticate the requests")
                    },
                    "backup_dr_custom_endpoint" => optional("Base URL of the Backup and DR API"),
                },
                ..Default::default()
            },
        }
    }
}

/// Configuration shared by all the data sources once the provider is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub project: Option<String>,
    pub region: Option<String>,
    pub zone: Option<String>,
    pub billing_project: Option<String>,
    pub user_project_override: bool,
    pub access_token: Option<String>,
    pub backup_dr_base_path: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            project: None,
            region: None,
            zone: None,
            billing_project: None,
            user_project_override: false,
            access_token: None,
            backup_dr_base_path: DEFAULT_BASE_PATH.to_owned(),
            user_agent: user_agent(""),
        }
    }
}

/// Written by `configure`, read by every data source
pub type SharedConfig = Arc<RwLock<ClientConfig>>;

pub fn user_agent(terraform_version: &str) -> String {
    let mut agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    if !terraform_version.is_empty() {
        agent.push_str(" Terraform/");
        agent.push_str(terraform_version);
    }
    agent
}

impl<'a> ProviderConfig<'a> {
    /// Resolve the provider block, falling back on the process environment
    pub fn resolve(&self, terraform_version: &str) -> Result<ClientConfig, ConfigError> {
        self.resolve_with(terraform_version, |name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(&self, terraform_version: &str, env: F) -> Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |value: &ValueString<'a>, names: &[&str]| {
            non_empty(value.as_deref_option()).or_else(|| {
                names
                    .iter()
                    .find_map(|name| env(name).filter(|value| !value.is_empty()))
            })
        };

        let access_token = lookup(&self.access_token, ACCESS_TOKEN_ENVS)
            .ok_or(ConfigError::MissingField("access_token"))?;

        let user_project_override = match self.user_project_override.as_ref_option() {
            Some(enabled) => *enabled,
            None => USER_PROJECT_OVERRIDE_ENVS
                .iter()
                .find_map(|name| env(name))
                .map_or(false, |value| matches!(value.as_str(), "1" | "true" | "TRUE" | "True")),
        };

        let base_path = match lookup(&self.backup_dr_custom_endpoint, ENDPOINT_ENVS) {
            Some(endpoint) => normalize_base_path(&endpoint)?,
            None => DEFAULT_BASE_PATH.to_owned(),
        };

        Ok(ClientConfig {
            project: lookup(&self.project, PROJECT_ENVS),
            region: lookup(&self.region, REGION_ENVS),
            zone: lookup(&self.zone, ZONE_ENVS),
            billing_project: lookup(&self.billing_project, BILLING_PROJECT_ENVS),
            user_project_override,
            access_token: Some(access_token),
            backup_dr_base_path: base_path,
            user_agent: user_agent(terraform_version),
        })
    }

    /// Check the custom endpoint, when known, is an absolute URL
    pub fn validate_endpoint(&self) -> Result<(), ConfigError> {
        match non_empty(self.backup_dr_custom_endpoint.as_deref_option()) {
            Some(endpoint) => normalize_base_path(&endpoint).map(|_| ()),
            None => Ok(()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_owned)
}

/// Check the endpoint is an absolute URL, and make it end with a `/`
fn normalize_base_path(endpoint: &str) -> Result<String, ConfigError> {
    Url::parse(endpoint).map_err(|err| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        detail: err.to_string(),
    })?;
    if endpoint.ends_with('/') {
        Ok(endpoint.to_owned())
    } else {
        Ok(format!("{endpoint}/"))
    }
}

/// Last component of a self link, or the value itself
fn resource_name_from_self_link(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

/// Project of a data source: its own `project`, or the provider's
pub fn get_project(project: Option<&str>, config: &ClientConfig) -> Result<String, ConfigError> {
    non_empty(project)
        .or_else(|| config.project.clone())
        .ok_or(ConfigError::MissingProject)
}

/// Location of a data source: its own `location`, or the provider's region, or the provider's zone
pub fn get_location(location: Option<&str>, config: &ClientConfig) -> Result<String, ConfigError> {
    if let Some(location) = location.filter(|location| !location.is_empty()) {
        return non_empty(Some(resource_name_from_self_link(location)))
            .ok_or_else(|| ConfigError::MalformedLocation(location.to_owned()));
    }
    config
        .region
        .as_deref()
        .and_then(|region| non_empty(Some(region)))
        .or_else(|| {
            config
                .zone
                .as_deref()
                .and_then(|zone| non_empty(Some(resource_name_from_self_link(zone))))
        })
        .ok_or(ConfigError::MissingLocation)
}

/// Project to bill the request to, if it must be sent
pub fn get_billing_project(project: &str, config: &ClientConfig) -> Option<String> {
    if !config.user_project_override {
        return None;
    }
    Some(
        config
            .billing_project
            .clone()
            .unwrap_or_else(|| project.to_owned()),
    )
}

/// Substitute every `{{name}}` of `template` with its value in `vars`
pub fn replace_vars(template: &str, vars: &[(&str, &str)]) -> Result<String, ConfigError> {
    let mut url = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        url.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| ConfigError::Template {
            template: template.to_owned(),
            detail: "unterminated `{{`".to_owned(),
        })?;
        let name = &after[..end];
        let value = vars
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(*value))
            .ok_or_else(|| ConfigError::Template {
                template: template.to_owned(),
                detail: format!("no value for `{name}`"),
            })?;
        url.push_str(value);
        rest = &after[end + 2..];
    }
    url.push_str(rest);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tf_provider::value::Value;

    use super::*;

    fn client(region: Option<&str>, zone: Option<&str>) -> ClientConfig {
        ClientConfig {
            project: Some("provider-project".into()),
            region: region.map(Into::into),
            zone: zone.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn location_precedence() {
        let config = client(Some("europe-west1"), Some("europe-west1-b"));
        assert_eq!(
            get_location(Some("us-central1"), &config).unwrap(),
            "us-central1"
        );
        assert_eq!(
            get_location(Some("projects/p/locations/asia-east1"), &config).unwrap(),
            "asia-east1"
        );
        assert_eq!(get_location(None, &config).unwrap(), "europe-west1");
        assert_eq!(get_location(Some(""), &config).unwrap(), "europe-west1");
        assert_eq!(
            get_location(None, &client(None, Some("zones/europe-west1-b"))).unwrap(),
            "europe-west1-b"
        );
        assert_eq!(
            get_location(None, &client(None, None)),
            Err(ConfigError::MissingLocation)
        );
    }

    #[test]
    fn location_self_link_must_name_a_location() {
        let config = client(Some("europe-west1"), None);
        let err = get_location(Some("projects/p/locations/"), &config).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MalformedLocation("projects/p/locations/".into())
        );
        assert_eq!(err.attribute_path(), tf_provider::AttributePath::new("location"));
    }

    #[test]
    fn project_precedence() {
        let config = client(None, None);
        assert_eq!(get_project(Some("mine"), &config).unwrap(), "mine");
        assert_eq!(get_project(None, &config).unwrap(), "provider-project");
        assert_eq!(
            get_project(None, &ClientConfig::default()),
            Err(ConfigError::MissingProject)
        );
    }

    #[test]
    fn billing_project_only_with_override() {
        let mut config = client(None, None);
        assert_eq!(get_billing_project("p", &config), None);
        config.user_project_override = true;
        assert_eq!(get_billing_project("p", &config).as_deref(), Some("p"));
        config.billing_project = Some("billing".into());
        assert_eq!(get_billing_project("p", &config).as_deref(), Some("billing"));
    }

    #[test]
    fn replace_vars_substitutes_every_placeholder() {
        let url = replace_vars(
            "{{BackupDRBasePath}}projects/{{project}}/locations/{{location}}",
            &[
                ("BackupDRBasePath", DEFAULT_BASE_PATH),
                ("project", "p"),
                ("location", "us-central1"),
            ],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://backupdr.googleapis.com/v1/projects/p/locations/us-central1"
        );

        assert!(matches!(
            replace_vars("{{missing}}", &[]),
            Err(ConfigError::Template { .. })
        ));
        assert!(matches!(
            replace_vars("a/{{broken", &[("broken", "x")]),
            Err(ConfigError::Template { .. })
        ));
    }

    #[test]
    fn resolve_falls_back_on_environment() {
        let env: HashMap<&str, &str> = [
            ("GOOGLE_CLOUD_PROJECT", "env-project"),
            ("GOOGLE_REGION", "us-east1"),
            ("GOOGLE_OAUTH_ACCESS_TOKEN", "env-token"),
            ("USER_PROJECT_OVERRIDE", "true"),
        ]
        .into_iter()
        .collect();
        let lookup = |name: &str| env.get(name).map(|value| value.to_string());

        let config = ProviderConfig {
            region: Value::Value("europe-west4".into()),
            backup_dr_custom_endpoint: Value::Value("http://localhost:8080/v1".into()),
            ..Default::default()
        }
        .resolve_with("1.9.0", lookup)
        .unwrap();

        assert_eq!(config.project.as_deref(), Some("env-project"));
        assert_eq!(config.region.as_deref(), Some("europe-west4"));
        assert_eq!(config.zone, None);
        assert_eq!(config.access_token.as_deref(), Some("env-token"));
        assert!(config.user_project_override);
        assert_eq!(config.backup_dr_base_path, "http://localhost:8080/v1/");
        assert!(config.user_agent.ends_with(" Terraform/1.9.0"));
    }

    #[test]
    fn resolve_requires_a_token() {
        let err = ProviderConfig::default()
            .resolve_with("", |_| None)
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingField("access_token"));
    }

    #[test]
    fn resolve_rejects_relative_endpoints() {
        let config = ProviderConfig {
            access_token: Value::Value("token".into()),
            backup_dr_custom_endpoint: Value::Value("backupdr/v1".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve_with("", |_| None),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
