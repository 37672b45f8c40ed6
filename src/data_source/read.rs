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

use serde_json::{Map, Value as Json};
use tf_provider::value::Value;
use tf_provider::AttributePath;
use tracing::{debug, info, trace};

use crate::assign::conform;
use crate::attribute::AttributeMap;
use crate::config::{get_billing_project, get_location, get_project, replace_vars, ClientConfig};
use crate::error::{AssignError, ConfigError, ReadError};
use crate::flatten::{expand_object, flatten};
use crate::schema::backup_dr_data_source::{ATTRIBUTES, DATA_SOURCE};
use crate::transport::Transport;

use super::state::DataSourceState;

const URL_TEMPLATE: &str = "{{BackupDRBasePath}}projects/{{project}}/locations/{{location}}/backupVaults/{{backup_vault_id}}/dataSources/{{data_source_id}}";

impl<'a> DataSourceState<'a> {
    /// Fetch the data source and replace every computed attribute with the response
    pub async fn read(
        &mut self,
        config: &ClientConfig,
        transport: &Transport,
    ) -> Result<(), ReadError> {
        let project = get_project(self.project.as_deref_option(), config)?;
        let location = get_location(self.location.as_deref_option(), config)?;
        let backup_vault_id = self
            .backup_vault_id
            .as_deref_option()
            .ok_or(ConfigError::MissingField("backup_vault_id"))?;
        let data_source_id = self
            .data_source_id
            .as_deref_option()
            .ok_or(ConfigError::MissingField("data_source_id"))?;

        let url = replace_vars(
            URL_TEMPLATE,
            &[
                ("BackupDRBasePath", config.backup_dr_base_path.as_str()),
                ("project", project.as_str()),
                ("location", location.as_str()),
                ("backup_vault_id", backup_vault_id),
                ("data_source_id", data_source_id),
            ],
        )?;
        let billing_project = get_billing_project(&project, config);

        info!(%project, %location, backup_vault_id, data_source_id, "reading data source");
        let response = transport
            .get(config, &url, billing_project.as_deref())
            .await?;

        let attributes = flatten_response(&response)?;
        let name = attributes
            .get("name")
            .and_then(|name| name.as_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AssignError::new(AttributePath::new("id"), "response has no name"))?
            .to_owned();
        debug!(%name, "data source read");
        trace!(
            state = %Json::Object(expand_object(&attributes, ATTRIBUTES)),
            "flattened response"
        );

        self.id = Value::Value(name.into());
        self.project = Value::Value(project.into());
        self.location = Value::Value(location.into());
        self.attributes = attributes;
        Ok(())
    }
}

/// Flatten and check every top-level attribute of a response
fn flatten_response(response: &Map<String, Json>) -> Result<AttributeMap, AssignError> {
    DATA_SOURCE
        .children()
        .iter()
        .map(|node| {
            let value = flatten(response.get(node.api_name), node);
            let value = conform(value, node, AttributePath::new(node.name))?;
            Ok((node.name.to_owned(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::attribute::AttributeValue;

    const NAME: &str = "projects/p/locations/us-central1/backupVaults/bv-test/dataSources/ds-test";
    const PATH: &str = "/v1/projects/p/locations/us-central1/backupVaults/bv-test/dataSources/ds-test";

    fn client(base_path: String, region: Option<&str>) -> ClientConfig {
        ClientConfig {
            project: Some("p".into()),
            region: region.map(Into::into),
            access_token: Some("token".into()),
            backup_dr_base_path: base_path,
            ..Default::default()
        }
    }

    fn state() -> DataSourceState<'static> {
        DataSourceState {
            backup_vault_id: Value::Value("bv-test".into()),
            data_source_id: Value::Value("ds-test".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn read_fills_the_state() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": NAME,
                    "state": "ACTIVE",
                    "backupCount": "3",
                    "labels": {"env": "test"},
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = client(format!("{}/v1/", server.url()), Some("us-central1"));
        let mut state = state();
        state.read(&config, &Transport::default()).await.unwrap();
        mock.assert_async().await;

        assert_eq!(state.id, Value::Value(NAME.into()));
        assert_eq!(state.project, Value::Value("p".into()));
        assert_eq!(state.location, Value::Value("us-central1".into()));
        assert_eq!(state.attributes["state"], AttributeValue::from("ACTIVE"));
        assert_eq!(state.attributes["backup_count"], AttributeValue::from("3"));
        assert_eq!(state.attributes["etag"], AttributeValue::from(""));
        assert_eq!(state.attributes["backup_config_info"], AttributeValue::List(vec![]));
        assert_eq!(
            state.attributes["labels"].get("env"),
            Some(&AttributeValue::from("test"))
        );
        assert_eq!(state.attributes.len(), ATTRIBUTES.len());
    }

    #[tokio::test]
    async fn api_errors_are_prefixed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .with_status(404)
            .with_body(r#"{"error":{"code":404,"message":"DataSource not found"}}"#)
            .create_async()
            .await;

        let config = client(format!("{}/v1/", server.url()), Some("us-central1"));
        let err = state()
            .read(&config, &Transport::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ReadError::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Error reading DataSource: googleapi: Error 404: DataSource not found"
        );
    }

    #[tokio::test]
    async fn missing_location_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let config = client(format!("{}/v1/", server.url()), None);
        let mut state = state();
        let err = state
            .read(&config, &Transport::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ReadError::Config(ConfigError::MissingLocation)));
        assert_eq!(err.attribute_path(), AttributePath::new("location"));
        assert_eq!(state.id, Value::Null);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_responses_are_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .with_status(200)
            .with_body(json!({"name": NAME, "labels": {"env": ["a", "b"]}}).to_string())
            .create_async()
            .await;

        let config = client(format!("{}/v1/", server.url()), Some("us-central1"));
        let err = state()
            .read(&config, &Transport::default())
            .await
            .unwrap_err();

        assert_eq!(err.attribute_path(), AttributePath::new("labels").key("env"));
        assert_eq!(
            err.to_string(),
            "Error reading DataSource: labels[\"env\"]: expected a string, got list"
        );
    }

    #[test]
    fn empty_response_flattens_to_zero_values() {
        let attributes = flatten_response(&Map::new()).unwrap();
        assert_eq!(attributes["name"], AttributeValue::from(""));
        assert_eq!(attributes["data_source_gcp_resource"], AttributeValue::List(vec![]));
    }
}
