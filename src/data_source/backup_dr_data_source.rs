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

use async_trait::async_trait;

use tf_provider::schema::Schema;
use tf_provider::value::ValueEmpty;
use tf_provider::{AttributePath, DataSource, Diagnostics};
use tracing::error;

use crate::config::SharedConfig;
use crate::transport::Transport;
use crate::utils::{WithSchema, WithValidate};

use super::state::DataSourceState;

#[derive(Debug, Default)]
pub struct BackupDrDataSource {
    pub(super) config: SharedConfig,
    pub(super) transport: Transport,
}

impl BackupDrDataSource {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            transport: Transport::default(),
        }
    }
}

#[async_trait]
impl DataSource for BackupDrDataSource {
    type State<'a> = DataSourceState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(DataSourceState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default()).await;

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client_config = self.config.read().await.clone();

        let mut state = config;
        match state.read(&client_config, &self.transport).await {
            Ok(()) => Some(state),
            Err(err) => {
                error!("{err}");
                diags.error_short(err.to_string(), err.attribute_path());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tf_provider::value::Value;
    use tokio::sync::RwLock;

    use super::*;
    use crate::config::ClientConfig;

    fn data_source(base_path: String) -> BackupDrDataSource {
        BackupDrDataSource::new(Arc::new(RwLock::new(ClientConfig {
            project: Some("p".into()),
            region: Some("us-central1".into()),
            access_token: Some("token".into()),
            backup_dr_base_path: base_path,
            ..Default::default()
        })))
    }

    fn config() -> DataSourceState<'static> {
        DataSourceState {
            backup_vault_id: Value::Value("bv-test".into()),
            data_source_id: Value::Value("ds-test".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn read_reports_errors_as_diagnostics() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"Permission denied"}}"#)
            .create_async()
            .await;

        let mut diags = Diagnostics::default();
        let state = data_source(format!("{}/v1/", server.url()))
            .read(&mut diags, config(), Value::Null)
            .await;

        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(
            diags.errors[0].summary,
            "Error reading DataSource: googleapi: Error 403: Permission denied"
        );
        assert_eq!(diags.errors[0].attribute, AttributePath::root());
    }

    #[tokio::test]
    async fn read_returns_the_new_state() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock(
                "GET",
                "/v1/projects/p/locations/us-central1/backupVaults/bv-test/dataSources/ds-test",
            )
            .with_status(200)
            .with_body(
                json!({
                    "name": "projects/p/locations/us-central1/backupVaults/bv-test/dataSources/ds-test",
                    "backupConfigInfo": {"lastBackupState": "SUCCESSFUL"},
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut diags = Diagnostics::default();
        let state = data_source(format!("{}/v1/", server.url()))
            .read(&mut diags, config(), Value::Null)
            .await
            .unwrap();

        assert!(diags.errors.is_empty());
        assert_eq!(state.location, Value::Value("us-central1".into()));
        let info = state.attributes["backup_config_info"].get("last_backup_state");
        assert_eq!(info.and_then(|value| value.as_str()), Some("SUCCESSFUL"));
    }

    #[tokio::test]
    async fn validate_rejects_empty_ids() {
        let mut diags = Diagnostics::default();
        let state = DataSourceState {
            data_source_id: Value::Value("".into()),
            ..config()
        };
        let result = data_source(String::new()).validate(&mut diags, state).await;

        assert!(result.is_none());
        assert_eq!(diags.errors[0].attribute, AttributePath::new("data_source_id"));
    }
}
