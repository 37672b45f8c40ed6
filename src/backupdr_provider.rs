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

use std::collections::HashMap;

use async_trait::async_trait;

use tf_provider::schema::Schema;
use tf_provider::value::ValueEmpty;
use tf_provider::{map, Diagnostics, DynamicDataSource, Provider};
use tracing::{debug, info};

use crate::config::{ProviderConfig, SharedConfig};
use crate::data_source::BackupDrDataSource;
use crate::utils::WithSchema;

#[derive(Debug, Default, Clone)]
pub struct BackupDrProvider {
    config: SharedConfig,
}

#[async_trait]
impl Provider for BackupDrProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProviderConfig::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        if let Err(err) = config.validate_endpoint() {
            diags.error_short(err.to_string(), err.attribute_path());
            return None;
        }
        Some(())
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        match config.resolve(&terraform_version) {
            Ok(resolved) => {
                info!(
                    project = resolved.project.as_deref(),
                    region = resolved.region.as_deref(),
                    endpoint = %resolved.backup_dr_base_path,
                    "provider configured"
                );
                *self.config.write().await = resolved;
                Some(())
            }
            Err(err) => {
                diags.error_short(err.to_string(), err.attribute_path());
                None
            }
        }
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        debug!("registering data sources");
        Some(map! {
            "backup_dr_data_source" => BackupDrDataSource::new(self.config.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;
    use tf_provider::AttributePath;

    use super::*;

    #[tokio::test]
    async fn configure_shares_the_config_with_data_sources() {
        let provider = BackupDrProvider::default();
        let data_sources = provider
            .get_data_sources(&mut Diagnostics::default())
            .unwrap();
        assert!(data_sources.contains_key("backup_dr_data_source"));

        let mut diags = Diagnostics::default();
        let config = ProviderConfig {
            project: Value::Value("p".into()),
            access_token: Value::Value("token".into()),
            backup_dr_custom_endpoint: Value::Value("http://localhost:9000/v1".into()),
            ..Default::default()
        };
        provider
            .configure(&mut diags, "1.9.0".into(), config)
            .await
            .unwrap();

        assert!(diags.errors.is_empty());
        let shared = provider.config.read().await;
        assert_eq!(shared.project.as_deref(), Some("p"));
        assert_eq!(shared.backup_dr_base_path, "http://localhost:9000/v1/");
    }

    #[tokio::test]
    async fn invalid_endpoint_is_reported_on_its_attribute() {
        let provider = BackupDrProvider::default();
        let config = ProviderConfig {
            backup_dr_custom_endpoint: Value::Value("not a url".into()),
            ..Default::default()
        };

        let mut diags = Diagnostics::default();
        assert!(provider.validate(&mut diags, config).await.is_none());
        assert_eq!(
            diags.errors[0].attribute,
            AttributePath::new("backup_dr_custom_endpoint")
        );
    }
}
