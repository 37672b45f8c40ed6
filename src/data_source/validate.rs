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
use tf_provider::value::{Value, ValueString};
use tf_provider::{AttributePath, Diagnostics};

use crate::utils::WithValidate;

use super::state::DataSourceState;

#[async_trait]
impl<'a> WithValidate for DataSourceState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        validate_id(
            diags,
            &self.backup_vault_id,
            attr_path.clone().attribute("backup_vault_id"),
        );
        validate_id(
            diags,
            &self.data_source_id,
            attr_path.attribute("data_source_id"),
        );
    }
}

/// Ids are single path segments of the request URL
fn validate_id(diags: &mut Diagnostics, id: &ValueString<'_>, attr_path: AttributePath) {
    let Value::Value(id) = id else {
        return;
    };
    if id.is_empty() {
        diags.error_short("Identifier must not be empty", attr_path);
    } else if id.contains('/') {
        diags.error(
            "Invalid identifier",
            format!("`{id}` must not contain `/`"),
            attr_path,
        );
    }
}
