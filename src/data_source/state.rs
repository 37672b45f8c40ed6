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

use serde::{Deserialize, Serialize};
use tf_provider::schema::{
    Attribute, AttributeConstraint, AttributeType, Block, Description, Schema,
};
use tf_provider::value::ValueString;

use crate::attribute::AttributeMap;
use crate::schema::backup_dr_data_source::ATTRIBUTES;
use crate::schema::computed_attributes;
use crate::utils::WithSchema;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceState<'a> {
    #[serde(borrow = "'a")]
    pub id: ValueString<'a>,
    pub project: ValueString<'a>,
    pub location: ValueString<'a>,
    pub backup_vault_id: ValueString<'a>,
    pub data_source_id: ValueString<'a>,
    /// Attributes read from the API, keyed by their Terraform name
    #[serde(flatten)]
    pub attributes: AttributeMap,
}

impl<'a> WithSchema for DataSourceState<'a> {
    fn schema() -> Schema {
        let input = |description: &str, constraint: AttributeConstraint| Attribute {
            attr_type: AttributeType::String,
            description: Description::plain(description),
            constraint,
            ..Default::default()
        };

        let mut attributes = computed_attributes(ATTRIBUTES);
        attributes.extend([
            (
                "id".to_owned(),
                input(
                    "Identifier of the data source, equal to its resource name",
                    AttributeConstraint::Computed,
                ),
            ),
            (
                "project".to_owned(),
                input(
                    "Project of the backup vault; defaults to the provider project",
                    AttributeConstraint::OptionalComputed,
                ),
            ),
            (
                "location".to_owned(),
                input(
                    "Location of the backup vault; defaults to the provider region, then zone",
                    AttributeConstraint::OptionalComputed,
                ),
            ),
            (
                "backup_vault_id".to_owned(),
                input(
                    "ID of the backup vault holding the data source",
                    AttributeConstraint::Required,
                ),
            ),
            (
                "data_source_id".to_owned(),
                input("ID of the data source", AttributeConstraint::Required),
            ),
        ]);

        Schema {
            version: 1,
            block: Block {
                version: 1,
                attributes,
                description: Description::plain("Read a data source of a Backup and DR backup vault"),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_and_outputs_share_the_block() {
        let schema = DataSourceState::schema();
        let attributes = &schema.block.attributes;

        assert_eq!(attributes.len(), ATTRIBUTES.len() + 5);
        assert_eq!(
            attributes["backup_vault_id"].constraint,
            AttributeConstraint::Required
        );
        assert_eq!(
            attributes["location"].constraint,
            AttributeConstraint::OptionalComputed
        );
        assert_eq!(attributes["id"].constraint, AttributeConstraint::Computed);
        assert_eq!(
            attributes["labels"].attr_type,
            AttributeType::Map(AttributeType::String.into())
        );
        assert!(matches!(
            attributes["backup_config_info"].attr_type,
            AttributeType::AttributeList(_)
        ));
    }
}
