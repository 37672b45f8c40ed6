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

//! Static description of the attributes returned by the Backup and DR API.
//!
//! A [`SchemaNode`] names an attribute twice: once as Terraform sees it (`name`)
//! and once as the API returns it (`api_name`). The pairing is written by hand
//! for every node, as some API names do not follow the camelCase convention.

use std::collections::HashMap;

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Description};

pub mod backup_dr_data_source;

/// Shape of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Scalar, stored as a string
    String,
    /// Mapping of strings
    StringMap,
    /// Ordered list of strings
    StringList,
    /// Nested object, stored as a list of zero or one record
    Record(&'static [SchemaNode]),
    /// Repeated nested object
    #[allow(dead_code)]
    RecordList(&'static [SchemaNode]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaNode {
    /// Attribute name on the Terraform side
    pub name: &'static str,
    /// Field name in the API payload
    pub api_name: &'static str,
    pub kind: SchemaKind,
    pub description: &'static str,
}

impl SchemaNode {
    pub const fn string(
        name: &'static str,
        api_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            api_name,
            kind: SchemaKind::String,
            description,
        }
    }

    pub const fn map(name: &'static str, api_name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            api_name,
            kind: SchemaKind::StringMap,
            description,
        }
    }

    pub const fn string_list(
        name: &'static str,
        api_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            api_name,
            kind: SchemaKind::StringList,
            description,
        }
    }

    pub const fn record(
        name: &'static str,
        api_name: &'static str,
        children: &'static [SchemaNode],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            api_name,
            kind: SchemaKind::Record(children),
            description,
        }
    }

    #[allow(dead_code)]
    pub const fn record_list(
        name: &'static str,
        api_name: &'static str,
        children: &'static [SchemaNode],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            api_name,
            kind: SchemaKind::RecordList(children),
            description,
        }
    }

    /// Child nodes of a record kind, empty for the other kinds
    pub fn children(&self) -> &'static [SchemaNode] {
        match self.kind {
            SchemaKind::Record(children) | SchemaKind::RecordList(children) => children,
            _ => &[],
        }
    }

    /// Look up a direct child by its Terraform name
    #[cfg(test)]
    pub fn child(&self, name: &str) -> Option<&'static SchemaNode> {
        self.children().iter().find(|child| child.name == name)
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self.kind {
            SchemaKind::String => AttributeType::String,
            SchemaKind::StringMap => AttributeType::Map(AttributeType::String.into()),
            SchemaKind::StringList => AttributeType::List(AttributeType::String.into()),
            SchemaKind::Record(children) | SchemaKind::RecordList(children) => {
                AttributeType::AttributeList(computed_attributes(children))
            }
        }
    }

    /// Terraform attribute for this node; API attributes are always output only
    pub fn attribute(&self) -> Attribute {
        Attribute {
            attr_type: self.attribute_type(),
            description: Description::plain(self.description),
            constraint: AttributeConstraint::Computed,
            ..Default::default()
        }
    }
}

/// Build the Terraform attributes of a list of nodes
pub fn computed_attributes(nodes: &[SchemaNode]) -> HashMap<String, Attribute> {
    nodes
        .iter()
        .map(|node| (node.name.to_owned(), node.attribute()))
        .collect()
}
