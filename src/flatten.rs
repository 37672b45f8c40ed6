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

//! Conversion between API payloads and attribute trees
//!
//! Flattening never fails: absent or null fields produce the zero value of their
//! kind, and nested objects become lists of zero or one record.
//! Values whose shape does not match the schema are passed through untouched,
//! and are rejected later on when assigned to the state.

use serde_json::{Map, Value as Json};

use crate::attribute::{AttributeMap, AttributeValue};
use crate::schema::{SchemaKind, SchemaNode};

/// Flatten `raw` according to the shape described by `node`
pub fn flatten(raw: Option<&Json>, node: &SchemaNode) -> AttributeValue {
    match node.kind {
        SchemaKind::String => flatten_scalar(raw),
        SchemaKind::StringMap => flatten_map(raw),
        SchemaKind::StringList => flatten_scalar_list(raw),
        SchemaKind::Record(children) => flatten_record(raw, children),
        SchemaKind::RecordList(children) => flatten_record_list(raw, children),
    }
}

pub fn flatten_scalar(raw: Option<&Json>) -> AttributeValue {
    match raw {
        None | Some(Json::Null) => AttributeValue::String(String::new()),
        Some(value) => value.into(),
    }
}

pub fn flatten_map(raw: Option<&Json>) -> AttributeValue {
    match raw {
        None | Some(Json::Null) => AttributeValue::Map(Default::default()),
        Some(value) => value.into(),
    }
}

pub fn flatten_scalar_list(raw: Option<&Json>) -> AttributeValue {
    match raw {
        None | Some(Json::Null) => AttributeValue::List(Vec::new()),
        Some(value) => value.into(),
    }
}

pub fn flatten_record(raw: Option<&Json>, children: &[SchemaNode]) -> AttributeValue {
    match raw {
        None | Some(Json::Null) => AttributeValue::List(Vec::new()),
        Some(Json::Object(fields)) if fields.is_empty() => AttributeValue::List(Vec::new()),
        Some(Json::Object(fields)) => {
            AttributeValue::List(vec![AttributeValue::Map(flatten_object(fields, children))])
        }
        Some(value) => value.into(),
    }
}

pub fn flatten_record_list(raw: Option<&Json>, children: &[SchemaNode]) -> AttributeValue {
    match raw {
        None | Some(Json::Null) => AttributeValue::List(Vec::new()),
        Some(Json::Array(items)) => AttributeValue::List(
            items
                .iter()
                .map(|item| match item {
                    Json::Object(fields) => AttributeValue::Map(flatten_object(fields, children)),
                    Json::Null => AttributeValue::Map(flatten_object(&Map::new(), children)),
                    value => value.into(),
                })
                .collect(),
        ),
        Some(value) => value.into(),
    }
}

/// Flatten every field declared in `children`, renaming them to their Terraform names
pub fn flatten_object(fields: &Map<String, Json>, children: &[SchemaNode]) -> AttributeMap {
    children
        .iter()
        .map(|child| (child.name.to_owned(), flatten(fields.get(child.api_name), child)))
        .collect()
}

/// Rebuild the API payload of a flattened attribute
///
/// Zero values are kept, so that flattening the result yields `value` back.
pub fn expand(value: &AttributeValue, node: &SchemaNode) -> Json {
    match (node.kind, value) {
        (SchemaKind::Record(children), AttributeValue::List(items)) => match items.first() {
            Some(AttributeValue::Map(fields)) => Json::Object(expand_object(fields, children)),
            Some(item) => item.into(),
            None => Json::Null,
        },
        (SchemaKind::RecordList(children), AttributeValue::List(items)) => Json::Array(
            items
                .iter()
                .map(|item| match item {
                    AttributeValue::Map(fields) => Json::Object(expand_object(fields, children)),
                    item => item.into(),
                })
                .collect(),
        ),
        (_, value) => value.into(),
    }
}

/// Rebuild the API payload of a flattened object, renaming fields to their API names
pub fn expand_object(fields: &AttributeMap, children: &[SchemaNode]) -> Map<String, Json> {
    children
        .iter()
        .filter_map(|child| {
            let value = fields.get(child.name)?;
            Some((child.api_name.to_owned(), expand(value, child)))
        })
        .collect()
}
