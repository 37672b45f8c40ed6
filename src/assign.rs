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

//! Shape check of flattened values before they are stored in the state
//!
//! Scalars are weakly typed: numbers and booleans are accepted where a string is
//! expected and stored as text.

use tf_provider::AttributePath;

use crate::attribute::{AttributeMap, AttributeValue};
use crate::error::AssignError;
use crate::schema::{SchemaKind, SchemaNode};

/// Check `value` against `node`, converting scalars to their stored type
pub fn conform(
    value: AttributeValue,
    node: &SchemaNode,
    path: AttributePath,
) -> Result<AttributeValue, AssignError> {
    match (node.kind, value) {
        (SchemaKind::String, value) => conform_string(&value, path).map(AttributeValue::String),

        (SchemaKind::StringMap, AttributeValue::Null) => Ok(AttributeValue::Map(Default::default())),
        (SchemaKind::StringMap, AttributeValue::Map(fields)) => fields
            .into_iter()
            .map(|(key, value)| {
                let text = conform_string(&value, path.clone().key(key.clone()))?;
                Ok((key, AttributeValue::String(text)))
            })
            .collect::<Result<AttributeMap, _>>()
            .map(AttributeValue::Map),

        (SchemaKind::StringList, AttributeValue::Null) => Ok(AttributeValue::List(Vec::new())),
        (SchemaKind::StringList, AttributeValue::List(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                conform_string(item, path.clone().index(i as i64)).map(AttributeValue::String)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::List),

        (SchemaKind::Record(_), AttributeValue::Null) => Ok(AttributeValue::List(Vec::new())),
        (SchemaKind::Record(_), AttributeValue::List(items)) if items.len() > 1 => Err(
            AssignError::new(path, format!("expected at most one record, got {}", items.len())),
        ),
        (SchemaKind::Record(children) | SchemaKind::RecordList(children), AttributeValue::List(items)) => {
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| conform_record(item, children, path.clone().index(i as i64)))
                .collect::<Result<Vec<_>, _>>()
                .map(AttributeValue::List)
        }
        (SchemaKind::RecordList(_), AttributeValue::Null) => Ok(AttributeValue::List(Vec::new())),

        (SchemaKind::StringMap, value) => Err(mismatch(path, "a map", &value)),
        (SchemaKind::StringList, value) => Err(mismatch(path, "a list", &value)),
        (SchemaKind::Record(_) | SchemaKind::RecordList(_), value) => {
            Err(mismatch(path, "a list of records", &value))
        }
    }
}

fn conform_string(value: &AttributeValue, path: AttributePath) -> Result<String, AssignError> {
    value
        .scalar_to_string()
        .ok_or_else(|| mismatch(path, "a string", value))
}

fn conform_record(
    value: AttributeValue,
    children: &[SchemaNode],
    path: AttributePath,
) -> Result<AttributeValue, AssignError> {
    let AttributeValue::Map(mut fields) = value else {
        return Err(mismatch(path, "a record", &value));
    };
    children
        .iter()
        .map(|child| {
            let value = fields.remove(child.name).unwrap_or_default();
            let value = conform(value, child, path.clone().attribute(child.name))?;
            Ok((child.name.to_owned(), value))
        })
        .collect::<Result<AttributeMap, _>>()
        .map(AttributeValue::Map)
}

fn mismatch(path: AttributePath, expected: &str, got: &AttributeValue) -> AssignError {
    AssignError::new(path, format!("expected {expected}, got {}", got.kind_name()))
}
