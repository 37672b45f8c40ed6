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

use anyhow::Result;
use tf_provider::serve;

use crate::backupdr_provider::BackupDrProvider;

mod assign;
mod attribute;
mod backupdr_provider;
mod config;
mod data_source;
mod error;
mod flatten;
mod schema;
mod transport;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    serve("google", BackupDrProvider::default()).await
}
