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

use super::SchemaNode;

const GCP_BACKUP_CONFIG: &[SchemaNode] = &[
    SchemaNode::string("backup_plan", "backupPlan", "The name of the backup plan."),
    SchemaNode::string(
        "backup_plan_description",
        "backupPlanDescription",
        "The description of the backup plan.",
    ),
    SchemaNode::string(
        "backup_plan_association",
        "backupPlanAssociation",
        "The name of the backup plan association.",
    ),
    SchemaNode::string_list(
        "backup_plan_rules",
        "backupPlanRules",
        "The names of the backup plan rules which point to this backupvault.",
    ),
];

const BACKUP_APPLIANCE_BACKUP_CONFIG: &[SchemaNode] = &[
    SchemaNode::string(
        "backup_appliance_name",
        "backupApplianceName",
        "The name of the backup appliance.",
    ),
    SchemaNode::string(
        "backup_appliance_id",
        "backupApplianceId",
        "The ID of the backup appliance.",
    ),
    SchemaNode::string("sla_id", "slaId", "The ID of the SLA of this application."),
    SchemaNode::string(
        "application_name",
        "applicationName",
        "The name of the application.",
    ),
    SchemaNode::string(
        "host_name",
        "hostName",
        "The name of the host where the application is running.",
    ),
    SchemaNode::string(
        "slt_name",
        "sltName",
        "The name of the SLT associated with the application.",
    ),
    SchemaNode::string(
        "slp_name",
        "slpName",
        "The name of the SLP associated with the application.",
    ),
];

const BACKUP_CONFIG_INFO: &[SchemaNode] = &[
    SchemaNode::string(
        "last_backup_state",
        "lastBackupState",
        "Whether the last backup was not yet started, successful, failed, or could not be run because of the lack of permissions.",
    ),
    SchemaNode::string(
        "last_successful_backup_consistency_time",
        "lastSuccessfulBackupConsistencyTime",
        "If the last backup were successful, this field has the consistency date.",
    ),
    SchemaNode::map(
        "last_backup_error",
        "lastBackupError",
        "If the last backup failed, this field has the error message.",
    ),
    SchemaNode::record(
        "gcp_backup_config",
        "gcpBackupConfig",
        GCP_BACKUP_CONFIG,
        "Configuration for a Google Cloud resource.",
    ),
    SchemaNode::record(
        "backup_appliance_backup_config",
        "backupApplianceBackupConfig",
        BACKUP_APPLIANCE_BACKUP_CONFIG,
        "Configuration for an application backed up by a Backup Appliance.",
    ),
];

const COMPUTE_INSTANCE_DATA_SOURCE_PROPERTIES: &[SchemaNode] = &[
    SchemaNode::string(
        "name",
        "name",
        "Name of the compute instance backed up by the datasource.",
    ),
    SchemaNode::string(
        "description",
        "description",
        "The description of the Compute Engine instance.",
    ),
    SchemaNode::string(
        "machine_type",
        "machineType",
        "The machine type of the instance.",
    ),
    SchemaNode::string(
        "total_disk_count",
        "totalDiskCount",
        "The total number of disks attached to the Instance.",
    ),
    SchemaNode::string(
        "total_disk_size_gb",
        "totalDiskSizeGb",
        "The sum of all the disk sizes.",
    ),
];

const DATA_SOURCE_GCP_RESOURCE: &[SchemaNode] = &[
    SchemaNode::string(
        "gcp_resourcename",
        "gcpResourcename",
        "Full resource pathname URL of the source Google Cloud resource.",
    ),
    SchemaNode::string(
        "location",
        "location",
        "Location of the resource: <region>/<zone>/\"global\"/\"unspecified\".",
    ),
    SchemaNode::string(
        "type",
        "type",
        "The type of the Google Cloud resource, as a Unified Resource Type (eg. compute.googleapis.com/Instance).",
    ),
    // the API spells "Datasource" in one word here
    SchemaNode::record(
        "compute_instance_data_source_properties",
        "computeInstanceDatasourceProperties",
        COMPUTE_INSTANCE_DATA_SOURCE_PROPERTIES,
        "Subset of the Compute Instance properties that are useful at the Datasource level.",
    ),
];

const DATA_SOURCE_BACKUP_APPLIANCE_APPLICATION: &[SchemaNode] = &[
    SchemaNode::string(
        "application_name",
        "applicationName",
        "The name of the Application as known to the Backup Appliance.",
    ),
    SchemaNode::string("backup_appliance", "backupAppliance", "Appliance name."),
    SchemaNode::string(
        "appliance_id",
        "applianceId",
        "Appliance Id of the Backup Appliance.",
    ),
    SchemaNode::string("type", "type", "The type of the application. e.g. VMBackup"),
    SchemaNode::string(
        "application_id",
        "applicationId",
        "The appid field of the application within the Backup Appliance.",
    ),
    SchemaNode::string(
        "hostname",
        "hostname",
        "Hostname of the host where the application is running.",
    ),
    SchemaNode::string("host_id", "hostId", "Hostid of the application host."),
];

/// Attributes read from a `DataSource` resource of the Backup and DR API
pub const ATTRIBUTES: &[SchemaNode] = &[
    SchemaNode::string(
        "name",
        "name",
        "Name of the datasource, in the format \"projects/{project}/locations/{location}/backupVaults/{backupvault}/dataSources/{datasource}\".",
    ),
    SchemaNode::string("state", "state", "The DataSource resource instance state."),
    SchemaNode::map(
        "labels",
        "labels",
        "Resource labels to represent user provided metadata.",
    ),
    SchemaNode::string(
        "create_time",
        "createTime",
        "The time when the instance was created.",
    ),
    SchemaNode::string(
        "update_time",
        "updateTime",
        "The time when the instance was updated.",
    ),
    SchemaNode::string(
        "backup_count",
        "backupCount",
        "Number of backups in the data source.",
    ),
    SchemaNode::string(
        "etag",
        "etag",
        "Server specified ETag to prevent simultaneous updates from overwriting each other.",
    ),
    SchemaNode::string(
        "total_stored_bytes",
        "totalStoredBytes",
        "The number of bytes (metadata and data) stored in this datasource.",
    ),
    SchemaNode::string(
        "config_state",
        "configState",
        "The backup configuration state.",
    ),
    SchemaNode::record(
        "backup_config_info",
        "backupConfigInfo",
        BACKUP_CONFIG_INFO,
        "Details of how the resource is configured for backup.",
    ),
    SchemaNode::record(
        "data_source_gcp_resource",
        "dataSourceGcpResource",
        DATA_SOURCE_GCP_RESOURCE,
        "The backed up resource is a Google Cloud resource.",
    ),
    SchemaNode::record(
        "data_source_backup_appliance_application",
        "dataSourceBackupApplianceApplication",
        DATA_SOURCE_BACKUP_APPLIANCE_APPLICATION,
        "The backed up resource is a backup appliance application.",
    ),
];

/// Root of the attribute tree, as a record whose fields are [`ATTRIBUTES`]
pub const DATA_SOURCE: SchemaNode = SchemaNode::record(
    "data_source",
    "dataSource",
    ATTRIBUTES,
    "A Backup and DR data source.",
);
