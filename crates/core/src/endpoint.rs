/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * The capability set every manageable endpoint type provides to the generic
 * workflow in `workflow.rs`.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// A labeled value in a field dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// Audit timestamps carried by every endpoint record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// Present timestamps in display order: created, updated, deleted.
    pub fn fields(&self) -> Vec<Field> {
        [
            ("Created at", self.created_at),
            ("Updated at", self.updated_at),
            ("Deleted at", self.deleted_at),
        ]
        .into_iter()
        .filter_map(|(label, ts)| ts.map(|t| Field::new(label, format_timestamp(&t))))
        .collect()
    }
}

/// Render a timestamp as `2021-06-15 23:00:00 +0000 UTC`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S +0000 UTC").to_string()
}

/// An endpoint type the workflow can create, update, delete, describe and list.
///
/// Raw flag values come in as `CreateArgs`/`UpdateArgs`; the conversions to
/// `CreateFields`/`UpdateFields` are where resource-specific required flags
/// are checked. They run after the generic `--name`/`--version` checks and
/// before anything touches the network.
pub trait Endpoint: Serialize + Sized {
    /// Human-readable name used in confirmations, e.g. "New Relic logging endpoint".
    const LABEL: &'static str;

    /// Short machine name, used in API paths and event names.
    const KIND: &'static str;

    type CreateArgs;
    type CreateFields;
    type UpdateArgs;
    type UpdateFields;

    fn create_fields(args: Self::CreateArgs) -> CoreResult<Self::CreateFields>;

    fn update_fields(args: Self::UpdateArgs) -> CoreResult<Self::UpdateFields>;

    fn name(&self) -> &str;

    fn service_id(&self) -> &str;

    fn service_version(&self) -> u32;

    /// Resource fields in display order, starting with `Name`. Service ID,
    /// version and timestamps are not included.
    fn fields(&self) -> Vec<Field>;

    fn timestamps(&self) -> &Timestamps;
}
