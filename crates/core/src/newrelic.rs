/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * New Relic logging endpoints.
 */

use serde::{Deserialize, Deserializer, Serialize};

use crate::endpoint::{Endpoint, Field, Timestamps};
use crate::error::{CoreError, CoreResult};

const REGIONS: &[&str] = &["US", "EU"];
const PLACEMENTS: &[&str] = &["none", "waf_debug"];
const FORMAT_VERSIONS: &[u8] = &[1, 2];

/// A New Relic logging endpoint as stored on a service version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelic {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format_version: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub placement: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response_condition: String,
    pub service_id: String,
    #[serde(rename = "version")]
    pub service_version: u32,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw flag values for `create` and `update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRelicArgs {
    /// Insert API key (`--key`)
    pub key: Option<String>,
    pub format: Option<String>,
    pub format_version: Option<u8>,
    pub placement: Option<String>,
    pub region: Option<String>,
    pub response_condition: Option<String>,
}

/// Validated request body. Absent fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewRelicFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_condition: Option<String>,
}

impl TryFrom<NewRelicArgs> for NewRelicFields {
    type Error = CoreError;

    fn try_from(args: NewRelicArgs) -> CoreResult<Self> {
        let region = args
            .region
            .map(|r| {
                let upper = r.to_uppercase();
                if REGIONS.contains(&upper.as_str()) {
                    Ok(upper)
                } else {
                    Err(invalid("region", r, &REGIONS.join(", ")))
                }
            })
            .transpose()?;

        let placement = args
            .placement
            .map(|p| {
                if PLACEMENTS.contains(&p.as_str()) {
                    Ok(p)
                } else {
                    Err(invalid("placement", p, &PLACEMENTS.join(", ")))
                }
            })
            .transpose()?;

        if let Some(v) = args.format_version {
            if !FORMAT_VERSIONS.contains(&v) {
                return Err(invalid("format-version", v.to_string(), "1, 2"));
            }
        }

        Ok(Self {
            token: args.key,
            format: args.format,
            format_version: args.format_version,
            placement,
            region,
            response_condition: args.response_condition,
        })
    }
}

fn invalid(flag: &'static str, value: String, allowed: &str) -> CoreError {
    CoreError::InvalidFlagValue {
        flag,
        value,
        reason: format!("expected one of: {allowed}"),
    }
}

impl Endpoint for NewRelic {
    const LABEL: &'static str = "New Relic logging endpoint";
    const KIND: &'static str = "newrelic";

    type CreateArgs = NewRelicArgs;
    type CreateFields = NewRelicFields;
    type UpdateArgs = NewRelicArgs;
    type UpdateFields = NewRelicFields;

    fn create_fields(args: NewRelicArgs) -> CoreResult<NewRelicFields> {
        if args.key.as_deref().map_or(true, str::is_empty) {
            return Err(CoreError::MissingRequiredFlag("key"));
        }
        NewRelicFields::try_from(args)
    }

    fn update_fields(args: NewRelicArgs) -> CoreResult<NewRelicFields> {
        NewRelicFields::try_from(args)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn service_id(&self) -> &str {
        &self.service_id
    }

    fn service_version(&self) -> u32 {
        self.service_version
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("Name", &self.name),
            Field::new("Token", &self.token),
            Field::new("Format", &self.format),
            Field::new("Format Version", self.format_version),
            Field::new("Placement", &self.placement),
            Field::new("Region", &self.region),
            Field::new("Response Condition", &self.response_condition),
        ]
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }
}
