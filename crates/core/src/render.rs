/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Output rendering. Pure string formatting; every function returns text
 * ending in a newline, ready to be written to stdout.
 */

use serde::Serialize;

use crate::endpoint::{Endpoint, Field};
use crate::resolve::ResolvedService;

/// Gap between table columns
const COLUMN_GAP: usize = 2;

pub fn created(label: &str, name: &str, service_id: &str, version: u32) -> String {
    format!("Created {label} '{name}' (service: {service_id}, version: {version})\n")
}

/// Update confirmation; names the previous name only when the endpoint was renamed.
pub fn updated(
    label: &str,
    name: &str,
    previous: Option<&str>,
    service_id: &str,
    version: u32,
) -> String {
    match previous.filter(|p| *p != name) {
        Some(previous) => format!(
            "Updated {label} '{name}' (previously: {previous}, service: {service_id}, version: {version})\n"
        ),
        None => format!("Updated {label} '{name}' (service: {service_id}, version: {version})\n"),
    }
}

pub fn deleted(label: &str, name: &str, service_id: &str, version: u32) -> String {
    format!("Deleted {label} '{name}' (service: {service_id}, version: {version})\n")
}

pub fn autoclone_notice(from: u32, to: u32) -> String {
    format!(
        "Service version {from} is not editable, so it was automatically cloned because --autoclone is enabled. Now operating on version {to}.\n"
    )
}

/// Column-aligned plain-text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Render with every column but the last padded to its widest cell plus a gap.
    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate().take(columns) {
                if i + 1 == columns {
                    out.push_str(cell);
                } else {
                    let width = widths[i] + COLUMN_GAP;
                    out.push_str(&format!("{cell:<width$}"));
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Default `list` output: one row per endpoint, in the order given.
pub fn endpoint_table<E: Endpoint>(endpoints: &[E]) -> String {
    let mut table = Table::new(["SERVICE ID", "VERSION", "NAME"]);
    for endpoint in endpoints {
        table.push_row([
            endpoint.service_id().to_string(),
            endpoint.service_version().to_string(),
            endpoint.name().to_string(),
        ]);
    }
    table.render()
}

fn endpoint_block<E: Endpoint>(endpoint: &E) -> String {
    let mut out = String::new();
    for field in endpoint.fields() {
        out.push_str(&format!("{}: {}\n\n", field.label, field.value));
    }
    for field in endpoint.timestamps().fields() {
        out.push_str(&format!("{}: {}\n", field.label, field.value));
    }
    out
}

fn diagnostics_header(diagnostics: &[String]) -> String {
    if diagnostics.is_empty() {
        return String::new();
    }
    let mut out = diagnostics.join("\n");
    out.push_str("\n\n");
    out
}

/// `list --verbose` output: diagnostics, the service and version, then one
/// field block per endpoint separated by blank lines.
pub fn endpoint_list_verbose<E: Endpoint>(
    diagnostics: &[String],
    service: &ResolvedService,
    version: u32,
    endpoints: &[E],
) -> String {
    let mut out = diagnostics_header(diagnostics);
    out.push_str(&format!("{}\n\n", service.describe_source()));
    out.push_str(&format!("Service Version: {version}\n\n"));
    let blocks: Vec<String> = endpoints.iter().map(endpoint_block).collect();
    out.push_str(&blocks.join("\n"));
    out
}

/// `describe` output: every field, sorted by label, after a blank line.
pub fn endpoint_detail<E: Endpoint>(diagnostics: &[String], endpoint: &E) -> String {
    let mut fields = endpoint.fields();
    fields.push(Field::new("Service ID", endpoint.service_id()));
    fields.push(Field::new("Service Version", endpoint.service_version()));
    fields.extend(endpoint.timestamps().fields());
    fields.sort_by(|a, b| a.label.cmp(b.label));

    let mut out = diagnostics_header(diagnostics);
    out.push('\n');
    for field in fields {
        out.push_str(&format!("{}: {}\n", field.label, field.value));
    }
    out
}

/// Pretty JSON with a trailing newline
///
/// # Errors
///
/// Returns the serializer error for values that cannot be represented as JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
