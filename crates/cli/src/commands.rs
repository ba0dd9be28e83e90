//! Subcommand implementations.
//!
//! Each command takes its inputs as text and writes to the given writers so
//! it can be exercised without touching the process's stdio.

use std::io::{Read, Write};
use std::path::Path;

use nestwrite_core::{payload_from_str, Result};
use nestwrite_schema::{ClientConfig, EntitySchema, MutationRequest};
use nestwrite_transform::{Transformer, WriteConventions};
use serde_json::Value;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub transformer: Transformer,
    pub client: ClientConfig,
    pub compact: bool,
}

impl Settings {
    /// Read conventions and client config from one TOML file, or use defaults.
    pub fn load(config: Option<&Path>, compact: bool) -> Result<Self> {
        let (conventions, client) = match config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                (
                    WriteConventions::from_toml_str(&text)?,
                    ClientConfig::from_toml_str(&text)?,
                )
            }
            None => (WriteConventions::default(), ClientConfig::default()),
        };
        tracing::debug!(id_key = %conventions.id_key, audit_fields = conventions.audit_fields.len(), "Loaded settings");
        Ok(Self {
            transformer: Transformer::new(conventions),
            client,
            compact,
        })
    }
}

/// Read a payload from a file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => Ok(std::fs::read_to_string(p)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// `nestwrite transform`
pub fn transform(
    settings: &Settings,
    input: &str,
    report: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let payload = payload_from_str(input)?;
    let (shaped, field_report) = settings.transformer.transform_with_report(&payload);

    write_json(out, &Value::Object(shaped), settings.compact)?;
    if report {
        for entry in &field_report.fields {
            let detail = serde_json::to_string(&entry.outcome)?;
            writeln!(err, "{}: {}", entry.field, detail)?;
        }
    }
    Ok(())
}

/// `nestwrite request`
pub fn request(
    settings: &Settings,
    schema_text: &str,
    input: &str,
    out: &mut impl Write,
) -> Result<()> {
    let schema = EntitySchema::from_json_str(schema_text)?;
    schema.validate()?;

    let payload = payload_from_str(input)?;
    let missing = schema.missing_required(&payload);
    if !missing.is_empty() {
        tracing::warn!(entity = %schema.name, missing = ?missing, "Payload is missing required fields");
    }

    let request =
        MutationRequest::for_payload(&schema, &payload, &settings.client, &settings.transformer)?;
    write_json(out, &request, settings.compact)
}

/// `nestwrite check-schema`
pub fn check_schema(schema_text: &str, out: &mut impl Write) -> Result<()> {
    let schema = EntitySchema::from_json_str(schema_text)?;
    schema.validate()?;

    writeln!(out, "{} -> {}", schema.name, schema.meta.endpoint)?;
    for section in schema.form_sections() {
        let names: Vec<String> = section
            .fields
            .iter()
            .map(|f| {
                if f.is_required() {
                    format!("{}*", f.name)
                } else {
                    f.name.clone()
                }
            })
            .collect();
        writeln!(out, "section {}: {}", section.key, names.join(", "))?;
    }
    let columns: Vec<String> = schema
        .table_columns()
        .iter()
        .map(|(_, col)| format!("{} [{}]", col.header, col.accessor))
        .collect();
    writeln!(out, "columns: {}", columns.join(", "))?;
    writeln!(
        out,
        "delete: {}",
        if schema.meta.allow_delete { "allowed" } else { "denied" }
    )?;
    Ok(())
}
