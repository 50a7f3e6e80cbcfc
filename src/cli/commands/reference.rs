//! Reference command: print the built-in lookup tables

use crate::cli::args::{OutputFormat, ReferenceArgs, ReferenceTable};
use crate::{Error, ReferenceData, Result};
use colored::*;
use serde_json::{Value, json};

pub async fn run_reference(args: ReferenceArgs) -> Result<()> {
    let reference = ReferenceData::builtin();
    let table = render_table(&reference, &args.table);

    match args.output_format {
        OutputFormat::Human => print_human(&table),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&table.to_json()).map_err(|e| {
                Error::data_validation(format!("Failed to serialize table: {}", e))
            })?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Rows of one table, already formatted as text
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn to_json(&self) -> Value {
        let rows: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.to_string(), json!(cell)))
                    .collect();
                Value::Object(object)
            })
            .collect();
        json!({ "table": self.title, "rows": rows })
    }
}

/// Build the requested table from the reference data
pub fn render_table(reference: &ReferenceData, table: &ReferenceTable) -> Table {
    let pairs = |rows: Vec<(&str, &str)>| -> Vec<Vec<String>> {
        rows.into_iter()
            .map(|(code, name)| vec![code.to_string(), name.to_string()])
            .collect()
    };

    match table {
        ReferenceTable::Regions => Table {
            title: "regions".to_string(),
            headers: vec!["code", "name"],
            rows: pairs(reference.regions()),
        },
        ReferenceTable::Municipalities { search } => {
            let rows = match search {
                Some(pattern) => reference.find_municipalities_by_name(pattern),
                None => reference.municipalities(),
            };
            Table {
                title: "municipalities".to_string(),
                headers: vec!["code", "name"],
                rows: pairs(rows),
            }
        }
        ReferenceTable::Nodes => Table {
            title: "nodes".to_string(),
            headers: vec!["id", "name", "municipality", "latitude", "longitude"],
            rows: reference
                .nodes()
                .into_iter()
                .map(|(id, node)| {
                    vec![
                        id.to_string(),
                        node.name.clone(),
                        node.municipality.clone(),
                        node.latitude.to_string(),
                        node.longitude.to_string(),
                    ]
                })
                .collect(),
        },
        ReferenceTable::Statuses => Table {
            title: "statuses".to_string(),
            headers: vec!["code", "description"],
            rows: pairs(reference.statuses()),
        },
        ReferenceTable::Presets => Table {
            title: "presets".to_string(),
            headers: vec!["key", "codes", "description"],
            rows: reference
                .presets()
                .iter()
                .map(|preset| {
                    vec![
                        preset.key.clone(),
                        preset.codes.join(","),
                        preset.description.clone(),
                    ]
                })
                .collect(),
        },
    }
}

fn print_human(table: &Table) {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.len()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| format!("{:<width$}", header.to_uppercase(), width = width))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for row in &table.rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }

    println!("\n{} {}", table.rows.len().to_string().cyan(), table.title);
}
