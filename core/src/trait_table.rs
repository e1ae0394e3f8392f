//! CSV-backed trait table.
//!
//! Row 0 is the header: the first cell names the asset filename column and
//! is discarded; the remaining cells are the trait-type names, in an order
//! that is significant (values pair with types positionally). Every data
//! row carries the source asset filename followed by one value per trait
//! type.
//!
//! The reader runs in flexible mode, so ragged data rows are accepted;
//! attribute lists are built by zipping and silently truncate to the
//! shorter side. That quirk is inherited from the table format and is
//! deliberately left in place.

use std::path::Path;

use serde::Serialize;

use crate::error::{GenerateError, Result};

/// One `{trait_type, value}` pair of an item's metadata `attributes` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// One data row: a source asset filename plus its trait values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitRow {
    pub asset: String,
    pub values: Vec<String>,
}

/// The parsed trait table: ordered trait-type names plus all data rows.
#[derive(Debug, Clone)]
pub struct TraitTable {
    pub trait_types: Vec<String>,
    pub rows: Vec<TraitRow>,
}

impl TraitTable {
    /// Load a trait table from a CSV file.
    ///
    /// Headers are handled manually (the first header cell is discarded),
    /// so the underlying reader is configured without header processing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GenerateError::CsvMissing {
                path: path.to_path_buf(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| GenerateError::CsvParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record.map_err(|e| GenerateError::CsvParse {
                path: path.to_path_buf(),
                source: e,
            })?,
            None => {
                return Err(GenerateError::CsvEmpty {
                    path: path.to_path_buf(),
                });
            }
        };

        // Skip the asset filename column; the rest are trait-type names.
        let trait_types: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(|e| GenerateError::CsvParse {
                path: path.to_path_buf(),
                source: e,
            })?;
            let mut fields = record.iter();
            let asset = fields.next().unwrap_or_default().to_string();
            rows.push(TraitRow {
                asset,
                values: fields.map(str::to_string).collect(),
            });
        }

        if rows.is_empty() {
            return Err(GenerateError::CsvEmpty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { trait_types, rows })
    }

    /// Zip the header's trait-type names with one row's values, in header
    /// order. Truncates to the shorter side for ragged rows.
    pub fn attributes(&self, row: &TraitRow) -> Vec<Attribute> {
        self.trait_types
            .iter()
            .zip(&row.values)
            .map(|(trait_type, value)| Attribute {
                trait_type: trait_type.clone(),
                value: value.clone(),
            })
            .collect()
    }
}
