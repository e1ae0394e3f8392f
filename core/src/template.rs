//! Metadata template loading and per-item rendering.
//!
//! The template is an arbitrary JSON object shared by every generated item.
//! Four fields are overwritten per item (`name`, `image`, `attributes`,
//! `properties.files[0].uri`); everything else passes through verbatim.
//! Each render works on a deep copy of the template, so nested structures
//! are never shared between the template and an item, or between two items.

use std::path::Path;

use serde_json::Value;

use crate::error::{GenerateError, Result};
use crate::trait_table::Attribute;

/// The base metadata object shared across all generated items.
#[derive(Debug, Clone)]
pub struct MetadataTemplate {
    value: Value,
    name: String,
}

impl MetadataTemplate {
    /// Load and validate a template from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GenerateError::TemplateMissing {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| GenerateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|e| GenerateError::TemplateParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_value(value)
    }

    /// Validate a parsed template object.
    ///
    /// Only the fields the generator reads or navigates are required: a
    /// string `name` and a non-empty `properties.files` array whose first
    /// element is an object. `image` and `attributes` are created on render
    /// if the template omits them.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| shape_error("root is not a JSON object"))?;

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| shape_error("missing string field 'name'"))?
            .to_string();

        let first_file = object
            .get("properties")
            .and_then(|p| p.get("files"))
            .and_then(|f| f.get(0));
        if !first_file.is_some_and(Value::is_object) {
            return Err(shape_error(
                "'properties.files' must be a non-empty array of objects",
            ));
        }

        Ok(Self { value, name })
    }

    /// The template's base `name`, before the ` #<n>` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the metadata object for one item.
    ///
    /// `index` is 0-based; the human-facing item number in `name` is
    /// `index + 1`. `image` is the target asset filename (`"<index>.png"`).
    pub fn render(&self, index: usize, image: &str, attributes: &[Attribute]) -> Result<Value> {
        // Value::clone is a deep copy, so mutations below never leak back
        // into the template or across items.
        let mut metadata = self.value.clone();

        let attributes =
            serde_json::to_value(attributes).map_err(|e| GenerateError::JsonSerialize {
                source: e,
            })?;

        {
            let object = metadata
                .as_object_mut()
                .ok_or_else(|| shape_error("root is not a JSON object"))?;
            object.insert(
                "name".to_string(),
                Value::String(format!("{} #{}", self.name, index + 1)),
            );
            object.insert("image".to_string(), Value::String(image.to_string()));
            object.insert("attributes".to_string(), attributes);
        }

        let first_file = metadata
            .get_mut("properties")
            .and_then(|p| p.get_mut("files"))
            .and_then(|f| f.get_mut(0))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| {
                shape_error("'properties.files' must be a non-empty array of objects")
            })?;
        first_file.insert("uri".to_string(), Value::String(image.to_string()));

        Ok(metadata)
    }
}

fn shape_error(reason: &str) -> GenerateError {
    GenerateError::TemplateShape {
        reason: reason.to_string(),
    }
}
