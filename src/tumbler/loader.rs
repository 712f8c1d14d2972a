//! # Inventory Loader
//!
//! Reads inventory documents such as:
//!
//! ```yaml
//! key-pins:
//!   - AA-1-3
//!   - BB-2-3
//! driver-pins:
//!   - CC-1-6
//! springs:
//!   - DD-5-6
//! ```
//!
//! Each token is `NAME-SIZE-COUNT`. The loader only tokenizes; all semantic
//! checks happen in [`Inventory::build`].

use crate::error::{Result, TumblerError, ValidationError};
use crate::inventory::Inventory;
use crate::model::{Category, PartSpec};
use log::{debug, warn};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read, tokenize and validate the inventory at `path` for a lock of
/// `lock_size` chambers.
pub fn load_inventory<P: AsRef<Path>>(path: P, lock_size: usize) -> Result<Inventory> {
    let (source, parts) = read_parts(path)?;
    Ok(Inventory::build(source, parts, lock_size)?)
}

/// Like [`load_inventory`] without the capacity check.
pub fn load_unsized<P: AsRef<Path>>(path: P) -> Result<Inventory> {
    let (source, parts) = read_parts(path)?;
    Ok(Inventory::from_parts(source, parts)?)
}

fn read_parts<P: AsRef<Path>>(path: P) -> Result<(String, BTreeMap<Category, Vec<PartSpec>>)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TumblerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded inventory document {}", path.display());
    Ok((source_name(path), parse_document(&content)?))
}

/// Name used for output files: the document's file stem.
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "inventory".to_string())
}

/// Tokenize a YAML inventory document into per-category part specs.
///
/// Missing categories are left out of the map so that validation can name
/// them. A category whose value is null becomes an empty list.
pub fn parse_document(content: &str) -> Result<BTreeMap<Category, Vec<PartSpec>>> {
    let raw: BTreeMap<String, Option<Vec<Value>>> = serde_yaml::from_str(content)?;

    let mut parts = BTreeMap::new();
    for (key, items) in raw {
        let Some(category) = Category::from_key(&key) else {
            warn!("Ignoring unknown inventory section {:?}", key);
            continue;
        };

        let specs = items
            .unwrap_or_default()
            .iter()
            .map(|item| parse_item(category, item))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("{}: {} part lines", category, specs.len());
        parts.insert(category, specs);
    }
    Ok(parts)
}

fn parse_item(category: Category, item: &Value) -> std::result::Result<PartSpec, ValidationError> {
    let token = match item {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(ValidationError::MalformedPart {
                category,
                token: format!("{:?}", other),
                reason: "expected a NAME-SIZE-COUNT token".to_string(),
            })
        }
    };
    PartSpec::parse(category, &token)
}
