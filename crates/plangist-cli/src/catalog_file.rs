//! YAML catalog files for decoding gists outside a live database.
//!
//! ```yaml
//! schemas:
//!   - { id: 29, name: public }
//! tables:
//!   - id: 53
//!     name: orders
//!     indexes:
//!       - { id: 1, name: orders_pkey }
//! ```

use std::fs;
use std::path::Path;

use plangist_core::prelude::*;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogFile {
    pub schemas: Vec<SchemaDesc>,
    pub tables: Vec<TableDesc>,
}

impl CatalogFile {
    pub fn parse(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("reading catalog {}: {}", path.display(), e))?;
        Ok(Self::parse(&text)?)
    }

    /// Build the catalog, rejecting ids that appear twice.
    pub fn into_catalog(self) -> Result<MemoryCatalog> {
        let mut catalog = MemoryCatalog::new();
        for schema in self.schemas {
            if catalog.resolve_schema_by_id(schema.id).is_some() {
                return Err(Error::Catalog(format!("duplicate schema {}", schema.id)));
            }
            catalog.insert_schema(schema);
        }
        for table in self.tables {
            if catalog.resolve_table_by_id(table.id).is_some() {
                return Err(Error::Catalog(format!("duplicate table {}", table.id)));
            }
            catalog.insert_table(table);
        }
        Ok(catalog)
    }
}
