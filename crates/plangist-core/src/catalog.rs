//! Catalog descriptors and the resolution trait used when decoding gists.
//!
//! A gist stores only numeric ids for the tables, indexes, and schemas a plan
//! touches. Turning those ids back into names needs a catalog, and the catalog
//! a gist is decoded against may be older or newer than the one it was
//! encoded with. Resolution is therefore lookup-only: a missing id yields
//! `None`, never an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::StableId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDesc {
    pub id: StableId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDesc {
    pub id: StableId,
    pub name: String,
}

/// A table-like data source (tables, views, and sequences all use this).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDesc {
    pub id: StableId,
    pub name: String,
    #[serde(default)]
    pub indexes: Vec<IndexDesc>,
}

/// Shared handle to a resolved table.
pub type TableRef = Arc<TableDesc>;

impl TableDesc {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: StableId::new(id),
            name: name.into(),
            indexes: vec![],
        }
    }

    pub fn with_index(mut self, id: u64, name: impl Into<String>) -> Self {
        self.indexes.push(IndexDesc {
            id: StableId::new(id),
            name: name.into(),
        });
        self
    }

    pub fn index_by_id(&self, id: StableId) -> Option<&IndexDesc> {
        self.indexes.iter().find(|idx| idx.id == id)
    }

    pub fn index_by_name(&self, name: &str) -> Option<&IndexDesc> {
        self.indexes.iter().find(|idx| idx.name == name)
    }
}

/// Read-only view of catalog metadata needed by the gist decoder.
pub trait Catalog {
    /// Look up a table (or other table-like data source) by id.
    fn resolve_table_by_id(&self, id: StableId) -> Option<TableRef>;

    /// Look up an index of `table` by id.
    fn resolve_index_by_id(&self, table: &TableDesc, id: StableId) -> Option<IndexDesc> {
        table.index_by_id(id).cloned()
    }

    /// Look up a schema by id. Catalogs without schema metadata keep the default.
    fn resolve_schema_by_id(&self, _id: StableId) -> Option<SchemaDesc> {
        None
    }
}

/// Simple in-memory catalog, used by tooling and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: BTreeMap<StableId, TableRef>,
    schemas: BTreeMap<StableId, SchemaDesc>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableDesc) -> Self {
        self.insert_table(table);
        self
    }

    pub fn with_schema(mut self, id: u64, name: impl Into<String>) -> Self {
        self.insert_schema(SchemaDesc {
            id: StableId::new(id),
            name: name.into(),
        });
        self
    }

    /// Insert or replace a table, returning its shared handle.
    pub fn insert_table(&mut self, table: TableDesc) -> TableRef {
        let table = Arc::new(table);
        self.tables.insert(table.id, Arc::clone(&table));
        table
    }

    pub fn insert_schema(&mut self, schema: SchemaDesc) {
        self.schemas.insert(schema.id, schema);
    }

    /// Drop a table, as if it had been removed after a gist was recorded.
    pub fn remove_table(&mut self, id: StableId) -> Option<TableRef> {
        self.tables.remove(&id)
    }

    pub fn table_by_name(&self, name: &str) -> Option<TableRef> {
        self.tables.values().find(|t| t.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn resolve_table_by_id(&self, id: StableId) -> Option<TableRef> {
        self.tables.get(&id).cloned()
    }

    fn resolve_schema_by_id(&self, id: StableId) -> Option<SchemaDesc> {
        self.schemas.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_table(TableDesc::new(53, "orders").with_index(1, "orders_pkey"))
            .with_schema(29, "public")
    }

    #[test]
    fn resolves_known_ids() {
        let cat = catalog();
        let orders = cat.resolve_table_by_id(StableId::new(53)).unwrap();
        assert_eq!(orders.name, "orders");
        let pkey = cat.resolve_index_by_id(&orders, StableId::new(1)).unwrap();
        assert_eq!(pkey.name, "orders_pkey");
        assert_eq!(
            cat.resolve_schema_by_id(StableId::new(29)).unwrap().name,
            "public"
        );
    }

    #[test]
    fn missing_ids_resolve_to_none() {
        let mut cat = catalog();
        let orders = cat.resolve_table_by_id(StableId::new(53)).unwrap();
        assert!(cat.resolve_index_by_id(&orders, StableId::new(9)).is_none());
        assert!(cat.resolve_schema_by_id(StableId::new(1)).is_none());

        cat.remove_table(StableId::new(53));
        assert!(cat.resolve_table_by_id(StableId::new(53)).is_none());
        assert!(cat.is_empty());
    }

    #[test]
    fn catalog_files_deserialize_without_indexes() {
        let t: TableDesc = serde_json::from_str(r#"{"id": 7, "name": "t"}"#).unwrap();
        assert_eq!(t, TableDesc::new(7, "t"));
    }
}
