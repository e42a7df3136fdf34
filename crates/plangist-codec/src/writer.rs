//! Byte sink that feeds the gist buffer and its hash together.
//!
//! Every primitive goes through `write`, which appends to the buffer and folds
//! the same bytes into the FNV accumulator. `encode_data_source` is the one
//! exception: the buffer gets the numeric id, the hash gets the object's name.
//! That keeps the buffer exactly reproducible while making the hash stable
//! across databases whose objects have different ids.

use plangist_core::catalog::{IndexDesc, SchemaDesc, TableDesc};
use plangist_core::hash::Fnv64;
use plangist_core::id::StableId;
use plangist_core::varint::{append_varint, put_varint, MAX_VARINT_LEN};
use plangist_operators::args::{ColumnOrdering, WireEnum};
use plangist_operators::Operator;

#[derive(Debug, Clone, Default)]
pub struct GistWriter {
    buf: Vec<u8>,
    hash: Fnv64,
}

impl GistWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes to both the buffer and the hash.
    pub fn write(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
        self.hash.add_bytes(data);
    }

    pub fn encode_int(&mut self, v: i64) {
        let mut tmp = [0u8; MAX_VARINT_LEN];
        let n = put_varint(&mut tmp, v);
        self.write(&tmp[..n]);
    }

    /// Length of a count-only list.
    pub fn encode_count(&mut self, n: usize) {
        self.encode_int(i64::try_from(n).unwrap_or(i64::MAX));
    }

    pub fn encode_byte(&mut self, b: u8) {
        self.write(&[b]);
    }

    pub fn encode_bool(&mut self, b: bool) {
        self.encode_byte(u8::from(b));
    }

    pub fn encode_operator(&mut self, op: Operator) {
        self.encode_byte(op.code());
    }

    pub fn encode_enum<E: WireEnum>(&mut self, e: E) {
        self.encode_byte(e.code());
    }

    /// Ids that are hashed like any other integer (schemas).
    pub fn encode_id(&mut self, id: StableId) {
        self.encode_int(id.to_wire());
    }

    /// Id into the buffer, name into the hash.
    pub fn encode_data_source(&mut self, id: StableId, name: &str) {
        append_varint(&mut self.buf, id.to_wire());
        self.hash.add_bytes(name.as_bytes());
    }

    /// A missing table is recorded as id 0 with nothing hashed.
    pub fn encode_table(&mut self, table: Option<&TableDesc>) {
        match table {
            Some(t) => self.encode_data_source(t.id, &t.name),
            None => self.encode_data_source(StableId::new(0), ""),
        }
    }

    pub fn encode_index(&mut self, index: Option<&IndexDesc>) {
        match index {
            Some(i) => self.encode_data_source(i.id, &i.name),
            None => self.encode_data_source(StableId::new(0), ""),
        }
    }

    pub fn encode_schema(&mut self, schema: Option<&SchemaDesc>) {
        self.encode_id(schema.map_or(StableId::new(0), |s| s.id));
    }

    // TODO: record orderings once decoded plans need to display them; doing so
    // changes the layout of every operator with an ordering and needs a
    // version bump.
    pub fn encode_column_ordering(&mut self, _ordering: &ColumnOrdering) {}

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn hash(&self) -> u64 {
        self.hash.sum()
    }
}
