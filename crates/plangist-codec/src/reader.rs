//! Cursor over a decoded gist buffer; the mirror image of `GistWriter`.

use plangist_core::catalog::{Catalog, IndexDesc, SchemaDesc, TableDesc, TableRef};
use plangist_core::config::GistConfig;
use plangist_core::id::StableId;
use plangist_core::varint::read_varint;
use plangist_operators::args::{ColumnOrdering, WireEnum};
use plangist_operators::Operator;
use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::END_OF_PLAN;

pub struct GistReader<'a> {
    buf: &'a [u8],
    pos: usize,
    catalog: &'a dyn Catalog,
    max_list_len: usize,
    max_list_elems: usize,
    list_elems_left: usize,
}

impl<'a> GistReader<'a> {
    pub fn new(buf: &'a [u8], catalog: &'a dyn Catalog, config: &GistConfig) -> Self {
        Self {
            buf,
            pos: 0,
            catalog,
            max_list_len: config.max_list_len,
            max_list_elems: config.max_list_elems,
            list_elems_left: config.max_list_elems,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn decode_int(&mut self) -> Result<i64> {
        let offset = self.pos;
        match read_varint(&self.buf[offset..]) {
            Ok(Some((v, n))) => {
                self.pos += n;
                Ok(v)
            }
            Ok(None) => Err(DecodeError::UnexpectedEof { offset }),
            Err(_) => Err(DecodeError::BadVarint { offset }),
        }
    }

    /// Length of a count-only list. Each list is bounded by `max_list_len`,
    /// and every list decoded so far draws from one `max_list_elems` budget.
    pub fn decode_count(&mut self) -> Result<usize> {
        let offset = self.pos;
        let v = self.decode_int()?;
        let len = usize::try_from(v).map_err(|_| DecodeError::InvalidValue {
            what: "list length",
            value: v,
            offset,
        })?;
        if len > self.max_list_len {
            return Err(DecodeError::ListTooLong {
                len,
                limit: self.max_list_len,
                offset,
            });
        }
        self.list_elems_left = self.list_elems_left.checked_sub(len).ok_or(
            DecodeError::ListBudgetExceeded {
                limit: self.max_list_elems,
                offset,
            },
        )?;
        Ok(len)
    }

    pub fn decode_byte(&mut self) -> Result<u8> {
        let b = *self
            .buf
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    pub fn decode_bool(&mut self) -> Result<bool> {
        Ok(self.decode_byte()? != 0)
    }

    pub fn decode_enum<E: WireEnum>(&mut self) -> Result<E> {
        let offset = self.pos;
        let b = self.decode_byte()?;
        E::from_code(b).ok_or(DecodeError::InvalidValue {
            what: E::KIND,
            value: i64::from(b),
            offset,
        })
    }

    /// Next opcode, or `None` at the end-of-plan sentinel or end of input.
    pub fn decode_operator(&mut self) -> Result<Option<Operator>> {
        if self.remaining() == 0 {
            return Ok(None);
        }
        let offset = self.pos;
        let code = self.decode_byte()?;
        if code == END_OF_PLAN {
            return Ok(None);
        }
        Operator::from_u8(code)
            .map(Some)
            .ok_or(DecodeError::UnknownOperator { code, offset })
    }

    pub fn decode_id(&mut self) -> Result<StableId> {
        self.decode_int().map(StableId::from_wire)
    }

    pub fn decode_table(&mut self) -> Result<Option<TableRef>> {
        let id = self.decode_id()?;
        let table = self.catalog.resolve_table_by_id(id);
        if table.is_none() {
            debug!(%id, "plan gist references unknown table");
        }
        Ok(table)
    }

    /// The index id is consumed even when `table` could not be resolved.
    pub fn decode_index(&mut self, table: Option<&TableDesc>) -> Result<Option<IndexDesc>> {
        let id = self.decode_id()?;
        let index = table.and_then(|t| self.catalog.resolve_index_by_id(t, id));
        if index.is_none() {
            debug!(%id, "plan gist references unknown index");
        }
        Ok(index)
    }

    pub fn decode_schema(&mut self) -> Result<Option<SchemaDesc>> {
        let id = self.decode_id()?;
        let schema = self.catalog.resolve_schema_by_id(id);
        if schema.is_none() {
            debug!(%id, "plan gist references unknown schema");
        }
        Ok(schema)
    }

    pub fn decode_column_ordering(&mut self) -> ColumnOrdering {
        ColumnOrdering::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plangist_core::catalog::MemoryCatalog;
    use plangist_operators::args::JoinType;

    fn reader<'a>(buf: &'a [u8], cat: &'a MemoryCatalog) -> GistReader<'a> {
        let cfg = GistConfig {
            max_list_len: 16,
            max_list_elems: 24,
            ..GistConfig::default()
        };
        GistReader::new(buf, cat, &cfg)
    }

    #[test]
    fn primitives_advance_the_cursor() {
        let cat = MemoryCatalog::new();
        let mut r = reader(&[0x02, 0x05, 0x01, 0x03], &cat);
        assert_eq!(r.decode_int().unwrap(), 1);
        assert!(r.decode_bool().unwrap());
        assert_eq!(r.decode_enum::<JoinType>().unwrap(), JoinType::LeftAnti);
        assert_eq!(r.decode_operator().unwrap(), Some(Operator::Filter));
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.decode_operator().unwrap(), None);
    }

    #[test]
    fn negative_and_oversized_counts_are_rejected() {
        let cat = MemoryCatalog::new();
        assert!(matches!(
            reader(&[0x01], &cat).decode_count(),
            Err(DecodeError::InvalidValue { value: -1, .. })
        ));
        assert!(matches!(
            reader(&[0x22], &cat).decode_count(),
            Err(DecodeError::ListTooLong { len: 17, .. })
        ));
    }

    #[test]
    fn list_lengths_draw_from_one_budget() {
        let cat = MemoryCatalog::new();
        // Three lists of 10: the first two fit in 24, the third does not.
        let mut r = reader(&[0x14, 0x14, 0x14], &cat);
        assert_eq!(r.decode_count().unwrap(), 10);
        assert_eq!(r.decode_count().unwrap(), 10);
        assert_eq!(
            r.decode_count(),
            Err(DecodeError::ListBudgetExceeded {
                limit: 24,
                offset: 2
            })
        );
    }

    #[test]
    fn unknown_tables_resolve_to_none_but_consume_the_index_id() {
        let cat = MemoryCatalog::new().with_table(TableDesc::new(53, "t").with_index(1, "primary"));
        let mut r = reader(&[0x6a, 0x02, 0x0e, 0x02], &cat);
        let t = r.decode_table().unwrap();
        assert_eq!(t.as_deref().map(|t| t.name.as_str()), Some("t"));
        assert_eq!(r.decode_index(t.as_deref()).unwrap().unwrap().name, "primary");
        let missing = r.decode_table().unwrap();
        assert!(missing.is_none());
        assert!(r.decode_index(missing.as_deref()).unwrap().is_none());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn truncation_is_reported_with_offset() {
        let cat = MemoryCatalog::new();
        let mut r = reader(&[0x80], &cat);
        assert_eq!(r.decode_int(), Err(DecodeError::UnexpectedEof { offset: 0 }));
        let mut r = reader(&[], &cat);
        assert_eq!(r.decode_byte(), Err(DecodeError::UnexpectedEof { offset: 0 }));
    }
}
