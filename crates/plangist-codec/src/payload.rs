//! Per-operator argument payloads.
//!
//! Each args struct gets one field table below; `gist_payload!` expands it
//! into both directions of `GistCodec`, so the encode and decode sides cannot
//! drift apart. Field order in a table is byte order on the wire. Fields not
//! listed never reach the gist and decode as their `Default`.
//!
//! Field kinds:
//! - `ds`: table-like data source (id to buffer, name to hash)
//! - `idx(t)`: index of the data source decoded into field `t`
//! - `sch`: schema id through the integer path
//! - `int`, `bool`: varint and single byte
//! - `byte`: a `WireEnum` stored as one byte
//! - `count`: list reduced to its length
//! - `flag`: optional value reduced to a presence bool
//! - `ord`: column ordering (writes nothing)
//! - `nested`: another `GistCodec` value inline

use std::iter;

use plangist_operators::args::*;
use plangist_operators::{OpArgs, Operator};

use crate::error::Result;
use crate::reader::GistReader;
use crate::writer::GistWriter;

pub trait GistCodec: Sized {
    fn encode(&self, w: &mut GistWriter);
    fn decode(r: &mut GistReader<'_>) -> Result<Self>;
}

/// Lists that a gist records only by length.
pub trait CountOnly {
    fn count(&self) -> usize;
    fn from_count(n: usize) -> Self;
}

impl<T: Default> CountOnly for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }

    fn from_count(n: usize) -> Self {
        iter::repeat_with(T::default).take(n).collect()
    }
}

impl CountOnly for ColumnSet {
    fn count(&self) -> usize {
        self.len()
    }

    fn from_count(n: usize) -> Self {
        ColumnSet::from_len(n)
    }
}

/// A constraint counts its spans; zero spans means unconstrained.
impl CountOnly for Option<Constraint> {
    fn count(&self) -> usize {
        self.as_ref().map_or(0, |c| c.spans.len())
    }

    fn from_count(n: usize) -> Self {
        (n > 0).then(|| Constraint {
            spans: Vec::from_count(n),
        })
    }
}

macro_rules! encode_field {
    ($w:ident, $v:expr, ds) => {
        $w.encode_table($v.as_deref())
    };
    ($w:ident, $v:expr, idx) => {
        $w.encode_index($v.as_ref())
    };
    ($w:ident, $v:expr, sch) => {
        $w.encode_schema($v.as_ref())
    };
    ($w:ident, $v:expr, int) => {
        $w.encode_int($v)
    };
    ($w:ident, $v:expr, bool) => {
        $w.encode_bool($v)
    };
    ($w:ident, $v:expr, byte) => {
        $w.encode_enum($v)
    };
    ($w:ident, $v:expr, count) => {
        $w.encode_count(CountOnly::count(&$v))
    };
    ($w:ident, $v:expr, flag) => {
        $w.encode_bool($v.is_some())
    };
    ($w:ident, $v:expr, ord) => {
        $w.encode_column_ordering(&$v)
    };
    ($w:ident, $v:expr, nested) => {
        GistCodec::encode(&$v, $w)
    };
}

macro_rules! decode_field {
    ($r:ident, ds) => {
        $r.decode_table()?
    };
    ($r:ident, idx, $table:ident) => {
        $r.decode_index($table.as_deref())?
    };
    ($r:ident, sch) => {
        $r.decode_schema()?
    };
    ($r:ident, int) => {
        $r.decode_int()?
    };
    ($r:ident, bool) => {
        $r.decode_bool()?
    };
    ($r:ident, byte) => {
        $r.decode_enum()?
    };
    ($r:ident, count) => {
        CountOnly::from_count($r.decode_count()?)
    };
    ($r:ident, flag) => {
        if $r.decode_bool()? {
            Some(Default::default())
        } else {
            None
        }
    };
    ($r:ident, ord) => {
        $r.decode_column_ordering()
    };
    ($r:ident, nested) => {
        GistCodec::decode($r)?
    };
}

macro_rules! gist_payload {
    ($($ty:ident { $($field:ident: $kind:ident $(($dep:ident))?),* $(,)? })*) => {
        $(
            impl GistCodec for $ty {
                #[allow(unused_variables)]
                fn encode(&self, w: &mut GistWriter) {
                    $(encode_field!(w, self.$field, $kind);)*
                }

                #[allow(unused_variables, clippy::needless_update)]
                fn decode(r: &mut GistReader<'_>) -> Result<Self> {
                    $(let $field = decode_field!(r, $kind $(, $dep)?);)*
                    Ok(Self {
                        $($field,)*
                        ..Default::default()
                    })
                }
            }
        )*
    };
}

gist_payload! {
    ScanParams {
        needed_cols: count,
        index_constraint: count,
        inverted_constraint: count,
        hard_limit: int,
        reverse: bool,
        locking: byte,
    }
    ScanArgs { table: ds, index: idx(table), params: nested, reqd_ordering: ord }
    ValuesArgs { rows: count, columns: count }
    FilterArgs { reqd_ordering: ord }
    InvertedFilterArgs { inverted_column: int, pre_filter: flag }
    SimpleProjectArgs { cols: count, reqd_ordering: ord }
    SerializingProjectArgs { cols: count, col_names: count }
    RenderArgs { columns: count, exprs: count, reqd_ordering: ord }
    ApplyJoinArgs { join_type: byte, left_columns: count, right_columns: count }
    HashJoinArgs {
        join_type: byte,
        left_eq_cols: count,
        right_eq_cols: count,
        left_eq_cols_are_key: bool,
        right_eq_cols_are_key: bool,
    }
    MergeJoinArgs {
        join_type: byte,
        left_ordering: ord,
        right_ordering: ord,
        reqd_ordering: ord,
        left_eq_cols_are_key: bool,
        right_eq_cols_are_key: bool,
    }
    GroupByArgs {
        group_cols: count,
        group_col_ordering: ord,
        aggregations: count,
        reqd_ordering: ord,
        grouping_order_type: byte,
    }
    ScalarGroupByArgs { aggregations: count }
    DistinctArgs {
        distinct_cols: count,
        ordered_cols: count,
        reqd_ordering: ord,
        nulls_are_distinct: bool,
        error_on_dup: flag,
    }
    HashSetOpArgs { typ: byte, all: bool }
    StreamingSetOpArgs { typ: byte, all: bool, streaming_ordering: ord }
    UnionAllArgs { reqd_ordering: ord, hard_limit: int }
    SortArgs { ordering: ord, already_ordered_prefix: int }
    OrdinalityArgs {}
    IndexJoinArgs { table: ds, key_cols: count, table_cols: count, reqd_ordering: ord }
    LookupJoinArgs {
        join_type: byte,
        table: ds,
        index: idx(table),
        eq_cols: count,
        eq_cols_are_key: bool,
        lookup_cols: count,
        is_first_join_in_paired_joiner: bool,
        is_second_join_in_paired_joiner: bool,
        reqd_ordering: ord,
        locking: byte,
    }
    InvertedJoinArgs {
        join_type: byte,
        table: ds,
        index: idx(table),
        lookup_cols: count,
        prefix_eq_cols: count,
        is_first_join_in_paired_joiner: bool,
        reqd_ordering: ord,
    }
    ZigzagJoinArgs {
        left_table: ds,
        left_index: idx(left_table),
        left_cols: count,
        left_fixed_vals: count,
        left_eq_cols: count,
        right_table: ds,
        right_index: idx(right_table),
        right_cols: count,
        right_fixed_vals: count,
        right_eq_cols: count,
        reqd_ordering: ord,
    }
    LimitArgs { limit: flag, offset: flag }
    TopKArgs { k: int, ordering: ord, already_ordered_prefix: int }
    Max1RowArgs {}
    ProjectSetArgs { exprs: count, zip_cols: count, num_cols_per_gen: count }
    WindowArgs { partition_idxs: count, window_fns: count, ordering: ord }
    ExplainOptArgs {}
    ExplainArgs { mode: byte, verbose: bool }
    ShowTraceArgs { compact: bool }
    InsertArgs {
        table: ds,
        insert_cols: count,
        return_cols: count,
        check_cols: count,
        auto_commit: bool,
    }
    InsertFastPathArgs {
        rows: count,
        table: ds,
        insert_cols: count,
        return_cols: count,
        check_cols: count,
        fk_checks: count,
        auto_commit: bool,
    }
    UpdateArgs {
        table: ds,
        fetch_cols: count,
        update_cols: count,
        return_cols: count,
        checks: count,
        passthrough: count,
        auto_commit: bool,
    }
    UpsertArgs {
        table: ds,
        arbiter_indexes: count,
        canary_col: int,
        insert_cols: count,
        fetch_cols: count,
        update_cols: count,
        return_cols: count,
        checks: count,
        auto_commit: bool,
    }
    DeleteArgs { table: ds, fetch_cols: count, return_cols: count, auto_commit: bool }
    DeleteRangeArgs { table: ds, needed_cols: count, index_constraint: count, auto_commit: bool }
    CreateTableArgs { schema: sch }
    CreateTableAsArgs { schema: sch }
    CreateViewArgs { schema: sch, columns: count, deps: count }
    SequenceSelectArgs { sequence: ds }
    SaveTableArgs { columns: count }
    ErrorIfRowsArgs {}
    OpaqueArgs {}
    AlterTableSplitArgs { table: ds, index: idx(table) }
    AlterTableUnsplitArgs { table: ds, index: idx(table) }
    AlterTableUnsplitAllArgs { table: ds, index: idx(table) }
    AlterTableRelocateArgs {
        table: ds,
        index: idx(table),
        relocate_lease: bool,
        relocate_non_voters: bool,
    }
    BufferArgs {}
    ScanBufferArgs {}
    RecursiveCteArgs { deduplicate: bool }
    ControlJobsArgs { command: byte }
    ControlSchedulesArgs { command: byte }
    CancelQueriesArgs { if_exists: bool }
    CancelSessionsArgs { if_exists: bool }
    CreateStatisticsArgs {}
    ExportArgs { format: byte }
    AlterRangeRelocateArgs { relocate_lease: bool, relocate_non_voters: bool }
}

/// Decode the payload that follows opcode `op`.
pub fn decode_operator_body(op: Operator, r: &mut GistReader<'_>) -> Result<OpArgs> {
    Ok(match op {
        Operator::Scan => OpArgs::Scan(ScanArgs::decode(r)?),
        Operator::Values => OpArgs::Values(ValuesArgs::decode(r)?),
        Operator::Filter => OpArgs::Filter(FilterArgs::decode(r)?),
        Operator::InvertedFilter => OpArgs::InvertedFilter(InvertedFilterArgs::decode(r)?),
        Operator::SimpleProject => OpArgs::SimpleProject(SimpleProjectArgs::decode(r)?),
        Operator::SerializingProject => OpArgs::SerializingProject(SerializingProjectArgs::decode(r)?),
        Operator::Render => OpArgs::Render(RenderArgs::decode(r)?),
        Operator::ApplyJoin => OpArgs::ApplyJoin(ApplyJoinArgs::decode(r)?),
        Operator::HashJoin => OpArgs::HashJoin(HashJoinArgs::decode(r)?),
        Operator::MergeJoin => OpArgs::MergeJoin(MergeJoinArgs::decode(r)?),
        Operator::GroupBy => OpArgs::GroupBy(GroupByArgs::decode(r)?),
        Operator::ScalarGroupBy => OpArgs::ScalarGroupBy(ScalarGroupByArgs::decode(r)?),
        Operator::Distinct => OpArgs::Distinct(DistinctArgs::decode(r)?),
        Operator::HashSetOp => OpArgs::HashSetOp(HashSetOpArgs::decode(r)?),
        Operator::StreamingSetOp => OpArgs::StreamingSetOp(StreamingSetOpArgs::decode(r)?),
        Operator::UnionAll => OpArgs::UnionAll(UnionAllArgs::decode(r)?),
        Operator::Sort => OpArgs::Sort(SortArgs::decode(r)?),
        Operator::Ordinality => OpArgs::Ordinality(OrdinalityArgs::decode(r)?),
        Operator::IndexJoin => OpArgs::IndexJoin(IndexJoinArgs::decode(r)?),
        Operator::LookupJoin => OpArgs::LookupJoin(LookupJoinArgs::decode(r)?),
        Operator::InvertedJoin => OpArgs::InvertedJoin(InvertedJoinArgs::decode(r)?),
        Operator::ZigzagJoin => OpArgs::ZigzagJoin(ZigzagJoinArgs::decode(r)?),
        Operator::Limit => OpArgs::Limit(LimitArgs::decode(r)?),
        Operator::TopK => OpArgs::TopK(TopKArgs::decode(r)?),
        Operator::Max1Row => OpArgs::Max1Row(Max1RowArgs::decode(r)?),
        Operator::ProjectSet => OpArgs::ProjectSet(ProjectSetArgs::decode(r)?),
        Operator::Window => OpArgs::Window(WindowArgs::decode(r)?),
        Operator::ExplainOpt => OpArgs::ExplainOpt(ExplainOptArgs::decode(r)?),
        Operator::Explain => OpArgs::Explain(ExplainArgs::decode(r)?),
        Operator::ShowTrace => OpArgs::ShowTrace(ShowTraceArgs::decode(r)?),
        Operator::Insert => OpArgs::Insert(InsertArgs::decode(r)?),
        Operator::InsertFastPath => OpArgs::InsertFastPath(InsertFastPathArgs::decode(r)?),
        Operator::Update => OpArgs::Update(UpdateArgs::decode(r)?),
        Operator::Upsert => OpArgs::Upsert(UpsertArgs::decode(r)?),
        Operator::Delete => OpArgs::Delete(DeleteArgs::decode(r)?),
        Operator::DeleteRange => OpArgs::DeleteRange(DeleteRangeArgs::decode(r)?),
        Operator::CreateTable => OpArgs::CreateTable(CreateTableArgs::decode(r)?),
        Operator::CreateTableAs => OpArgs::CreateTableAs(CreateTableAsArgs::decode(r)?),
        Operator::CreateView => OpArgs::CreateView(CreateViewArgs::decode(r)?),
        Operator::SequenceSelect => OpArgs::SequenceSelect(SequenceSelectArgs::decode(r)?),
        Operator::SaveTable => OpArgs::SaveTable(SaveTableArgs::decode(r)?),
        Operator::ErrorIfRows => OpArgs::ErrorIfRows(ErrorIfRowsArgs::decode(r)?),
        Operator::Opaque => OpArgs::Opaque(OpaqueArgs::decode(r)?),
        Operator::AlterTableSplit => OpArgs::AlterTableSplit(AlterTableSplitArgs::decode(r)?),
        Operator::AlterTableUnsplit => OpArgs::AlterTableUnsplit(AlterTableUnsplitArgs::decode(r)?),
        Operator::AlterTableUnsplitAll => OpArgs::AlterTableUnsplitAll(AlterTableUnsplitAllArgs::decode(r)?),
        Operator::AlterTableRelocate => OpArgs::AlterTableRelocate(AlterTableRelocateArgs::decode(r)?),
        Operator::Buffer => OpArgs::Buffer(BufferArgs::decode(r)?),
        Operator::ScanBuffer => OpArgs::ScanBuffer(ScanBufferArgs::decode(r)?),
        Operator::RecursiveCte => OpArgs::RecursiveCte(RecursiveCteArgs::decode(r)?),
        Operator::ControlJobs => OpArgs::ControlJobs(ControlJobsArgs::decode(r)?),
        Operator::ControlSchedules => OpArgs::ControlSchedules(ControlSchedulesArgs::decode(r)?),
        Operator::CancelQueries => OpArgs::CancelQueries(CancelQueriesArgs::decode(r)?),
        Operator::CancelSessions => OpArgs::CancelSessions(CancelSessionsArgs::decode(r)?),
        Operator::CreateStatistics => OpArgs::CreateStatistics(CreateStatisticsArgs::decode(r)?),
        Operator::Export => OpArgs::Export(ExportArgs::decode(r)?),
        Operator::AlterRangeRelocate => OpArgs::AlterRangeRelocate(AlterRangeRelocateArgs::decode(r)?),
    })
}
