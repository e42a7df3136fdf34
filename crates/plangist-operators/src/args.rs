//! Typed arguments for every construction call.
//!
//! Each operator gets one `<Operator>Args` struct. The same struct is handed
//! to a real plan builder during construction and rebuilt by the gist
//! decoder, so fields fall in two groups:
//!
//! - shape fields (ids, flags, enum tags, list *lengths*) that survive a gist
//!   round trip;
//! - display-only fields (expression text, aliases, labels, literal rows) that
//!   the gist never records and that decode back as `Default`.
//!
//! Lists are recorded by length only, so a decoded `Vec` holds that many
//! default elements.

use std::collections::BTreeSet;

use plangist_core::catalog::{IndexDesc, SchemaDesc, TableRef};
use serde::Serialize;

/// Output column position of a child node.
pub type ColumnOrdinal = u32;

/// Opaque scalar expression text. Never written into a gist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScalarExpr(pub String);

impl ScalarExpr {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Set of column ordinals (needed columns, fetch columns, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSet(pub BTreeSet<ColumnOrdinal>);

impl ColumnSet {
    /// Placeholder set `0..n`, used when only the cardinality is known.
    pub fn from_len(n: usize) -> Self {
        Self((0..n).map(|i| i as ColumnOrdinal).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ColumnOrdinal> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = ColumnOrdinal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultColumn {
    pub name: String,
    pub hidden: bool,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderingColumn {
    pub ordinal: ColumnOrdinal,
    pub descending: bool,
}

/// Column ordering. Gists do not record orderings yet; decoded values are
/// always empty.
pub type ColumnOrdering = Vec<OrderingColumn>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Vec<ScalarExpr>,
    pub end: Vec<ScalarExpr>,
}

/// Index constraint; only the span count reaches the gist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggInfo {
    pub func_name: String,
    pub distinct: bool,
    pub arg_cols: Vec<ColumnOrdinal>,
}

/// Enums stored in a gist as a single byte.
pub trait WireEnum: Sized + Copy {
    /// Name used in decode errors.
    const KIND: &'static str;

    fn code(self) -> u8;

    fn from_code(v: u8) -> Option<Self>;
}

macro_rules! wire_enum {
    ($name:ident, $kind:literal { $first:ident = $first_code:literal $(, $variant:ident = $code:literal)* $(,)? }) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
        #[repr(u8)]
        pub enum $name {
            #[default]
            $first = $first_code,
            $($variant = $code,)*
        }

        impl WireEnum for $name {
            const KIND: &'static str = $kind;

            fn code(self) -> u8 {
                self as u8
            }

            fn from_code(v: u8) -> Option<Self> {
                match v {
                    $first_code => Some($name::$first),
                    $($code => Some($name::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

wire_enum!(JoinType, "join type" {
    Inner = 0,
    LeftOuter = 1,
    RightOuter = 2,
    FullOuter = 3,
    LeftSemi = 4,
    LeftAnti = 5,
    IntersectAll = 6,
    ExceptAll = 7,
    RightSemi = 8,
    RightAnti = 9,
});

wire_enum!(SetOpType, "set operation" {
    Union = 0,
    Intersect = 1,
    Except = 2,
});

wire_enum!(GroupingOrderType, "grouping order" {
    NoStreaming = 0,
    PartialStreaming = 1,
    Streaming = 2,
});

wire_enum!(LockStrength, "locking strength" {
    None = 0,
    ForKeyShare = 1,
    ForShare = 2,
    ForNoKeyUpdate = 3,
    ForUpdate = 4,
});

wire_enum!(ExplainMode, "explain mode" {
    Plan = 0,
    Distsql = 1,
    Opt = 2,
    Vec = 3,
    Debug = 4,
    Ddl = 5,
    Gist = 6,
});

wire_enum!(JobCommand, "job command" {
    Pause = 0,
    Cancel = 1,
    Resume = 2,
});

wire_enum!(ScheduleCommand, "schedule command" {
    Pause = 0,
    Resume = 1,
    Drop = 2,
});

wire_enum!(ExportFormat, "export format" {
    Csv = 0,
    Parquet = 1,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanParams {
    pub needed_cols: ColumnSet,
    pub index_constraint: Option<Constraint>,
    pub inverted_constraint: Vec<Span>,
    pub hard_limit: i64,
    pub reverse: bool,
    pub locking: LockStrength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanArgs {
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
    pub params: ScanParams,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValuesArgs {
    pub rows: Vec<Vec<ScalarExpr>>,
    pub columns: Vec<ResultColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterArgs {
    pub filter: ScalarExpr,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvertedFilterArgs {
    pub inverted_column: i64,
    pub pre_filter: Option<ScalarExpr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimpleProjectArgs {
    pub cols: Vec<ColumnOrdinal>,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SerializingProjectArgs {
    pub cols: Vec<ColumnOrdinal>,
    pub col_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderArgs {
    pub columns: Vec<ResultColumn>,
    pub exprs: Vec<ScalarExpr>,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplyJoinArgs {
    pub join_type: JoinType,
    pub left_columns: Vec<ResultColumn>,
    pub right_columns: Vec<ResultColumn>,
    pub on_cond: ScalarExpr,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HashJoinArgs {
    pub join_type: JoinType,
    pub left_eq_cols: Vec<ColumnOrdinal>,
    pub right_eq_cols: Vec<ColumnOrdinal>,
    pub left_eq_cols_are_key: bool,
    pub right_eq_cols_are_key: bool,
    pub extra_on_cond: ScalarExpr,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeJoinArgs {
    pub join_type: JoinType,
    pub on_cond: ScalarExpr,
    pub left_ordering: ColumnOrdering,
    pub right_ordering: ColumnOrdering,
    pub reqd_ordering: ColumnOrdering,
    pub left_eq_cols_are_key: bool,
    pub right_eq_cols_are_key: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupByArgs {
    pub group_cols: Vec<ColumnOrdinal>,
    pub group_col_ordering: ColumnOrdering,
    pub aggregations: Vec<AggInfo>,
    pub reqd_ordering: ColumnOrdering,
    pub grouping_order_type: GroupingOrderType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarGroupByArgs {
    pub aggregations: Vec<AggInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistinctArgs {
    pub distinct_cols: ColumnSet,
    pub ordered_cols: ColumnSet,
    pub reqd_ordering: ColumnOrdering,
    pub nulls_are_distinct: bool,
    /// Error raised on duplicates; only its presence is recorded.
    pub error_on_dup: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HashSetOpArgs {
    pub typ: SetOpType,
    pub all: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamingSetOpArgs {
    pub typ: SetOpType,
    pub all: bool,
    pub streaming_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnionAllArgs {
    pub reqd_ordering: ColumnOrdering,
    pub hard_limit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SortArgs {
    pub ordering: ColumnOrdering,
    pub already_ordered_prefix: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrdinalityArgs {
    pub col_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexJoinArgs {
    pub table: Option<TableRef>,
    pub key_cols: Vec<ColumnOrdinal>,
    pub table_cols: ColumnSet,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupJoinArgs {
    pub join_type: JoinType,
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
    pub eq_cols: Vec<ColumnOrdinal>,
    pub eq_cols_are_key: bool,
    pub lookup_cols: ColumnSet,
    pub on_cond: ScalarExpr,
    pub is_first_join_in_paired_joiner: bool,
    pub is_second_join_in_paired_joiner: bool,
    pub reqd_ordering: ColumnOrdering,
    pub locking: LockStrength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvertedJoinArgs {
    pub join_type: JoinType,
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
    pub lookup_cols: ColumnSet,
    pub prefix_eq_cols: Vec<ColumnOrdinal>,
    pub on_cond: ScalarExpr,
    pub is_first_join_in_paired_joiner: bool,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZigzagJoinArgs {
    pub left_table: Option<TableRef>,
    pub left_index: Option<IndexDesc>,
    pub left_cols: ColumnSet,
    pub left_fixed_vals: Vec<ScalarExpr>,
    pub left_eq_cols: Vec<ColumnOrdinal>,
    pub right_table: Option<TableRef>,
    pub right_index: Option<IndexDesc>,
    pub right_cols: ColumnSet,
    pub right_fixed_vals: Vec<ScalarExpr>,
    pub right_eq_cols: Vec<ColumnOrdinal>,
    pub on_cond: ScalarExpr,
    pub reqd_ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LimitArgs {
    pub limit: Option<ScalarExpr>,
    pub offset: Option<ScalarExpr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopKArgs {
    pub k: i64,
    pub ordering: ColumnOrdering,
    pub already_ordered_prefix: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Max1RowArgs {
    pub error_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectSetArgs {
    pub exprs: Vec<ScalarExpr>,
    pub zip_cols: Vec<ResultColumn>,
    pub num_cols_per_gen: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowArgs {
    pub partition_idxs: Vec<ColumnOrdinal>,
    pub window_fns: Vec<String>,
    pub ordering: ColumnOrdering,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplainOptArgs {
    pub plan_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplainArgs {
    pub mode: ExplainMode,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShowTraceArgs {
    pub compact: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsertArgs {
    pub table: Option<TableRef>,
    pub insert_cols: ColumnSet,
    pub return_cols: ColumnSet,
    pub check_cols: ColumnSet,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsertFastPathArgs {
    pub rows: Vec<Vec<ScalarExpr>>,
    pub table: Option<TableRef>,
    pub insert_cols: ColumnSet,
    pub return_cols: ColumnSet,
    pub check_cols: ColumnSet,
    pub fk_checks: Vec<String>,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateArgs {
    pub table: Option<TableRef>,
    pub fetch_cols: ColumnSet,
    pub update_cols: ColumnSet,
    pub return_cols: ColumnSet,
    pub checks: ColumnSet,
    pub passthrough: Vec<ResultColumn>,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpsertArgs {
    pub table: Option<TableRef>,
    pub arbiter_indexes: Vec<String>,
    pub canary_col: i64,
    pub insert_cols: ColumnSet,
    pub fetch_cols: ColumnSet,
    pub update_cols: ColumnSet,
    pub return_cols: ColumnSet,
    pub checks: ColumnSet,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteArgs {
    pub table: Option<TableRef>,
    pub fetch_cols: ColumnSet,
    pub return_cols: ColumnSet,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteRangeArgs {
    pub table: Option<TableRef>,
    pub needed_cols: ColumnSet,
    pub index_constraint: Option<Constraint>,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTableArgs {
    pub schema: Option<SchemaDesc>,
    pub table_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTableAsArgs {
    pub schema: Option<SchemaDesc>,
    pub table_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateViewArgs {
    pub schema: Option<SchemaDesc>,
    pub view_name: String,
    pub columns: Vec<ResultColumn>,
    pub deps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SequenceSelectArgs {
    pub sequence: Option<TableRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaveTableArgs {
    pub table_name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorIfRowsArgs {
    pub error_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpaqueArgs {
    pub metadata: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableSplitArgs {
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
    pub expiration: Option<ScalarExpr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableUnsplitArgs {
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableUnsplitAllArgs {
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterTableRelocateArgs {
    pub table: Option<TableRef>,
    pub index: Option<IndexDesc>,
    pub relocate_lease: bool,
    pub relocate_non_voters: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BufferArgs {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanBufferArgs {
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecursiveCteArgs {
    pub label: String,
    pub deduplicate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControlJobsArgs {
    pub command: JobCommand,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ControlSchedulesArgs {
    pub command: ScheduleCommand,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CancelQueriesArgs {
    pub if_exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CancelSessionsArgs {
    pub if_exists: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateStatisticsArgs {
    pub job: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportArgs {
    pub file_name: ScalarExpr,
    pub format: ExportFormat,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlterRangeRelocateArgs {
    pub relocate_lease: bool,
    pub relocate_non_voters: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_enums_reject_unknown_codes() {
        assert_eq!(JoinType::from_code(5), Some(JoinType::LeftAnti));
        assert_eq!(JoinType::from_code(10), None);
        assert_eq!(SetOpType::from_code(3), None);
        assert_eq!(LockStrength::default(), LockStrength::None);
        for v in 0..=6u8 {
            assert_eq!(ExplainMode::from_code(v).map(WireEnum::code), Some(v));
        }
    }

    #[test]
    fn placeholder_column_sets_have_the_requested_length() {
        let cols = ColumnSet::from_len(3);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols, [0, 1, 2].into_iter().collect());
        assert!(ColumnSet::from_len(0).is_empty());
    }
}
