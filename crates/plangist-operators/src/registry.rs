//! The closed set of plan operators and their frozen wire codes.
//!
//! Codes are part of the gist format. New operators go at the end; removing,
//! reordering, or inserting in the middle invalidates stored gists and their
//! hashes and needs a gist version bump. `NUM_OPERATORS` must be updated in
//! the same change, which the const assertion below enforces.

use serde::{Deserialize, Serialize};

/// Number of operators the gist format knows about.
pub const NUM_OPERATORS: usize = 57;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operator {
    Scan = 1,
    Values = 2,
    Filter = 3,
    InvertedFilter = 4,
    SimpleProject = 5,
    SerializingProject = 6,
    Render = 7,
    ApplyJoin = 8,
    HashJoin = 9,
    MergeJoin = 10,
    GroupBy = 11,
    ScalarGroupBy = 12,
    Distinct = 13,
    HashSetOp = 14,
    StreamingSetOp = 15,
    UnionAll = 16,
    Sort = 17,
    Ordinality = 18,
    IndexJoin = 19,
    LookupJoin = 20,
    InvertedJoin = 21,
    ZigzagJoin = 22,
    Limit = 23,
    TopK = 24,
    Max1Row = 25,
    ProjectSet = 26,
    Window = 27,
    ExplainOpt = 28,
    Explain = 29,
    ShowTrace = 30,
    Insert = 31,
    InsertFastPath = 32,
    Update = 33,
    Upsert = 34,
    Delete = 35,
    DeleteRange = 36,
    CreateTable = 37,
    CreateTableAs = 38,
    CreateView = 39,
    SequenceSelect = 40,
    SaveTable = 41,
    ErrorIfRows = 42,
    Opaque = 43,
    AlterTableSplit = 44,
    AlterTableUnsplit = 45,
    AlterTableUnsplitAll = 46,
    AlterTableRelocate = 47,
    Buffer = 48,
    ScanBuffer = 49,
    RecursiveCte = 50,
    ControlJobs = 51,
    ControlSchedules = 52,
    CancelQueries = 53,
    CancelSessions = 54,
    CreateStatistics = 55,
    Export = 56,
    AlterRangeRelocate = 57,
}

// If this fails, make sure the new operator was appended last, then bump
// NUM_OPERATORS. Anything other than an append also needs a gist version bump.
const _: () = assert!(
    Operator::AlterRangeRelocate as usize == NUM_OPERATORS,
    "operator set changed; update NUM_OPERATORS and consider bumping the gist version"
);

impl Operator {
    /// Every operator, in wire-code order.
    pub const ALL: [Operator; NUM_OPERATORS] = [
        Operator::Scan,
        Operator::Values,
        Operator::Filter,
        Operator::InvertedFilter,
        Operator::SimpleProject,
        Operator::SerializingProject,
        Operator::Render,
        Operator::ApplyJoin,
        Operator::HashJoin,
        Operator::MergeJoin,
        Operator::GroupBy,
        Operator::ScalarGroupBy,
        Operator::Distinct,
        Operator::HashSetOp,
        Operator::StreamingSetOp,
        Operator::UnionAll,
        Operator::Sort,
        Operator::Ordinality,
        Operator::IndexJoin,
        Operator::LookupJoin,
        Operator::InvertedJoin,
        Operator::ZigzagJoin,
        Operator::Limit,
        Operator::TopK,
        Operator::Max1Row,
        Operator::ProjectSet,
        Operator::Window,
        Operator::ExplainOpt,
        Operator::Explain,
        Operator::ShowTrace,
        Operator::Insert,
        Operator::InsertFastPath,
        Operator::Update,
        Operator::Upsert,
        Operator::Delete,
        Operator::DeleteRange,
        Operator::CreateTable,
        Operator::CreateTableAs,
        Operator::CreateView,
        Operator::SequenceSelect,
        Operator::SaveTable,
        Operator::ErrorIfRows,
        Operator::Opaque,
        Operator::AlterTableSplit,
        Operator::AlterTableUnsplit,
        Operator::AlterTableUnsplitAll,
        Operator::AlterTableRelocate,
        Operator::Buffer,
        Operator::ScanBuffer,
        Operator::RecursiveCte,
        Operator::ControlJobs,
        Operator::ControlSchedules,
        Operator::CancelQueries,
        Operator::CancelSessions,
        Operator::CreateStatistics,
        Operator::Export,
        Operator::AlterRangeRelocate,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code back to an operator. Code 0 is the end-of-plan
    /// sentinel and, like any unassigned code, maps to `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => None,
            v if usize::from(v) <= NUM_OPERATORS => Some(Self::ALL[usize::from(v) - 1]),
            _ => None,
        }
    }

    /// Number of child operands this operator consumes.
    pub const fn arity(self) -> usize {
        use Operator::*;
        match self {
            Scan | Values | ZigzagJoin | ExplainOpt | Explain | ShowTrace | InsertFastPath
            | DeleteRange | CreateTable | CreateView | SequenceSelect | Opaque
            | AlterTableUnsplitAll | ScanBuffer | CreateStatistics => 0,
            HashJoin | MergeJoin | HashSetOp | StreamingSetOp | UnionAll => 2,
            Filter | InvertedFilter | SimpleProject | SerializingProject | Render
            | ApplyJoin | GroupBy | ScalarGroupBy | Distinct | Sort | Ordinality
            | IndexJoin | LookupJoin | InvertedJoin | Limit | TopK | Max1Row | ProjectSet
            | Window | Insert | Update | Upsert | Delete | CreateTableAs | SaveTable
            | ErrorIfRows | AlterTableSplit | AlterTableUnsplit | AlterTableRelocate
            | Buffer | RecursiveCte | ControlJobs | ControlSchedules | CancelQueries
            | CancelSessions | Export | AlterRangeRelocate => 1,
        }
    }

    /// The reserved "check" operator: decoded into `Plan::checks` rather
    /// than left on the operand stack.
    pub const fn is_check(self) -> bool {
        matches!(self, Operator::ErrorIfRows)
    }

    /// Stable human-readable name.
    pub const fn name(self) -> &'static str {
        use Operator::*;
        match self {
            Scan => "scan",
            Values => "values",
            Filter => "filter",
            InvertedFilter => "inverted_filter",
            SimpleProject => "simple_project",
            SerializingProject => "serializing_project",
            Render => "render",
            ApplyJoin => "apply_join",
            HashJoin => "hash_join",
            MergeJoin => "merge_join",
            GroupBy => "group_by",
            ScalarGroupBy => "scalar_group_by",
            Distinct => "distinct",
            HashSetOp => "hash_set_op",
            StreamingSetOp => "streaming_set_op",
            UnionAll => "union_all",
            Sort => "sort",
            Ordinality => "ordinality",
            IndexJoin => "index_join",
            LookupJoin => "lookup_join",
            InvertedJoin => "inverted_join",
            ZigzagJoin => "zigzag_join",
            Limit => "limit",
            TopK => "top_k",
            Max1Row => "max1_row",
            ProjectSet => "project_set",
            Window => "window",
            ExplainOpt => "explain_opt",
            Explain => "explain",
            ShowTrace => "show_trace",
            Insert => "insert",
            InsertFastPath => "insert_fast_path",
            Update => "update",
            Upsert => "upsert",
            Delete => "delete",
            DeleteRange => "delete_range",
            CreateTable => "create_table",
            CreateTableAs => "create_table_as",
            CreateView => "create_view",
            SequenceSelect => "sequence_select",
            SaveTable => "save_table",
            ErrorIfRows => "error_if_rows",
            Opaque => "opaque",
            AlterTableSplit => "alter_table_split",
            AlterTableUnsplit => "alter_table_unsplit",
            AlterTableUnsplitAll => "alter_table_unsplit_all",
            AlterTableRelocate => "alter_table_relocate",
            Buffer => "buffer",
            ScanBuffer => "scan_buffer",
            RecursiveCte => "recursive_cte",
            ControlJobs => "control_jobs",
            ControlSchedules => "control_schedules",
            CancelQueries => "cancel_queries",
            CancelSessions => "cancel_sessions",
            CreateStatistics => "create_statistics",
            Export => "export",
            AlterRangeRelocate => "alter_range_relocate",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
