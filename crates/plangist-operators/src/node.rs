//! Decoded plan trees.
//!
//! `Node` is the display-oriented reconstruction unit: an operator's
//! arguments plus its children in construction order. `Plan` bundles a root
//! with the subqueries, cascades, and checks that run alongside it.

use serde::Serialize;

use crate::args::*;
use crate::registry::Operator;

/// Arguments of one plan node, tagged by operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OpArgs {
    Scan(ScanArgs),
    Values(ValuesArgs),
    Filter(FilterArgs),
    InvertedFilter(InvertedFilterArgs),
    SimpleProject(SimpleProjectArgs),
    SerializingProject(SerializingProjectArgs),
    Render(RenderArgs),
    ApplyJoin(ApplyJoinArgs),
    HashJoin(HashJoinArgs),
    MergeJoin(MergeJoinArgs),
    GroupBy(GroupByArgs),
    ScalarGroupBy(ScalarGroupByArgs),
    Distinct(DistinctArgs),
    HashSetOp(HashSetOpArgs),
    StreamingSetOp(StreamingSetOpArgs),
    UnionAll(UnionAllArgs),
    Sort(SortArgs),
    Ordinality(OrdinalityArgs),
    IndexJoin(IndexJoinArgs),
    LookupJoin(LookupJoinArgs),
    InvertedJoin(InvertedJoinArgs),
    ZigzagJoin(ZigzagJoinArgs),
    Limit(LimitArgs),
    TopK(TopKArgs),
    Max1Row(Max1RowArgs),
    ProjectSet(ProjectSetArgs),
    Window(WindowArgs),
    ExplainOpt(ExplainOptArgs),
    Explain(ExplainArgs),
    ShowTrace(ShowTraceArgs),
    Insert(InsertArgs),
    InsertFastPath(InsertFastPathArgs),
    Update(UpdateArgs),
    Upsert(UpsertArgs),
    Delete(DeleteArgs),
    DeleteRange(DeleteRangeArgs),
    CreateTable(CreateTableArgs),
    CreateTableAs(CreateTableAsArgs),
    CreateView(CreateViewArgs),
    SequenceSelect(SequenceSelectArgs),
    SaveTable(SaveTableArgs),
    ErrorIfRows(ErrorIfRowsArgs),
    Opaque(OpaqueArgs),
    AlterTableSplit(AlterTableSplitArgs),
    AlterTableUnsplit(AlterTableUnsplitArgs),
    AlterTableUnsplitAll(AlterTableUnsplitAllArgs),
    AlterTableRelocate(AlterTableRelocateArgs),
    Buffer(BufferArgs),
    ScanBuffer(ScanBufferArgs),
    RecursiveCte(RecursiveCteArgs),
    ControlJobs(ControlJobsArgs),
    ControlSchedules(ControlSchedulesArgs),
    CancelQueries(CancelQueriesArgs),
    CancelSessions(CancelSessionsArgs),
    CreateStatistics(CreateStatisticsArgs),
    Export(ExportArgs),
    AlterRangeRelocate(AlterRangeRelocateArgs),
}

impl OpArgs {
    pub fn operator(&self) -> Operator {
        match self {
            OpArgs::Scan(_) => Operator::Scan,
            OpArgs::Values(_) => Operator::Values,
            OpArgs::Filter(_) => Operator::Filter,
            OpArgs::InvertedFilter(_) => Operator::InvertedFilter,
            OpArgs::SimpleProject(_) => Operator::SimpleProject,
            OpArgs::SerializingProject(_) => Operator::SerializingProject,
            OpArgs::Render(_) => Operator::Render,
            OpArgs::ApplyJoin(_) => Operator::ApplyJoin,
            OpArgs::HashJoin(_) => Operator::HashJoin,
            OpArgs::MergeJoin(_) => Operator::MergeJoin,
            OpArgs::GroupBy(_) => Operator::GroupBy,
            OpArgs::ScalarGroupBy(_) => Operator::ScalarGroupBy,
            OpArgs::Distinct(_) => Operator::Distinct,
            OpArgs::HashSetOp(_) => Operator::HashSetOp,
            OpArgs::StreamingSetOp(_) => Operator::StreamingSetOp,
            OpArgs::UnionAll(_) => Operator::UnionAll,
            OpArgs::Sort(_) => Operator::Sort,
            OpArgs::Ordinality(_) => Operator::Ordinality,
            OpArgs::IndexJoin(_) => Operator::IndexJoin,
            OpArgs::LookupJoin(_) => Operator::LookupJoin,
            OpArgs::InvertedJoin(_) => Operator::InvertedJoin,
            OpArgs::ZigzagJoin(_) => Operator::ZigzagJoin,
            OpArgs::Limit(_) => Operator::Limit,
            OpArgs::TopK(_) => Operator::TopK,
            OpArgs::Max1Row(_) => Operator::Max1Row,
            OpArgs::ProjectSet(_) => Operator::ProjectSet,
            OpArgs::Window(_) => Operator::Window,
            OpArgs::ExplainOpt(_) => Operator::ExplainOpt,
            OpArgs::Explain(_) => Operator::Explain,
            OpArgs::ShowTrace(_) => Operator::ShowTrace,
            OpArgs::Insert(_) => Operator::Insert,
            OpArgs::InsertFastPath(_) => Operator::InsertFastPath,
            OpArgs::Update(_) => Operator::Update,
            OpArgs::Upsert(_) => Operator::Upsert,
            OpArgs::Delete(_) => Operator::Delete,
            OpArgs::DeleteRange(_) => Operator::DeleteRange,
            OpArgs::CreateTable(_) => Operator::CreateTable,
            OpArgs::CreateTableAs(_) => Operator::CreateTableAs,
            OpArgs::CreateView(_) => Operator::CreateView,
            OpArgs::SequenceSelect(_) => Operator::SequenceSelect,
            OpArgs::SaveTable(_) => Operator::SaveTable,
            OpArgs::ErrorIfRows(_) => Operator::ErrorIfRows,
            OpArgs::Opaque(_) => Operator::Opaque,
            OpArgs::AlterTableSplit(_) => Operator::AlterTableSplit,
            OpArgs::AlterTableUnsplit(_) => Operator::AlterTableUnsplit,
            OpArgs::AlterTableUnsplitAll(_) => Operator::AlterTableUnsplitAll,
            OpArgs::AlterTableRelocate(_) => Operator::AlterTableRelocate,
            OpArgs::Buffer(_) => Operator::Buffer,
            OpArgs::ScanBuffer(_) => Operator::ScanBuffer,
            OpArgs::RecursiveCte(_) => Operator::RecursiveCte,
            OpArgs::ControlJobs(_) => Operator::ControlJobs,
            OpArgs::ControlSchedules(_) => Operator::ControlSchedules,
            OpArgs::CancelQueries(_) => Operator::CancelQueries,
            OpArgs::CancelSessions(_) => Operator::CancelSessions,
            OpArgs::CreateStatistics(_) => Operator::CreateStatistics,
            OpArgs::Export(_) => Operator::Export,
            OpArgs::AlterRangeRelocate(_) => Operator::AlterRangeRelocate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub args: OpArgs,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(args: OpArgs, children: Vec<Node>) -> Self {
        debug_assert_eq!(
            children.len(),
            args.operator().arity(),
            "{} built with the wrong number of inputs",
            args.operator()
        );
        Self { args, children }
    }

    pub fn op(&self) -> Operator {
        self.args.operator()
    }

    pub fn args(&self) -> &OpArgs {
        &self.args
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Operators in post-order (children before parents), which is also the
    /// order their records appear in a gist.
    pub fn post_order(&self) -> Vec<Operator> {
        let mut out = Vec::new();
        self.collect_post_order(&mut out);
        out
    }

    fn collect_post_order(&self, out: &mut Vec<Operator>) {
        for child in &self.children {
            child.collect_post_order(out);
        }
        out.push(self.op());
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// How a subquery's result is consumed by the main query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SubqueryMode {
    /// Not recorded (e.g. decoded from a gist).
    #[default]
    Unspecified,
    Exists,
    OneRow,
    AnyRows,
    AllRows,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subquery<N> {
    pub root: N,
    pub mode: SubqueryMode,
}

impl<N> Subquery<N> {
    pub fn new(root: N) -> Self {
        Self {
            root,
            mode: SubqueryMode::Unspecified,
        }
    }
}

/// Foreign-key cascade planned lazily after the main query. Cascades are
/// never part of a gist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cascade {
    pub fk_constraint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub root: Node,
    pub subqueries: Vec<Subquery<Node>>,
    pub cascades: Vec<Cascade>,
    pub checks: Vec<Node>,
}

impl Plan {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            subqueries: vec![],
            cascades: vec![],
            checks: vec![],
        }
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
            + self
                .subqueries
                .iter()
                .map(|s| s.root.node_count())
                .sum::<usize>()
            + self.checks.iter().map(Node::node_count).sum::<usize>()
    }
}
