//! `ExecFactory` wrapper that records a gist of everything it builds.

use plangist_operators::args::*;
use plangist_operators::{Cascade, ExecFactory, Operator, StubFactory, Subquery};

use crate::gist::PlanGist;
use crate::payload::GistCodec;
use crate::writer::GistWriter;
use crate::VERSION;

/// Records every construction call into a gist, then hands the call to the
/// wrapped factory and returns its result untouched.
///
/// Construction calls arrive bottom-up (children before parents), which is
/// the post-order the decoder replays.
#[derive(Debug)]
pub struct PlanGistFactory<F> {
    writer: GistWriter,
    wrapped: F,
}

impl PlanGistFactory<StubFactory> {
    /// Gist recording with no real plan behind it.
    pub fn gist_only() -> Self {
        Self::new(StubFactory)
    }
}

impl<F: ExecFactory> PlanGistFactory<F> {
    pub fn new(wrapped: F) -> Self {
        let mut writer = GistWriter::new();
        writer.encode_int(VERSION);
        Self { writer, wrapped }
    }

    /// Snapshot of the gist recorded so far.
    pub fn plan_gist(&self) -> PlanGist {
        PlanGist::seal(self.writer.bytes(), self.writer.hash())
    }

    pub fn into_plan_gist(self) -> PlanGist {
        self.plan_gist()
    }

    pub fn wrapped(&self) -> &F {
        &self.wrapped
    }

    pub fn wrapped_mut(&mut self) -> &mut F {
        &mut self.wrapped
    }

    /// Give back the wrapped factory along with the final gist.
    pub fn into_inner(self) -> (F, PlanGist) {
        let gist = self.plan_gist();
        (self.wrapped, gist)
    }

    fn record<A: GistCodec>(&mut self, op: Operator, args: &A) {
        self.writer.encode_operator(op);
        args.encode(&mut self.writer);
    }
}

macro_rules! gist_constructors {
    ($($method:ident ( $($child:ident),* ) : $args:ty => $variant:ident;)*) => {
        $(
            fn $method(
                &mut self,
                $($child: Self::Node,)*
                args: $args,
            ) -> Result<Self::Node, Self::Error> {
                self.record(Operator::$variant, &args);
                self.wrapped.$method($($child,)* args)
            }
        )*
    };
}

impl<F: ExecFactory> ExecFactory for PlanGistFactory<F> {
    type Node = F::Node;
    type Plan = F::Plan;
    type Error = F::Error;

    gist_constructors! {
        construct_scan(): ScanArgs => Scan;
        construct_values(): ValuesArgs => Values;
        construct_filter(input): FilterArgs => Filter;
        construct_inverted_filter(input): InvertedFilterArgs => InvertedFilter;
        construct_simple_project(input): SimpleProjectArgs => SimpleProject;
        construct_serializing_project(input): SerializingProjectArgs => SerializingProject;
        construct_render(input): RenderArgs => Render;
        construct_apply_join(input): ApplyJoinArgs => ApplyJoin;
        construct_hash_join(left, right): HashJoinArgs => HashJoin;
        construct_merge_join(left, right): MergeJoinArgs => MergeJoin;
        construct_group_by(input): GroupByArgs => GroupBy;
        construct_scalar_group_by(input): ScalarGroupByArgs => ScalarGroupBy;
        construct_distinct(input): DistinctArgs => Distinct;
        construct_hash_set_op(left, right): HashSetOpArgs => HashSetOp;
        construct_streaming_set_op(left, right): StreamingSetOpArgs => StreamingSetOp;
        construct_union_all(left, right): UnionAllArgs => UnionAll;
        construct_sort(input): SortArgs => Sort;
        construct_ordinality(input): OrdinalityArgs => Ordinality;
        construct_index_join(input): IndexJoinArgs => IndexJoin;
        construct_lookup_join(input): LookupJoinArgs => LookupJoin;
        construct_inverted_join(input): InvertedJoinArgs => InvertedJoin;
        construct_zigzag_join(): ZigzagJoinArgs => ZigzagJoin;
        construct_limit(input): LimitArgs => Limit;
        construct_top_k(input): TopKArgs => TopK;
        construct_max1_row(input): Max1RowArgs => Max1Row;
        construct_project_set(input): ProjectSetArgs => ProjectSet;
        construct_window(input): WindowArgs => Window;
        construct_explain_opt(): ExplainOptArgs => ExplainOpt;
        construct_explain(): ExplainArgs => Explain;
        construct_show_trace(): ShowTraceArgs => ShowTrace;
        construct_insert(input): InsertArgs => Insert;
        construct_insert_fast_path(): InsertFastPathArgs => InsertFastPath;
        construct_update(input): UpdateArgs => Update;
        construct_upsert(input): UpsertArgs => Upsert;
        construct_delete(input): DeleteArgs => Delete;
        construct_delete_range(): DeleteRangeArgs => DeleteRange;
        construct_create_table(): CreateTableArgs => CreateTable;
        construct_create_table_as(input): CreateTableAsArgs => CreateTableAs;
        construct_create_view(): CreateViewArgs => CreateView;
        construct_sequence_select(): SequenceSelectArgs => SequenceSelect;
        construct_save_table(input): SaveTableArgs => SaveTable;
        construct_error_if_rows(input): ErrorIfRowsArgs => ErrorIfRows;
        construct_opaque(): OpaqueArgs => Opaque;
        construct_alter_table_split(input): AlterTableSplitArgs => AlterTableSplit;
        construct_alter_table_unsplit(input): AlterTableUnsplitArgs => AlterTableUnsplit;
        construct_alter_table_unsplit_all(): AlterTableUnsplitAllArgs => AlterTableUnsplitAll;
        construct_alter_table_relocate(input): AlterTableRelocateArgs => AlterTableRelocate;
        construct_buffer(input): BufferArgs => Buffer;
        construct_scan_buffer(): ScanBufferArgs => ScanBuffer;
        construct_recursive_cte(input): RecursiveCteArgs => RecursiveCte;
        construct_control_jobs(input): ControlJobsArgs => ControlJobs;
        construct_control_schedules(input): ControlSchedulesArgs => ControlSchedules;
        construct_cancel_queries(input): CancelQueriesArgs => CancelQueries;
        construct_cancel_sessions(input): CancelSessionsArgs => CancelSessions;
        construct_create_statistics(): CreateStatisticsArgs => CreateStatistics;
        construct_export(input): ExportArgs => Export;
        construct_alter_range_relocate(input): AlterRangeRelocateArgs => AlterRangeRelocate;
    }

    fn construct_plan(
        &mut self,
        root: Self::Node,
        subqueries: Vec<Subquery<Self::Node>>,
        cascades: Vec<Cascade>,
        checks: Vec<Self::Node>,
        root_row_count: i64,
    ) -> Result<Self::Plan, Self::Error> {
        self.wrapped
            .construct_plan(root, subqueries, cascades, checks, root_row_count)
    }
}
