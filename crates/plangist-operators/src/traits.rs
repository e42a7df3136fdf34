//! The plan-construction contract.
//!
//! A plan builder walks the optimized expression bottom-up and calls one
//! `construct_*` method per operator, passing the already-built children and
//! the operator's arguments. Anything implementing `ExecFactory` can sit at
//! that call site: a real builder, the gist recorder that wraps one, or the
//! `StubFactory` when only the gist is wanted.
//!
//! Children are always constructed before their parent, so an implementation
//! observes operators in post-order.

use crate::args::*;
use crate::node::{Cascade, Subquery};

pub trait ExecFactory {
    /// Opaque handle for a constructed node.
    type Node;
    /// Completed plan produced by `construct_plan`.
    type Plan;
    type Error;

    // Sources.
    fn construct_scan(&mut self, args: ScanArgs) -> Result<Self::Node, Self::Error>;
    fn construct_values(&mut self, args: ValuesArgs) -> Result<Self::Node, Self::Error>;

    // Row-preserving and projecting operators.
    fn construct_filter(
        &mut self,
        input: Self::Node,
        args: FilterArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_inverted_filter(
        &mut self,
        input: Self::Node,
        args: InvertedFilterArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_simple_project(
        &mut self,
        input: Self::Node,
        args: SimpleProjectArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_serializing_project(
        &mut self,
        input: Self::Node,
        args: SerializingProjectArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_render(
        &mut self,
        input: Self::Node,
        args: RenderArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Joins.
    fn construct_apply_join(
        &mut self,
        input: Self::Node,
        args: ApplyJoinArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_hash_join(
        &mut self,
        left: Self::Node,
        right: Self::Node,
        args: HashJoinArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_merge_join(
        &mut self,
        left: Self::Node,
        right: Self::Node,
        args: MergeJoinArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Aggregation and set operations.
    fn construct_group_by(
        &mut self,
        input: Self::Node,
        args: GroupByArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_scalar_group_by(
        &mut self,
        input: Self::Node,
        args: ScalarGroupByArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_distinct(
        &mut self,
        input: Self::Node,
        args: DistinctArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_hash_set_op(
        &mut self,
        left: Self::Node,
        right: Self::Node,
        args: HashSetOpArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_streaming_set_op(
        &mut self,
        left: Self::Node,
        right: Self::Node,
        args: StreamingSetOpArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_union_all(
        &mut self,
        left: Self::Node,
        right: Self::Node,
        args: UnionAllArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Ordering, limits, and index lookups.
    fn construct_sort(
        &mut self,
        input: Self::Node,
        args: SortArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_ordinality(
        &mut self,
        input: Self::Node,
        args: OrdinalityArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_index_join(
        &mut self,
        input: Self::Node,
        args: IndexJoinArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_lookup_join(
        &mut self,
        input: Self::Node,
        args: LookupJoinArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_inverted_join(
        &mut self,
        input: Self::Node,
        args: InvertedJoinArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_zigzag_join(&mut self, args: ZigzagJoinArgs) -> Result<Self::Node, Self::Error>;
    fn construct_limit(
        &mut self,
        input: Self::Node,
        args: LimitArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_top_k(
        &mut self,
        input: Self::Node,
        args: TopKArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_max1_row(
        &mut self,
        input: Self::Node,
        args: Max1RowArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Set-returning projections and windows.
    fn construct_project_set(
        &mut self,
        input: Self::Node,
        args: ProjectSetArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_window(
        &mut self,
        input: Self::Node,
        args: WindowArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Statement wrappers.
    fn construct_explain_opt(&mut self, args: ExplainOptArgs) -> Result<Self::Node, Self::Error>;
    fn construct_explain(&mut self, args: ExplainArgs) -> Result<Self::Node, Self::Error>;
    fn construct_show_trace(&mut self, args: ShowTraceArgs) -> Result<Self::Node, Self::Error>;

    // Mutations.
    fn construct_insert(
        &mut self,
        input: Self::Node,
        args: InsertArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_insert_fast_path(
        &mut self,
        args: InsertFastPathArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_update(
        &mut self,
        input: Self::Node,
        args: UpdateArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_upsert(
        &mut self,
        input: Self::Node,
        args: UpsertArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_delete(
        &mut self,
        input: Self::Node,
        args: DeleteArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_delete_range(&mut self, args: DeleteRangeArgs) -> Result<Self::Node, Self::Error>;

    // DDL and catalog statements.
    fn construct_create_table(&mut self, args: CreateTableArgs) -> Result<Self::Node, Self::Error>;
    fn construct_create_table_as(
        &mut self,
        input: Self::Node,
        args: CreateTableAsArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_create_view(&mut self, args: CreateViewArgs) -> Result<Self::Node, Self::Error>;
    fn construct_sequence_select(
        &mut self,
        args: SequenceSelectArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_save_table(
        &mut self,
        input: Self::Node,
        args: SaveTableArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Checks. `construct_error_if_rows` is the only operator decoded into `Plan::checks`.
    fn construct_error_if_rows(
        &mut self,
        input: Self::Node,
        args: ErrorIfRowsArgs,
    ) -> Result<Self::Node, Self::Error>;

    // Everything else.
    fn construct_opaque(&mut self, args: OpaqueArgs) -> Result<Self::Node, Self::Error>;
    fn construct_alter_table_split(
        &mut self,
        input: Self::Node,
        args: AlterTableSplitArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_alter_table_unsplit(
        &mut self,
        input: Self::Node,
        args: AlterTableUnsplitArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_alter_table_unsplit_all(
        &mut self,
        args: AlterTableUnsplitAllArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_alter_table_relocate(
        &mut self,
        input: Self::Node,
        args: AlterTableRelocateArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_buffer(
        &mut self,
        input: Self::Node,
        args: BufferArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_scan_buffer(&mut self, args: ScanBufferArgs) -> Result<Self::Node, Self::Error>;
    fn construct_recursive_cte(
        &mut self,
        input: Self::Node,
        args: RecursiveCteArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_control_jobs(
        &mut self,
        input: Self::Node,
        args: ControlJobsArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_control_schedules(
        &mut self,
        input: Self::Node,
        args: ControlSchedulesArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_cancel_queries(
        &mut self,
        input: Self::Node,
        args: CancelQueriesArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_cancel_sessions(
        &mut self,
        input: Self::Node,
        args: CancelSessionsArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_create_statistics(
        &mut self,
        args: CreateStatisticsArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_export(
        &mut self,
        input: Self::Node,
        args: ExportArgs,
    ) -> Result<Self::Node, Self::Error>;
    fn construct_alter_range_relocate(
        &mut self,
        input: Self::Node,
        args: AlterRangeRelocateArgs,
    ) -> Result<Self::Node, Self::Error>;

    /// Assemble the finished plan from its root, subqueries, cascades, and
    /// checks.
    fn construct_plan(
        &mut self,
        root: Self::Node,
        subqueries: Vec<Subquery<Self::Node>>,
        cascades: Vec<Cascade>,
        checks: Vec<Self::Node>,
        root_row_count: i64,
    ) -> Result<Self::Plan, Self::Error>;
}
