//! A factory that builds nothing.
//!
//! Wrapped by the gist recorder when only the gist is wanted, i.e. no real
//! plan is being built alongside it.

use std::convert::Infallible;

use crate::args::*;
use crate::node::{Cascade, Subquery};
use crate::traits::ExecFactory;

#[derive(Debug, Clone, Copy, Default)]
pub struct StubFactory;

macro_rules! stub_constructors {
    ($( $method:ident ( $($child:ident),* ) : $args:ty => $variant:ident; )*) => {
        $(
            fn $method(&mut self, $($child: (),)* args: $args) -> Result<(), Infallible> {
                $(let _ = $child;)*
                let _ = args;
                Ok(())
            }
        )*
    };
}

impl ExecFactory for StubFactory {
    type Node = ();
    type Plan = ();
    type Error = Infallible;

    stub_constructors! {
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
        _root: (),
        _subqueries: Vec<Subquery<()>>,
        _cascades: Vec<Cascade>,
        _checks: Vec<()>,
        _root_row_count: i64,
    ) -> Result<(), Infallible> {
        Ok(())
    }
}
