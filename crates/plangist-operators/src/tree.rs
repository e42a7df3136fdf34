//! A factory that builds `Node` trees.
//!
//! Stands in for a real plan builder wherever the constructed plan only needs
//! to be inspected: explain-style tooling, and tests that compare a built
//! plan against its decoded gist.

use std::convert::Infallible;

use crate::args::*;
use crate::node::{Cascade, Node, OpArgs, Plan, Subquery};
use crate::traits::ExecFactory;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeFactory;

macro_rules! tree_constructors {
    ($( $method:ident ( $($child:ident),* ) : $args:ty => $variant:ident; )*) => {
        $(
            fn $method(&mut self, $($child: Node,)* args: $args) -> Result<Node, Infallible> {
                Ok(Node::new(OpArgs::$variant(args), vec![$($child),*]))
            }
        )*
    };
}

impl ExecFactory for TreeFactory {
    type Node = Node;
    type Plan = Plan;
    type Error = Infallible;

    tree_constructors! {
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
        root: Node,
        subqueries: Vec<Subquery<Node>>,
        cascades: Vec<Cascade>,
        checks: Vec<Node>,
        _root_row_count: i64,
    ) -> Result<Plan, Infallible> {
        Ok(Plan {
            root,
            subqueries,
            cascades,
            checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Operator;

    #[test]
    fn builds_children_in_call_order() {
        let mut f = TreeFactory;
        let left = f.construct_scan(ScanArgs::default()).unwrap();
        let right = f.construct_values(ValuesArgs::default()).unwrap();
        let join = f
            .construct_hash_join(left, right, HashJoinArgs::default())
            .unwrap();
        let plan = f.construct_plan(join, vec![], vec![], vec![], 0).unwrap();

        assert_eq!(plan.root.op(), Operator::HashJoin);
        let kids: Vec<_> = plan.root.children().iter().map(Node::op).collect();
        assert_eq!(kids, vec![Operator::Scan, Operator::Values]);
    }

    #[test]
    fn display_only_arguments_are_kept() {
        let mut f = TreeFactory;
        let input = f.construct_values(ValuesArgs::default()).unwrap();
        let filter = f
            .construct_filter(
                input,
                FilterArgs {
                    filter: ScalarExpr::new("a > 1"),
                    ..Default::default()
                },
            )
            .unwrap();
        match filter.args() {
            OpArgs::Filter(args) => assert_eq!(args.filter.0, "a > 1"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
