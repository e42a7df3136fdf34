//! Shared fixtures for gist integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use plangist::plangist_core::catalog::{IndexDesc, MemoryCatalog, TableDesc, TableRef};
use plangist::plangist_operators::args::*;
use plangist::plangist_operators::{ExecFactory, Subquery};

pub fn catalog(orders_id: u64, customers_id: u64) -> MemoryCatalog {
    MemoryCatalog::new()
        .with_table(
            TableDesc::new(orders_id, "orders")
                .with_index(1, "orders_pkey")
                .with_index(2, "orders_customer_idx"),
        )
        .with_table(TableDesc::new(customers_id, "customers").with_index(1, "customers_pkey"))
        .with_schema(29, "public")
}

pub fn table(cat: &MemoryCatalog, name: &str) -> TableRef {
    cat.table_by_name(name)
        .unwrap_or_else(|| panic!("fixture table {name} missing"))
}

pub fn index(table: &TableRef, name: &str) -> Option<IndexDesc> {
    table.index_by_name(name).cloned()
}

pub fn scan(table: &TableRef, index_name: &str, cols: usize) -> ScanArgs {
    ScanArgs {
        table: Some(Arc::clone(table)),
        index: index(table, index_name),
        params: ScanParams {
            needed_cols: ColumnSet::from_len(cols),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// SELECT c.name, count(*) FROM orders o JOIN customers c ... GROUP BY ...
/// ORDER BY ... LIMIT 10, with an uncorrelated subquery and an FK check.
pub fn build_report_plan<F: ExecFactory>(
    f: &mut F,
    cat: &MemoryCatalog,
) -> Result<F::Plan, F::Error> {
    let orders = table(cat, "orders");
    let customers = table(cat, "customers");

    let sub_scan = f.construct_scan(scan(&customers, "customers_pkey", 1))?;
    let sub = f.construct_max1_row(sub_scan, Max1RowArgs::default())?;

    let o = f.construct_scan(scan(&orders, "orders_customer_idx", 3))?;
    let o = f.construct_filter(
        o,
        FilterArgs {
            filter: ScalarExpr::new("o.total > 100"),
            ..Default::default()
        },
    )?;
    let c = f.construct_scan(scan(&customers, "customers_pkey", 2))?;
    let join = f.construct_hash_join(
        o,
        c,
        HashJoinArgs {
            join_type: JoinType::Inner,
            left_eq_cols: vec![1],
            right_eq_cols: vec![0],
            right_eq_cols_are_key: true,
            ..Default::default()
        },
    )?;
    let grouped = f.construct_group_by(
        join,
        GroupByArgs {
            group_cols: vec![3],
            aggregations: vec![AggInfo {
                func_name: "count_rows".into(),
                ..Default::default()
            }],
            grouping_order_type: GroupingOrderType::NoStreaming,
            ..Default::default()
        },
    )?;
    let sorted = f.construct_sort(grouped, SortArgs::default())?;
    let limited = f.construct_limit(
        sorted,
        LimitArgs {
            limit: Some(ScalarExpr::new("10")),
            offset: None,
        },
    )?;

    let check_scan = f.construct_scan(scan(&orders, "orders_pkey", 1))?;
    let check = f.construct_error_if_rows(
        check_scan,
        ErrorIfRowsArgs {
            error_text: "foreign key violation".into(),
        },
    )?;

    f.construct_plan(limited, vec![Subquery::new(sub)], vec![], vec![check], 10)
}
