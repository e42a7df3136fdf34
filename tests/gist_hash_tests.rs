//! Gist hashes fingerprint plan shape, not catalog ids.

mod common;

use std::sync::Arc;

use plangist::plangist_codec::{Decoder, PlanGistFactory};
use plangist::plangist_core::catalog::{MemoryCatalog, TableDesc};
use plangist::plangist_core::hash::Fnv64;
use plangist::plangist_operators::args::*;
use plangist::plangist_operators::{ExecFactory, OpArgs, Operator, StubFactory};

use common::*;

#[test]
fn test_hash_ignores_table_ids() {
    let a = catalog(53, 54);
    let b = catalog(104, 7);

    let mut fa = PlanGistFactory::gist_only();
    build_report_plan(&mut fa, &a).unwrap();
    let mut fb = PlanGistFactory::gist_only();
    build_report_plan(&mut fb, &b).unwrap();

    let (ga, gb) = (fa.plan_gist(), fb.plan_gist());
    assert_eq!(ga.hash(), gb.hash());
    assert_ne!(ga.as_str(), gb.as_str());
}

#[test]
fn test_hash_tracks_table_names() {
    let a = MemoryCatalog::new().with_table(TableDesc::new(53, "orders"));
    let b = MemoryCatalog::new().with_table(TableDesc::new(53, "invoices"));

    let gist_for = |cat: &MemoryCatalog, name: &str| {
        let mut f = PlanGistFactory::gist_only();
        f.construct_scan(ScanArgs {
            table: cat.table_by_name(name),
            ..Default::default()
        })
        .unwrap();
        f.into_plan_gist()
    };

    let ga = gist_for(&a, "orders");
    let gb = gist_for(&b, "invoices");
    assert_eq!(ga.as_str(), gb.as_str());
    assert_ne!(ga.hash(), gb.hash());
}

#[test]
fn test_hash_is_sensitive_to_shape() {
    let cat = catalog(53, 54);
    let orders = table(&cat, "orders");

    let sort_then_limit = {
        let mut f = PlanGistFactory::gist_only();
        let s = f.construct_scan(scan(&orders, "orders_pkey", 2)).unwrap();
        let s = f.construct_sort(s, SortArgs::default()).unwrap();
        f.construct_limit(s, LimitArgs::default()).unwrap();
        f.into_plan_gist()
    };
    let limit_then_sort = {
        let mut f = PlanGistFactory::gist_only();
        let s = f.construct_scan(scan(&orders, "orders_pkey", 2)).unwrap();
        let s = f.construct_limit(s, LimitArgs::default()).unwrap();
        f.construct_sort(s, SortArgs::default()).unwrap();
        f.into_plan_gist()
    };
    let wider_scan = {
        let mut f = PlanGistFactory::gist_only();
        let s = f.construct_scan(scan(&orders, "orders_pkey", 3)).unwrap();
        let s = f.construct_sort(s, SortArgs::default()).unwrap();
        f.construct_limit(s, LimitArgs::default()).unwrap();
        f.into_plan_gist()
    };
    let reversed = {
        let mut f = PlanGistFactory::gist_only();
        let mut args = scan(&orders, "orders_pkey", 2);
        args.params.reverse = true;
        let s = f.construct_scan(args).unwrap();
        let s = f.construct_sort(s, SortArgs::default()).unwrap();
        f.construct_limit(s, LimitArgs::default()).unwrap();
        f.into_plan_gist()
    };

    let hashes = [
        sort_then_limit.hash(),
        limit_then_sort.hash(),
        wider_scan.hash(),
        reversed.hash(),
    ];
    for (i, a) in hashes.iter().enumerate() {
        for b in &hashes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_literals_and_aliases_do_not_affect_the_gist() {
    let build = |filter: &str, alias: &str| {
        let mut f = PlanGistFactory::gist_only();
        let v = f
            .construct_values(ValuesArgs {
                rows: vec![vec![ScalarExpr::new(filter)]],
                columns: vec![ResultColumn::new(alias)],
            })
            .unwrap();
        f.construct_filter(
            v,
            FilterArgs {
                filter: ScalarExpr::new(filter),
                ..Default::default()
            },
        )
        .unwrap();
        f.into_plan_gist()
    };
    assert_eq!(build("x > 1", "a"), build("y < 99", "b"));
}

#[test]
fn test_concrete_scan_under_sort() {
    let t = Arc::new(TableDesc::new(5, "t"));
    let cat = MemoryCatalog::new().with_table((*t).clone());

    let mut f = PlanGistFactory::new(StubFactory);
    f.construct_scan(ScanArgs {
        table: Some(Arc::clone(&t)),
        ..Default::default()
    })
    .unwrap();
    // StubFactory hands out `()`, so the sort's input is just a token.
    f.construct_sort((), SortArgs::default()).unwrap();
    let gist = f.into_plan_gist();

    // version, Scan, table id 5, index id 0, six scan parameters, Sort,
    // already-ordered prefix, end of plan. The minimal form of this gist is
    // [version][Scan][5][Sort][end]; the index id, the six scan parameters
    // (needed columns, constraint spans, inverted spans, hard limit, reverse,
    // locking) and Sort's already-ordered prefix are the extra fields.
    let scan_params = [0u8; 6];
    let mut expected = vec![0x02, Operator::Scan.code(), 0x0a, 0x00];
    expected.extend_from_slice(&scan_params);
    expected.extend_from_slice(&[Operator::Sort.code(), 0x00, 0x00]);
    assert_eq!(gist.to_bytes().unwrap(), expected);

    // The hash sees the table's name instead of its id, nothing for the
    // missing index, and never the end-of-plan byte.
    let mut h = Fnv64::new();
    h.add_bytes(&[0x02, Operator::Scan.code()]);
    h.add_bytes(b"t");
    h.add_bytes(&scan_params);
    h.add_bytes(&[Operator::Sort.code(), 0x00]);
    assert_eq!(gist.hash(), h.sum());

    let plan = Decoder::new(&cat).decode_str(gist.as_str()).unwrap();
    assert_eq!(plan.root.op(), Operator::Sort);
    assert_eq!(plan.root.children().len(), 1);
    let OpArgs::Scan(scan) = plan.root.children()[0].args() else {
        panic!("expected scan under sort");
    };
    assert_eq!(scan.table.as_ref().unwrap().name, "t");
    assert!(scan.index.is_none());
}
