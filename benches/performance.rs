use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use plangist::plangist_codec::{Decoder, PlanGistFactory};
use plangist::plangist_core::catalog::{MemoryCatalog, TableDesc, TableRef};
use plangist::plangist_operators::args::*;
use plangist::plangist_operators::{ExecFactory, StubFactory};

fn make_catalog(tables: u64) -> MemoryCatalog {
    let mut cat = MemoryCatalog::new();
    for id in 1..=tables {
        cat.insert_table(TableDesc::new(100 + id, format!("table_{}", id)).with_index(1, "pkey"));
    }
    cat
}

/// Left-deep chain of hash joins over `tables` scans.
fn encode_join_chain<F: ExecFactory>(f: &mut F, tables: &[TableRef]) -> Option<F::Node> {
    let mut acc: Option<F::Node> = None;
    for t in tables {
        let scan = f
            .construct_scan(ScanArgs {
                table: Some(Arc::clone(t)),
                index: t.indexes.first().cloned(),
                params: ScanParams {
                    needed_cols: ColumnSet::from_len(4),
                    ..Default::default()
                },
                ..Default::default()
            })
            .ok()?;
        let filtered = f.construct_filter(scan, FilterArgs::default()).ok()?;
        acc = Some(match acc {
            None => filtered,
            Some(left) => f
                .construct_hash_join(
                    left,
                    filtered,
                    HashJoinArgs {
                        left_eq_cols: vec![0],
                        right_eq_cols: vec![0],
                        ..Default::default()
                    },
                )
                .ok()?,
        });
    }
    acc
}

fn bench_gist(c: &mut Criterion) {
    let cat = make_catalog(32);
    let tables: Vec<TableRef> = (1..=32)
        .filter_map(|i| cat.table_by_name(&format!("table_{}", i)))
        .collect();

    c.bench_function("gist_encode_32_way_join", |b| {
        b.iter(|| {
            let mut f = PlanGistFactory::new(StubFactory);
            encode_join_chain(&mut f, &tables);
            f.into_plan_gist()
        })
    });

    let mut f = PlanGistFactory::new(StubFactory);
    encode_join_chain(&mut f, &tables);
    let gist = f.into_plan_gist();
    let decoder = Decoder::new(&cat);
    c.bench_function("gist_decode_32_way_join", |b| {
        b.iter(|| decoder.decode_str(gist.as_str()).unwrap())
    });
}

criterion_group!(gists, bench_gist);
criterion_main!(gists);
