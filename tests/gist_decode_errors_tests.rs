//! Decoding against stale catalogs and corrupt input.

mod common;

use plangist::plangist_codec::{decode_plan_gist, DecodeError, Decoder, PlanGistFactory};
use plangist::plangist_core::config::GistConfig;
use plangist::plangist_core::id::StableId;
use plangist::plangist_operators::{OpArgs, Operator};
use proptest::prelude::*;

use common::*;

fn report_gist_bytes() -> Vec<u8> {
    let cat = catalog(53, 54);
    let mut f = PlanGistFactory::gist_only();
    build_report_plan(&mut f, &cat).unwrap();
    f.plan_gist().to_bytes().unwrap()
}

#[test]
fn test_version_mismatch_is_reported_before_anything_else() {
    let mut bytes = report_gist_bytes();
    bytes[0] = 0x04; // version 2
    let err = Decoder::new(&catalog(53, 54))
        .decode_bytes(&bytes)
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnsupportedVersion {
            found: 2,
            expected: 1
        }
    );

    // Garbage after a bad version is never looked at.
    let err = Decoder::new(&catalog(53, 54))
        .decode_bytes(&[0x04, 0xff, 0xff])
        .unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedVersion { .. }));
}

#[test]
fn test_dropped_table_decodes_as_unknown() {
    let bytes = report_gist_bytes();
    let mut stale = catalog(53, 54);
    stale.remove_table(StableId::new(53));

    let plan = Decoder::new(&stale).decode_bytes(&bytes).unwrap();
    assert_eq!(plan.root.op(), Operator::Limit);
    assert_eq!(plan.node_count(), 11);

    let join = &plan.root.children()[0].children()[0].children()[0];
    let OpArgs::Scan(orders) = join.children()[0].children()[0].args() else {
        panic!("expected scan");
    };
    assert!(orders.table.is_none());
    assert!(orders.index.is_none());
    assert_eq!(orders.params.needed_cols.len(), 3);

    let OpArgs::Scan(customers) = join.children()[1].args() else {
        panic!("expected scan");
    };
    assert_eq!(customers.table.as_ref().unwrap().name, "customers");
}

#[test]
fn test_empty_catalog_still_decodes_every_node() {
    let bytes = report_gist_bytes();
    let plan = Decoder::new(&plangist::MemoryCatalog::new())
        .decode_bytes(&bytes)
        .unwrap();
    assert_eq!(plan.node_count(), 11);
    assert_eq!(plan.checks.len(), 1);
    assert_eq!(plan.subqueries.len(), 1);
}

#[test]
fn test_truncated_gist_is_reported() {
    let bytes = report_gist_bytes();
    // Cut inside the first scan payload.
    let err = Decoder::new(&catalog(53, 54))
        .decode_bytes(&bytes[..4])
        .unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEof { .. }), "{err}");
}

#[test]
fn test_unknown_opcode_is_reported() {
    let err = decode_plan_gist("AmQA", &catalog(53, 54)).unwrap_err();
    assert_eq!(
        err,
        DecodeError::UnknownOperator {
            code: 100,
            offset: 1
        }
    );
    assert_eq!(err.to_string(), "unknown operator code 100 at byte 1");
}

#[test]
fn test_trailing_bytes_after_sentinel_are_ignored() {
    let mut bytes = report_gist_bytes();
    let expected = Decoder::new(&catalog(53, 54)).decode_bytes(&bytes).unwrap();
    bytes.extend_from_slice(&[0xff, 0x01, 0x02]);
    let plan = Decoder::new(&catalog(53, 54)).decode_bytes(&bytes).unwrap();
    assert_eq!(plan, expected);
}

#[test]
fn test_oversized_lists_are_rejected() {
    let cat = catalog(53, 54);
    let cfg = GistConfig {
        max_list_len: 2,
        ..GistConfig::default()
    };
    let err = Decoder::with_config(&cat, cfg)
        .decode_bytes(&report_gist_bytes())
        .unwrap_err();
    assert!(matches!(err, DecodeError::ListTooLong { limit: 2, .. }), "{err}");
}

#[test]
fn test_deeply_nested_gist_is_rejected_with_default_limits() {
    // Scan with an all-zero payload under 60 000 Filters.
    let mut bytes = vec![0x02, Operator::Scan.code()];
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend(std::iter::repeat(Operator::Filter.code()).take(60_000));
    bytes.push(0x00);

    let err = Decoder::new(&plangist::MemoryCatalog::new())
        .decode_bytes(&bytes)
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::TooDeep {
            limit: GistConfig::default().max_depth
        }
    );
}

#[test]
fn test_nesting_up_to_the_depth_limit_decodes() {
    let cfg = GistConfig {
        max_depth: 50,
        ..GistConfig::default()
    };
    let mut bytes = vec![0x02, Operator::Scan.code()];
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend(std::iter::repeat(Operator::Filter.code()).take(49));
    let cat = plangist::MemoryCatalog::new();
    let plan = Decoder::with_config(&cat, cfg.clone())
        .decode_bytes(&bytes)
        .unwrap();
    assert_eq!(plan.node_count(), 50);

    bytes.push(Operator::Filter.code());
    let err = Decoder::with_config(&cat, cfg).decode_bytes(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::TooDeep { limit: 50 });
}

#[test]
fn test_many_maximal_lists_exhaust_the_element_budget() {
    // 300 Values records, each claiming the largest allowed row and column
    // counts: a couple of kilobytes of input asking for ~39M elements.
    let max = GistConfig::default().max_list_len as i64;
    let mut bytes = vec![0x02];
    for _ in 0..300 {
        bytes.push(Operator::Values.code());
        plangist::plangist_core::varint::append_varint(&mut bytes, max);
        plangist::plangist_core::varint::append_varint(&mut bytes, max);
    }
    bytes.push(0x00);
    assert!(bytes.len() < 2_200);

    let err = Decoder::new(&plangist::MemoryCatalog::new())
        .decode_bytes(&bytes)
        .unwrap_err();
    // Each record is 7 bytes and takes 2 * 65 536 elements, so eight records
    // use the whole default budget and the ninth record's row count fails.
    assert_eq!(
        err,
        DecodeError::ListBudgetExceeded {
            limit: GistConfig::default().max_list_elems,
            offset: 1 + 8 * 7 + 1,
        }
    );
}

proptest! {
    #[test]
    fn prop_arbitrary_bytes_never_panic(body in prop::collection::vec(any::<u8>(), 0..256)) {
        let cat = catalog(53, 54);
        let cfg = GistConfig { max_list_len: 64, ..GistConfig::default() };
        let decoder = Decoder::with_config(&cat, cfg);

        let _ = decoder.decode_bytes(&body);

        let mut versioned = vec![0x02];
        versioned.extend_from_slice(&body);
        if let Ok(plan) = decoder.decode_bytes(&versioned) {
            prop_assert!(plan.node_count() >= 1);
        }
    }

    #[test]
    fn prop_single_byte_corruption_never_panics(pos in 1usize..64, byte in any::<u8>()) {
        let mut bytes = report_gist_bytes();
        let pos = pos % bytes.len();
        bytes[pos] = byte;
        let cat = catalog(53, 54);
        let _ = Decoder::new(&cat).decode_bytes(&bytes);
    }
}
