//! Integration tests for wx-table.

use wx_core::{Varcode, WxError};
use wx_table::{DescriptorTable, VarKind, Varinfo, Vartable, bufr_table};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn builtin_table_kinds() {
    init_tracing();
    let table = bufr_table(24).unwrap();

    let block = table.lookup("B01001").unwrap();
    assert_eq!(block.kind(), VarKind::Integer);
    assert_eq!(block.desc(), "WMO BLOCK NUMBER");

    let lat = table.lookup("B05001").unwrap();
    assert_eq!(lat.kind(), VarKind::Decimal);
    assert_eq!(lat.scale(), 5);
    assert_eq!(lat.unit(), "DEGREE");

    let name = table.lookup("B01019").unwrap();
    assert_eq!(name.kind(), VarKind::String);
    assert_eq!(name.len(), 32);

    let pressure = table.lookup("B10004").unwrap();
    assert_eq!(pressure.kind(), VarKind::Decimal);
    assert_eq!(pressure.scale(), -1);
}

#[test]
fn lookup_miss_is_unknown_code() {
    let table = bufr_table(24).unwrap();
    match table.lookup("B99099") {
        Err(WxError::UnknownCode { code, table }) => {
            assert_eq!(code, "B99099");
            assert_eq!(table, "B0000000000000024000");
        }
        other => panic!("unexpected lookup result: {:?}", other),
    }
}

#[test]
fn tables_are_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let table = bufr_table(24).unwrap();
                table.lookup("B12101").unwrap().scale()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}

#[test]
fn custom_table_through_trait_object() {
    init_tracing();
    let code = Varcode::parse("B33007").unwrap();
    let table: Box<dyn DescriptorTable> = Box::new(Vartable::from_entries(
        "local",
        [Varinfo::builder(code, "%").desc("PER CENT CONFIDENCE").len(3).bits(0, 7)],
    ));
    assert_eq!(table.id(), "local");
    assert!(table.contains(code));
    assert_eq!(table.query(code).unwrap().imax(), 126);
}

#[cfg(feature = "serde")]
#[test]
fn table_rows_from_json() {
    use wx_table::VarinfoSpec;

    let json = r#"[
        {"code": "B05001", "desc": "LATITUDE (HIGH ACCURACY)", "unit": "DEGREE",
         "scale": 5, "len": 7, "bit_ref": -9000000, "bit_len": 25},
        {"code": "B01019", "unit": "CCITTIA5", "len": 32}
    ]"#;
    let rows: Vec<VarinfoSpec> = serde_json::from_str(json).unwrap();
    let table = Vartable::from_entries("json", rows);
    assert_eq!(table.lookup("B05001").unwrap().imin(), -9_000_000);
    assert!(table.lookup("B01019").unwrap().is_string());
}
