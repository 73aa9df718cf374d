//! Process-wide builtin BUFR tables, one per supported master version.

use std::sync::OnceLock;

use wx_core::{WxError, WxResult};

use crate::catalog::bufr_catalog;
use crate::table::Vartable;

/// Oldest master table version served by [`bufr_table`].
pub const MIN_MASTER_VERSION: u8 = 11;
/// Newest master table version served by [`bufr_table`].
pub const MAX_MASTER_VERSION: u8 = 24;

static BUFR_TABLES: OnceLock<Vec<Vartable>> = OnceLock::new();

/// Identifier of the builtin table for a master version.
pub fn bufr_table_id(version: u8) -> String {
    format!("B0000000000000{:03}000", version)
}

fn build_bufr_table(version: u8) -> Vartable {
    let rows = bufr_catalog()
        .iter()
        .filter(|entry| entry.introduced <= version)
        .map(|entry| entry.to_spec());
    Vartable::from_entries(bufr_table_id(version), rows)
}

/// Shared read-only table for a BUFR master table version.
///
/// Tables are built once on first use and live for the rest of the process,
/// so variables borrowing from them can be `Var<'static>`.
pub fn bufr_table(version: u8) -> WxResult<&'static Vartable> {
    if !(MIN_MASTER_VERSION..=MAX_MASTER_VERSION).contains(&version) {
        return Err(WxError::UnknownTable { version });
    }
    let tables = BUFR_TABLES.get_or_init(|| {
        (MIN_MASTER_VERSION..=MAX_MASTER_VERSION)
            .map(build_bufr_table)
            .collect()
    });
    tables
        .get((version - MIN_MASTER_VERSION) as usize)
        .ok_or(WxError::UnknownTable { version })
}

impl Vartable {
    /// See [`bufr_table`].
    pub fn get_bufr(master_table_version: u8) -> WxResult<&'static Vartable> {
        bufr_table(master_table_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DescriptorTable;

    #[test]
    fn same_version_returns_same_instance() {
        let a = bufr_table(24).unwrap();
        let b = Vartable::get_bufr(24).unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.id(), "B0000000000000024000");
    }

    #[test]
    fn unsupported_versions_fail() {
        assert_eq!(
            bufr_table(MAX_MASTER_VERSION + 1).unwrap_err(),
            WxError::UnknownTable { version: 25 }
        );
        assert!(bufr_table(MIN_MASTER_VERSION - 1).is_err());
    }

    #[test]
    fn newer_rows_are_absent_from_older_tables() {
        let old = bufr_table(12).unwrap();
        let new = bufr_table(13).unwrap();
        assert!(old.lookup("B12101").is_err());
        assert_eq!(new.lookup("B12101").unwrap().scale(), 2);
        assert!(old.lookup("B05001").is_ok());
        assert!(old.len() < new.len());
    }
}
