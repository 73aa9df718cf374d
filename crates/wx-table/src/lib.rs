//! wx-table: variable descriptors and descriptor tables for wxvar.
//!
//! Provides:
//! - `Varinfo`: immutable descriptor (code, unit, scale, widths, semantic kind)
//! - `DescriptorTable`: the lookup contract variables are built against
//! - `Vartable`: in-memory table, plus builtin WMO BUFR tables by master version
//!
//! # Example
//!
//! ```
//! use wx_table::{DescriptorTable, VarKind, Vartable};
//!
//! let table = Vartable::get_bufr(24).unwrap();
//! let info = table.lookup("B05001").unwrap();
//! assert_eq!(info.scale(), 5);
//! assert_eq!(info.kind(), VarKind::Decimal);
//! ```

pub mod catalog;
pub mod info;
pub mod registry;
pub mod table;

// Re-exports for ergonomics
pub use catalog::{BufrCatalogEntry, bufr_catalog, filter_bufr_catalog};
pub use info::{VarKind, Varinfo, VarinfoSpec};
pub use registry::{MAX_MASTER_VERSION, MIN_MASTER_VERSION, bufr_table, bufr_table_id};
pub use table::{DescriptorTable, Vartable};
