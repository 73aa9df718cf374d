//! wx-core: stable foundation for wxvar.
//!
//! Contains:
//! - varcode (packed F/X/Y descriptor codes + `B05001` text form)
//! - numeric (scaled-integer conversions, the shared numeric parser, tolerances)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod varcode;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WxError, WxResult};
pub use numeric::*;
pub use varcode::Varcode;
