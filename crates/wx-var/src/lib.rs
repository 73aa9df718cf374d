//! wx-var: meteorological variables for wxvar.
//!
//! A [`Var`] binds a value to a descriptor borrowed from a table. The value
//! is stored once in canonical form (scaled integer or text) and can be read
//! back as an integer, a real, a string or a dynamically typed [`Value`].
//!
//! # Example
//!
//! ```
//! use wx_table::{DescriptorTable, Vartable};
//! use wx_var::Var;
//!
//! let table = Vartable::get_bufr(24).unwrap();
//! let lat = Var::with_real(table.lookup("B05001").unwrap(), 12.4).unwrap();
//!
//! assert_eq!(lat.enq_int().unwrap(), 1_240_000);
//! assert_eq!(lat.to_string(), "12.40000");
//! assert_eq!(format!("{:?}", lat), "Var('B05001', 12.40000)");
//! ```

pub mod value;
pub mod var;

pub use value::Value;
pub use var::Var;
