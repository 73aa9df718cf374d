//! Variables: a value bound to a table descriptor.
//!
//! # Storage
//!
//! A variable keeps exactly one canonical value:
//! - numeric descriptors store the scaled integer (`real * 10^scale`)
//! - string descriptors store the text verbatim
//!
//! Every other representation is derived on read, so reading a value back
//! through the same scale reproduces the stored integer exactly.

use core::fmt;

use wx_core::{Real, Varcode, WxError, WxResult, parse_int, parse_real};
use wx_table::{DescriptorTable, VarKind, Varinfo};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Raw {
    Unset,
    Int(i32),
    Text(String),
}

/// A meteorological variable.
///
/// Borrows its descriptor from a table, which must outlive the variable.
/// Builtin tables are `'static`.
#[derive(Clone)]
pub struct Var<'t> {
    info: &'t Varinfo,
    raw: Raw,
    attrs: Vec<Var<'t>>,
}

impl<'t> Var<'t> {
    /// Unset variable.
    pub fn new(info: &'t Varinfo) -> Self {
        Self {
            info,
            raw: Raw::Unset,
            attrs: Vec::new(),
        }
    }

    /// Unset variable for a code looked up in `table`.
    pub fn lookup<T>(table: &'t T, code: &str) -> WxResult<Self>
    where
        T: DescriptorTable + ?Sized,
    {
        Ok(Self::new(table.lookup(code)?))
    }

    /// Variable holding a value already expressed in scaled-integer units.
    pub fn with_int(info: &'t Varinfo, value: i32) -> WxResult<Self> {
        let mut var = Self::new(info);
        var.set_int(value)?;
        Ok(var)
    }

    /// Variable holding a real value, scaled and rounded half away from zero.
    pub fn with_real(info: &'t Varinfo, value: Real) -> WxResult<Self> {
        let mut var = Self::new(info);
        var.set_real(value)?;
        Ok(var)
    }

    /// Variable holding text: verbatim for strings, an integer literal otherwise.
    pub fn with_text(info: &'t Varinfo, value: &str) -> WxResult<Self> {
        let mut var = Self::new(info);
        var.set_text(value)?;
        Ok(var)
    }

    pub fn with_value(info: &'t Varinfo, value: Value) -> WxResult<Self> {
        let mut var = Self::new(info);
        var.set_value(value)?;
        Ok(var)
    }

    pub fn code(&self) -> Varcode {
        self.info.code()
    }

    pub fn info(&self) -> &'t Varinfo {
        self.info
    }

    pub fn is_set(&self) -> bool {
        self.raw != Raw::Unset
    }

    // Setters. On error the previous value is left untouched.

    pub fn set_int(&mut self, value: i32) -> WxResult<()> {
        self.raw = if self.info.is_string() {
            Raw::Text(self.fit_text(&value.to_string()))
        } else {
            Raw::Int(self.info.check_range(value as i64)?)
        };
        Ok(())
    }

    pub fn set_real(&mut self, value: Real) -> WxResult<()> {
        self.raw = Raw::Int(self.info.encode_decimal(value)?);
        Ok(())
    }

    pub fn set_text(&mut self, value: &str) -> WxResult<()> {
        self.raw = if self.info.is_string() {
            Raw::Text(self.fit_text(value))
        } else {
            Raw::Int(self.info.check_range(parse_int(value)?)?)
        };
        Ok(())
    }

    pub fn set_value(&mut self, value: Value) -> WxResult<()> {
        match value {
            Value::Integer(v) => self.set_int(v),
            Value::Real(v) => self.set_real(v),
            Value::Text(s) => self.set_text(&s),
        }
    }

    pub fn unset(&mut self) {
        self.raw = Raw::Unset;
    }

    /// Copy the value (not the attributes) of another variable, converting
    /// between descriptors.
    ///
    /// Numeric values are rescaled through their real value when the scales
    /// differ.
    pub fn set_from(&mut self, other: &Var<'_>) -> WxResult<()> {
        match &other.raw {
            Raw::Unset => self.unset(),
            Raw::Text(s) => self.set_text(s)?,
            Raw::Int(v) if self.info.is_string() => {
                self.raw = Raw::Text(self.fit_text(&v.to_string()));
            }
            Raw::Int(v) if self.info.scale() == other.info.scale() => {
                self.raw = Raw::Int(self.info.check_range(*v as i64)?);
            }
            Raw::Int(v) => self.set_real(other.info.decode_decimal(*v))?,
        }
        Ok(())
    }

    fn fit_text(&self, value: &str) -> String {
        let len = self.info.len() as usize;
        if len == 0 || value.chars().count() <= len {
            return value.to_string();
        }
        tracing::debug!(code = %self.code(), len, "truncating string value");
        value.chars().take(len).collect()
    }

    // Accessors

    fn unset_error(&self) -> WxError {
        WxError::Unset {
            code: self.code().to_string(),
        }
    }

    /// Scaled integer value; string values are parsed as integer literals.
    pub fn enq_int(&self) -> WxResult<i32> {
        match &self.raw {
            Raw::Unset => Err(self.unset_error()),
            Raw::Int(v) => Ok(*v),
            Raw::Text(s) => {
                i32::try_from(parse_int(s)?).map_err(|_| WxError::Parse {
                    text: s.clone(),
                    what: "32-bit integer",
                })
            }
        }
    }

    /// Real value (`raw / 10^scale`); string values are parsed as reals.
    pub fn enq_real(&self) -> WxResult<Real> {
        match &self.raw {
            Raw::Unset => Err(self.unset_error()),
            Raw::Int(v) => Ok(self.info.decode_decimal(*v)),
            Raw::Text(s) => parse_real(s),
        }
    }

    /// Text value. Numeric values render as the digits of the scaled integer.
    pub fn enq_string(&self) -> WxResult<String> {
        match &self.raw {
            Raw::Unset => Err(self.unset_error()),
            Raw::Int(v) => Ok(v.to_string()),
            Raw::Text(s) => Ok(s.clone()),
        }
    }

    /// Value in the representation the descriptor kind calls for.
    pub fn enq_dynamic(&self) -> WxResult<Value> {
        self.get().ok_or_else(|| self.unset_error())
    }

    /// Like [`Var::enq_dynamic`], with `None` for an unset variable.
    pub fn get(&self) -> Option<Value> {
        match &self.raw {
            Raw::Unset => None,
            Raw::Int(v) => Some(match self.info.kind() {
                VarKind::Decimal => Value::Real(self.info.decode_decimal(*v)),
                _ => Value::Integer(*v),
            }),
            Raw::Text(s) => Some(Value::Text(s.clone())),
        }
    }

    /// Like [`Var::get`], returning `default` for an unset variable.
    pub fn get_or(&self, default: Value) -> Value {
        self.get().unwrap_or(default)
    }

    /// Formatted value, or `fallback` when unset.
    pub fn format(&self, fallback: &str) -> String {
        if self.is_set() {
            self.to_string()
        } else {
            fallback.to_string()
        }
    }

    // Attributes

    /// Attach an attribute, replacing any with the same code.
    ///
    /// Attributes are kept sorted by code and cannot carry attributes themselves.
    pub fn set_attr(&mut self, mut attr: Var<'t>) {
        attr.attrs.clear();
        match self.attrs.binary_search_by_key(&attr.code(), Var::code) {
            Ok(pos) => self.attrs[pos] = attr,
            Err(pos) => self.attrs.insert(pos, attr),
        }
    }

    pub fn attr(&self, code: Varcode) -> Option<&Var<'t>> {
        self.attrs
            .binary_search_by_key(&code, Var::code)
            .ok()
            .map(|pos| &self.attrs[pos])
    }

    /// Remove and return the attribute with this code.
    pub fn unset_attr(&mut self, code: Varcode) -> Option<Var<'t>> {
        let pos = self.attrs.binary_search_by_key(&code, Var::code).ok()?;
        Some(self.attrs.remove(pos))
    }

    pub fn clear_attrs(&mut self) {
        self.attrs.clear();
    }

    pub fn attrs(&self) -> impl Iterator<Item = &Var<'t>> {
        self.attrs.iter()
    }
}

impl PartialEq for Var<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code() && self.raw == other.raw
    }
}

impl Eq for Var<'_> {}

impl fmt::Display for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Raw::Unset => f.write_str("None"),
            Raw::Int(v) if self.info.kind() == VarKind::Decimal => {
                let decimals = self.info.scale().max(0) as usize;
                write!(f, "{:.*}", decimals, self.info.decode_decimal(*v))
            }
            Raw::Int(v) => write!(f, "{}", v),
            Raw::Text(s) => f.write_str(s),
        }
    }
}

impl fmt::Debug for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Raw::Text(s) => {
                let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
                write!(f, "Var('{}', '{}')", self.code(), escaped)
            }
            _ => write!(f, "Var('{}', {})", self.code(), self),
        }
    }
}
