//! Variable descriptors (one B-table row).

use core::fmt;

use wx_core::{Real, Varcode, WxError, WxResult, scale_real, unscale_int};

/// Semantic class of a descriptor, fixed when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Scale 0 numeric: surfaces as an integer
    Integer,
    /// Scaled numeric: surfaces as a real
    Decimal,
    /// Character data, stored verbatim
    String,
}

impl VarKind {
    /// Classify a row from its unit and scale.
    pub fn classify(unit: &str, scale: i32) -> Self {
        let unit = unit.trim();
        if unit.eq_ignore_ascii_case("CCITTIA5") || unit.eq_ignore_ascii_case("CHARACTER") {
            VarKind::String
        } else if scale != 0 {
            VarKind::Decimal
        } else {
            VarKind::Integer
        }
    }
}

/// Plain table row, as an external loader would produce it.
///
/// Also serves as the builder for [`Varinfo`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarinfoSpec {
    pub code: Varcode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub desc: String,
    pub unit: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub len: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bit_ref: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bit_len: u32,
}

impl VarinfoSpec {
    pub fn new(code: Varcode, unit: impl Into<String>) -> Self {
        Self {
            code,
            desc: String::new(),
            unit: unit.into(),
            scale: 0,
            len: 0,
            bit_ref: 0,
            bit_len: 0,
        }
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn len(mut self, len: u32) -> Self {
        self.len = len;
        self
    }

    /// BUFR binary encoding: reference value and bit width.
    pub fn bits(mut self, bit_ref: i32, bit_len: u32) -> Self {
        self.bit_ref = bit_ref;
        self.bit_len = bit_len;
        self
    }

    pub fn build(self) -> Varinfo {
        Varinfo::from(self)
    }
}

/// Immutable descriptor for one variable code.
///
/// Owned by a table; variables hold `&Varinfo` borrowed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Varinfo {
    code: Varcode,
    desc: String,
    unit: String,
    scale: i32,
    len: u32,
    bit_ref: i32,
    bit_len: u32,
    kind: VarKind,
    imin: i32,
    imax: i32,
}

impl From<VarinfoSpec> for Varinfo {
    fn from(spec: VarinfoSpec) -> Self {
        let kind = VarKind::classify(&spec.unit, spec.scale);
        let (imin, imax) = compute_range(kind, spec.len, spec.bit_ref, spec.bit_len);
        Self {
            code: spec.code,
            desc: spec.desc,
            unit: spec.unit,
            scale: spec.scale,
            len: spec.len,
            bit_ref: spec.bit_ref,
            bit_len: spec.bit_len,
            kind,
            imin,
            imax,
        }
    }
}

/// Intersect the decimal digit bound with the BUFR binary bound.
fn compute_range(kind: VarKind, len: u32, bit_ref: i32, bit_len: u32) -> (i32, i32) {
    if kind == VarKind::String {
        return (0, 0);
    }

    let (mut lo, mut hi) = if len == 0 || len >= 10 {
        (i32::MIN as i64, i32::MAX as i64)
    } else {
        let digits = 10_i64.pow(len) - 1;
        (-digits, digits)
    };

    if bit_len > 0 && bit_len < 32 {
        // All ones is reserved for the missing value.
        let bit_min = bit_ref as i64;
        let bit_max = bit_ref as i64 + (1_i64 << bit_len) - 2;
        lo = lo.max(bit_min);
        hi = hi.min(bit_max);
    }

    (
        lo.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        hi.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
    )
}

impl Varinfo {
    pub fn builder(code: Varcode, unit: impl Into<String>) -> VarinfoSpec {
        VarinfoSpec::new(code, unit)
    }

    pub fn code(&self) -> Varcode {
        self.code
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Number of implied decimal digits.
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Digit count for numerics, character count for strings.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn bit_ref(&self) -> i32 {
        self.bit_ref
    }

    pub fn bit_len(&self) -> u32 {
        self.bit_len
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn is_string(&self) -> bool {
        self.kind == VarKind::String
    }

    pub fn imin(&self) -> i32 {
        self.imin
    }

    pub fn imax(&self) -> i32 {
        self.imax
    }

    pub fn dmin(&self) -> Real {
        self.decode_decimal(self.imin)
    }

    pub fn dmax(&self) -> Real {
        self.decode_decimal(self.imax)
    }

    /// Copy of this descriptor with a different scale and bit width.
    ///
    /// A changed bit width also resizes the digit width to the decimal
    /// digits needed for `2^bit_len`.
    pub fn altered(&self, scale: i32, bit_len: u32) -> Varinfo {
        let len = if bit_len != self.bit_len && bit_len > 0 {
            (bit_len as Real * core::f64::consts::LOG10_2).ceil() as u32
        } else {
            self.len
        };
        VarinfoSpec::new(self.code, self.unit.clone())
            .desc(self.desc.clone())
            .scale(scale)
            .len(len)
            .bits(self.bit_ref, bit_len)
            .build()
    }

    /// Check a scaled integer against the descriptor range, narrowing it to `i32`.
    pub fn check_range(&self, raw: i64) -> WxResult<i32> {
        if self.is_string() || raw < self.imin as i64 || raw > self.imax as i64 {
            return Err(self.range_error(raw));
        }
        Ok(raw as i32)
    }

    /// Real value to range-checked scaled integer.
    pub fn encode_decimal(&self, value: Real) -> WxResult<i32> {
        if self.is_string() {
            return Err(WxError::TypeMismatch {
                code: self.code.to_string(),
                what: "real value for a string descriptor",
            });
        }
        let raw = scale_real(value, self.scale).ok_or_else(|| self.range_error(value))?;
        self.check_range(raw)
    }

    /// Scaled integer to real value.
    pub fn decode_decimal(&self, raw: i32) -> Real {
        unscale_int(raw as i64, self.scale)
    }

    fn range_error(&self, value: impl fmt::Display) -> WxError {
        WxError::Range {
            code: self.code.to_string(),
            value: value.to_string(),
            min: self.imin as i64,
            max: self.imax as i64,
        }
    }
}

impl fmt::Display for Varinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.code, self.desc, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(text: &str) -> Varcode {
        Varcode::parse(text).unwrap()
    }

    fn latitude() -> Varinfo {
        Varinfo::builder(code("B05001"), "DEGREE")
            .desc("LATITUDE (HIGH ACCURACY)")
            .scale(5)
            .len(7)
            .bits(-9_000_000, 25)
            .build()
    }

    #[test]
    fn classify_kinds() {
        assert_eq!(VarKind::classify("CCITTIA5", 0), VarKind::String);
        assert_eq!(VarKind::classify("Character", 0), VarKind::String);
        assert_eq!(VarKind::classify("DEGREE", 5), VarKind::Decimal);
        assert_eq!(VarKind::classify("PA", -1), VarKind::Decimal);
        assert_eq!(VarKind::classify("NUMERIC", 0), VarKind::Integer);
    }

    #[test]
    fn numeric_range_intersects_digits_and_bits() {
        let info = latitude();
        assert_eq!(info.imin(), -9_000_000);
        assert_eq!(info.imax(), 9_999_999);
        assert_eq!(info.dmin(), -90.0);

        let block = Varinfo::builder(code("B01001"), "NUMERIC")
            .len(2)
            .bits(0, 7)
            .build();
        assert_eq!((block.imin(), block.imax()), (0, 99));

        let wide = Varinfo::builder(code("B07030"), "M").scale(1).build();
        assert_eq!((wide.imin(), wide.imax()), (i32::MIN, i32::MAX));
    }

    #[test]
    fn encode_decimal_rounds_and_checks() {
        let info = latitude();
        assert_eq!(info.encode_decimal(12.4).unwrap(), 1_240_000);
        assert_eq!(info.encode_decimal(-90.0).unwrap(), -9_000_000);
        assert!(matches!(
            info.encode_decimal(-90.00001),
            Err(WxError::Range { .. })
        ));
        assert!(matches!(
            info.encode_decimal(f64::NAN),
            Err(WxError::Range { .. })
        ));
    }

    #[test]
    fn altered_descriptor_recomputes_kind_and_range() {
        let block = Varinfo::builder(code("B01001"), "NUMERIC")
            .len(2)
            .bits(0, 7)
            .build();

        let rescaled = block.altered(2, 7);
        assert_eq!(rescaled.kind(), VarKind::Decimal);
        assert_eq!(rescaled.len(), 2);
        assert_eq!((rescaled.imin(), rescaled.imax()), (0, 99));

        let widened = latitude().altered(5, 28);
        assert_eq!(widened.len(), 9);
        assert_eq!(widened.imin(), -9_000_000);
        assert_eq!(widened.imax(), -9_000_000 + (1 << 28) - 2);
        assert_eq!(widened.desc(), "LATITUDE (HIGH ACCURACY)");
    }

    #[test]
    fn string_descriptor_rejects_reals() {
        let info = Varinfo::builder(code("B01019"), "CCITTIA5").len(32).build();
        assert!(info.is_string());
        assert!(matches!(
            info.encode_decimal(1.0),
            Err(WxError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn display_shows_code_and_unit() {
        assert_eq!(
            latitude().to_string(),
            "B05001 LATITUDE (HIGH ACCURACY) [DEGREE]"
        );
    }
}
