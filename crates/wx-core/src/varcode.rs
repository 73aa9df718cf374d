use core::fmt;
use core::str::FromStr;

use crate::{WxError, WxResult};

/// Compact descriptor code, packed as F (2 bits), X (6 bits), Y (8 bits).
///
/// - `u16` keeps descriptors and variables small
/// - the packed order sorts codes the way the tables list them
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Varcode(u16);

const CLASS_LETTERS: [char; 4] = ['B', 'R', 'C', 'D'];

impl Varcode {
    /// Pack a code from its components. Bits beyond the field widths are dropped.
    pub const fn new(f: u8, x: u8, y: u8) -> Self {
        Self((((f & 0x03) as u16) << 14) | (((x & 0x3f) as u16) << 8) | y as u16)
    }

    /// Element class: 0 = B, 1 = R, 2 = C, 3 = D.
    pub const fn f(self) -> u8 {
        (self.0 >> 14) as u8
    }

    pub const fn x(self) -> u8 {
        ((self.0 >> 8) & 0x3f) as u8
    }

    pub const fn y(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Split text of the form `B05001` / `005001` into raw F, X, Y fields,
    /// without checking that X and Y fit the packed widths.
    fn split(text: &str) -> Option<(u8, u16, u16)> {
        let text = text.trim();
        if text.len() != 6 || !text.is_ascii() {
            return None;
        }

        let (head, rest) = text.split_at(1);
        let f = match head.as_bytes()[0].to_ascii_uppercase() {
            b'B' => 0,
            b'R' => 1,
            b'C' => 2,
            b'D' => 3,
            d @ b'0'..=b'3' => d - b'0',
            _ => return None,
        };

        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let x = rest[..2].parse().ok()?;
        let y = rest[2..].parse().ok()?;
        Some((f, x, y))
    }

    /// True if `text` has the shape of a code, even one that cannot be packed.
    pub fn is_well_formed(text: &str) -> bool {
        Self::split(text).is_some()
    }

    /// Parse `B05001` (letter form) or `005001` (all-digit form).
    pub fn parse(text: &str) -> WxResult<Self> {
        match Self::split(text) {
            Some((f, x, y)) if x <= 63 && y <= 255 => Ok(Self::new(f, x as u8, y as u8)),
            _ => Err(WxError::parse(text.trim(), "varcode")),
        }
    }
}

impl FromStr for Varcode {
    type Err = WxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Varcode::parse(s)
    }
}

impl fmt::Debug for Varcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Varcode({})", self)
    }
}

impl fmt::Display for Varcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{:03}",
            CLASS_LETTERS[self.f() as usize],
            self.x(),
            self.y()
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Varcode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Varcode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Varcode::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_normalized() {
        assert_eq!(Varcode::new(0, 5, 1).to_string(), "B05001");
        assert_eq!(Varcode::new(3, 1, 11).to_string(), "D01011");
        assert_eq!(Varcode::new(2, 63, 255).to_string(), "C63255");
    }

    #[test]
    fn parse_letter_and_digit_forms() {
        let code = Varcode::parse("B05001").unwrap();
        assert_eq!((code.f(), code.x(), code.y()), (0, 5, 1));
        assert_eq!(Varcode::parse(" b05001 ").unwrap(), code);
        assert_eq!(Varcode::parse("005001").unwrap(), code);
        assert_eq!("R01002".parse::<Varcode>().unwrap(), Varcode::new(1, 1, 2));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "B5001", "B050011", "X05001", "B64001", "B01256", "4050001", "B0500a"] {
            assert!(Varcode::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn out_of_range_fields_are_well_formed() {
        for text in ["B64001", "B01256", "B99099"] {
            assert!(Varcode::is_well_formed(text));
            assert!(Varcode::parse(text).is_err());
        }
        assert!(!Varcode::is_well_formed("B5001"));
        assert!(!Varcode::is_well_formed("X05001"));
    }

    #[test]
    fn ordering_follows_table_order() {
        let a = Varcode::parse("B01001").unwrap();
        let b = Varcode::parse("B01002").unwrap();
        let c = Varcode::parse("B05001").unwrap();
        assert!(a < b && b < c);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_string_form() {
        let code = Varcode::new(0, 12, 101);
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"B12101\"");
        let back: Varcode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
    }
}
