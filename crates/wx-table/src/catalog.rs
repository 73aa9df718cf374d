use wx_core::Varcode;

use crate::info::VarinfoSpec;

/// One row of the builtin WMO BUFR Table B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufrCatalogEntry {
    pub code: Varcode,
    pub desc: &'static str,
    pub unit: &'static str,
    pub scale: i32,
    pub len: u32,
    pub bit_ref: i32,
    pub bit_len: u32,
    /// First master table version carrying this row.
    pub introduced: u8,
}

impl BufrCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.code.to_string().to_ascii_lowercase().contains(&query)
            || self.desc.to_ascii_lowercase().contains(&query)
            || self.unit.to_ascii_lowercase().contains(&query)
    }

    pub fn to_spec(&self) -> VarinfoSpec {
        VarinfoSpec::new(self.code, self.unit)
            .desc(self.desc)
            .scale(self.scale)
            .len(self.len)
            .bits(self.bit_ref, self.bit_len)
    }
}

const fn b(
    x: u8,
    y: u8,
    desc: &'static str,
    unit: &'static str,
    scale: i32,
    bit_ref: i32,
    bit_len: u32,
    len: u32,
) -> BufrCatalogEntry {
    BufrCatalogEntry {
        code: Varcode::new(0, x, y),
        desc,
        unit,
        scale,
        len,
        bit_ref,
        bit_len,
        introduced: 0,
    }
}

const fn since(entry: BufrCatalogEntry, version: u8) -> BufrCatalogEntry {
    BufrCatalogEntry {
        introduced: version,
        ..entry
    }
}

// b(x, y, description, unit, scale, reference, bit width, digit width)
#[rustfmt::skip]
const BUFR_CATALOG: [BufrCatalogEntry; 24] = [
    b(1, 1, "WMO BLOCK NUMBER", "NUMERIC", 0, 0, 7, 2),
    b(1, 2, "WMO STATION NUMBER", "NUMERIC", 0, 0, 10, 3),
    b(1, 15, "STATION OR SITE NAME", "CCITTIA5", 0, 0, 160, 20),
    b(1, 19, "LONG STATION OR SITE NAME", "CCITTIA5", 0, 0, 256, 32),
    b(1, 23, "OBSERVATION SEQUENCE NUMBER", "NUMERIC", 0, 0, 9, 3),
    b(4, 1, "YEAR", "YEAR", 0, 0, 12, 4),
    b(4, 2, "MONTH", "MONTH", 0, 0, 4, 2),
    b(4, 3, "DAY", "DAY", 0, 0, 6, 2),
    b(4, 4, "HOUR", "HOUR", 0, 0, 5, 2),
    b(4, 5, "MINUTE", "MINUTE", 0, 0, 6, 2),
    b(4, 6, "SECOND", "SECOND", 0, 0, 6, 2),
    b(5, 1, "LATITUDE (HIGH ACCURACY)", "DEGREE", 5, -9_000_000, 25, 7),
    b(5, 2, "LATITUDE (COARSE ACCURACY)", "DEGREE", 2, -9_000, 15, 4),
    b(6, 1, "LONGITUDE (HIGH ACCURACY)", "DEGREE", 5, -18_000_000, 26, 8),
    b(6, 2, "LONGITUDE (COARSE ACCURACY)", "DEGREE", 2, -18_000, 16, 5),
    since(b(7, 30, "HEIGHT OF STATION GROUND ABOVE MEAN SEA LEVEL", "M", 1, -4_000, 17, 6), 13),
    b(10, 4, "PRESSURE", "PA", -1, 0, 14, 5),
    b(11, 1, "WIND DIRECTION", "DEGREE TRUE", 0, 0, 9, 3),
    b(11, 2, "WIND SPEED", "M/S", 1, 0, 12, 4),
    since(b(12, 101, "TEMPERATURE/AIR TEMPERATURE", "K", 2, 0, 16, 5), 13),
    since(b(12, 103, "DEWPOINT TEMPERATURE", "K", 2, 0, 16, 5), 13),
    b(13, 3, "RELATIVE HUMIDITY", "%", 0, 0, 7, 3),
    b(13, 11, "TOTAL PRECIPITATION / TOTAL WATER EQUIVALENT", "KG/M**2", 1, -1, 14, 5),
    b(33, 7, "PER CENT CONFIDENCE", "%", 0, 0, 7, 3),
];

pub fn bufr_catalog() -> &'static [BufrCatalogEntry] {
    &BUFR_CATALOG
}

pub fn filter_bufr_catalog(query: &str) -> Vec<BufrCatalogEntry> {
    bufr_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}
