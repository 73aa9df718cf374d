//! Descriptor lookup tables.

use std::collections::BTreeMap;

use wx_core::{Varcode, WxError, WxResult};

use crate::info::{Varinfo, VarinfoSpec};

/// Read-only lookup service from varcode to descriptor.
///
/// Implementations are never mutated after construction, so shared
/// references can be handed to any number of threads.
pub trait DescriptorTable: Send + Sync {
    /// Human-readable table identifier.
    fn id(&self) -> &str;

    /// Query a descriptor, failing with [`WxError::UnknownCode`] on a miss.
    fn query(&self, code: Varcode) -> WxResult<&Varinfo>;

    fn contains(&self, code: Varcode) -> bool;

    /// Parse a code like `B05001` and query it.
    ///
    /// Well-formed codes that no table can hold (e.g. `B99099`) are misses,
    /// not parse errors.
    fn lookup(&self, code: &str) -> WxResult<&Varinfo> {
        match Varcode::parse(code) {
            Ok(parsed) => self.query(parsed),
            Err(_) if Varcode::is_well_formed(code) => Err(WxError::UnknownCode {
                code: code.trim().to_ascii_uppercase(),
                table: self.id().to_string(),
            }),
            Err(err) => Err(err),
        }
    }

    /// Descriptor for `code` with scale and bit width overridden, as BUFR
    /// C-operators 201/202 require. Range and kind are recomputed.
    fn query_altered(&self, code: Varcode, scale: i32, bit_len: u32) -> WxResult<Varinfo> {
        Ok(self.query(code)?.altered(scale, bit_len))
    }
}

/// In-memory descriptor table keyed by varcode.
#[derive(Debug, Clone, Default)]
pub struct Vartable {
    id: String,
    entries: BTreeMap<Varcode, Varinfo>,
}

impl Vartable {
    /// Build a table from rows; a later row with the same code replaces the earlier one.
    pub fn from_entries(
        id: impl Into<String>,
        entries: impl IntoIterator<Item = VarinfoSpec>,
    ) -> Self {
        let id = id.into();
        let mut map = BTreeMap::new();
        for spec in entries {
            let code = spec.code;
            if map.insert(code, Varinfo::from(spec)).is_some() {
                tracing::warn!(table = %id, %code, "duplicate descriptor, keeping the later row");
            }
        }
        tracing::debug!(table = %id, entries = map.len(), "built descriptor table");
        Self { id, entries: map }
    }

    /// Descriptors in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Varinfo> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DescriptorTable for Vartable {
    fn id(&self) -> &str {
        &self.id
    }

    fn query(&self, code: Varcode) -> WxResult<&Varinfo> {
        self.entries.get(&code).ok_or_else(|| WxError::UnknownCode {
            code: code.to_string(),
            table: self.id.clone(),
        })
    }

    fn contains(&self, code: Varcode) -> bool {
        self.entries.contains_key(&code)
    }
}
