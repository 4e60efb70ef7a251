use serde::Deserialize;
use serde_json::Value;

use packstore_catalog::PackSort;
use packstore_core::PackId;

/// Query string of `GET /api/packs`.
#[derive(Debug, Default, Deserialize)]
pub struct ListPacksQuery {
    pub sort: Option<String>,
}

impl ListPacksQuery {
    /// Unknown sort keys fall back to insertion order.
    pub fn sort(&self) -> Option<PackSort> {
        self.sort.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Resolve `packId` from a checkout body.
///
/// Accepts an integer or a numeric string. Anything else resolves to no pack.
pub fn checkout_pack_id(body: &Value) -> Option<PackId> {
    match body.get("packId")? {
        Value::Number(n) => match n.as_u64() {
            Some(raw) => PackId::new(raw),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u64::MAX as f64)
                .and_then(|f| PackId::new(f as u64)),
        },
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
