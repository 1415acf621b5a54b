// SmartZone public API response types
//
// All list endpoints share the `{ totalCount, hasMore, firstIndex, list }`
// envelope. Records use `Option` liberally because the controller returns
// `null` for anything it has not configured, and the set of populated fields
// shifts between firmware releases.

mod ap;
mod controller;
mod zone;

pub use ap::{Ap, ApQueryRecord, ApSummary, ApUpdate, LinkState, LldpNeighbor, PortStatus};
pub(crate) use ap::PortStatusResponse;
pub use controller::ControllerInfo;
pub use zone::{
    Altitude, ApGroup, ApGroupMember, ApLatencyInterval, ApLogin, ApMgmtVlan, ApRebootTimeout,
    AutoChannelSelection, BackgroundScanning, BandBalancing, DhcpSiteConfig, LteBandLockChannel,
    ProfileRef, RecoverySsid, Rogue, SnmpAgent, Timezone, Wifi24Radio, Wifi50Radio, Zone,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// ── List envelope ────────────────────────────────────────────────────

/// Standard SmartZone list envelope.
///
/// ```json
/// { "totalCount": 237, "hasMore": true, "firstIndex": 0, "list": [...] }
/// ```
///
/// `has_more` is the only signal used to decide whether another page exists.
/// `hasMore` and `list` are required: a body without them is not a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default)]
    pub total_count: u64,
    pub has_more: bool,
    #[serde(default)]
    pub first_index: u64,
    pub list: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Index one past the last entry of this page when the server is consistent.
    pub fn end_index(&self) -> u64 {
        self.first_index
            .saturating_add(u64::try_from(self.list.len()).unwrap_or(u64::MAX))
    }
}

/// `{ id, name }` pair returned by zone and AP group listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedObject {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ── Unmodelled vendor values ─────────────────────────────────────────

/// A vendor field that is present but whose shape is not modelled.
///
/// Wrapped in `Option` on every record: JSON `null` or an absent key decodes
/// to `None`, anything else lands in the matching variant and never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Opaque {
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<Value>),
    Object(Map<String, Value>),
}

impl Opaque {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        value: Option<Opaque>,
    }

    #[test]
    fn opaque_null_and_missing_are_none() {
        let h: Holder = serde_json::from_value(json!({ "value": null })).unwrap();
        assert!(h.value.is_none());
        let h: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(h.value.is_none());
    }

    #[test]
    fn opaque_keeps_shape() {
        let h: Holder = serde_json::from_value(json!({ "value": 42 })).unwrap();
        assert_eq!(h.value.as_ref().and_then(Opaque::as_i64), Some(42));

        let h: Holder = serde_json::from_value(json!({ "value": false })).unwrap();
        assert_eq!(h.value.as_ref().and_then(Opaque::as_bool), Some(false));

        let h: Holder = serde_json::from_value(json!({ "value": "auto" })).unwrap();
        assert_eq!(h.value.as_ref().and_then(Opaque::as_str), Some("auto"));

        let h: Holder = serde_json::from_value(json!({ "value": { "enabled": true } })).unwrap();
        assert!(matches!(h.value, Some(Opaque::Object(ref m)) if m.contains_key("enabled")));
    }

    #[test]
    fn envelope_counts_default_when_missing() {
        let page: ListResponse<NamedObject> =
            serde_json::from_value(json!({ "hasMore": false, "list": [] })).unwrap();
        assert_eq!(page.total_count, 0);
        assert_eq!(page.first_index, 0);
        assert!(page.list.is_empty());
    }

    #[test]
    fn body_without_envelope_is_rejected() {
        let err = serde_json::from_value::<ListResponse<NamedObject>>(
            json!({ "message": "maintenance" }),
        )
        .unwrap_err();
        assert!(err.to_string().contains("hasMore"));

        assert!(
            serde_json::from_value::<ListResponse<NamedObject>>(json!({ "hasMore": false }))
                .is_err()
        );
    }

    #[test]
    fn envelope_end_index() {
        let page: ListResponse<NamedObject> = serde_json::from_value(json!({
            "totalCount": 3,
            "hasMore": true,
            "firstIndex": 1,
            "list": [{ "id": "a", "name": "A" }]
        }))
        .unwrap();
        assert_eq!(page.end_index(), 2);
    }

    #[test]
    fn end_index_saturates() {
        let page = ListResponse {
            total_count: 0,
            has_more: false,
            first_index: u64::MAX - 1,
            list: vec![NamedObject { id: "a".into(), name: String::new() }; 3],
        };
        assert_eq!(page.end_index(), u64::MAX);
    }
}
