// Access point records
//
// Three views of an AP exist on the controller: the slim `GET /aps` listing,
// the per-AP configuration document, and the operational record returned by
// the `/query/ap` search endpoint. Uplink status comes from the older `scg`
// API and is reduced here to a single `PortStatus`.

use serde::{Deserialize, Serialize};

use super::Opaque;

/// Entry of `GET /aps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApSummary {
    pub mac: String,
    pub zone_id: Option<String>,
    pub ap_group_id: Option<String>,
    pub serial: Option<String>,
    pub name: Option<String>,
}

/// AP configuration from `GET /aps/{mac}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ap {
    pub mac: String,
    pub zone_id: Option<String>,
    pub ap_group_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub location: Option<String>,
    pub location_additional_info: Option<String>,
    pub administrative_state: Option<String>,
    pub provision_checklist: Option<String>,
    pub gps_info: Option<Opaque>,
    pub altitude: Option<Opaque>,
    pub network: Option<Opaque>,
    pub login: Option<Opaque>,
    pub mesh: Option<Opaque>,
    pub wifi24: Option<Opaque>,
    pub wifi50: Option<Opaque>,
    pub wlan_service24_enabled: Option<bool>,
    pub wlan_service50_enabled: Option<bool>,
    pub lldp: Option<Opaque>,
    pub syslog: Option<Opaque>,
    pub smart_monitor: Option<Opaque>,
    pub ap_mgmt_vlan: Option<Opaque>,
    pub usb_port_disabled: Option<bool>,
    pub led_status_enabled: Option<bool>,
}

/// Body of `PATCH /aps/{mac}`: move an AP and give it a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApUpdate {
    pub zone_id: String,
    pub ap_group_id: String,
    pub name: String,
}

impl ApUpdate {
    pub fn new(
        zone_id: impl Into<String>,
        ap_group_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            ap_group_id: ap_group_id.into(),
            name: name.into(),
        }
    }
}

/// Operational AP record from `POST /query/ap`.
///
/// Per-radio metrics use the controller's `24G` / `5G` / `50G` suffixes,
/// which don't survive a camelCase rename, so they are spelled out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApQueryRecord {
    // ── Identity ─────────────────────────────────────────────────────
    pub ap_mac: String,
    pub device_name: Option<String>,
    pub description: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware_version: Option<String>,
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    pub zone_firmware_version: Option<String>,
    pub ap_group_id: Option<String>,
    pub ap_group_name: Option<String>,
    pub domain_id: Option<String>,
    pub domain_name: Option<Opaque>,
    pub location: Option<String>,
    pub device_gps: Option<String>,

    // ── Addressing ───────────────────────────────────────────────────
    pub ip: Option<String>,
    pub ipv6_address: Option<Opaque>,
    pub ip_type: Option<String>,
    pub ext_ip: Option<String>,
    pub ext_port: Option<String>,
    pub dp_ip: Option<String>,
    pub management_vlan: Option<Opaque>,
    pub poe_port_status: Option<String>,

    // ── State ────────────────────────────────────────────────────────
    pub status: Option<String>,
    pub connection_status: Option<String>,
    pub configuration_status: Option<String>,
    pub administrative_state: Option<String>,
    pub registration_state: Option<String>,
    pub provision_method: Option<String>,
    pub provision_stage: Option<String>,
    /// Epoch milliseconds.
    pub registration_time: Option<i64>,
    /// Epoch milliseconds.
    pub last_seen: Option<i64>,
    pub uptime: Option<Opaque>,
    pub alerts: Option<i64>,
    pub config_override: Option<bool>,
    pub is_critical_ap: Option<bool>,
    pub control_blade_id: Option<String>,
    pub control_blade_name: Option<String>,
    pub lbs_status: Option<String>,
    pub mesh_role: Option<String>,
    pub mesh_mode: Option<String>,
    pub packet_capture_state: Option<String>,
    pub crash_dump: Option<Opaque>,

    // ── Clients / traffic ────────────────────────────────────────────
    pub num_clients: Option<i64>,
    #[serde(rename = "numClients24G")]
    pub num_clients_24g: Option<i64>,
    #[serde(rename = "numClients5G")]
    pub num_clients_5g: Option<i64>,
    pub tx: Option<Opaque>,
    pub rx: Option<Opaque>,
    pub tx_rx: Option<Opaque>,

    // ── Radio ────────────────────────────────────────────────────────
    #[serde(rename = "channel24G")]
    pub channel_24g: Option<String>,
    #[serde(rename = "channel5G")]
    pub channel_5g: Option<String>,
    #[serde(rename = "channel24gValue")]
    pub channel_24g_value: Option<i64>,
    #[serde(rename = "channel50gValue")]
    pub channel_50g_value: Option<i64>,
    #[serde(rename = "noise24G")]
    pub noise_24g: Option<i64>,
    #[serde(rename = "noise5G")]
    pub noise_5g: Option<i64>,
    #[serde(rename = "airtime24G")]
    pub airtime_24g: Option<i64>,
    #[serde(rename = "airtime5G")]
    pub airtime_5g: Option<i64>,
    #[serde(rename = "latency24G")]
    pub latency_24g: Option<i64>,
    #[serde(rename = "latency50G")]
    pub latency_50g: Option<i64>,
    pub capacity: Option<i64>,
    #[serde(rename = "capacity24G")]
    pub capacity_24g: Option<i64>,
    #[serde(rename = "capacity50G")]
    pub capacity_50g: Option<i64>,
    #[serde(rename = "retry24G")]
    pub retry_24g: Option<i64>,
    #[serde(rename = "retry5G")]
    pub retry_5g: Option<i64>,
    #[serde(rename = "eirp24G")]
    pub eirp_24g: Option<i64>,
    #[serde(rename = "eirp50G")]
    pub eirp_50g: Option<i64>,
    pub connection_failure: Option<i64>,
    pub wlan_group24_id: Option<Opaque>,
    pub wlan_group50_id: Option<Opaque>,
    pub wlan_group24_name: Option<Opaque>,
    pub wlan_group50_name: Option<Opaque>,

    // ── Health flags ─────────────────────────────────────────────────
    pub is_overall_health_status_flagged: Option<bool>,
    #[serde(rename = "isLatency24GFlagged")]
    pub is_latency_24g_flagged: Option<bool>,
    #[serde(rename = "isCapacity24GFlagged")]
    pub is_capacity_24g_flagged: Option<bool>,
    #[serde(rename = "isConnectionFailure24GFlagged")]
    pub is_connection_failure_24g_flagged: Option<bool>,
    #[serde(rename = "isLatency50GFlagged")]
    pub is_latency_50g_flagged: Option<bool>,
    #[serde(rename = "isCapacity50GFlagged")]
    pub is_capacity_50g_flagged: Option<bool>,
    #[serde(rename = "isConnectionFailure50GFlagged")]
    pub is_connection_failure_50g_flagged: Option<bool>,
    pub is_connection_failure_flagged: Option<bool>,

    // ── Cellular (only populated on LTE-capable models) ──────────────
    pub cellular_wan_interface: Option<Opaque>,
    pub cellular_connection_status: Option<Opaque>,
    pub cellular_signal_strength: Option<Opaque>,
    pub cellular_operator: Option<Opaque>,
    pub cellular_active_sim: Option<Opaque>,
}

// ── LLDP ─────────────────────────────────────────────────────────────

/// Neighbor seen on an AP's wired uplink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    #[serde(rename = "lldpInterface")]
    pub interface: Option<String>,
    #[serde(rename = "lldpSysName")]
    pub sys_name: Option<String>,
    #[serde(rename = "lldpSysDesc")]
    pub sys_desc: Option<String>,
    #[serde(rename = "lldpPortID")]
    pub port_id: Option<String>,
    #[serde(rename = "lldpPortDesc")]
    pub port_desc: Option<String>,
    #[serde(rename = "lldpMgmtIP")]
    pub mgmt_ip: Option<String>,
    #[serde(rename = "lldpChassisID")]
    pub chassis_id: Option<String>,
    #[serde(rename = "lldpCapability")]
    pub capability: Option<String>,
}

// ── Port status (scg API) ────────────────────────────────────────────

/// Logical link state of an uplink port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    Up,
    Down,
    Unknown,
}

impl LinkState {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            _ => Self::Unknown,
        }
    }
}

/// Uplink status of an AP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortStatus {
    pub mac: String,
    pub link: LinkState,
    /// e.g. `1000Mbps`. Only known for a port that is up.
    pub speed: Option<String>,
    /// `FULL` / `HALF`. Only known for a port that is up.
    pub duplex: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PortStatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    data: Option<PortStatusData>,
}

#[derive(Debug, Default, Deserialize)]
struct PortStatusData {
    #[serde(rename = "lanPortStatus", default)]
    lan_port_status: Vec<LanPort>,
}

#[derive(Debug, Deserialize)]
struct LanPort {
    #[serde(rename = "apMac", default)]
    ap_mac: String,
    #[serde(rename = "phyLink", default)]
    phy_link: String,
    #[serde(rename = "logicLink", default)]
    logic_link: String,
}

impl PortStatusResponse {
    /// Pick the uplink: the first port whose logical link is up wins.
    ///
    /// With no port up, the last port listed is reported with its raw state
    /// and no speed/duplex. `None` when the AP reported no LAN ports at all.
    pub(crate) fn uplink(&self) -> Option<PortStatus> {
        let ports = self.data.as_ref().map_or(&[][..], |d| &d.lan_port_status[..]);

        if let Some(port) = ports
            .iter()
            .find(|p| LinkState::parse(&p.logic_link) == LinkState::Up)
        {
            let (speed, duplex) = parse_phy_link(&port.phy_link);
            return Some(PortStatus {
                mac: port.ap_mac.clone(),
                link: LinkState::Up,
                speed,
                duplex,
            });
        }

        ports.last().map(|port| PortStatus {
            mac: port.ap_mac.clone(),
            link: LinkState::parse(&port.logic_link),
            speed: None,
            duplex: None,
        })
    }
}

/// Split a `phyLink` string such as `"Up 1000Mbps full"` into speed and duplex.
fn parse_phy_link(raw: &str) -> (Option<String>, Option<String>) {
    let cleaned = raw.replace("Up ", "");
    let mut parts = cleaned.split_whitespace();
    let speed = parts.next().map(str::to_owned);
    let duplex = parts.next().map(str::to_ascii_uppercase);
    (speed, duplex)
}
