// Zone and AP group records
//
// `Zone` mirrors `GET /rkszones/{id}`. The controller returns a large,
// mostly-flat configuration document; nested objects are modelled where their
// shape is stable, everything else is `Opaque`.

use serde::{Deserialize, Serialize};

use super::Opaque;

/// Full zone configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub domain_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub country_code: Option<String>,
    /// AP firmware version pinned to this zone.
    pub version: Option<String>,
    pub timezone: Option<Timezone>,
    pub ip_mode: Option<String>,
    pub ipv6_traffic_filter_enabled: Option<Opaque>,
    pub login: Option<ApLogin>,
    pub mesh: Option<Opaque>,

    // ── Radio ────────────────────────────────────────────────────────
    pub dfs_channel_enabled: Option<bool>,
    pub cband_channel_enabled: Option<bool>,
    pub cband_channel_license_enabled: Option<bool>,
    pub channel144_enabled: Option<bool>,
    pub wifi24: Option<Wifi24Radio>,
    pub wifi50: Option<Wifi50Radio>,
    pub protection_mode24: Option<String>,
    pub client_admission_control24: Option<Opaque>,
    pub client_admission_control50: Option<Opaque>,
    pub channel_mode_enabled: Option<bool>,
    pub background_scanning24: Option<BackgroundScanning>,
    pub background_scanning50: Option<BackgroundScanning>,
    pub client_load_balancing24: Option<Opaque>,
    pub client_load_balancing50: Option<Opaque>,
    pub band_balancing: Option<BandBalancing>,
    pub load_balancing_method: Option<String>,
    pub auto_channel_selection24: Option<AutoChannelSelection>,
    pub auto_channel_selection50: Option<AutoChannelSelection>,
    pub channel_evaluation_interval: Option<i64>,

    // ── Services ─────────────────────────────────────────────────────
    pub syslog: Option<Opaque>,
    pub smart_monitor: Option<Opaque>,
    pub tunnel_type: Option<String>,
    pub tunnel_profile: Option<ProfileRef>,
    pub ruckus_gre_tunnel_profile: Option<ProfileRef>,
    /// Spelled this way by the controller.
    #[serde(rename = "softGreTunnelProflies")]
    pub soft_gre_tunnel_profiles: Option<Opaque>,
    pub ipsec_profiles: Option<Opaque>,
    pub ipsec_tunnel_mode: Option<Opaque>,
    pub ipsec_profile: Option<Opaque>,
    pub rogue: Option<Rogue>,
    pub location_based_service: Option<Opaque>,
    pub ap_reboot_timeout: Option<ApRebootTimeout>,
    pub node_affinity_profile: Option<Opaque>,
    pub zone_affinity_profile_id: Option<String>,
    pub enforce_priority_zone_affinity_enable: Option<bool>,
    pub venue_profile: Option<Opaque>,
    pub bonjour_fencing_policy_enabled: Option<bool>,
    pub bonjour_fencing_policy: Option<Opaque>,
    pub dhcp_site_config: Option<DhcpSiteConfig>,
    pub ap_mgmt_vlan: Option<ApMgmtVlan>,
    pub ap_latency_interval: Option<ApLatencyInterval>,
    pub recovery_ssid: Option<RecoverySsid>,
    pub snmp_agent: Option<SnmpAgent>,
    pub cluster_redundancy_enabled: Option<bool>,
    pub aaa_affinity_enabled: Option<bool>,

    // ── Location ─────────────────────────────────────────────────────
    pub location: Option<String>,
    pub location_additional_info: Option<String>,
    pub latitude: Option<Opaque>,
    pub longitude: Option<Opaque>,
    pub altitude: Option<Altitude>,
    pub aws_venue: Option<String>,

    // ── Security / protection ────────────────────────────────────────
    pub vlan_overlapping_enabled: Option<bool>,
    pub dos_barring_enable: Option<i64>,
    pub dos_barring_period: Option<i64>,
    pub dos_barring_threshold: Option<i64>,
    pub dos_barring_check_period: Option<i64>,
    pub rogue_ap_report_threshold: Option<i64>,
    pub rogue_ap_aggressiveness_mode: Option<i64>,
    pub rogue_ap_jamming_detection: Option<bool>,
    pub rogue_ap_jamming_threshold: Option<Opaque>,
    pub directed_multicast_from_wired_client_enabled: Option<bool>,
    pub directed_multicast_from_wireless_client_enabled: Option<bool>,
    pub directed_multicast_from_network_enabled: Option<bool>,
    pub health_check_sites_enabled: Option<bool>,
    pub health_check_sites: Option<Vec<String>>,
    pub ssh_tunnel_encryption: Option<String>,
    pub lte_band_lock_channels: Option<Vec<LteBandLockChannel>>,
    pub ap_hccd_enabled: Option<bool>,
    pub ap_hccd_persist: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timezone {
    pub system_timezone: Option<String>,
    pub customized_timezone: Option<Opaque>,
}

/// Admin login pushed to every AP in the zone.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApLogin {
    pub ap_login_name: Option<String>,
    pub ap_login_password: Option<String>,
}

impl std::fmt::Debug for ApLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApLogin")
            .field("ap_login_name", &self.ap_login_name)
            .field("ap_login_password", &self.ap_login_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wifi24Radio {
    pub auto_cell_sizing: Option<Opaque>,
    pub tx_power: Option<String>,
    pub channel_width: Option<i64>,
    pub channel: Option<i64>,
    pub channel_range: Option<Vec<i64>>,
    pub available_channel_range: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wifi50Radio {
    pub auto_cell_sizing: Option<Opaque>,
    pub tx_power: Option<String>,
    pub channel_width: Option<i64>,
    pub indoor_channel: Option<i64>,
    pub outdoor_channel: Option<i64>,
    pub indoor_secondary_channel: Option<Opaque>,
    pub outdoor_secondary_channel: Option<Opaque>,
    pub indoor_channel_range: Option<Vec<i64>>,
    pub outdoor_channel_range: Option<Vec<i64>>,
    pub available_indoor_channel_range: Option<Vec<i64>>,
    pub available_outdoor_channel_range: Option<Vec<i64>>,
}

/// Reference to another controller object by id and name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundScanning {
    pub frequency_in_sec: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandBalancing {
    pub mode: Option<String>,
    pub wifi24_percentage: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rogue {
    pub report_type: Option<String>,
    pub malicious_types: Option<Opaque>,
    pub protection_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApRebootTimeout {
    pub gateway_loss_timeout_in_sec: Option<i64>,
    pub server_loss_timeout_in_sec: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpSiteConfig {
    pub site_enabled: Option<bool>,
    pub dwpd_enabled: Option<Opaque>,
    pub manual_select: Option<Opaque>,
    pub site_mode: Option<Opaque>,
    pub site_profile_ids: Option<Opaque>,
    pub site_aps: Option<Opaque>,
    pub eth0_profile_id: Option<Opaque>,
    pub eth1_profile_id: Option<Opaque>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoChannelSelection {
    pub channel_select_mode: Option<String>,
    pub channel_fly_mtbc: Option<Opaque>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApMgmtVlan {
    pub id: Option<i64>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApLatencyInterval {
    pub ping_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySsid {
    pub recovery_ssid_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Altitude {
    pub altitude_unit: Option<String>,
    pub altitude_value: Option<Opaque>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnmpAgent {
    pub ap_snmp_enabled: Option<bool>,
    pub snmp_v2_agent: Option<Vec<Opaque>>,
    pub snmp_v3_agent: Option<Vec<Opaque>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LteBandLockChannel {
    pub sim_card_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub channel4g: Option<String>,
    pub channel3g: Option<String>,
}

// ── AP group ─────────────────────────────────────────────────────────

/// AP group detail from `GET /rkszones/{zoneId}/apgroups/{id}`.
///
/// Only the identifying fields are modelled; radio overrides vary too much
/// between releases to be worth typing here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApGroup {
    pub id: String,
    pub zone_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub location_additional_info: Option<String>,
    pub members: Option<Vec<ApGroupMember>>,
    pub wifi24: Option<Opaque>,
    pub wifi50: Option<Opaque>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApGroupMember {
    pub mac: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zone_decodes_with_nulls_and_vendor_spelling() {
        let zone: Zone = serde_json::from_value(json!({
            "id": "615d18e9-0cc0-4e3d-b98e-f2a476b5a846",
            "name": "Campus",
            "countryCode": "US",
            "timezone": { "systemTimezone": "GMT", "customizedTimezone": null },
            "mesh": null,
            "wifi24": { "txPower": "Full", "channelWidth": 20, "channel": 0, "channelRange": [1, 6, 11] },
            "softGreTunnelProflies": [{ "id": "gre-1" }],
            "apMgmtVlan": { "id": 1, "mode": "KEEP" },
            "lteBandLockChannels": [{ "simCardId": 0, "type": "PRIMARY", "channel4g": "", "channel3g": "" }],
            "latitude": null
        }))
        .unwrap();

        assert_eq!(zone.name.as_deref(), Some("Campus"));
        assert!(zone.mesh.is_none());
        assert!(zone.latitude.is_none());
        let wifi24 = zone.wifi24.unwrap();
        assert_eq!(wifi24.channel_range, Some(vec![1, 6, 11]));
        assert!(matches!(zone.soft_gre_tunnel_profiles, Some(Opaque::List(ref l)) if l.len() == 1));
        assert_eq!(zone.ap_mgmt_vlan.unwrap().mode.as_deref(), Some("KEEP"));
        assert_eq!(
            zone.lte_band_lock_channels.unwrap()[0].kind.as_deref(),
            Some("PRIMARY")
        );
    }

    #[test]
    fn ap_login_password_is_redacted_in_debug() {
        let login = ApLogin {
            ap_login_name: Some("admin".into()),
            ap_login_password: Some("secret".into()),
        };
        let rendered = format!("{login:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("secret"));
    }
}
