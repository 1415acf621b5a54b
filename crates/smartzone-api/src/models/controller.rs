use serde::{Deserialize, Serialize};

use super::Opaque;

/// One cluster node from `GET /controller`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerInfo {
    pub id: String,
    pub model: Option<String>,
    pub description: Option<String>,
    pub host_name: Option<String>,
    pub mac: Option<String>,
    pub serial_number: Option<String>,
    pub cluster_role: Option<String>,
    pub control_nat_ip: Option<String>,
    pub uptime_in_sec: Option<i64>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub ap_version: Option<String>,
    pub control_ip: Option<String>,
    pub cluster_ip: Option<String>,
    pub management_ip: Option<String>,
    pub control_ipv6: Option<Opaque>,
    pub cluster_ipv6: Option<Opaque>,
    pub management_ipv6: Option<Opaque>,
}
