//! Access point command handlers.

use tabled::Tabled;

use smartzone_api::models::{Ap, ApQueryRecord, ApSummary, ApUpdate, LldpNeighbor, PortStatus};
use smartzone_api::{ApQuery, ListOptions};

use crate::cli::{ApsArgs, ApsCommand};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Group")]
    group: String,
}

impl From<&ApSummary> for ApRow {
    fn from(a: &ApSummary) -> Self {
        Self {
            mac: a.mac.clone(),
            name: output::or_dash(a.name.as_deref()),
            serial: output::or_dash(a.serial.as_deref()),
            zone: output::or_dash(a.zone_id.as_deref()),
            group: output::or_dash(a.ap_group_id.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct ApQueryRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Clients")]
    clients: String,
    #[tabled(rename = "Last Seen (UTC)")]
    last_seen: String,
}

impl From<&ApQueryRecord> for ApQueryRow {
    fn from(a: &ApQueryRecord) -> Self {
        Self {
            mac: a.ap_mac.clone(),
            name: output::or_dash(a.device_name.as_deref()),
            model: output::or_dash(a.model.as_deref()),
            ip: output::or_dash(a.ip.as_deref()),
            status: output::or_dash(a.status.as_deref()),
            zone: output::or_dash(a.zone_name.as_deref()),
            group: output::or_dash(a.ap_group_name.as_deref()),
            clients: a.num_clients.map_or_else(|| "-".into(), |n| n.to_string()),
            last_seen: util::format_millis(a.last_seen),
        }
    }
}

#[derive(Tabled)]
struct LldpRow {
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "System")]
    sys_name: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Mgmt IP")]
    mgmt_ip: String,
    #[tabled(rename = "Capability")]
    capability: String,
}

impl From<&LldpNeighbor> for LldpRow {
    fn from(n: &LldpNeighbor) -> Self {
        Self {
            interface: output::or_dash(n.interface.as_deref()),
            sys_name: output::or_dash(n.sys_name.as_deref()),
            port: output::or_dash(n.port_desc.as_deref().or(n.port_id.as_deref())),
            mgmt_ip: output::or_dash(n.mgmt_ip.as_deref()),
            capability: output::or_dash(n.capability.as_deref()),
        }
    }
}

// ── Detail views ────────────────────────────────────────────────────

fn detail(a: &Ap) -> String {
    output::detail_lines(&[
        ("MAC", a.mac.clone()),
        ("Name", output::or_dash(a.name.as_deref())),
        ("Description", output::or_dash(a.description.as_deref())),
        ("Model", output::or_dash(a.model.as_deref())),
        ("Serial", output::or_dash(a.serial.as_deref())),
        ("Zone", output::or_dash(a.zone_id.as_deref())),
        ("Group", output::or_dash(a.ap_group_id.as_deref())),
        ("Location", output::or_dash(a.location.as_deref())),
        ("Admin State", output::or_dash(a.administrative_state.as_deref())),
    ])
}

fn lldp_detail(n: &LldpNeighbor) -> String {
    output::detail_lines(&[
        ("Interface", output::or_dash(n.interface.as_deref())),
        ("System", output::or_dash(n.sys_name.as_deref())),
        ("Description", output::or_dash(n.sys_desc.as_deref())),
        ("Port ID", output::or_dash(n.port_id.as_deref())),
        ("Port", output::or_dash(n.port_desc.as_deref())),
        ("Mgmt IP", output::or_dash(n.mgmt_ip.as_deref())),
        ("Chassis", output::or_dash(n.chassis_id.as_deref())),
        ("Capability", output::or_dash(n.capability.as_deref())),
    ])
}

fn port_detail(p: &PortStatus, color: bool) -> String {
    output::detail_lines(&[
        ("MAC", p.mac.clone()),
        ("Link", output::link_state(p.link, color)),
        ("Speed", output::or_dash(p.speed.as_deref())),
        ("Duplex", output::or_dash(p.duplex.as_deref())),
    ])
}

fn lookup_err(session: &Session<'_>, err: smartzone_api::Error, mac: &str) -> CliError {
    util::not_found_or(err, session.profile, "AP", mac, "aps list")
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(session: &Session<'_>, args: ApsArgs) -> Result<(), CliError> {
    let global = session.global;
    let client = session.client;
    match args.command {
        ApsCommand::List(list) => {
            let options = util::list_options(&list);
            let aps = if list.all {
                client
                    .list_all_aps(&options)
                    .await
                    .map_err(|p| CliError::from_partial(p, session.profile))?
            } else {
                client
                    .list_aps(&options)
                    .await
                    .map_err(|e| session.api_err(e))?
                    .list
            };
            let out = output::render_list(
                &global.format(),
                &aps,
                |a| ApRow::from(a),
                |a| a.mac.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApsCommand::Query {
            zone,
            group,
            search,
            list_size,
        } => {
            let mut query = ApQuery::default();
            if let Some(zone) = zone {
                query = query.with_filter("ZONE", zone);
            }
            if let Some(group) = group {
                query = query.with_filter("APGROUP", group);
            }
            if let Some(text) = search {
                query = query.with_search(text);
            }
            let options = ListOptions {
                list_size,
                ..ListOptions::default()
            };
            let records = client
                .query_aps_with(&query, &options)
                .await
                .map_err(|p| CliError::from_partial(p, session.profile))?;
            let out = output::render_list(
                &global.format(),
                &records,
                |a| ApQueryRow::from(a),
                |a| a.ap_mac.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApsCommand::Get { mac } => {
            let ap = client
                .get_ap(&mac)
                .await
                .map_err(|e| lookup_err(session, e, &mac))?;
            let out = output::render_single(&global.format(), &ap, detail, |a| a.mac.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApsCommand::Lldp { mac, all } => {
            if all {
                let neighbors = client
                    .ap_lldp_neighbors(&mac, &ListOptions::default())
                    .await
                    .map_err(|e| lookup_err(session, e, &mac))?;
                let out = output::render_list(
                    &global.format(),
                    &neighbors.list,
                    |n| LldpRow::from(n),
                    |n| n.sys_name.clone().unwrap_or_default(),
                );
                output::print_output(&out, global.quiet);
                return Ok(());
            }
            match client
                .ap_lldp_neighbor(&mac)
                .await
                .map_err(|e| lookup_err(session, e, &mac))?
            {
                Some(neighbor) => {
                    let out = output::render_single(
                        &global.format(),
                        &neighbor,
                        lldp_detail,
                        |n| n.sys_name.clone().unwrap_or_default(),
                    );
                    output::print_output(&out, global.quiet);
                }
                None => {
                    if !global.quiet {
                        eprintln!("AP {mac} reports no LLDP neighbor");
                    }
                }
            }
            Ok(())
        }

        ApsCommand::Port { mac } => {
            let status = client
                .ap_port_status(&mac)
                .await
                .map_err(|e| lookup_err(session, e, &mac))?;
            match status {
                Some(port) => {
                    let color = output::should_color(&global.color);
                    let out = output::render_single(
                        &global.format(),
                        &port,
                        |p| port_detail(p, color),
                        |p| output::link_state(p.link, false),
                    );
                    output::print_output(&out, global.quiet);
                }
                None => {
                    if !global.quiet {
                        eprintln!("AP {mac} reports no LAN ports");
                    }
                }
            }
            Ok(())
        }

        ApsCommand::Reboot { mac } => {
            if !util::confirm(&format!("Reboot AP {mac}?"), "reboot", global.yes)? {
                return Ok(());
            }
            let accepted = client
                .reboot_ap(&mac)
                .await
                .map_err(|e| lookup_err(session, e, &mac))?;
            if !accepted {
                return Err(CliError::Rejected {
                    operation: "reboot".into(),
                });
            }
            if !global.quiet {
                eprintln!("Reboot of AP {mac} initiated");
            }
            Ok(())
        }

        ApsCommand::Rename {
            mac,
            name,
            zone,
            group,
        } => {
            let (zone_id, group_id) = match (zone, group) {
                (Some(z), Some(g)) => (z, g),
                (zone, group) => {
                    let current = client
                        .get_ap(&mac)
                        .await
                        .map_err(|e| lookup_err(session, e, &mac))?;
                    let zone_id = zone.or(current.zone_id).ok_or_else(|| CliError::Validation {
                        field: "zone".into(),
                        reason: format!("AP {mac} has no zone; pass --zone"),
                    })?;
                    let group_id =
                        group
                            .or(current.ap_group_id)
                            .ok_or_else(|| CliError::Validation {
                                field: "group".into(),
                                reason: format!("AP {mac} has no AP group; pass --group"),
                            })?;
                    (zone_id, group_id)
                }
            };
            let update = ApUpdate::new(zone_id, group_id, name);
            client
                .update_ap(&mac, &update)
                .await
                .map_err(|e| lookup_err(session, e, &mac))?;
            if !global.quiet {
                eprintln!("AP {mac} renamed to {}", update.name);
            }
            Ok(())
        }
    }
}
