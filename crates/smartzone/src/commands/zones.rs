//! Zone command handlers.

use tabled::Tabled;

use smartzone_api::NamedObject;
use smartzone_api::models::Zone;

use crate::cli::{ZonesArgs, ZonesCommand};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&NamedObject> for ZoneRow {
    fn from(z: &NamedObject) -> Self {
        Self {
            id: z.id.clone(),
            name: z.name.clone(),
        }
    }
}

fn detail(z: &Zone) -> String {
    let timezone = z
        .timezone
        .as_ref()
        .and_then(|t| t.system_timezone.as_deref());
    let mut pairs = vec![
        ("ID", z.id.clone()),
        ("Name", output::or_dash(z.name.as_deref())),
        ("Description", output::or_dash(z.description.as_deref())),
        ("Domain", output::or_dash(z.domain_id.as_deref())),
        ("Country", output::or_dash(z.country_code.as_deref())),
        ("AP Firmware", output::or_dash(z.version.as_deref())),
        ("Timezone", output::or_dash(timezone)),
        ("IP Mode", output::or_dash(z.ip_mode.as_deref())),
        ("Tunnel", output::or_dash(z.tunnel_type.as_deref())),
        ("Location", output::or_dash(z.location.as_deref())),
    ];
    if let Some(ref vlan) = z.ap_mgmt_vlan {
        let id = vlan.id.map_or_else(|| "-".into(), |v| v.to_string());
        pairs.push(("Mgmt VLAN", id));
    }
    output::detail_lines(&pairs)
}

pub async fn handle(session: &Session<'_>, args: ZonesArgs) -> Result<(), CliError> {
    let global = session.global;
    match args.command {
        ZonesCommand::List(list) => {
            let options = util::list_options(&list);
            let zones = if list.all {
                session
                    .client
                    .list_all_zones(&options)
                    .await
                    .map_err(|p| CliError::from_partial(p, session.profile))?
            } else {
                session
                    .client
                    .list_zones(&options)
                    .await
                    .map_err(|e| session.api_err(e))?
                    .list
            };
            let out = output::render_list(
                &global.format(),
                &zones,
                |z| ZoneRow::from(z),
                |z| z.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ZonesCommand::Get { zone } => {
            let found = session
                .client
                .get_zone(&zone)
                .await
                .map_err(|e| util::not_found_or(e, session.profile, "zone", &zone, "zones list"))?;
            let out = output::render_single(&global.format(), &found, detail, |z| z.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
