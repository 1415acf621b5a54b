//! AP group command handlers.

use tabled::Tabled;

use smartzone_api::NamedObject;
use smartzone_api::models::ApGroup;

use crate::cli::{GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

fn detail(g: &ApGroup) -> String {
    let members: Vec<&str> = g
        .members
        .iter()
        .flatten()
        .filter_map(|m| m.mac.as_deref())
        .collect();
    let mut out = output::detail_lines(&[
        ("ID", g.id.clone()),
        ("Name", output::or_dash(g.name.as_deref())),
        ("Zone", output::or_dash(g.zone_id.as_deref())),
        ("Description", output::or_dash(g.description.as_deref())),
        ("Location", output::or_dash(g.location.as_deref())),
        ("Members", members.len().to_string()),
    ]);
    for mac in members {
        out.push_str("\n  ");
        out.push_str(mac);
    }
    out
}

pub async fn handle(session: &Session<'_>, args: GroupsArgs) -> Result<(), CliError> {
    let global = session.global;
    match args.command {
        GroupsCommand::List { zone, list } => {
            let options = util::list_options(&list);
            let groups: Vec<NamedObject> = if list.all {
                session
                    .client
                    .list_all_ap_groups(&zone, &options)
                    .await
                    .map_err(|p| CliError::from_partial(p, session.profile))?
            } else {
                session
                    .client
                    .list_ap_groups(&zone, &options)
                    .await
                    .map_err(|e| util::not_found_or(e, session.profile, "zone", &zone, "zones list"))?
                    .list
            };
            let out = output::render_list(
                &global.format(),
                &groups,
                |g| GroupRow {
                    id: g.id.clone(),
                    name: g.name.clone(),
                },
                |g| g.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Get { zone, group } => {
            let found = session
                .client
                .get_ap_group(&zone, &group)
                .await
                .map_err(|e| {
                    util::not_found_or(
                        e,
                        session.profile,
                        "AP group",
                        &group,
                        &format!("groups list {zone}"),
                    )
                })?;
            let out = output::render_single(&global.format(), &found, detail, |g| g.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
