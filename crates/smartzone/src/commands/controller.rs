//! Controller summary handler.

use tabled::Tabled;

use smartzone_api::ListOptions;
use smartzone_api::models::ControllerInfo;

use crate::error::CliError;
use crate::output;

use super::{Session, util};

#[derive(Tabled)]
struct ControllerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Mgmt IP")]
    management_ip: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

impl From<&ControllerInfo> for ControllerRow {
    fn from(c: &ControllerInfo) -> Self {
        Self {
            name: output::or_dash(c.name.as_deref().or(c.host_name.as_deref())),
            model: output::or_dash(c.model.as_deref()),
            role: output::or_dash(c.cluster_role.as_deref()),
            version: output::or_dash(c.version.as_deref()),
            management_ip: output::or_dash(c.management_ip.as_deref()),
            uptime: c
                .uptime_in_sec
                .map_or_else(|| "-".into(), util::format_uptime),
        }
    }
}

pub async fn handle(session: &Session<'_>) -> Result<(), CliError> {
    let global = session.global;
    let summary = session
        .client
        .controller_summary(&ListOptions::default())
        .await
        .map_err(|e| session.api_err(e))?;

    let out = output::render_list(
        &global.format(),
        &summary.list,
        |c| ControllerRow::from(c),
        |c| c.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
