//! Command dispatch: opens a controller session, runs the handler, closes it.

pub mod aps;
pub mod config_cmd;
pub mod controller;
pub mod groups;
pub mod util;
pub mod zones;

use tracing::{debug, warn};

use smartzone_api::SmartZoneClient;
use smartzone_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Everything a handler needs: the logged-in client and the flags.
pub struct Session<'a> {
    pub client: &'a SmartZoneClient,
    pub global: &'a GlobalOpts,
    pub profile: &'a str,
}

impl Session<'_> {
    /// Map a library error, naming the active profile.
    pub fn api_err(&self, err: smartzone_api::Error) -> CliError {
        CliError::from_api(err, self.profile)
    }
}

/// Run a controller-bound command inside a login/logout bracket.
///
/// Logout is always attempted, also when the command failed. A failed
/// logout is logged and never replaces the command's own result.
pub async fn dispatch(cmd: Command, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let profile = config::active_profile_name(global, cfg);
    let connection = config::resolve_connection(global, cfg)?;
    let mut client = connection.into_client()?;

    client
        .login()
        .await
        .map_err(|e| CliError::from_api(e, &profile))?;
    debug!(
        version = client.controller_version().unwrap_or("unknown"),
        "session open"
    );

    let session = Session {
        client: &client,
        global,
        profile: &profile,
    };
    let result = match cmd {
        Command::Zones(args) => zones::handle(&session, args).await,
        Command::Groups(args) => groups::handle(&session, args).await,
        Command::Aps(args) => aps::handle(&session, args).await,
        Command::Controller => controller::handle(&session).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    };

    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }
    result
}
