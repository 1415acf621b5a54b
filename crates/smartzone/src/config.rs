//! Flag-aware connection resolution.
//!
//! Layers `GlobalOpts` over the selected profile from `smartzone-config`
//! and produces the `Connection` a command session is opened with.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use smartzone_api::TransportConfig;
use smartzone_config::{self as sz_config, Config, ConfigError, Connection, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref()).to_owned()
}

/// Comma-separated profile names, for error help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// The selected profile with command-line overrides applied.
///
/// An explicitly requested profile must exist. Without one, a missing
/// default profile is fine as long as the flags name a controller.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);

    let mut profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    if let Some(ref host) = global.host {
        profile.host = Some(host.clone());
        profile.controller = None;
    }
    if let Some(ref controller) = global.controller {
        profile.controller = Some(controller.clone());
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if let Some(ref api_version) = global.api_version {
        profile.api_version = Some(api_version.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    Ok(profile)
}

/// Build the `Connection` for this invocation.
pub fn resolve_connection(global: &GlobalOpts, config: &Config) -> Result<Connection, CliError> {
    let name = active_profile_name(global, config);
    let profile = effective_profile(global, config)?;

    if profile.host.is_none() && profile.controller.is_none() {
        return Err(CliError::NoController {
            profile: name,
            path: sz_config::config_path().display().to_string(),
        });
    }
    let controller_url = profile.controller_url(&name)?;
    let username = sz_config::resolve_username(&profile, &name)?;

    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => match sz_config::resolve_password(&profile, &name) {
            Ok(pw) => pw,
            Err(ConfigError::NoCredentials { .. }) if std::io::stdin().is_terminal() => {
                prompt_password(&username, controller_url.as_str())?
            }
            Err(e) => return Err(e.into()),
        },
    };

    let tls = sz_config::profile_tls(&profile, &config.defaults);
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(config.defaults.timeout));
    let api_version = profile
        .api_version
        .clone()
        .unwrap_or_else(|| config.defaults.api_version.clone());

    debug!(
        profile = %name,
        controller = %controller_url,
        api_version = %api_version,
        "resolved connection"
    );

    Ok(Connection {
        controller_url,
        api_version,
        credentials: smartzone_api::Credentials::new(username, password),
        transport: TransportConfig::default().with_tls(tls).with_timeout(timeout),
    })
}

fn prompt_password(username: &str, controller: &str) -> Result<SecretString, CliError> {
    let pw = rpassword::prompt_password(format!("Password for {username} at {controller}: "))?;
    if pw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(pw))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["smartzone"];
        argv.extend_from_slice(args);
        argv.push("controller");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_lab() -> Config {
        let mut cfg = Config::default();
        cfg.default_profile = Some("lab".into());
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                host: Some("sz.lab.example".into()),
                username: Some("admin".into()),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_lab();
        let profile = effective_profile(
            &global(&["--host", "10.0.0.9", "-u", "ops", "--timeout", "99", "-k"]),
            &cfg,
        )
        .unwrap();

        assert_eq!(profile.host.as_deref(), Some("10.0.0.9"));
        assert_eq!(profile.username.as_deref(), Some("ops"));
        assert_eq!(profile.timeout, Some(99));
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn profile_values_survive_without_flags() {
        let cfg = config_with_lab();
        let profile = effective_profile(&global(&[]), &cfg).unwrap();
        assert_eq!(profile.host.as_deref(), Some("sz.lab.example"));
        assert_eq!(profile.timeout, Some(10));
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let cfg = config_with_lab();
        let err = effective_profile(&global(&["--profile", "prod"]), &cfg).unwrap_err();
        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "prod");
                assert_eq!(available, "lab");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn explicit_password_builds_connection() {
        let cfg = config_with_lab();
        let conn = resolve_connection(&global(&["--password", "pw"]), &cfg).unwrap();
        assert_eq!(conn.controller_url.as_str(), "https://sz.lab.example:8443/");
        assert_eq!(conn.api_version, "8_1");
        assert_eq!(conn.credentials.username, "admin");
    }

    #[test]
    fn no_controller_anywhere() {
        let err = resolve_connection(&global(&["--password", "pw"]), &Config::default())
            .unwrap_err();
        assert!(matches!(err, CliError::NoController { .. }));
    }
}
