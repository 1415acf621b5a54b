//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use smartzone_api::ListOptions;

use crate::cli::ListArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused
/// unless `--yes` was given.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Translate `--index` / `--list-size` / `--domain` into request options.
pub fn list_options(args: &ListArgs) -> ListOptions {
    ListOptions {
        index: args.index,
        list_size: args.list_size,
        domain_id: args.domain.clone(),
    }
}

/// Turn a 404 into a `NotFound` naming the resource, anything else into
/// the usual API error.
pub fn not_found_or(
    err: smartzone_api::Error,
    profile: &str,
    resource_type: &str,
    identifier: &str,
    list_command: &str,
) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        }
    } else {
        CliError::from_api(err, profile)
    }
}

/// Render controller epoch-milliseconds as UTC, `-` when absent.
pub fn format_millis(ms: Option<i64>) -> String {
    ms.and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Render a duration in seconds as `3d 4h 5m`.
pub fn format_uptime(secs: i64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_render_as_utc() {
        assert_eq!(format_millis(Some(1_700_000_000_000)), "2023-11-14 22:13:20");
        assert_eq!(format_millis(None), "-");
    }

    #[test]
    fn uptime_picks_largest_unit() {
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }

    #[test]
    fn list_args_map_to_options() {
        let args = ListArgs {
            index: Some(200),
            list_size: Some(50),
            domain: Some("d-1".into()),
            all: false,
        };
        assert_eq!(
            list_options(&args),
            ListOptions::new()
                .with_index(200)
                .with_list_size(50)
                .with_domain_id("d-1")
        );
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(confirm("reboot?", "reboot", true).unwrap_or(false));
    }

    #[test]
    fn not_found_names_the_resource() {
        let err = not_found_or(
            smartzone_api::Error::Api {
                status: 404,
                message: "gone".into(),
                code: None,
            },
            "lab",
            "zone",
            "z-9",
            "zones list",
        );
        assert!(matches!(err, CliError::NotFound { .. }));
    }
}
