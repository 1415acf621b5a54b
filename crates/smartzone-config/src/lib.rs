//! Configuration for SmartZone tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to a ready-to-use `smartzone_api::SmartZoneClient`.
//! The CLI layers its flag overrides on top of this.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use smartzone_api::{
    Credentials, DEFAULT_API_VERSION, SmartZoneClient, TlsMode, TransportConfig,
};

/// Prefix shared by every environment variable the tools read.
pub const ENV_PREFIX: &str = "SMARTZONE_";

/// Keyring service name under which passwords are stored.
pub const KEYRING_SERVICE: &str = "smartzone";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] smartzone_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`,
    /// else `"default"`.
    pub fn active_profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            api_version: default_api_version(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.into()
}

/// A named controller profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Controller hostname or IP; the API is reached on port 8443.
    pub host: Option<String>,

    /// Full controller root URL, overriding `host` (e.g. a proxy).
    pub controller: Option<String>,

    pub username: Option<String>,

    /// Plaintext password; prefer the keyring or `SMARTZONE_PASSWORD`.
    pub password: Option<String>,

    /// API version segment, e.g. `8_1`.
    pub api_version: Option<String>,

    /// Path to a PEM CA bundle for self-signed controllers.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,
}

impl Profile {
    /// Controller root URL from `controller`, falling back to `host`.
    pub fn controller_url(&self, profile_name: &str) -> Result<Url, ConfigError> {
        if let Some(ref raw) = self.controller {
            return raw.parse().map_err(|_| ConfigError::Validation {
                field: "controller".into(),
                reason: format!("invalid URL: {raw}"),
            });
        }
        match self.host.as_deref().filter(|h| !h.trim().is_empty()) {
            Some(host) => {
                SmartZoneClient::controller_url_for_host(host).map_err(|_| {
                    ConfigError::Validation {
                        field: "host".into(),
                        reason: format!("invalid host: {host}"),
                    }
                })
            }
            None => Err(ConfigError::Validation {
                field: "host".into(),
                reason: format!("profile '{profile_name}' sets neither host nor controller"),
            }),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("net", "smartzone", "smartzone").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("smartzone");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment.
///
/// Precedence: built-in defaults, then the TOML file (if present), then
/// `SMARTZONE_*` variables with `__` separating nesting levels
/// (`SMARTZONE_DEFAULTS__TIMEOUT=60`, `SMARTZONE_DEFAULT_PROFILE=lab`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = file_figment(path).merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load only what the canonical file says, ignoring `SMARTZONE_*` overrides.
///
/// Commands that write the file back start from this. A missing file yields
/// the defaults; a file that fails to parse is an error.
pub fn load_file_config() -> Result<Config, ConfigError> {
    load_file_config_from(&config_path())
}

pub fn load_file_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = file_figment(path).extract()?;
    Ok(config)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Username from the profile, else `SMARTZONE_USERNAME`.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var(format!("{ENV_PREFIX}USERNAME")).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Password from `SMARTZONE_PASSWORD`, the system keyring, or the profile.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(format!("{ENV_PREFIX}PASSWORD")) {
        return Ok(SecretString::from(pw));
    }

    // 2. Keyring
    if let Some(pw) = keyring_password(profile_name) {
        return Ok(SecretString::from(pw));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn keyring_password(profile_name: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .ok()?
        .get_password()
        .ok()
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })?;
    entry
        .set_password(password)
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

// ── Profile → client ────────────────────────────────────────────────

/// Everything needed to open a session against one controller.
#[derive(Debug, Clone)]
pub struct Connection {
    pub controller_url: Url,
    pub api_version: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

impl Connection {
    pub fn into_client(self) -> Result<SmartZoneClient, ConfigError> {
        Ok(SmartZoneClient::new(
            self.controller_url,
            &self.api_version,
            self.credentials,
            &self.transport,
        )?)
    }
}

/// TLS mode for a profile: explicit `insecure` wins, then `ca_cert`, then the
/// global default.
pub fn profile_tls(profile: &Profile, defaults: &Defaults) -> TlsMode {
    if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else if profile.insecure.is_none() && defaults.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    }
}

/// Build a `Connection` from a profile with no CLI overrides.
pub fn profile_to_connection(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<Connection, ConfigError> {
    let controller_url = profile.controller_url(profile_name)?;
    let username = resolve_username(profile, profile_name)?;
    let password = resolve_password(profile, profile_name)?;

    let transport = TransportConfig::default()
        .with_tls(profile_tls(profile, defaults))
        .with_timeout(Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)));

    Ok(Connection {
        controller_url,
        api_version: profile
            .api_version
            .clone()
            .unwrap_or_else(|| defaults.api_version.clone()),
        credentials: Credentials::new(username, password),
        transport,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "lab"

[defaults]
timeout = 45

[profiles.lab]
host = "sz.lab.example"
username = "admin"
password = "from-file"
insecure = true

[profiles.prod]
controller = "https://sz.example.net:9443/"
username = "ops"
api_version = "9_0"
"#;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.defaults.api_version, "8_1");
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();

            assert_eq!(cfg.active_profile_name(None), "lab");
            assert_eq!(cfg.defaults.timeout, 45);
            assert_eq!(cfg.defaults.output, "table");
            assert_eq!(
                cfg.profile("prod").unwrap().api_version.as_deref(),
                Some("9_0")
            );
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("SMARTZONE_DEFAULT_PROFILE", "prod");
            jail.set_env("SMARTZONE_DEFAULTS__TIMEOUT", "5");
            jail.set_env("SMARTZONE_HOST", "ignored.example");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.active_profile_name(None), "prod");
            assert_eq!(cfg.active_profile_name(Some("lab")), "lab");
            assert_eq!(cfg.defaults.timeout, 5);
            Ok(())
        });
    }

    #[test]
    fn file_only_load_ignores_env() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("SMARTZONE_DEFAULT_PROFILE", "prod");
            jail.set_env("SMARTZONE_DEFAULTS__TIMEOUT", "5");

            let cfg = load_file_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.active_profile_name(None), "lab");
            assert_eq!(cfg.defaults.timeout, 45);
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "default_profile = \"lab\"\n[profiles.lab\nhost = 1")?;

            let file_only = load_file_config_from(Path::new("config.toml"));
            assert!(matches!(file_only, Err(ConfigError::Figment(_))));
            assert!(load_config_from(Path::new("config.toml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn env_password_beats_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("SMARTZONE_PASSWORD", "from-env");
            let profile = Profile {
                password: Some("from-file".into()),
                ..Profile::default()
            };
            let pw = resolve_password(&profile, "lab").unwrap();
            assert_eq!(pw.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn username_falls_back_to_env() {
        Jail::expect_with(|jail| {
            jail.set_env("SMARTZONE_USERNAME", "env-user");
            let user = resolve_username(&Profile::default(), "lab").unwrap();
            assert_eq!(user, "env-user");
            Ok(())
        });
    }

    #[test]
    fn host_maps_to_management_port() {
        let profile = Profile {
            host: Some("10.0.0.5".into()),
            ..Profile::default()
        };
        assert_eq!(
            profile.controller_url("lab").unwrap().as_str(),
            "https://10.0.0.5:8443/"
        );
    }

    #[test]
    fn controller_url_overrides_host() {
        let profile = Profile {
            host: Some("10.0.0.5".into()),
            controller: Some("https://proxy.example/sz/".into()),
            ..Profile::default()
        };
        assert_eq!(
            profile.controller_url("lab").unwrap().as_str(),
            "https://proxy.example/sz/"
        );
    }

    #[test]
    fn profile_without_address_is_invalid() {
        let err = Profile::default().controller_url("lab").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "host"));
    }

    #[test]
    fn tls_precedence() {
        let defaults = Defaults::default();
        let insecure_defaults = Defaults {
            insecure: true,
            ..Defaults::default()
        };

        let plain = Profile::default();
        assert!(matches!(profile_tls(&plain, &defaults), TlsMode::System));
        assert!(matches!(
            profile_tls(&plain, &insecure_defaults),
            TlsMode::DangerAcceptInvalid
        ));

        let pinned = Profile {
            ca_cert: Some("/etc/sz-ca.pem".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_tls(&pinned, &insecure_defaults),
            TlsMode::CustomCa(_)
        ));

        let strict = Profile {
            insecure: Some(false),
            ..Profile::default()
        };
        assert!(matches!(
            profile_tls(&strict, &insecure_defaults),
            TlsMode::System
        ));
    }

    #[test]
    fn profile_builds_a_client() {
        Jail::expect_with(|jail| {
            jail.set_env("SMARTZONE_PASSWORD", "pw");
            let profile = Profile {
                controller: Some("https://sz.example.net:9443/".into()),
                username: Some("ops".into()),
                api_version: Some("9_0".into()),
                timeout: Some(12),
                ..Profile::default()
            };
            let conn = profile_to_connection(&profile, "prod", &Defaults::default()).unwrap();
            assert_eq!(conn.api_version, "9_0");
            assert_eq!(conn.credentials.username, "ops");
            assert_eq!(conn.transport.timeout, Duration::from_secs(12));

            let client = conn.into_client().unwrap();
            assert_eq!(
                client.base_url().as_str(),
                "https://sz.example.net:9443/wsg/api/public/v9_0/"
            );
            assert!(!client.is_authenticated());
            Ok(())
        });
    }

    #[test]
    fn save_then_load() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");
            let mut cfg = Config::default();
            cfg.profiles.insert(
                "lab".into(),
                Profile {
                    host: Some("sz.lab.example".into()),
                    username: Some("admin".into()),
                    ..Profile::default()
                },
            );
            save_config_to(&cfg, &path).unwrap();
            assert_eq!(load_config_from(&path).unwrap(), cfg);
            Ok(())
        });
    }
}
