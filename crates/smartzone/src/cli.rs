//! Clap derive structures for the `smartzone` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.
//! Also compiled by `build.rs` for man page generation, so it may only
//! depend on clap and clap_complete.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// smartzone -- CLI for Ruckus SmartZone wireless controllers
#[derive(Debug, Parser)]
#[command(
    name = "smartzone",
    version,
    about = "Manage Ruckus SmartZone wireless controllers from the command line",
    long_about = "Query zones, AP groups and access points on a Ruckus SmartZone\n\
        controller through its public REST API, and run AP operations such as\n\
        reboot and rename. Every command opens a service-ticket session,\n\
        runs, and logs out again.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "SMARTZONE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller hostname or IP (API on port 8443)
    #[arg(long, short = 'H', env = "SMARTZONE_HOST", global = true)]
    pub host: Option<String>,

    /// Full controller root URL (overrides --host and the profile)
    #[arg(long, short = 'c', env = "SMARTZONE_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Username for the service-ticket login
    #[arg(long, short = 'u', env = "SMARTZONE_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for the service-ticket login
    #[arg(long, env = "SMARTZONE_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Public API version segment (e.g. 8_1)
    #[arg(long, env = "SMARTZONE_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// Output format [default: config `defaults.output`, else table]
    #[arg(long, short = 'o', env = "SMARTZONE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SMARTZONE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SMARTZONE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and inspect zones
    #[command(alias = "z")]
    Zones(ZonesArgs),

    /// List and inspect AP groups within a zone
    #[command(alias = "g")]
    Groups(GroupsArgs),

    /// Inventory, inspect and operate access points
    #[command(alias = "ap")]
    Aps(ApsArgs),

    /// Show the controller cluster summary
    #[command(alias = "sys")]
    Controller,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Paging and scoping arguments shared by list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Index of the first entry to fetch
    #[arg(long)]
    pub index: Option<u64>,

    /// Entries per page (controller default: 100)
    #[arg(long, short = 'l')]
    pub list_size: Option<u32>,

    /// Restrict the listing to a domain
    #[arg(long, short = 'd')]
    pub domain: Option<String>,

    /// Fetch all pages automatically
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ZONES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ZonesArgs {
    #[command(subcommand)]
    pub command: ZonesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ZonesCommand {
    /// List zones
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a zone's configuration
    Get {
        /// Zone ID
        zone: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AP GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List AP groups in a zone
    #[command(alias = "ls")]
    List {
        /// Zone ID
        zone: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show an AP group and its members
    Get {
        /// Zone ID
        zone: String,

        /// AP group ID
        group: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACCESS POINTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApsArgs {
    #[command(subcommand)]
    pub command: ApsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApsCommand {
    /// List access points
    #[command(alias = "ls")]
    List(ListArgs),

    /// Search access points with operational detail (all pages)
    Query {
        /// Only APs in this zone
        #[arg(long, short = 'z')]
        zone: Option<String>,

        /// Only APs in this AP group
        #[arg(long, short = 'g')]
        group: Option<String>,

        /// Full-text search across AP attributes
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Entries per page
        #[arg(long, short = 'l')]
        list_size: Option<u32>,
    },

    /// Show an AP's configuration
    Get {
        /// AP MAC address
        mac: String,
    },

    /// Show LLDP neighbors seen on the AP's wired ports
    Lldp {
        /// AP MAC address
        mac: String,

        /// List every neighbor, not just the first
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Show the AP's uplink port status
    Port {
        /// AP MAC address
        mac: String,
    },

    /// Reboot an AP
    Reboot {
        /// AP MAC address
        mac: String,
    },

    /// Rename an AP, optionally moving it to another zone / AP group
    Rename {
        /// AP MAC address
        mac: String,

        /// New AP name
        name: String,

        /// Target zone ID (default: the AP's current zone)
        #[arg(long, short = 'z')]
        zone: Option<String>,

        /// Target AP group ID (default: the AP's current group)
        #[arg(long, short = 'g')]
        group: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a field on the active profile
    Set {
        /// Field name: host, controller, username, api_version, ca_cert, insecure, timeout
        key: String,

        /// New value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
