//! Clap derive structures for the `ezvy` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ezvy -- CLI for EZVIZ smart home devices
#[derive(Debug, Parser)]
#[command(
    name = "ezvy",
    version,
    about = "Control EZVIZ cameras, plugs, and doorbells from the command line",
    long_about = "A CLI for the EZVIZ cloud: enumerate devices, toggle switch \
        channels (plugs, lights, infrared, alarm tones), and work with \
        doorbell visit events.\n\n\
        Run `ezvy setup` first to configure an account.",
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
    /// Account profile to use
    #[arg(long, short = 'a', env = "EZVY_ACCOUNT", global = true)]
    pub account: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EZVY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "EZVY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure an account (guided wizard, or flags for scripting)
    Setup(SetupArgs),

    /// List devices on the account
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Control switch channels (plugs, lights, infrared, ...)
    #[command(alias = "sw", alias = "s")]
    Switches(SwitchesArgs),

    /// Doorbell visit events and gate control
    #[command(alias = "db")]
    Doorbell(DoorbellArgs),

    /// Manage CLI configuration and accounts
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SETUP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Account email (skips the prompt)
    #[arg(long)]
    pub email: Option<String>,

    /// Region: eu or ru (skips the prompt)
    #[arg(long, value_enum)]
    pub region: Option<RegionChoice>,

    /// Custom API hostname (overrides --region)
    #[arg(long, conflicts_with = "region")]
    pub api_host: Option<String>,

    /// Name for the account profile
    #[arg(long, default_value = "default")]
    pub name: String,

    /// Skip the login validation step
    #[arg(long)]
    pub no_verify: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionChoice {
    /// Europe (apiieu.ezvizlife.com)
    Eu,
    /// Russia (apirus.ezvizru.com)
    Ru,
}

impl RegionChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eu => "eu",
            Self::Ru => "ru",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List all devices
    #[command(alias = "ls")]
    List,

    /// Get device details
    Get {
        /// Device serial number
        serial: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SWITCHES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SwitchesArgs {
    #[command(subcommand)]
    pub command: SwitchesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SwitchesCommand {
    /// List switch channels, optionally for one device
    #[command(alias = "ls")]
    List {
        /// Only show channels on this device serial
        #[arg(long, short = 'd')]
        device: Option<String>,
    },

    /// Turn a switch channel on
    On {
        /// Device serial number
        device: String,

        /// Channel: a name (plug, light, infrared, ...) or numeric code.
        /// Required when the device has more than one channel.
        #[arg(long, short = 'c')]
        channel: Option<String>,
    },

    /// Turn a switch channel off
    Off {
        /// Device serial number
        device: String,

        /// Channel: a name (plug, light, infrared, ...) or numeric code.
        /// Required when the device has more than one channel.
        #[arg(long, short = 'c')]
        channel: Option<String>,
    },

    /// Show current channel states for one device
    Status {
        /// Device serial number
        device: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOORBELL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DoorbellArgs {
    #[command(subcommand)]
    pub command: DoorbellCommand,
}

#[derive(Debug, Subcommand)]
pub enum DoorbellCommand {
    /// List visit events
    Events {
        /// Doorbell device serial
        device: String,

        /// Hours of history to include
        #[arg(long, default_value = "24")]
        hours: u32,

        /// Max results per page
        #[arg(long, short = 'l', default_value = "20")]
        limit: u32,
    },

    /// Download the snapshot for a visit event
    Snapshot {
        /// Doorbell device serial
        device: String,

        /// Visit event ID
        event: String,

        /// Output file (default: <event>.jpg)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Mark a visit event as read
    MarkRead {
        /// Doorbell device serial
        device: String,

        /// Visit event ID
        event: String,
    },

    /// Trigger the gate/door relay
    OpenGate {
        /// Doorbell device serial
        device: String,
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
    /// Display current resolved configuration (passwords masked)
    Show,

    /// List configured accounts
    Accounts,

    /// Set the default account
    Use {
        /// Account name to set as default
        name: String,
    },

    /// Remove an account profile (and its keyring entry)
    Remove {
        /// Account name to remove
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Account name (default: active account)
        #[arg(long)]
        account: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
