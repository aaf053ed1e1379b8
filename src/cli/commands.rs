//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stratovia - CloudAPI infrastructure client.
#[derive(Parser, Debug)]
#[command(name = "stratovia")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "STRATOVIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Stratovia project.
    Init {
        /// Directory to initialize (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the client configuration.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// Manage datacenters.
    Datacenters {
        /// Datacenter subcommand.
        #[command(subcommand)]
        command: DatacenterCommands,
    },

    /// Manage LANs inside a datacenter.
    Lans {
        /// LAN subcommand.
        #[command(subcommand)]
        command: LanCommands,
    },

    /// Manage servers inside a datacenter.
    Servers {
        /// Server subcommand.
        #[command(subcommand)]
        command: ServerCommands,
    },

    /// Manage NICs on a server.
    Nics {
        /// NIC subcommand.
        #[command(subcommand)]
        command: NicCommands,
    },

    /// Inspect provisioning requests.
    Requests {
        /// Request subcommand.
        #[command(subcommand)]
        command: RequestCommands,
    },
}

/// Datacenter management subcommands.
#[derive(Subcommand, Debug)]
pub enum DatacenterCommands {
    /// List all datacenters.
    List,

    /// Show a single datacenter.
    Get {
        /// Datacenter ID.
        id: String,
    },

    /// Create a datacenter.
    Create {
        /// Datacenter name.
        name: String,

        /// Location (defaults to the configured default location).
        #[arg(short, long)]
        location: Option<String>,

        /// Description.
        #[arg(short, long)]
        description: Option<String>,

        /// Wait for provisioning to finish.
        #[arg(long)]
        wait: bool,
    },

    /// Delete a datacenter and everything in it.
    Delete {
        /// Datacenter ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Wait for the deletion to finish.
        #[arg(long)]
        wait: bool,
    },
}

/// LAN management subcommands.
#[derive(Subcommand, Debug)]
pub enum LanCommands {
    /// List LANs in a datacenter.
    List {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,
    },

    /// Show a single LAN.
    Get {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// LAN ID.
        id: String,
    },

    /// Create a LAN.
    Create {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// LAN name.
        #[arg(short, long)]
        name: Option<String>,

        /// Make the LAN public.
        #[arg(long)]
        public: bool,

        /// Wait for provisioning to finish.
        #[arg(long)]
        wait: bool,
    },

    /// List the NICs attached to a LAN.
    Members {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// LAN ID.
        id: String,
    },

    /// Delete a LAN.
    Delete {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// LAN ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Wait for the deletion to finish.
        #[arg(long)]
        wait: bool,
    },
}

/// Server management subcommands.
#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// List servers in a datacenter.
    List {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,
    },

    /// Show a single server.
    Get {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server ID.
        id: String,
    },

    /// Create a server.
    Create {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server name.
        name: String,

        /// Number of cores.
        #[arg(long, default_value = "1")]
        cores: u32,

        /// RAM in MB (must be a multiple of 256).
        #[arg(long, default_value = "1024")]
        ram: u32,

        /// Availability zone (e.g. AUTO, ZONE_1, ZONE_2).
        #[arg(long)]
        availability_zone: Option<String>,

        /// Wait for provisioning to finish.
        #[arg(long)]
        wait: bool,
    },

    /// Delete a server.
    Delete {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Wait for the deletion to finish.
        #[arg(long)]
        wait: bool,
    },
}

/// NIC management subcommands.
#[derive(Subcommand, Debug)]
pub enum NicCommands {
    /// List NICs on a server.
    List {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server ID.
        #[arg(short, long)]
        server: String,
    },

    /// Show a single NIC.
    Get {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server ID.
        #[arg(short, long)]
        server: String,

        /// NIC ID.
        id: String,
    },

    /// Create a NIC.
    Create {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server ID.
        #[arg(short, long)]
        server: String,

        /// NIC name.
        #[arg(short, long)]
        name: Option<String>,

        /// LAN ID to attach to.
        #[arg(short, long)]
        lan: Option<u32>,

        /// Static IP addresses to assign.
        #[arg(long)]
        ip: Vec<String>,

        /// Wait for provisioning to finish.
        #[arg(long)]
        wait: bool,
    },

    /// Delete a NIC.
    Delete {
        /// Datacenter ID.
        #[arg(short, long)]
        datacenter: String,

        /// Server ID.
        #[arg(short, long)]
        server: String,

        /// NIC ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,

        /// Wait for the deletion to finish.
        #[arg(long)]
        wait: bool,
    },
}

/// Provisioning request subcommands.
#[derive(Subcommand, Debug)]
pub enum RequestCommands {
    /// List recorded provisioning requests.
    List,

    /// Show the current status of a request.
    Status {
        /// Request ID.
        id: String,
    },

    /// Wait for a request to reach a terminal status.
    Wait {
        /// Request ID.
        id: String,

        /// Overall wait budget in seconds (defaults to the configured value).
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
