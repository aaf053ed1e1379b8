//! Stratovia CLI entrypoint.
//!
//! This is the main entrypoint for the stratovia command-line tool.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use stratovia_cloud_api::cli::{
    Cli, Commands, DatacenterCommands, LanCommands, NicCommands, OutputFormatter, RequestCommands,
    ServerCommands,
};
use stratovia_cloud_api::cloudapi::{
    CloudApiClient, CreateDatacenterRequest, CreateLanRequest, CreateNicRequest,
    CreateServerRequest, Trackable,
};
use stratovia_cloud_api::config::{find_config_file, ClientConfig, ConfigParser, ConfigValidator};
use stratovia_cloud_api::error::Result;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Validate { warnings } => cmd_validate(cli.config.as_ref(), warnings, &formatter),
        Commands::Datacenters { command } => {
            cmd_datacenters(cli.config.as_ref(), command, &formatter).await
        }
        Commands::Lans { command } => cmd_lans(cli.config.as_ref(), command, &formatter).await,
        Commands::Servers { command } => {
            cmd_servers(cli.config.as_ref(), command, &formatter).await
        }
        Commands::Nics { command } => cmd_nics(cli.config.as_ref(), command, &formatter).await,
        Commands::Requests { command } => {
            cmd_requests(cli.config.as_ref(), command, &formatter).await
        }
    }
}

/// Initialize a new project.
fn cmd_init(path: &PathBuf, force: bool) -> Result<()> {
    info!("Initializing new Stratovia project in: {}", path.display());

    let config_path = path.join("stratovia.yaml");
    let env_path = path.join(".env.example");
    let gitignore_path = path.join(".gitignore");

    // Check if files exist
    if !force && config_path.exists() {
        eprintln!("Configuration file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    // Create directory if needed
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }

    // Write config template
    let config_template = include_str!("../templates/stratovia.yaml");
    std::fs::write(&config_path, config_template)?;
    eprintln!("Created: {}", config_path.display());

    // Write .env.example
    let env_template = include_str!("../templates/.env.example");
    std::fs::write(&env_path, env_template)?;
    eprintln!("Created: {}", env_path.display());

    // Write/update .gitignore
    if gitignore_path.exists() {
        let existing = std::fs::read_to_string(&gitignore_path)?;
        if !existing.contains(".env") {
            let mut file = std::fs::OpenOptions::new()
                .append(true)
                .open(&gitignore_path)?;
            writeln!(file, "\n# Stratovia")?;
            writeln!(file, ".env")?;
            eprintln!("Updated: {}", gitignore_path.display());
        }
    } else {
        std::fs::write(&gitignore_path, ".env\n")?;
        eprintln!("Created: {}", gitignore_path.display());
    }

    eprintln!("\nProject initialized successfully!");
    eprintln!("Next steps:");
    eprintln!("  1. Copy .env.example to .env and fill in your credentials");
    eprintln!("  2. Adjust stratovia.yaml (endpoint, default location, wait budget)");
    eprintln!("  3. Run 'stratovia validate' to check your configuration");
    eprintln!("  4. Run 'stratovia datacenters list' to verify connectivity");

    Ok(())
}

/// Validate configuration.
fn cmd_validate(
    config_path: Option<&PathBuf>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config_file = resolve_config_path(config_path)?;
    info!("Validating configuration: {}", config_file.display());

    // Load .env
    let parser = ConfigParser::new().with_base_path(
        config_file
            .parent()
            .unwrap_or_else(|| std::path::Path::new(".")),
    );
    parser.load_dotenv()?;

    // Parse config
    let config = parser.load_file(&config_file)?;

    // Validate
    let validator = ConfigValidator::new();
    let result = validator.validate(&config)?;

    if result.is_valid() {
        eprintln!("Configuration is valid!");
        if show_warnings && !result.warnings.is_empty() {
            eprintln!("\nWarnings:");
            for warning in &result.warnings {
                eprintln!("  - {warning}");
            }
        }
    }

    // Credentials usually come from the environment, not the file
    if config.auth.username.is_none() || config.auth.password.is_none() {
        if let Err(e) = parser.validate_required_env() {
            formatter.warning(&format!("Credentials not fully configured: {e}"));
        }
    }

    // Show summary
    eprintln!("\nConfiguration summary:");
    eprintln!("  Endpoint: {}", config.api.endpoint);
    eprintln!("  Depth: {}", config.api.depth);
    eprintln!("  Default location: {}", config.defaults.location);
    eprintln!(
        "  Wait: {}s budget, {}s initial interval",
        config.wait.timeout_secs, config.wait.poll_interval_secs
    );

    Ok(())
}

/// Datacenter commands.
async fn cmd_datacenters(
    config_path: Option<&PathBuf>,
    command: DatacenterCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = CloudApiClient::from_config(&config)?;

    match command {
        DatacenterCommands::List => {
            let datacenters = client.list_datacenters().await?;
            eprintln!("{}", formatter.format_datacenters(&datacenters));
        }
        DatacenterCommands::Get { id } => {
            let datacenter = client.get_datacenter(&id).await?;
            eprintln!("{}", formatter.format_datacenter(&datacenter));
        }
        DatacenterCommands::Create {
            name,
            location,
            description,
            wait,
        } => {
            let location = location.unwrap_or_else(|| config.defaults.location.clone());
            let mut request = CreateDatacenterRequest::new(&name, &location);
            if let Some(description) = &description {
                request = request.with_description(description);
            }

            let datacenter = client.create_datacenter(&request).await?;
            eprintln!("{}", formatter.format_datacenter(&datacenter));

            if wait {
                wait_and_report(&client, &datacenter, &config, formatter).await?;
            }
        }
        DatacenterCommands::Delete { id, yes, wait } => {
            if !confirm_delete(yes, &format!("datacenter {id} and everything in it"))? {
                return Ok(());
            }

            let request = client.delete_datacenter(&id).await?;
            formatter.success(&format!("Deletion request {} accepted", request.request_id));

            if wait {
                wait_and_report(&client, &request, &config, formatter).await?;
            }
        }
    }

    Ok(())
}

/// LAN commands.
async fn cmd_lans(
    config_path: Option<&PathBuf>,
    command: LanCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = CloudApiClient::from_config(&config)?;

    match command {
        LanCommands::List { datacenter } => {
            let lans = client.list_lans(&datacenter).await?;
            eprintln!("{}", formatter.format_lans(&lans));
        }
        LanCommands::Get { datacenter, id } => {
            let lan = client.get_lan(&datacenter, &id).await?;
            eprintln!("{}", formatter.format_lan(&lan));
        }
        LanCommands::Create {
            datacenter,
            name,
            public,
            wait,
        } => {
            let mut request = CreateLanRequest::new().with_public(public);
            if let Some(name) = &name {
                request = request.with_name(name);
            }

            let lan = client.create_lan(&datacenter, &request).await?;
            eprintln!("{}", formatter.format_lan(&lan));

            if wait {
                wait_and_report(&client, &lan, &config, formatter).await?;
            }
        }
        LanCommands::Members { datacenter, id } => {
            let members = client.get_lan_members(&datacenter, &id).await?;
            eprintln!("{}", formatter.format_nics(&members));
        }
        LanCommands::Delete {
            datacenter,
            id,
            yes,
            wait,
        } => {
            if !confirm_delete(yes, &format!("LAN {id}"))? {
                return Ok(());
            }

            let request = client.delete_lan(&datacenter, &id).await?;
            formatter.success(&format!("Deletion request {} accepted", request.request_id));

            if wait {
                wait_and_report(&client, &request, &config, formatter).await?;
            }
        }
    }

    Ok(())
}

/// Server commands.
async fn cmd_servers(
    config_path: Option<&PathBuf>,
    command: ServerCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = CloudApiClient::from_config(&config)?;

    match command {
        ServerCommands::List { datacenter } => {
            let servers = client.list_servers(&datacenter).await?;
            eprintln!("{}", formatter.format_servers(&servers));
        }
        ServerCommands::Get { datacenter, id } => {
            let server = client.get_server(&datacenter, &id).await?;
            eprintln!("{}", formatter.format_server(&server));
        }
        ServerCommands::Create {
            datacenter,
            name,
            cores,
            ram,
            availability_zone,
            wait,
        } => {
            let mut request = CreateServerRequest::new(&name, cores, ram);
            if let Some(zone) = &availability_zone {
                request = request.with_availability_zone(zone);
            }

            let server = client.create_server(&datacenter, &request).await?;
            eprintln!("{}", formatter.format_server(&server));

            if wait {
                wait_and_report(&client, &server, &config, formatter).await?;
            }
        }
        ServerCommands::Delete {
            datacenter,
            id,
            yes,
            wait,
        } => {
            if !confirm_delete(yes, &format!("server {id}"))? {
                return Ok(());
            }

            let request = client.delete_server(&datacenter, &id).await?;
            formatter.success(&format!("Deletion request {} accepted", request.request_id));

            if wait {
                wait_and_report(&client, &request, &config, formatter).await?;
            }
        }
    }

    Ok(())
}

/// NIC commands.
async fn cmd_nics(
    config_path: Option<&PathBuf>,
    command: NicCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = CloudApiClient::from_config(&config)?;

    match command {
        NicCommands::List { datacenter, server } => {
            let nics = client.list_nics(&datacenter, &server).await?;
            eprintln!("{}", formatter.format_nics(&nics));
        }
        NicCommands::Get {
            datacenter,
            server,
            id,
        } => {
            let nic = client.get_nic(&datacenter, &server, &id).await?;
            eprintln!("{}", formatter.format_nic(&nic));
        }
        NicCommands::Create {
            datacenter,
            server,
            name,
            lan,
            ip,
            wait,
        } => {
            let mut request = CreateNicRequest::new();
            if let Some(name) = &name {
                request = request.with_name(name);
            }
            if let Some(lan) = lan {
                request = request.with_lan(lan);
            }
            for address in &ip {
                request = request.with_ip(address);
            }

            let nic = client.create_nic(&datacenter, &server, &request).await?;
            eprintln!("{}", formatter.format_nic(&nic));

            if wait {
                wait_and_report(&client, &nic, &config, formatter).await?;
            }
        }
        NicCommands::Delete {
            datacenter,
            server,
            id,
            yes,
            wait,
        } => {
            if !confirm_delete(yes, &format!("NIC {id}"))? {
                return Ok(());
            }

            let request = client.delete_nic(&datacenter, &server, &id).await?;
            formatter.success(&format!("Deletion request {} accepted", request.request_id));

            if wait {
                wait_and_report(&client, &request, &config, formatter).await?;
            }
        }
    }

    Ok(())
}

/// Provisioning request commands.
async fn cmd_requests(
    config_path: Option<&PathBuf>,
    command: RequestCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = CloudApiClient::from_config(&config)?;

    match command {
        RequestCommands::List => {
            let requests = client.list_requests().await?;
            eprintln!("{}", formatter.format_requests(&requests));
        }
        RequestCommands::Status { id } => {
            let status = client.get_request_status(&id).await?;
            eprintln!("{}", formatter.format_request_status(&status));
        }
        RequestCommands::Wait { id, timeout_secs } => {
            let mut options = config.wait.to_wait_options();
            if let Some(timeout_secs) = timeout_secs {
                options = options.with_timeout(std::time::Duration::from_secs(timeout_secs));
            }

            let status = client.wait_for_request(&id, &options).await?;
            eprintln!("{}", formatter.format_request_status(&status));
        }
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolves the configuration file path.
fn resolve_config_path(config_path: Option<&PathBuf>) -> Result<PathBuf> {
    config_path.map_or_else(|| find_config_file("."), |path| Ok(path.clone()))
}

/// Loads configuration, applying `.env` and environment overrides.
///
/// A missing configuration file is not an error: the defaults plus the
/// environment are enough to talk to the API.
fn load_config(config_path: Option<&PathBuf>) -> Result<ClientConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.clone()),
        None => find_config_file(".").ok(),
    };

    let Some(config_file) = config_file else {
        debug!("No configuration file found, using defaults");
        let parser = ConfigParser::new();
        parser.load_dotenv()?;

        let mut config = ClientConfig::default();
        ConfigParser::apply_env_overrides(&mut config);
        return Ok(config);
    };

    debug!("Loading configuration from: {}", config_file.display());
    let parser = ConfigParser::new().with_base_path(
        config_file
            .parent()
            .unwrap_or_else(|| std::path::Path::new(".")),
    );
    parser.load_dotenv()?;

    let config = parser.load_with_env(&config_file)?;

    // Validate
    let validator = ConfigValidator::new();
    validator.validate(&config)?;

    Ok(config)
}

/// Waits for the provisioning request behind `resource` and reports the
/// outcome.
async fn wait_and_report<T: Trackable>(
    client: &CloudApiClient,
    resource: &T,
    config: &ClientConfig,
    formatter: &OutputFormatter,
) -> Result<()> {
    let options = config.wait.to_wait_options();

    match client.wait_for_completion_with(resource, &options).await? {
        Some(status) => eprintln!("{}", formatter.format_request_status(&status)),
        None => formatter.warning("No provisioning request to wait for"),
    }

    Ok(())
}

/// Prompts for confirmation before a delete unless `--yes` was given.
fn confirm_delete(auto_approve: bool, what: &str) -> Result<bool> {
    if auto_approve {
        return Ok(true);
    }

    eprint!("This will delete {what}. Continue? [y/N]: ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim().eq_ignore_ascii_case("y") {
        Ok(true)
    } else {
        eprintln!("Delete cancelled.");
        Ok(false)
    }
}
