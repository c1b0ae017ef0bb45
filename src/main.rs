//! cf-ops CLI entrypoint.
//!
//! This is the main entrypoint for the cf-ops command-line tool.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use cf_operations::cli::{Cli, Commands, OutputFormat, OutputFormatter};
use cf_operations::client::v2::GetFeatureFlagRequest;
use cf_operations::client::{CloudFoundryClient, RestClient};
use cf_operations::config::{ConfigParser, ConfigValidator, OpsConfig};
use cf_operations::error::Result;
use cf_operations::logcache::{LogCacheClient, ReadRequest};
use cf_operations::operations::{
    BindServiceInstanceRequest, CloudFoundryOperations, DeleteRouteRequest,
    TerminateApplicationTaskRequest, UnbindServiceInstanceRequest,
};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.output);

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

/// Initializes the logging system. Logs go to stderr so that stdout only
/// carries command output.
fn init_logging(verbose: bool, format: OutputFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        OutputFormat::Json => builder.json().init(),
        OutputFormat::Text => builder.init(),
    }
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Validate { warnings } => cmd_validate(config_path, warnings, &formatter),
        Commands::Bind {
            application,
            service_instance,
            parameters,
        } => {
            let request = BindServiceInstanceRequest::builder()
                .application_name(application)
                .service_instance_name(service_instance)
                .parameters(parameters.into_iter().collect())
                .build()?;
            let ops = operations(config_path)?;
            ops.services().bind(&request).await?;
            print!(
                "{}",
                formatter.format_success(&format!(
                    "Bound {} to {}",
                    request.service_instance_name(),
                    request.application_name()
                ))
            );
            Ok(())
        }
        Commands::Unbind {
            application,
            service_instance,
        } => {
            let request = UnbindServiceInstanceRequest::builder()
                .application_name(application)
                .service_instance_name(service_instance)
                .build()?;
            let ops = operations(config_path)?;
            ops.services().unbind(&request).await?;
            print!(
                "{}",
                formatter.format_success(&format!(
                    "Unbound {} from {}",
                    request.service_instance_name(),
                    request.application_name()
                ))
            );
            Ok(())
        }
        Commands::Services => {
            let instances = operations(config_path)?.services().list_instances().await?;
            print!("{}", formatter.format_service_instances(&instances));
            Ok(())
        }
        Commands::DeleteRoute {
            domain,
            host,
            path,
            port,
        } => {
            let mut builder = DeleteRouteRequest::builder().domain(domain);
            if let Some(host) = host {
                builder = builder.host(host);
            }
            if let Some(path) = path {
                builder = builder.path(path);
            }
            if let Some(port) = port {
                builder = builder.port(port);
            }
            let request = builder.build()?;
            operations(config_path)?.routes().delete(&request).await?;
            print!(
                "{}",
                formatter.format_success(&format!("Deleted route {}", request.route()))
            );
            Ok(())
        }
        Commands::TerminateTask {
            application,
            sequence_id,
        } => {
            let request = TerminateApplicationTaskRequest::builder()
                .application_name(application)
                .sequence_id(sequence_id)
                .build()?;
            operations(config_path)?
                .applications()
                .terminate_task(&request)
                .await?;
            print!(
                "{}",
                formatter.format_success(&format!(
                    "Terminated task {} of {}",
                    request.sequence_id(),
                    request.application_name()
                ))
            );
            Ok(())
        }
        Commands::FeatureFlag { name } => {
            let request = GetFeatureFlagRequest::new(name)?;
            let (client, _) = create_client(config_path)?;
            let flag = client.get_feature_flag(&request).await?;
            print!("{}", formatter.format_feature_flag(&flag));
            Ok(())
        }
        Commands::Logs {
            source_id,
            limit,
            types,
            start_time,
        } => {
            let mut builder = ReadRequest::builder().source_id(source_id).limit(limit);
            for kind in types {
                builder = builder.envelope_type(kind.into());
            }
            if let Some(start) = start_time {
                builder = builder.start_time(start);
            }
            let request = builder.build()?;
            let (client, _) = create_client(config_path)?;
            let response = client.read(&request).await?;
            print!("{}", formatter.format_envelopes(&response.envelopes.batch));
            Ok(())
        }
    }
}

/// Validate configuration.
fn cmd_validate(
    config_path: Option<&Path>,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let config = load_config(config_path)?;
    let result = ConfigValidator::new().validate(&config)?;
    info!(
        "Configuration has {} error(s) and {} warning(s)",
        result.error_count(),
        result.warning_count()
    );
    print!("{}", formatter.format_validation(&config, &result, show_warnings));
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads and validates the configuration.
fn load_config(config_path: Option<&Path>) -> Result<OpsConfig> {
    let parser = match config_path.and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => ConfigParser::new().with_base_path(dir),
        _ => ConfigParser::new(),
    };
    parser.load(config_path)
}

/// Creates the REST client from the configuration and the access token.
fn create_client(config_path: Option<&Path>) -> Result<(RestClient, OpsConfig)> {
    let config = load_config(config_path)?;
    ConfigValidator::new().validate(&config)?;

    let token = ConfigParser::access_token()?;
    let client = config.api.client_builder().access_token(token).build()?;
    debug!("Using API endpoint {}", client.api_url());
    Ok((client, config))
}

/// Creates the operations façade for the targeted space.
fn operations(config_path: Option<&Path>) -> Result<CloudFoundryOperations<RestClient>> {
    let (client, config) = create_client(config_path)?;
    let mut ops =
        CloudFoundryOperations::new(Arc::new(client)).with_polling(config.polling.into());
    if let Some(space_id) = config.target.space_id {
        ops = ops.with_space_id(space_id);
    }
    Ok(ops)
}
