use color_eyre::eyre::{Result, WrapErr};
use echo_lambda::config::FunctionConfig;
use echo_lambda::handler::EchoHandler;
use echo_lambda::local::{LocalConfig, LocalServer};
use echo_lambda::logging::{self, LogFormat};
use echo_lambda::runtime;
use std::net::SocketAddr;

use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let config = FunctionConfig::from_env().wrap_err("Failed to read function configuration")?;

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Default to the Lambda runtime if no mode specified
    let mode = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "lambda".to_string());

    match mode.as_str() {
        "lambda" => {
            logging::init(&config, LogFormat::Lambda)?;
            info!(
                environment = config.environment.as_deref().unwrap_or("unset"),
                function = config.function_name.as_deref().unwrap_or("unknown"),
                log_level = %config.log_level,
                "Starting echo function"
            );
            if !config.runtime_api_available {
                tracing::warn!("AWS_LAMBDA_RUNTIME_API is not set; the runtime will fail to connect");
            }

            runtime::run(EchoHandler::new())
                .await
                .wrap_err("Lambda runtime exited with an error")?;
        }
        "serve" => {
            logging::init(&config, LogFormat::Terminal)?;

            let port = match args.get(2) {
                Some(p) => p
                    .parse::<u16>()
                    .wrap_err_with(|| format!("Invalid port: {p}"))?,
                None => 8080,
            };

            let local_config = LocalConfig {
                bind_addr: SocketAddr::from(([127, 0, 0, 1], port)),
                max_connections: 1000, // Higher limit for load testing
                ..Default::default()
            };

            info!(
                address = %local_config.bind_addr,
                max_connections = local_config.max_connections,
                environment = config.environment.as_deref().unwrap_or("local"),
                "Starting local echo server"
            );

            let server = LocalServer::new(local_config, EchoHandler::new());
            server.run().await.wrap_err("Failed to run local echo server")?;
        }
        _ => {
            let program = program_name(&args);
            eprintln!("Usage: {program} [lambda|serve] [port]");
            eprintln!("  lambda: Serve invocations from the Lambda Runtime API (default)");
            eprintln!("  serve:  Run a local HTTP server that behaves like API Gateway");
            eprintln!("  port:   Port for the local server (default: 8080)");
            eprintln!();
            eprintln!("Environment:");
            eprintln!("  LOG_LEVEL    trace|debug|info|warn|error|off (default: info)");
            eprintln!("  ENVIRONMENT  Deployment environment name");
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {program}                # Run inside AWS Lambda");
            eprintln!("  {program} serve 3000     # Local server on port 3000");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Name to print in usage text; argv may be empty
fn program_name(args: &[String]) -> &str {
    args.first().map_or("echo-lambda", String::as_str)
}
