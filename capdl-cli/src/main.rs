mod cli;
mod commands;
mod config;
mod error;

use crate::{
    cli::{Args, Commands},
    commands::{CommandExecutor, DownloadOptions},
    config::AppConfig,
    error::Result,
};
use clap::Parser;
use std::{io::Write, process, time::Duration};
use tracing::{Level, debug, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        error!("Application error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    // Load configuration
    let config = AppConfig::load(args.config.as_deref())?;
    debug!("Loaded configuration: {:?}", config);

    match args.command {
        Commands::Download {
            references,
            lang,
            output_dir,
            api_key,
            cookies,
            force,
            no_jitter,
        } => {
            let mut executor = CommandExecutor::new(config);
            if let Some(proxy) = args.proxy {
                executor = executor.with_proxy(proxy, args.proxy_username, args.proxy_password);
            }
            if let Some(secs) = args.timeout {
                executor = executor.with_timeout(Duration::from_secs(secs));
            }

            executor
                .download(
                    &references,
                    DownloadOptions {
                        lang,
                        output_dir,
                        api_key,
                        cookies,
                        force,
                        no_jitter,
                    },
                )
                .await?;
        }

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            let mut stdout = std::io::stdout();
            generate(shell, &mut cmd, bin_name, &mut stdout);
            stdout.flush()?;
        }

        Commands::Config { show, reset } => {
            if reset {
                AppConfig::reset(args.config.as_deref())?;
                println!("Configuration reset to defaults");
            } else if show {
                println!("{}", config.show()?);
            } else {
                println!(
                    "Use --show to display current configuration or --reset to reset to defaults"
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_level(verbose))
        .with(filter)
        .init();
}
