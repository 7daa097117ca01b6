use anyhow::{Context, Result};
use clap::Parser;
use link_sim::config::{Cli, Mode};
use link_sim::logging::init_logging_with_config;
use link_sim::render::{print_json, ConsoleRenderer};
use link_sim::sampler::MetricsSampler;
use link_sim::server::{MetricsServer, ServerMonitor};
use link_sim::shutdown::CancellationToken;
use link_sim::ticker::run_console_printer;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    init_logging_with_config(&cli.log_level, cli.is_json_format());

    if let Err(e) = cli.validate() {
        error!(error = %e, "Invalid configuration");
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!(error = %e, "link-sim failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn build_sampler(cli: &Cli) -> MetricsSampler {
    match cli.seed {
        Some(seed) => MetricsSampler::with_seed(cli.bounds, seed),
        None => {
            let mut sampler = MetricsSampler::new(cli.bounds);
            sampler.ensure_initialized();
            sampler
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut sampler = build_sampler(&cli);
    let shutdown = CancellationToken::new();
    if cli.mode() != Mode::Json {
        shutdown
            .cancel_on_ctrlc()
            .context("Failed to set Ctrl+C handler")?;
    }

    match cli.mode() {
        Mode::Json => {
            let metrics = sampler.generate_metrics();
            print_json(&metrics).context("Failed to write JSON sample")?;
        }
        Mode::Console => {
            let renderer = ConsoleRenderer::new(!cli.quiet);
            info!("Press Ctrl+C to stop");
            run_console_printer(
                &mut sampler,
                &renderer,
                cli.interval(),
                cli.count,
                &shutdown,
            );
        }
        Mode::Http(_) => {
            let addr = cli.address().context("HTTP mode without an address")?;
            let server = MetricsServer::bind(&addr)?;

            let monitor = ServerMonitor::new(cli.update_interval);
            let display = if !cli.quiet {
                Some(monitor.start_display(shutdown.clone()))
            } else {
                info!("Running in quiet mode (status line disabled)");
                None
            };

            info!("Press Ctrl+C to stop");
            let served = server.serve(
                Arc::new(Mutex::new(sampler)),
                monitor.counters(),
                shutdown.clone(),
            );

            // Also reached when serve fails, so stop the status line here
            shutdown.cancel();
            if let Some(display) = display {
                if display.join().is_err() {
                    error!("Status display thread panicked");
                }
            }
            served?;

            let stats = monitor.stats();
            info!(
                served = stats.served,
                not_found = stats.not_found,
                errors = stats.errors,
                elapsed_secs = stats.elapsed.as_secs(),
                "Server stopped"
            );
        }
    }

    Ok(())
}
