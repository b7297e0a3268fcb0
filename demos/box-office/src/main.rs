//! Box office binary
//!
//! ```bash
//! box-office purchases.json
//! box-office < purchases.json
//! ```
//!
//! Exit code 0 when every purchase was accepted, 1 when any was rejected,
//! 2 when the input could not be read or configuration is invalid.

use anyhow::Context;
use box_office::{run, Config};
use cinema_tickets_core::metrics::register_purchase_metrics;
use cinema_tickets_core::{PurchaseEnvironment, TicketService};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("box-office: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> anyhow::Result<bool> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries receipts only.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!(?config, "Configuration loaded");

    let metrics = if config.metrics_enabled {
        Some(install_metrics()?)
    } else {
        None
    };

    let input = read_input(std::env::args().nth(1).as_deref())?;
    let service = TicketService::new(PurchaseEnvironment::logging());
    let all_accepted = run(&service, &input, &mut io::stdout().lock())
        .context("failed to write receipts")?;

    if let (true, Some(handle)) = (config.print_metrics, &metrics) {
        eprintln!("{}", handle.render());
    }

    Ok(all_accepted)
}

fn install_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install metrics recorder")?;
    register_purchase_metrics();
    Ok(handle)
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        None | Some("-") => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("failed to read {path}")),
    }
}
