//! # sqltotsv
//!
//! Utility for uploading SQL data to an FTP destination as TSV files.
//!
//! A linear batch job: connect to the source database, run the optional
//! preparation routine, export each configured query to a tab-separated
//! file, upload every file over FTP, report to the console.

mod application;
mod config;
mod domain;
mod infrastructure;
mod ports;

use crate::application::orchestrator::Orchestrator;
use crate::config::{AppConfig, CliArgs};
use crate::infrastructure::ftp::transfer_adapter::FtpTransfer;
use crate::infrastructure::postgres::source_adapter::PgSource;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();

    info!(
        "Utility for uploading SQL data to FTP v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = match AppConfig::resolve(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    info!("Opening connection to the SQL server...");
    let source = match PgSource::connect(&config.source) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open the source connection: {}", e);
            process::exit(1);
        }
    };

    let transfer = FtpTransfer::new(&config.destination);

    let mut orchestrator = Orchestrator::new(Box::new(source), Box::new(transfer), config);
    match orchestrator.run() {
        Ok(reports) => {
            let total_rows: u64 = reports.iter().map(|r| r.rows).sum();
            info!(
                "Export executed successfully: {} files uploaded, {} rows total.",
                reports.len(),
                total_rows
            );
        }
        Err(e) => {
            error!("Export failed: {}", e);
            process::exit(1);
        }
    }
}
