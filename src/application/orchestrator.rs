//! The core application logic that sequences one export run.
//!
//! This module coordinates the source port and the transfer port: the
//! best-effort preparation routine first, then export and upload of every
//! configured job, in order.

use crate::config::{AppConfig, ExportJob};
use crate::domain::entities::JobReport;
use crate::domain::errors::{ExportError, Result};
use crate::domain::sanitize::LogDiagnostics;
use crate::domain::tsv::write_tsv;
use crate::ports::source_port::SourcePort;
use crate::ports::transfer_port::TransferPort;
use log::{info, warn};
use std::io::{BufWriter, Write};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Drives a full run against the configured source and destination.
///
/// Only the preparation routine may fail without aborting the run; every
/// other error is fatal and leaves already-uploaded files in place.
pub struct Orchestrator {
    source: Box<dyn SourcePort>,
    transfer: Box<dyn TransferPort>,
    config: AppConfig,
}

impl Orchestrator {
    /// Creates a new Orchestrator with the provided components.
    pub fn new(
        source: Box<dyn SourcePort>,
        transfer: Box<dyn TransferPort>,
        config: AppConfig,
    ) -> Self {
        Self {
            source,
            transfer,
            config,
        }
    }

    /// Runs every configured job in order and returns their reports.
    pub fn run(&mut self) -> Result<Vec<JobReport>> {
        self.run_preparation();

        let jobs = self.config.jobs.clone();
        let mut reports = Vec::with_capacity(jobs.len());
        for job in &jobs {
            reports.push(self.run_job(job)?);
        }

        Ok(reports)
    }

    /// Best-effort preparation step: a failure is logged and swallowed.
    fn run_preparation(&mut self) {
        let Some(routine) = self.config.prepare_routine.clone() else {
            return;
        };

        info!("Calling {} routine...", routine);
        match self.source.run_routine(&routine) {
            Ok(()) => info!("Routine {} finished with success.", routine),
            Err(e) => warn!("Routine {} failed: {}. Continuing.", routine, e),
        }
    }

    fn run_job(&mut self, job: &ExportJob) -> Result<JobReport> {
        self.run_job_inner(job).map_err(|e| match e {
            wrapped @ ExportError::Export { .. } => wrapped,
            other => ExportError::Export {
                job: job.name.clone(),
                reason: other.to_string(),
            },
        })
    }

    fn run_job_inner(&mut self, job: &ExportJob) -> Result<JobReport> {
        info!("Exporting {}...", job.name);
        let start = Instant::now();

        let set = self.source.fetch(&job.query)?;

        let mut file = NamedTempFile::new()?;
        let rows = {
            let mut out = BufWriter::new(&mut file);
            let rows = write_tsv(&set, &mut out, &LogDiagnostics)?;
            out.flush()?;
            rows
        };
        let bytes = file.as_file().metadata()?.len();
        info!("Loaded {} rows ({} bytes)", rows, bytes);

        info!("Uploading {}...", job.remote_name);
        self.transfer.upload(file.path(), &job.remote_name)?;
        info!("{} uploaded", job.remote_name);

        Ok(JobReport {
            job: job.name.clone(),
            rows,
            bytes,
            duration: start.elapsed().as_secs_f64(),
        })
    }
}
