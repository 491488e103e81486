//! # Transfer Port
//!
//! This Port defines the contract for the destination that receives
//! finished export files.

use crate::domain::errors::Result;
use std::path::Path;

/// Contract for the upload destination.
pub trait TransferPort {
    /// Transmits the whole file at `local` under `remote_name`, blocking
    /// until the destination acknowledges the transfer. A failure aborts
    /// the operation; there is no resumption.
    fn upload(&mut self, local: &Path, remote_name: &str) -> Result<()>;
}
