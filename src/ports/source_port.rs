//! # Source Port
//!
//! This Port defines the contract for the database the export reads from.
//!
//! Anything that implements `SourcePort` must be able to invoke the
//! preparation routine and run a query into a typed result set.

use crate::domain::entities::ResultSet;
use crate::domain::errors::Result;

/// Contract for the export's data source.
pub trait SourcePort {
    /// Invokes the named preparation routine on the source.
    ///
    /// The orchestrator treats a failure here as advisory; implementations
    /// just surface it.
    fn run_routine(&mut self, routine: &str) -> Result<()>;

    /// Executes `query` and returns its complete, typed result.
    fn fetch(&mut self, query: &str) -> Result<ResultSet>;
}
