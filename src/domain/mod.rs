pub mod entities;
pub mod errors;
pub mod format;
pub mod sanitize;
pub mod tsv;
