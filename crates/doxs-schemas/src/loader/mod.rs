//! Loading documentation records from YAML and JSON files
//!
//! Copyright (c) 2025 Doxs Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, RecordLoader};
