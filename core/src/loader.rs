//! Record loading from JSON sources
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};

use crate::error::CoreError;
use crate::record::RawRecord;

/// Decode a JSON array of record objects.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, CoreError> {
    let records: Vec<RawRecord> = serde_json::from_reader(reader)?;
    debug!("Decoded {} raw records", records.len());
    Ok(records)
}

/// Load records from a JSON file on disk.
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, CoreError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = load_records(BufReader::new(file))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
