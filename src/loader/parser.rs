use serde::de::DeserializeOwned;
use std::io::{self, Read};

use crate::error::{Error, Result};

/// Reads the entirety of standard input and parses it as JSON (spec §6:
/// the CLI reads a single JSON document from stdin).
pub fn parse_json_stdin<T: DeserializeOwned>() -> Result<T> {
    let mut data = String::new();
    io::stdin().read_to_string(&mut data).map_err(Error::IoError)?;
    serde_json::from_str(&data).map_err(Error::DeserializationError)
}
