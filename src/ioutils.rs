use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

/// Reads a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == STDIN_INDICATOR {
        read_from(std::io::stdin())
    } else {
        std::fs::read_to_string(path).map_err(Error::IoError)
    }
}
