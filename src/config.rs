// src/config.rs
use std::path::PathBuf;

/// Location of the anime metadata file, relative to the working directory.
pub const DATA_PATH: &str = "data/animedata.json";

/// Settings compiled into both transforms. There is no config file and no
/// command-line surface; everything comes from `Config::default()`.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            indent: 4,
        }
    }
}

impl Config {
    /// Indentation unit handed to the JSON pretty printer.
    pub fn indent_bytes(&self) -> Vec<u8> {
        vec![b' '; self.indent]
    }
}
