//! Catalog configuration that the CLI and query documents layer onto.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collate::{Collation, CollationKind};
use crate::error::{Error, Result};

pub const DEFAULT_NO_MATCH_MESSAGE: &str = "No products matching selected criteria";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Jsonl,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(Error::Config(format!("unknown output format '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Directory holding `users.json`, `categories.json`, `products.json`.
    /// `None` means the dataset bundled with the binary.
    pub data_dir: Option<String>,

    /// BCP-47 locale for the text sort keys.
    pub locale: String,

    pub collation: CollationKind,

    /// Shown in place of the table body when nothing matches.
    pub no_match_message: String,

    pub output: OutputFormat,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            locale: "en".to_string(),
            collation: CollationKind::Locale,
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_string(),
            output: OutputFormat::Table,
        }
    }
}

impl ShelfConfig {
    /// Defaults overridden by `SHELF_*` environment variables.
    ///
    /// Unparseable values are reported rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ShelfConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("SHELF_DATA_DIR") {
            if !s.trim().is_empty() {
                cfg.data_dir = Some(s);
            }
        }

        if let Some(s) = lookup("SHELF_LOCALE") {
            cfg.locale = s;
        }

        if let Some(s) = lookup("SHELF_COLLATION") {
            cfg.collation = s.parse()?;
        }

        if let Some(s) = lookup("SHELF_OUTPUT") {
            cfg.output = s.parse()?;
        }

        Ok(cfg)
    }

    pub fn collation(&self) -> Result<Box<dyn Collation>> {
        self.collation.build(&self.locale)
    }
}
