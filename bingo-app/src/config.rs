use std::env;
use std::path::PathBuf;

use anyhow::Context;
use bingo_persistence::connection::DEFAULT_DATABASE_URL;

pub const DEFAULT_EXPORT_DIR: &str = ".";
pub const DEFAULT_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Where exported documents are written
    pub export_dir: PathBuf,
    /// How many fresh ids to try before accepting a collision
    pub id_attempts: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            export_dir: env::var("BINGO_EXPORT_DIR")
                .unwrap_or_else(|_| DEFAULT_EXPORT_DIR.to_string())
                .into(),
            id_attempts: env::var("BINGO_ID_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_ID_ATTEMPTS.to_string())
                .parse()
                .context("Invalid BINGO_ID_ATTEMPTS")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            id_attempts: DEFAULT_ID_ATTEMPTS,
        }
    }
}
