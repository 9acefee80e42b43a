pub mod config;
pub mod history;
pub mod stats;
pub mod timer;

use std::sync::Arc;

use focustimer_core::{Config, Database};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Storage and settings shared by every command.
pub struct Context {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl Context {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            db: Arc::new(Database::open()?),
            config: Arc::new(Config::load_or_default()),
        })
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
