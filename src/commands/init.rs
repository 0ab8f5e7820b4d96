use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, its `config.json` and the data directory.
///
/// # Arguments
/// - `finwin_home` - The directory that will be the root of the finwin home, e.g. `$HOME/finwin`
/// - `seed_sample` - When true, the sample departments, expense categories and transactions are
///   written to the data directory as CSV files.
///
/// # Errors
/// - Returns an error if a config already exists or any file operations fail.
pub async fn init(finwin_home: &Path, seed_sample: bool) -> Result<Out<()>> {
    let config = Config::create(finwin_home, seed_sample)
        .await
        .context("Unable to create the finwin home directory and config")
        .pub_result(ErrorType::Config)?;
    let message = if seed_sample {
        format!(
            "Successfully created the finwin home at {} with sample data",
            config.root().display()
        )
    } else {
        format!(
            "Successfully created the finwin home at {}, add your CSV files to {}",
            config.root().display(),
            config.data_dir().display()
        )
    };
    Ok(message.into())
}
