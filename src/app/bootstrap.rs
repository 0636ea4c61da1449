use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::config::load_config;
use crate::error::Result;
use crate::utils::now_in;

/// Entry point used by `main`: load settings, run once and return the menu markup.
pub async fn run(config_path: Option<&Path>) -> Result<String> {
    let config = Arc::new(load_config(config_path)?);
    debug!(
        "{} assets configured in {:?}",
        config.assets.len(),
        config.timezone
    );

    let now = now_in(&config.timezone);
    let menu = super::run(config, now).await?;
    Ok(menu.render())
}
