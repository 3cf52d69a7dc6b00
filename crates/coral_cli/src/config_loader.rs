use std::path::Path;

use anyhow::{Result, bail};
use coral_core::config::load_site_config;
use coral_core::model::SiteConfig;

pub const CONFIG_FILE: &str = "coral.yaml";

pub fn load_config_for_build(root: &Path) -> Result<SiteConfig> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        bail!(
            "Missing {CONFIG_FILE} in {}. Create it or pass --source-dir pointing at the site root.",
            root.display()
        );
    }
    load_site_config(&config_path)
}
