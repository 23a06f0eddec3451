use anyhow::Context;
use roster_core::config::Config;
use roster_core::paths;
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let written = Config::init(root).context("failed to write roster.yaml")?;
    let path = paths::config_path(root);
    if written {
        println!("Created {}", path.display());
    } else {
        println!("{} already exists; left unchanged.", path.display());
    }
    Ok(())
}
