pub mod config;
pub mod counts;
pub mod index;
pub mod init;
pub mod names;
pub mod run;
pub mod show;
pub mod split;

use anyhow::Context;
use roster_core::config::Config;
use roster_core::names::CodeNameMap;
use roster_core::roster::{load_solution, Aggregation};
use roster_core::types::Site;
use std::path::Path;

pub(crate) fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).context("failed to load roster.yaml")
}

pub(crate) fn decode_solution(root: &Path, config: &Config) -> anyhow::Result<Aggregation> {
    let path = config.solution_path(root);
    load_solution(&path).with_context(|| format!("failed to decode {}", path.display()))
}

pub(crate) fn load_name_map(
    root: &Path,
    config: &Config,
    site: Site,
) -> anyhow::Result<CodeNameMap> {
    let path = config.key_path(root, site);
    CodeNameMap::load(site, &path)
        .with_context(|| format!("failed to load {site} name table {}", path.display()))
}
