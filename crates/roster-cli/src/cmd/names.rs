use crate::output::print_json;
use anyhow::Context;
use roster_core::config::Config;
use roster_core::names::{load_resolved_table, write_named_table, NamedRow};
use roster_core::types::Site;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct NamesSummary {
    pub site: Site,
    pub path: String,
    pub rows: usize,
}

/// Rewrite both site tables with display names. Both sites are resolved
/// before either file is touched.
pub fn write(root: &Path, config: &Config) -> anyhow::Result<Vec<NamesSummary>> {
    let mut resolved: Vec<(Site, PathBuf, Vec<NamedRow>)> = Vec::new();
    for &site in Site::all() {
        let map = super::load_name_map(root, config, site)?;
        let path = config.table_path(root, site);
        let rows = load_resolved_table(&path, &map)
            .with_context(|| format!("failed to resolve names in {}", path.display()))?;
        resolved.push((site, path, rows));
    }

    let mut written = Vec::new();
    for (site, path, rows) in resolved {
        write_named_table(&path, site, &rows)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(NamesSummary {
            site,
            path: path.display().to_string(),
            rows: rows.len(),
        });
    }
    Ok(written)
}

pub fn print(summaries: &[NamesSummary]) {
    for s in summaries {
        println!("Wrote {}  ({} {} days with names)", s.path, s.rows, s.site);
    }
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let summaries = write(root, &config)?;
    if json {
        print_json(&summaries)?;
    } else {
        print(&summaries);
    }
    Ok(())
}
