use crate::output::print_json;
use anyhow::Context;
use roster_core::config::Config;
use roster_core::schedule::{load_report, write_site_table};
use roster_core::types::Site;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SplitSummary {
    pub site: Site,
    pub path: String,
    pub rows: usize,
}

/// Break the index report into one code table per site.
pub fn write(root: &Path, config: &Config) -> anyhow::Result<Vec<SplitSummary>> {
    let report = config.schedule_path(root);
    let rosters =
        load_report(&report).with_context(|| format!("failed to read {}", report.display()))?;

    let mut written = Vec::new();
    for &site in Site::all() {
        let path = config.table_path(root, site);
        let rows = write_site_table(&path, site, rosters.site(site))
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(SplitSummary {
            site,
            path: path.display().to_string(),
            rows,
        });
    }
    Ok(written)
}

pub fn print(summaries: &[SplitSummary]) {
    for s in summaries {
        println!("Wrote {}  ({} {} days)", s.path, s.rows, s.site);
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
