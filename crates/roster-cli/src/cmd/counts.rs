use crate::output::print_json;
use anyhow::Context;
use roster_core::config::Config;
use roster_core::roster::Rosters;
use roster_core::tally::{tally, write_tally, TallyRow};
use roster_core::types::Site;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct CountsSummary {
    pub site: Site,
    pub path: String,
    pub rows: Vec<TallyRow>,
}

/// Write one `name,count` file per site. Both tallies must resolve before
/// either file is written.
pub fn write(
    root: &Path,
    config: &Config,
    rosters: &Rosters,
) -> anyhow::Result<Vec<CountsSummary>> {
    let mut tallies: Vec<(Site, PathBuf, Vec<TallyRow>)> = Vec::new();
    for &site in Site::all() {
        let map = super::load_name_map(root, config, site)?;
        let rows = tally(rosters.site(site), &map)
            .with_context(|| format!("failed to tally {site} assignments"))?;
        tallies.push((site, config.counts_path(root, site), rows));
    }

    let mut written = Vec::new();
    for (site, path, rows) in tallies {
        write_tally(&path, site, &rows)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(CountsSummary {
            site,
            path: path.display().to_string(),
            rows,
        });
    }
    Ok(written)
}

pub fn print(summaries: &[CountsSummary]) {
    for s in summaries {
        println!("Wrote {}  ({} {} residents)", s.path, s.rows.len(), s.site);
    }
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let agg = super::decode_solution(root, &config)?;
    let summaries = write(root, &config, &agg.rosters)?;
    if json {
        print_json(&summaries)?;
    } else {
        print(&summaries);
    }
    Ok(())
}
