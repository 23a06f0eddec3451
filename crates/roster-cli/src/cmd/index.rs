use crate::output::print_json;
use anyhow::Context;
use roster_core::config::Config;
use roster_core::roster::{Aggregation, DecodeStats, Roster};
use roster_core::schedule::write_report;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub days: usize,
    pub assignments: usize,
}

impl From<&Roster> for SiteSummary {
    fn from(roster: &Roster) -> Self {
        Self {
            days: roster.len(),
            assignments: roster.assignments(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexSummary {
    pub path: String,
    pub stats: DecodeStats,
    pub sph: SiteSummary,
    pub vgh: SiteSummary,
}

impl IndexSummary {
    pub fn print(&self) {
        println!(
            "Wrote {}  (SPH: {} days, {} assignments; VGH: {} days, {} assignments)",
            self.path,
            self.sph.days,
            self.sph.assignments,
            self.vgh.days,
            self.vgh.assignments,
        );
    }
}

/// Render the decoded rosters to the index report.
pub fn write(root: &Path, config: &Config, agg: &Aggregation) -> anyhow::Result<IndexSummary> {
    let path = config.schedule_path(root);
    write_report(&path, &agg.rosters)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(IndexSummary {
        path: path.display().to_string(),
        stats: agg.stats,
        sph: SiteSummary::from(&agg.rosters.sph),
        vgh: SiteSummary::from(&agg.rosters.vgh),
    })
}

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let agg = super::decode_solution(root, &config)?;
    let summary = write(root, &config, &agg)?;

    if json {
        print_json(&summary)?;
    } else {
        summary.print();
    }
    Ok(())
}
