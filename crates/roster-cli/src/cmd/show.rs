use crate::output::print_json;
use anyhow::Context;
use roster_core::roster::{Roster, Rosters};
use roster_core::types::Site;
use std::path::Path;

pub fn run(root: &Path, with_names: bool, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let agg = super::decode_solution(root, &config)?;

    let rosters = if with_names {
        let mut named = Rosters::default();
        for &site in Site::all() {
            let map = super::load_name_map(root, &config, site)?;
            *named.site_mut(site) = rename(agg.rosters.site(site), |code| {
                map.resolve(code)
                    .map(str::to_string)
                    .with_context(|| format!("cannot show {site} roster with names"))
            })?;
        }
        named
    } else {
        agg.rosters
    };

    if json {
        let value = serde_json::json!({
            "stats": agg.stats,
            "sph": rosters.sph,
            "vgh": rosters.vgh,
        });
        print_json(&value)?;
        return Ok(());
    }

    for (i, &site) in Site::all().iter().enumerate() {
        if i > 0 {
            println!();
        }
        let roster = rosters.site(site);
        println!(
            "{site}: {} days, {} assignments",
            roster.len(),
            roster.assignments()
        );
        if roster.is_empty() {
            continue;
        }
        print_days(roster);
    }
    Ok(())
}

/// Day column right-aligned to the widest day, residents joined after it.
fn print_days(roster: &Roster) {
    let entries = roster.sorted();
    let width = entries
        .iter()
        .map(|e| e.day.to_string().len())
        .max()
        .unwrap_or(0)
        .max("DAY".len());
    println!("{:>width$}  RESIDENTS", "DAY");
    for entry in entries {
        println!("{:>width$}  {}", entry.day, entry.persons.join(", "));
    }
}

fn rename<F>(roster: &Roster, mut lookup: F) -> anyhow::Result<Roster>
where
    F: FnMut(&str) -> anyhow::Result<String>,
{
    let mut out = Roster::new();
    for entry in roster.first_seen() {
        for person in &entry.persons {
            out.push(entry.day, lookup(person)?);
        }
    }
    Ok(out)
}
