use crate::error::Result;
use crate::names::CodeNameMap;
use crate::roster::Roster;
use crate::types::Site;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One line of a count file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    pub code: String,
    pub name: String,
    pub count: usize,
}

/// Occurrences of each code across every day, keyed (and so ordered) by code.
pub fn count_codes(roster: &Roster) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for entry in roster.first_seen() {
        for person in &entry.persons {
            *counts.entry(person.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Count a roster and attach display names. Fails on the first code the map
/// does not know.
pub fn tally(roster: &Roster, map: &CodeNameMap) -> Result<Vec<TallyRow>> {
    count_codes(roster)
        .into_iter()
        .map(|(code, count)| -> Result<TallyRow> {
            Ok(TallyRow {
                code: code.to_string(),
                name: map.resolve(code)?.to_string(),
                count,
            })
        })
        .collect()
}

pub fn render_tally(rows: &[TallyRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("{},{}\n", row.name, row.count));
    }
    out
}

pub fn write_tally(path: &Path, site: Site, rows: &[TallyRow]) -> Result<()> {
    crate::io::atomic_write(path, render_tally(rows).as_bytes())?;
    tracing::info!(path = %path.display(), %site, people = rows.len(), "wrote call counts");
    Ok(())
}
