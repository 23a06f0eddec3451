//! The combined index report (`schedule.csv`) and per-site index tables.
//!
//! Person columns hold raw solver codes. Each row carries exactly as many
//! person columns as the day has assignments; the header wording is fixed.

use crate::error::{Result, RosterError};
use crate::roster::{Roster, Rosters};
use crate::types::Site;
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

pub const SPH_REPORT_TITLE: &str = "SPH Schedule Follows";
pub const SPH_REPORT_COLUMNS: &str = "Day,Resident1,Resident2,Resident3";
pub const VGH_REPORT_TITLE: &str = "VGH schedule follows";
pub const VGH_REPORT_COLUMNS: &str = "Day, Resident1, Resident2, Resident3";

/// Single header line of a per-site index table.
pub const SITE_TABLE_COLUMNS: &str = "Day,Resident1,Resident2,Resident3";

/// Title and column header lines for a site's section of the report.
pub fn report_headers(site: Site) -> (&'static str, &'static str) {
    match site {
        Site::Sph => (SPH_REPORT_TITLE, SPH_REPORT_COLUMNS),
        Site::Vgh => (VGH_REPORT_TITLE, VGH_REPORT_COLUMNS),
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// `day,cell,cell...`
pub fn format_row<S: AsRef<str>>(day: u32, cells: &[S]) -> String {
    let mut row = day.to_string();
    for cell in cells {
        row.push(',');
        row.push_str(cell.as_ref());
    }
    row
}

/// Parse `day,cell,cell...`. Cells are trimmed; the day must be an integer
/// and at least one non-empty cell must follow it.
pub(crate) fn parse_row(line: &str, path: &Path, line_no: usize) -> Result<(u32, Vec<String>)> {
    let malformed = |reason: String| RosterError::MalformedTable {
        path: path.to_path_buf(),
        line: line_no,
        reason,
    };

    let mut cells = line.split(',').map(str::trim);
    let day_cell = cells.next().unwrap_or_default();
    let day: u32 = day_cell
        .parse()
        .map_err(|_| malformed(format!("day '{day_cell}' is not an integer")))?;

    let persons: Vec<String> = cells.map(str::to_string).collect();
    if persons.is_empty() {
        return Err(malformed(format!("day {day} has no residents")));
    }
    if persons.iter().any(String::is_empty) {
        return Err(malformed(format!("day {day} has an empty resident column")));
    }
    Ok((day, persons))
}

fn push_rows(out: &mut String, roster: &Roster) {
    for entry in roster.sorted() {
        out.push_str(&format_row(entry.day, &entry.persons));
        out.push('\n');
    }
}

// ---------------------------------------------------------------------------
// Combined report
// ---------------------------------------------------------------------------

pub fn render_report(rosters: &Rosters) -> String {
    let mut out = String::new();
    for &site in Site::all() {
        let (title, columns) = report_headers(site);
        out.push_str(title);
        out.push('\n');
        out.push_str(columns);
        out.push('\n');
        push_rows(&mut out, rosters.site(site));
    }
    out
}

/// Render both rosters to `path`, replacing whatever was there.
pub fn write_report(path: &Path, rosters: &Rosters) -> Result<()> {
    crate::io::atomic_write(path, render_report(rosters).as_bytes())?;
    tracing::info!(
        path = %path.display(),
        sph_days = rosters.sph.len(),
        vgh_days = rosters.vgh.len(),
        "wrote index schedule"
    );
    Ok(())
}

/// Parse a report produced by [`render_report`] back into rosters.
/// `path` only labels errors.
pub fn parse_report(text: &str, path: &Path) -> Result<Rosters> {
    let mut rosters = Rosters::default();
    let mut current: Option<Site> = None;
    let mut expect_columns = false;
    let mut seen: HashSet<(Site, u32)> = HashSet::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim_end();

        if let Some(&site) = Site::all()
            .iter()
            .find(|&&s| report_headers(s).0 == line)
        {
            current = Some(site);
            expect_columns = true;
            continue;
        }
        if line.is_empty() {
            continue;
        }
        let Some(site) = current else {
            return Err(RosterError::MalformedTable {
                path: path.to_path_buf(),
                line: line_no,
                reason: "row before any site title".to_string(),
            });
        };
        if expect_columns {
            expect_columns = false;
            if line == report_headers(site).1 {
                continue;
            }
        }

        let (day, persons) = parse_row(line, path, line_no)?;
        if !seen.insert((site, day)) {
            return Err(RosterError::MalformedTable {
                path: path.to_path_buf(),
                line: line_no,
                reason: format!("{site} day {day} listed twice"),
            });
        }
        let roster = rosters.site_mut(site);
        for person in persons {
            roster.push(day, person);
        }
    }
    Ok(rosters)
}

pub fn load_report(path: &Path) -> Result<Rosters> {
    let text = crate::io::read_source(path)?;
    parse_report(&text, path)
}

// ---------------------------------------------------------------------------
// Per-site tables
// ---------------------------------------------------------------------------

/// One header line, then one row per day in ascending order.
pub fn render_site_table(roster: &Roster) -> String {
    let mut out = String::from(SITE_TABLE_COLUMNS);
    out.push('\n');
    push_rows(&mut out, roster);
    out
}

/// Write one site's index table; returns the number of rows written.
pub fn write_site_table(path: &Path, site: Site, roster: &Roster) -> Result<usize> {
    crate::io::atomic_write(path, render_site_table(roster).as_bytes())?;
    tracing::info!(path = %path.display(), %site, rows = roster.len(), "wrote site table");
    Ok(roster.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::aggregate;
    use tempfile::TempDir;

    #[test]
    fn renders_both_sections() {
        let agg = aggregate("sph[5,2] 1\nsph[5,11] 1\nvgh[1,3] 1\nvgh[1,4] 1\nvgh[1,8] 1\n").unwrap();
        assert_eq!(
            render_report(&agg.rosters),
            "SPH Schedule Follows\n\
             Day,Resident1,Resident2,Resident3\n\
             5,2,11\n\
             VGH schedule follows\n\
             Day, Resident1, Resident2, Resident3\n\
             1,3,4,8\n"
        );
    }

    #[test]
    fn rows_are_numerically_sorted() {
        let agg = aggregate("sph[10,a] 1\nsph[2,b] 1\nsph[9,c] 1\n").unwrap();
        let report = render_report(&agg.rosters);
        let days: Vec<&str> = report
            .lines()
            .skip(2)
            .take(3)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(days, vec!["2", "9", "10"]);
    }

    #[test]
    fn empty_rosters_render_headers_only() {
        let report = render_report(&Rosters::default());
        assert_eq!(report.lines().count(), 4);
    }

    #[test]
    fn report_round_trips() {
        let text = "   1 sph[12,4] * 1 0 1\n   2 sph[3,9] * 1 0 1\n   3 sph[12,1] * 1 0 1\n\
                    \x20  4 vgh[3,2] * 1 0 1\n   5 vgh[3,2] * 1 0 1\n   6 vgh[7,5] * 0 0 1\n";
        let agg = aggregate(text).unwrap();
        let parsed = parse_report(&render_report(&agg.rosters), Path::new("schedule.csv")).unwrap();
        assert_eq!(parsed, agg.rosters);
        assert_eq!(
            parsed.sph.get(12).unwrap(),
            &["4".to_string(), "1".to_string()]
        );
    }

    #[test]
    fn parse_rejects_row_before_title() {
        let err = parse_report("3,1,2\n", Path::new("schedule.csv")).unwrap_err();
        assert!(matches!(err, RosterError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn parse_rejects_duplicate_day() {
        let text = "SPH Schedule Follows\nDay,Resident1,Resident2,Resident3\n3,1\n3,2\n";
        let err = parse_report(text, Path::new("schedule.csv")).unwrap_err();
        assert!(err.to_string().contains("day 3 listed twice"));
    }

    #[test]
    fn parse_rejects_non_integer_day() {
        let text = "VGH schedule follows\nDay, Resident1, Resident2, Resident3\nMon,1,2\n";
        let err = parse_report(text, Path::new("schedule.csv")).unwrap_err();
        assert!(matches!(err, RosterError::MalformedTable { line: 3, .. }));
    }

    #[test]
    fn site_table_has_single_header() {
        let agg = aggregate("vgh[10,1] 1\nvgh[9,2] 1\nvgh[9,3] 1\n").unwrap();
        assert_eq!(
            render_site_table(&agg.rosters.vgh),
            "Day,Resident1,Resident2,Resident3\n9,2,3\n10,1\n"
        );
    }

    #[test]
    fn write_then_load_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schedule.csv");
        let agg = aggregate("sph[1,1] 1\nvgh[2,2] 1\n").unwrap();
        write_report(&path, &agg.rosters).unwrap();
        assert_eq!(load_report(&path).unwrap(), agg.rosters);
    }
}
