//! Code → display name resolution for per-site schedule tables.

use crate::error::{Result, RosterError};
use crate::schedule::{format_row, parse_row};
use crate::types::Site;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const SPH_NAMED_TITLE: &str = "SPH Schedule";
pub const VGH_NAMED_TITLE: &str = "VGH Schedule";
pub const NAMED_COLUMNS: &str = "day, resident, resident, resident";

pub fn named_title(site: Site) -> &'static str {
    match site {
        Site::Sph => SPH_NAMED_TITLE,
        Site::Vgh => VGH_NAMED_TITLE,
    }
}

// ---------------------------------------------------------------------------
// CodeNameMap
// ---------------------------------------------------------------------------

/// Person code → display name for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeNameMap {
    site: Site,
    names: HashMap<String, String>,
}

impl CodeNameMap {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            names: HashMap::new(),
        }
    }

    /// Parse a headerless `code,name` table. The name is the second field
    /// with trailing whitespace removed; blank lines and a leading byte order
    /// mark are ignored.
    pub fn parse(site: Site, text: &str, path: &Path) -> Result<Self> {
        let mut map = Self::new(site);
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split(',');
            let code = fields.next().unwrap_or_default().trim();
            let Some(name) = fields.next() else {
                return Err(RosterError::MalformedTable {
                    path: path.to_path_buf(),
                    line: i + 1,
                    reason: format!("expected 'code,name', got '{line}'"),
                });
            };
            if fields.next().is_some() {
                tracing::warn!(%site, line = i + 1, code, "extra fields after name ignored");
            }
            if let Some(prev) = map.insert(code, name.trim_end()) {
                tracing::warn!(%site, code, previous = %prev, "code mapped twice; keeping the later name");
            }
        }
        Ok(map)
    }

    pub fn load(site: Site, path: &Path) -> Result<Self> {
        let text = crate::io::read_source(path)?;
        let map = Self::parse(site, &text, path)?;
        tracing::debug!(%site, path = %path.display(), codes = map.len(), "loaded name table");
        Ok(map)
    }

    /// Returns the name previously mapped to `code`, if any.
    pub fn insert(&mut self, code: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.names.insert(code.into(), name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up `code`, failing with [`RosterError::MissingMapping`].
    pub fn resolve(&self, code: &str) -> Result<&str> {
        self.names
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| RosterError::MissingMapping {
                site: self.site,
                code: code.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRow {
    pub day: u32,
    pub names: Vec<String>,
}

/// Resolve a per-site index table: drop its header line, substitute every
/// code through `map`, and order rows by day.
pub fn resolve_table(text: &str, path: &Path, map: &CodeNameMap) -> Result<Vec<NamedRow>> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for (i, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let (day, codes) = parse_row(line, path, i + 1)?;
        if !seen.insert(day) {
            return Err(RosterError::MalformedTable {
                path: path.to_path_buf(),
                line: i + 1,
                reason: format!("day {day} listed twice"),
            });
        }
        let names = codes
            .iter()
            .map(|code| map.resolve(code).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        rows.push(NamedRow { day, names });
    }

    rows.sort_by_key(|r| r.day);
    Ok(rows)
}

pub fn load_resolved_table(path: &Path, map: &CodeNameMap) -> Result<Vec<NamedRow>> {
    let text = crate::io::read_source(path)?;
    resolve_table(&text, path, map)
}

pub fn render_named_table(site: Site, rows: &[NamedRow]) -> String {
    let mut out = String::new();
    out.push_str(named_title(site));
    out.push('\n');
    out.push_str(NAMED_COLUMNS);
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row.day, &row.names));
        out.push('\n');
    }
    out
}

pub fn write_named_table(path: &Path, site: Site, rows: &[NamedRow]) -> Result<()> {
    crate::io::atomic_write(path, render_named_table(site, rows).as_bytes())?;
    tracing::info!(path = %path.display(), %site, rows = rows.len(), "wrote named schedule");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sph_map() -> CodeNameMap {
        CodeNameMap::parse(
            Site::Sph,
            "1,Avery Chen\n2,Blake Osei  \n11,Casey Ruiz\r\n\n",
            Path::new("sph_key.csv"),
        )
        .unwrap()
    }

    #[test]
    fn parse_strips_trailing_whitespace() {
        let map = sph_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map.resolve("2").unwrap(), "Blake Osei");
        assert_eq!(map.resolve("11").unwrap(), "Casey Ruiz");
    }

    #[test]
    fn parse_rejects_line_without_comma() {
        let err = CodeNameMap::parse(Site::Vgh, "1,Avery\njunk\n", Path::new("vgh_key.csv"))
            .unwrap_err();
        assert!(matches!(err, RosterError::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn parse_skips_byte_order_mark() {
        let map = CodeNameMap::parse(Site::Sph, "\u{feff}7,Avery\n8,Blake\n", Path::new("k"))
            .unwrap();
        assert_eq!(map.resolve("7").unwrap(), "Avery");
        assert_eq!(map.resolve("8").unwrap(), "Blake");
    }

    #[test]
    fn extra_fields_keep_second_field() {
        let map = CodeNameMap::parse(Site::Vgh, "4,Osei, Blake\n", Path::new("k")).unwrap();
        assert_eq!(map.resolve("4").unwrap(), "Osei");
    }

    #[test]
    fn later_mapping_wins() {
        let map = CodeNameMap::parse(Site::Sph, "4,Old\n4,New\n", Path::new("k")).unwrap();
        assert_eq!(map.resolve("4").unwrap(), "New");
    }

    #[test]
    fn missing_code_names_the_code() {
        let err = sph_map().resolve("99").unwrap_err();
        assert!(matches!(
            &err,
            RosterError::MissingMapping { site: Site::Sph, code } if code == "99"
        ));
        assert!(err.to_string().contains("'99'"));
    }

    #[test]
    fn resolves_sorts_and_keeps_arity() {
        let text = "Day,Resident1,Resident2,Resident3\n10,1,2\n9,11,2,1\n2,2,11\n";
        let rows = resolve_table(text, Path::new("sph.csv"), &sph_map()).unwrap();
        let days: Vec<u32> = rows.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![2, 9, 10]);
        assert_eq!(rows[0].names, vec!["Blake Osei", "Casey Ruiz"]);
        assert_eq!(rows[1].names.len(), 3);
        assert_eq!(rows[2].names.len(), 2);
    }

    #[test]
    fn only_first_line_is_discarded() {
        let text = "SPH Schedule\nday, resident, resident, resident\n1,1,2\n";
        let err = resolve_table(text, Path::new("sph.csv"), &sph_map()).unwrap_err();
        assert!(matches!(err, RosterError::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn unknown_code_fails_resolution() {
        let text = "Day,Resident1,Resident2,Resident3\n3,1,42\n";
        let err = resolve_table(text, Path::new("sph.csv"), &sph_map()).unwrap_err();
        assert!(matches!(err, RosterError::MissingMapping { code, .. } if code == "42"));
    }

    #[test]
    fn renders_named_table() {
        let rows = vec![
            NamedRow {
                day: 1,
                names: vec!["Avery Chen".into(), "Blake Osei".into()],
            },
            NamedRow {
                day: 2,
                names: vec!["Casey Ruiz".into(), "Avery Chen".into(), "Blake Osei".into()],
            },
        ];
        assert_eq!(
            render_named_table(Site::Vgh, &rows),
            "VGH Schedule\nday, resident, resident, resident\n\
             1,Avery Chen,Blake Osei\n2,Casey Ruiz,Avery Chen,Blake Osei\n"
        );
    }

    #[test]
    fn failed_resolution_leaves_table_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sph.csv");
        let original = "Day,Resident1,Resident2,Resident3\n1,1,77\n";
        std::fs::write(&path, original).unwrap();
        assert!(load_resolved_table(&path, &sph_map()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
