use crate::decode::{decode_line, Decoded};
use crate::error::Result;
use crate::types::Site;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// DayEntry
// ---------------------------------------------------------------------------

/// People assigned to one day, in solver emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub day: u32,
    pub persons: Vec<String>,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Day → assigned person codes for one site.
///
/// Days are stored in first-seen order; anything that renders a roster goes
/// through [`Roster::sorted`] so output is always numerically ascending.
/// A day only exists once someone has been assigned to it.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    days: Vec<DayEntry>,
    index: HashMap<u32, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `person` to `day`. Repeats are kept.
    pub fn push(&mut self, day: u32, person: impl Into<String>) {
        let person = person.into();
        match self.index.get(&day) {
            Some(&i) => self.days[i].persons.push(person),
            None => {
                self.index.insert(day, self.days.len());
                self.days.push(DayEntry {
                    day,
                    persons: vec![person],
                });
            }
        }
    }

    pub fn get(&self, day: u32) -> Option<&[String]> {
        self.index
            .get(&day)
            .map(|&i| self.days[i].persons.as_slice())
    }

    /// Number of days with at least one assignment.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total assignments across all days.
    pub fn assignments(&self) -> usize {
        self.days.iter().map(|d| d.persons.len()).sum()
    }

    /// Days in the order they were first seen.
    pub fn first_seen(&self) -> impl Iterator<Item = &DayEntry> {
        self.days.iter()
    }

    /// Days in ascending numeric order.
    pub fn sorted(&self) -> Vec<&DayEntry> {
        let mut days: Vec<&DayEntry> = self.days.iter().collect();
        days.sort_by_key(|d| d.day);
        days
    }
}

/// Two rosters are equal when they map the same days to the same person
/// sequences, whatever order the days were first seen in.
impl PartialEq for Roster {
    fn eq(&self, other: &Self) -> bool {
        self.sorted() == other.sorted()
    }
}

impl Eq for Roster {}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rosters {
    pub sph: Roster,
    pub vgh: Roster,
}

impl Rosters {
    pub fn site(&self, site: Site) -> &Roster {
        match site {
            Site::Sph => &self.sph,
            Site::Vgh => &self.vgh,
        }
    }

    pub fn site_mut(&mut self, site: Site) -> &mut Roster {
        match site {
            Site::Sph => &mut self.sph,
            Site::Vgh => &mut self.vgh,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Line counts gathered while decoding a solver dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub lines: usize,
    pub skipped: usize,
    pub unselected: usize,
    pub selected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub rosters: Rosters,
    pub stats: DecodeStats,
}

/// Decode every line of a solver dump and group the selected variables by
/// site and day. The first malformed selected variable aborts the run.
pub fn aggregate(text: &str) -> Result<Aggregation> {
    let mut agg = Aggregation::default();
    for (i, line) in text.lines().enumerate() {
        agg.stats.lines += 1;
        match decode_line(line, i + 1)? {
            Decoded::Skipped => agg.stats.skipped += 1,
            Decoded::Unselected => agg.stats.unselected += 1,
            Decoded::Selected(a) => {
                agg.stats.selected += 1;
                agg.rosters.site_mut(a.site).push(a.day, a.person);
            }
        }
    }
    tracing::debug!(
        lines = agg.stats.lines,
        selected = agg.stats.selected,
        unselected = agg.stats.unselected,
        "decoded solver output"
    );
    Ok(agg)
}

/// Read and aggregate the solver dump at `path`.
pub fn load_solution(path: &Path) -> Result<Aggregation> {
    let text = crate::io::read_source(path)?;
    aggregate(&text)
}
