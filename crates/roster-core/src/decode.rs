//! Decoding of solver listing lines.
//!
//! The solver prints one binary variable per line. Two layouts occur:
//!
//! ```text
//!      17 sph[3,7]     *              1             0             1
//! sph[3,7] 1
//! ```
//!
//! The first is the column listing (`index name marker value ...`); the second
//! is the compact `name value` form. A variable token packs the day and the
//! person code as `family[day,person]`.

use crate::error::{Result, RosterError};
use crate::types::Site;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// A selected `family[day,person]` variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub site: Site,
    pub day: u32,
    pub person: String,
}

/// Outcome of decoding one solver line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The line names neither site.
    Skipped,
    /// A site variable whose value is not exactly 1.
    Unselected,
    Selected(Assignment),
}

// ---------------------------------------------------------------------------
// TokenFault
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFault {
    MissingOpenBracket,
    MissingComma,
    MissingCloseBracket,
    InvalidDay,
    EmptyPerson,
    ExtraIndex,
}

impl TokenFault {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenFault::MissingOpenBracket => "missing '['",
            TokenFault::MissingComma => "missing ',' between day and person",
            TokenFault::MissingCloseBracket => "missing ']'",
            TokenFault::InvalidDay => "day is not a non-negative integer",
            TokenFault::EmptyPerson => "empty person code",
            TokenFault::ExtraIndex => "more than two indices",
        }
    }
}

impl fmt::Display for TokenFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Split `family[day,person]` into its day and person code.
pub fn parse_variable(token: &str) -> std::result::Result<(u32, String), TokenFault> {
    let (_, indices) = token
        .split_once('[')
        .ok_or(TokenFault::MissingOpenBracket)?;
    let (day, rest) = indices.split_once(',').ok_or(TokenFault::MissingComma)?;
    let (person, _) = rest
        .split_once(']')
        .ok_or(TokenFault::MissingCloseBracket)?;

    let day: u32 = day.parse().map_err(|_| TokenFault::InvalidDay)?;
    if person.is_empty() {
        return Err(TokenFault::EmptyPerson);
    }
    if person.contains(',') {
        return Err(TokenFault::ExtraIndex);
    }
    Ok((day, person.to_string()))
}

/// The selection flag counts only when it is the integer 1. LP relaxation
/// values such as `0.9999` and unparseable flags are treated as unselected.
pub fn is_selected(flag: &str) -> bool {
    flag.parse::<i64>() == Ok(1)
}

fn mentions_site(line: &str) -> bool {
    Site::all().iter().any(|site| line.contains(site.marker()))
}

/// Decode one solver line. `line_no` is 1-based and only used in errors.
pub fn decode_line(line: &str, line_no: usize) -> Result<Decoded> {
    if !mentions_site(line) {
        return Ok(Decoded::Skipped);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (name, flag) = match tokens.first() {
        Some(first) if first.contains('[') => (Some(*first), tokens.get(1)),
        _ => (tokens.get(1).copied(), tokens.get(3)),
    };
    let (Some(name), Some(flag)) = (name, flag) else {
        tracing::debug!(line = line_no, "site line without a value column");
        return Ok(Decoded::Unselected);
    };
    if !is_selected(flag) {
        return Ok(Decoded::Unselected);
    }

    let (day, person) = parse_variable(name).map_err(|reason| RosterError::MalformedToken {
        line: line_no,
        token: name.to_string(),
        reason,
    })?;
    Ok(Decoded::Selected(Assignment {
        site: Site::from_variable(name),
        day,
        person,
    }))
}
