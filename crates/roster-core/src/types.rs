use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Sph,
    Vgh,
}

impl Site {
    pub fn all() -> &'static [Site] {
        &[Site::Sph, Site::Vgh]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Site::Sph => "sph",
            Site::Vgh => "vgh",
        }
    }

    /// Substring that marks a solver line as belonging to this site's family.
    pub fn marker(self) -> &'static str {
        self.as_str()
    }

    /// Family of a selected variable, keyed on the first character of its name.
    pub fn from_variable(name: &str) -> Site {
        if name.starts_with('s') {
            Site::Sph
        } else {
            Site::Vgh
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Site::Sph => "SPH",
            Site::Vgh => "VGH",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
