use crate::error::Result;
use crate::paths;
use crate::types::Site;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SiteFiles
// ---------------------------------------------------------------------------

/// Per-site inputs and outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteFiles {
    /// Per-site schedule table, rewritten in place by name resolution.
    pub table: PathBuf,
    /// `code,name` lookup table for this site.
    pub key: PathBuf,
    /// `name,count` tally output.
    pub counts: PathBuf,
}

impl SiteFiles {
    pub fn defaults_for(site: Site) -> Self {
        match site {
            Site::Sph => Self {
                table: PathBuf::from(paths::SPH_TABLE),
                key: PathBuf::from(paths::SPH_KEY),
                counts: PathBuf::from(paths::SPH_COUNTS),
            },
            Site::Vgh => Self {
                table: PathBuf::from(paths::VGH_TABLE),
                key: PathBuf::from(paths::VGH_KEY),
                counts: PathBuf::from(paths::VGH_COUNTS),
            },
        }
    }
}

fn default_sph() -> SiteFiles {
    SiteFiles::defaults_for(Site::Sph)
}

fn default_vgh() -> SiteFiles {
    SiteFiles::defaults_for(Site::Vgh)
}

fn default_solution() -> PathBuf {
    PathBuf::from(paths::SOLUTION_FILE)
}

fn default_schedule() -> PathBuf {
    PathBuf::from(paths::SCHEDULE_FILE)
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Raw solver output.
    #[serde(default = "default_solution")]
    pub solution: PathBuf,
    /// Combined index report for both sites.
    #[serde(default = "default_schedule")]
    pub schedule: PathBuf,
    #[serde(default = "default_sph")]
    pub sph: SiteFiles,
    #[serde(default = "default_vgh")]
    pub vgh: SiteFiles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solution: default_solution(),
            schedule: default_schedule(),
            sph: default_sph(),
            vgh: default_vgh(),
        }
    }
}

impl Config {
    /// Load `roster.yaml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the default config unless one exists. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let data = Self::default().to_yaml()?;
        crate::io::write_if_missing(&paths::config_path(root), data.as_bytes())
    }

    pub fn site(&self, site: Site) -> &SiteFiles {
        match site {
            Site::Sph => &self.sph,
            Site::Vgh => &self.vgh,
        }
    }

    // -----------------------------------------------------------------------
    // Resolved paths
    // -----------------------------------------------------------------------

    pub fn solution_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.solution)
    }

    pub fn schedule_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.schedule)
    }

    pub fn table_path(&self, root: &Path, site: Site) -> PathBuf {
        paths::resolve(root, &self.site(site).table)
    }

    pub fn key_path(&self, root: &Path, site: Site) -> PathBuf {
        paths::resolve(root, &self.site(site).key)
    }

    pub fn counts_path(&self, root: &Path, site: Site) -> PathBuf {
        paths::resolve(root, &self.site(site).counts)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let mut outputs: Vec<(String, &PathBuf)> = vec![("schedule".to_string(), &self.schedule)];
        for &site in Site::all() {
            let files = self.site(site);
            outputs.push((format!("{}.table", site.as_str()), &files.table));
            outputs.push((format!("{}.counts", site.as_str()), &files.counts));
        }

        // 1. No output may clobber the solver dump or a lookup table
        for (name, path) in &outputs {
            if *path == &self.solution {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "{name} would overwrite the solution file '{}'",
                        path.display()
                    ),
                });
            }
            for &site in Site::all() {
                if *path == &self.site(site).key {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!(
                            "{name} would overwrite the {site} key table '{}'",
                            path.display()
                        ),
                    });
                }
            }
        }

        // 2. Outputs must not collide with each other
        for (i, (a_name, a_path)) in outputs.iter().enumerate() {
            for (b_name, b_path) in &outputs[i + 1..] {
                if a_path == b_path {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Error,
                        message: format!(
                            "{a_name} and {b_name} both write '{}'",
                            a_path.display()
                        ),
                    });
                }
            }
        }

        // 3. A shared key table is allowed but usually a mistake
        if self.sph.key == self.vgh.key {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "sph and vgh share the key table '{}'; codes will map identically at both sites",
                    self.sph.key.display()
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.solution, PathBuf::from("solnfile.dat"));
        assert_eq!(cfg.vgh.counts, PathBuf::from("vgh_counts.csv"));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("roster.yaml"),
            "solution: out/glpk.txt\nvgh:\n  table: v.csv\n  key: v_key.csv\n  counts: v_counts.csv\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.solution, PathBuf::from("out/glpk.txt"));
        assert_eq!(cfg.schedule, PathBuf::from("schedule.csv"));
        assert_eq!(cfg.sph, SiteFiles::defaults_for(Site::Sph));
        assert_eq!(cfg.vgh.key, PathBuf::from("v_key.csv"));
        assert_eq!(
            cfg.solution_path(dir.path()),
            dir.path().join("out/glpk.txt")
        );
    }

    #[test]
    fn yaml_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.schedule = PathBuf::from("reports/schedule.csv");
        std::fs::write(dir.path().join("roster.yaml"), cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        std::fs::write(dir.path().join("roster.yaml"), "solution: custom.dat\n").unwrap();
        assert!(!Config::init(dir.path()).unwrap());
        assert_eq!(
            Config::load(dir.path()).unwrap().solution,
            PathBuf::from("custom.dat")
        );
    }

    #[test]
    fn default_config_is_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn output_over_solution_is_error() {
        let mut cfg = Config::default();
        cfg.schedule = cfg.solution.clone();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error
            && w.message.contains("schedule would overwrite the solution file")));
    }

    #[test]
    fn colliding_outputs_are_error() {
        let mut cfg = Config::default();
        cfg.vgh.table = cfg.sph.table.clone();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error
            && w.message.contains("sph.table and vgh.table both write")));
    }

    #[test]
    fn counts_over_key_is_error() {
        let mut cfg = Config::default();
        cfg.sph.counts = cfg.sph.key.clone();
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("SPH key table")));
    }

    #[test]
    fn shared_key_table_is_warning() {
        let mut cfg = Config::default();
        cfg.sph.key = PathBuf::from("block_key.csv");
        cfg.vgh.key = PathBuf::from("block_key.csv");
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(warnings[0].message.contains("block_key.csv"));
    }
}
