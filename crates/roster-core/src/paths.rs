use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "roster.yaml";

pub const SOLUTION_FILE: &str = "solnfile.dat";
pub const SCHEDULE_FILE: &str = "schedule.csv";

pub const SPH_TABLE: &str = "sph.csv";
pub const SPH_KEY: &str = "sph_key.csv";
pub const SPH_COUNTS: &str = "sph_counts.csv";

pub const VGH_TABLE: &str = "vgh.csv";
pub const VGH_KEY: &str = "vgh_key.csv";
pub const VGH_COUNTS: &str = "vgh_counts.csv";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Join `path` onto `root` unless it is already absolute.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_root() {
        let root = Path::new("/work/block3");
        assert_eq!(
            resolve(root, Path::new("sph.csv")),
            PathBuf::from("/work/block3/sph.csv")
        );
    }

    #[test]
    fn absolute_paths_pass_through() {
        let root = Path::new("/work/block3");
        assert_eq!(
            resolve(root, Path::new("/shared/block_key.csv")),
            PathBuf::from("/shared/block_key.csv")
        );
    }
}
