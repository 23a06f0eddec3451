use crate::decode::TokenFault;
use crate::types::Site;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("malformed variable '{token}' on line {line}: {reason}")]
    MalformedToken {
        line: usize,
        token: String,
        reason: TokenFault,
    },

    #[error("no {site} name mapping for code '{code}'")]
    MissingMapping { site: Site, code: String },

    #[error("source file not found: {}", .0.display())]
    SourceFileMissing(PathBuf),

    #[error("malformed row in {} line {line}: {reason}", .path.display())]
    MalformedTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;
