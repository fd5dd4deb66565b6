use std::path::PathBuf;

use thiserror::Error;

use ua_attrs::AttrError;
use ua_output::OutputError;
use ua_skims::SkimError;
use ua_tables::TableError;
use ua_zones::ZoneError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("pipeline configuration error: {0}")]
    Config(String),

    #[error("cannot read configuration file {}: {source}", path.display())]
    ReadConfig {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Attr(#[from] AttrError),

    #[error(transparent)]
    Skim(#[from] SkimError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
