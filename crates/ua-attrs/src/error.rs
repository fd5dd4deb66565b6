use thiserror::Error;

use ua_zones::ZoneError;

use crate::key::AttrKey;

#[derive(Debug, Error)]
pub enum AttrError {
    #[error("attribute {0} is registered twice")]
    Duplicate(AttrKey),

    #[error("attribute {attr} depends on unknown attribute {dep}")]
    UnknownDependency { attr: AttrKey, dep: AttrKey },

    #[error("attribute dependencies form a cycle through {0}")]
    Cycle(AttrKey),

    #[error("attribute {0} has not been computed")]
    Missing(AttrKey),

    #[error("attribute {key} is a {found} column, expected {expected}")]
    WrongKind {
        key:      AttrKey,
        expected: &'static str,
        found:    &'static str,
    },

    #[error("attribute {key} has {found} rows but its table has {expected}")]
    Length {
        key:      AttrKey,
        expected: usize,
        found:    usize,
    },

    #[error("invalid attribute settings: {0}")]
    Config(String),

    #[error(transparent)]
    Zone(#[from] ZoneError),
}

pub type AttrResult<T> = Result<T, AttrError>;
