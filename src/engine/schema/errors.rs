use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Key cannot hold salt, metric and base timestamp
    #[error("Row key too short: need at least {needed} bytes, have {actual}")]
    KeyTooShort { needed: usize, actual: usize },

    /// Tag section is not a whole number of tagk/tagv pairs
    #[error("Row key has {0} bytes of a partial tag pair")]
    PartialTagPair(usize),

    /// Tag collides with a numeric wire constant
    #[error("Data type {0} is reserved")]
    ReservedType(u8),

    #[error("Data type {0} already has a fragment factory")]
    AlreadyRegistered(u8),
}
