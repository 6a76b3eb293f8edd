use thiserror::Error;

/// Errors raised while parsing a unit catalog definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unit catalog is empty")]
    Empty,

    #[error("invalid catalog entry '{0}', expected 'unit=ULP'")]
    MalformedEntry(String),

    #[error("catalog entry '{0}' has an empty unit or ULP")]
    BlankField(String),

    #[error("unit '{0}' appears more than once in the catalog")]
    DuplicateUnit(String),
}
