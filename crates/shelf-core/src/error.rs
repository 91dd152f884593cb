use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A foreign key did not resolve. Fatal at startup: the catalog cannot render.
    #[error("Referential integrity: {entity} {id} references missing {target} {reference}")]
    ReferentialIntegrity {
        entity: &'static str,
        id: u64,
        target: &'static str,
        reference: u64,
    },

    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: u64 },

    /// Shell input named an owner, category, or column that does not exist.
    #[error("Unknown {kind}: '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
