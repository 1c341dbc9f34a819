// src/errors.rs
use mongodb::error::{Error as DriverError, ErrorKind, WriteFailure};
use thiserror::Error;

// ---------- Server error codes ----------

const DUPLICATE_KEY_CODES: [i32; 2] = [11000, 11001];
// IndexAlreadyExists, IndexOptionsConflict, IndexKeySpecsConflict
const INDEX_CONFLICT_CODES: [i32; 3] = [68, 85, 86];
const NAMESPACE_NOT_FOUND: i32 = 26;

/// Failure reported by the document store, classified by what a caller can do about it.
///
/// Every variant keeps the driver error so its message surfaces verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key already exists, either in an insert or while building a unique index.
    #[error("constraint violation: {0}")]
    ConstraintViolation(#[source] DriverError),

    /// An index with the same name already exists with a different definition.
    #[error("index conflict: {0}")]
    IndexConflict(#[source] DriverError),

    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Connectivity(#[source] DriverError),

    /// A bulk write was only partly applied.
    #[error("bulk write partially applied: {0}")]
    PartialBatch(#[source] DriverError),

    #[error("store error: {0}")]
    Driver(#[source] DriverError),

    #[error("stored document has an unexpected shape: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// A stored password hash is well-formed enough to parse but cannot be checked.
    #[error("stored password hash cannot be checked: {0}")]
    PasswordHash(#[source] bcrypt::BcryptError),
}

/// Coarse category for a driver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeClass {
    DuplicateKey,
    IndexConflict,
    PartialBatch,
    Connectivity,
    Other,
}

pub(crate) fn classify_code(code: i32) -> CodeClass {
    if DUPLICATE_KEY_CODES.contains(&code) {
        CodeClass::DuplicateKey
    } else if INDEX_CONFLICT_CODES.contains(&code) {
        CodeClass::IndexConflict
    } else {
        CodeClass::Other
    }
}

impl From<DriverError> for StoreError {
    fn from(err: DriverError) -> Self {
        let class = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write)) => classify_code(write.code),
            ErrorKind::Command(command) => classify_code(command.code),
            ErrorKind::InsertMany(insert) => {
                let duplicate = insert
                    .write_errors
                    .iter()
                    .flatten()
                    .any(|e| classify_code(e.code) == CodeClass::DuplicateKey);
                if duplicate {
                    CodeClass::DuplicateKey
                } else {
                    CodeClass::PartialBatch
                }
            }
            ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => CodeClass::Connectivity,
            _ => CodeClass::Other,
        };

        match class {
            CodeClass::DuplicateKey => StoreError::ConstraintViolation(err),
            CodeClass::IndexConflict => StoreError::IndexConflict(err),
            CodeClass::PartialBatch => StoreError::PartialBatch(err),
            CodeClass::Connectivity => StoreError::Connectivity(err),
            CodeClass::Other => StoreError::Driver(err),
        }
    }
}

/// `NamespaceNotFound`: the collection does not exist yet.
pub(crate) fn is_namespace_not_found(err: &DriverError) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(command) if command.code == NAMESPACE_NOT_FOUND)
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }
}

// ---------- Component errors ----------

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid index catalog for '{collection}': {message}")]
    InvalidCatalog { collection: String, message: String },

    #[error("failed to apply indexes on '{collection}': {source}")]
    Apply {
        collection: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Refusal to run the destructive reset phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResetError {
    #[error("refusing to reset '{database}' while running in production")]
    ProductionEnvironment { database: String },

    #[error("reset confirmation '{given}' does not match target database '{database}'")]
    ConfirmationMismatch { database: String, given: String },

    #[error("reset was authorised for '{authorised}' but the loader targets '{target}'")]
    TargetMismatch { authorised: String, target: String },
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid fixture data: {0}")]
    Invalid(String),

    #[error("fixture references unknown {kind} '{name}'")]
    UnknownReference { kind: &'static str, name: String },

    #[error("store did not report an inserted id for {collection} #{index}")]
    MissingInsertedId { collection: String, index: usize },

    #[error("failed to hash password for '{username}': {source}")]
    Hash {
        username: String,
        #[source]
        source: bcrypt::BcryptError,
    },

    #[error("{phase} phase failed: {source}")]
    Phase {
        phase: &'static str,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Reset(#[from] ResetError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown RUST_ENV value '{0}' (expected development, test or production)")]
    InvalidEnvironment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_codes_are_constraint_violations() {
        assert_eq!(classify_code(11000), CodeClass::DuplicateKey);
        assert_eq!(classify_code(11001), CodeClass::DuplicateKey);
    }

    #[test]
    fn index_definition_clashes_are_conflicts() {
        assert_eq!(classify_code(85), CodeClass::IndexConflict);
        assert_eq!(classify_code(86), CodeClass::IndexConflict);
    }

    #[test]
    fn other_codes_are_unclassified() {
        assert_eq!(classify_code(13), CodeClass::Other);
    }

    #[test]
    fn custom_driver_errors_stay_generic() {
        let err = StoreError::from(DriverError::custom("boom"));
        assert!(matches!(err, StoreError::Driver(_)));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn reset_errors_name_the_database() {
        let err = ResetError::ConfirmationMismatch {
            database: "heimdall_dev".into(),
            given: "heimdall".into(),
        };
        assert_eq!(
            err.to_string(),
            "reset confirmation 'heimdall' does not match target database 'heimdall_dev'"
        );
    }
}
