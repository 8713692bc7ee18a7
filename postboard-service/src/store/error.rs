//! Structured error type for store operations
//!
//! Absence is not an error: lookups return `Option` and deletes are
//! idempotent. A `StoreError` always means the store itself failed.

use std::fmt;

/// Operation being performed when the store error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Fetching a single record by id
    Get,
    /// Inserting a new record
    Insert,
    /// Replacing an existing record
    Replace,
    /// Checking record existence
    Exists,
    /// Deleting a record
    Delete,
    /// Counting records
    Count,
    /// Listing a page of records
    List,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Insert => write!(f, "insert"),
            Self::Replace => write!(f, "replace"),
            Self::Exists => write!(f, "exists"),
            Self::Delete => write!(f, "delete"),
            Self::Count => write!(f, "count"),
            Self::List => write!(f, "list"),
        }
    }
}

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// Could not reach the database
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// The database rejected or failed the operation
    DatabaseError,
    /// Record could not be serialized or deserialized
    SerializationError,
    /// Caller violated a store precondition
    InvalidArgument,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::InvalidArgument => write!(f, "invalid_argument"),
        }
    }
}

/// Structured store error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// The operation being performed when the error occurred
    pub operation: StoreOperation,
    /// The category of error
    pub kind: StoreErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "post", "comment")
    pub entity_type: Option<String>,
    /// The id of the entity involved
    pub entity_id: Option<String>,
}

impl StoreError {
    /// Create a new store error
    pub fn new(
        operation: StoreOperation,
        kind: StoreErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a connection failure error
    pub fn connection_failed(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::ConnectionFailed, message)
    }

    /// Create a timeout error
    pub fn timeout(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::Timeout, message)
    }

    /// Create a database error
    pub fn database_error(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::DatabaseError, message)
    }

    /// Create a serialization error
    pub fn serialization_error(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::SerializationError, message)
    }

    /// Create an invalid argument error
    pub fn invalid_argument(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::InvalidArgument, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Check if this error is transient and may succeed on retry
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            StoreErrorKind::ConnectionFailed | StoreErrorKind::Timeout
        )
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Store {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(ref entity_type), Some(ref entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
