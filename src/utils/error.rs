use std::fmt;
use thiserror::Error;

/// Which owned collection an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Member,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Book => write!(f, "book"),
            Entity::Member => write!(f, "member"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("{entity} '{id}' already exists")]
    DuplicateId { entity: Entity, id: String },

    #[error("{entity} '{id}' does not exist")]
    NotFound { entity: Entity, id: String },

    #[error("book '{title}' ({book_id}) has no copies available")]
    NoAvailableCopies { book_id: String, title: String },

    #[error("member '{member_id}' already holds {limit} books")]
    LoanCapExceeded { member_id: String, limit: usize },

    #[error("member '{member_id}' has not borrowed book '{book_id}'")]
    NotCurrentlyBorrowed { book_id: String, member_id: String },

    #[error("copy count for book '{book_id}' out of bounds: {available}/{total}")]
    CopyCountOutOfBounds {
        book_id: String,
        available: u32,
        total: u32,
    },

    #[error("Invalid input for {field}: '{value}' ({reason})")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lending,
    Input,
    Configuration,
    Integrity,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LibraryError {
    pub fn invalid_input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        LibraryError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LibraryError::DuplicateId { .. }
            | LibraryError::NotFound { .. }
            | LibraryError::NoAvailableCopies { .. }
            | LibraryError::LoanCapExceeded { .. }
            | LibraryError::NotCurrentlyBorrowed { .. } => ErrorCategory::Lending,
            LibraryError::InvalidInput { .. } => ErrorCategory::Input,
            LibraryError::ConfigParseError { .. }
            | LibraryError::InvalidConfigValueError { .. }
            | LibraryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LibraryError::CopyCountOutOfBounds { .. } => ErrorCategory::Integrity,
            LibraryError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Lending and input errors never end a session; everything else is
    /// worth a louder log line.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lending | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Integrity | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LibraryError::DuplicateId { entity, id } => {
                format!("A {} with ID '{}' already exists.", entity, id)
            }
            LibraryError::NotFound { entity, id } => {
                format!("No {} with ID '{}' exists.", entity, id)
            }
            LibraryError::NoAvailableCopies { title, .. } => {
                format!("'{}' has no copies available for loan right now.", title)
            }
            LibraryError::LoanCapExceeded { limit, .. } => {
                format!("A member may borrow at most {} books at a time.", limit)
            }
            LibraryError::NotCurrentlyBorrowed { book_id, member_id } => format!(
                "Member '{}' is not currently borrowing book '{}'.",
                member_id, book_id
            ),
            LibraryError::InvalidInput { field, reason, .. } => {
                format!("Invalid {}: {}.", field, reason)
            }
            LibraryError::CopyCountOutOfBounds { book_id, .. } => format!(
                "Inventory for book '{}' is inconsistent; the operation was aborted.",
                book_id
            ),
            LibraryError::ConfigParseError { .. }
            | LibraryError::InvalidConfigValueError { .. }
            | LibraryError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            LibraryError::IoError(e) => format!("I/O failure: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LibraryError::DuplicateId { .. } => "Choose an ID that is not registered yet.",
            LibraryError::NotFound { entity: Entity::Book, .. } => {
                "Check the book ID with the book list (menu 2)."
            }
            LibraryError::NotFound { entity: Entity::Member, .. } => {
                "Check the member ID with the member list (menu 5)."
            }
            LibraryError::NoAvailableCopies { .. } => "Wait until a copy is returned.",
            LibraryError::LoanCapExceeded { .. } => "Return a book before borrowing another.",
            LibraryError::NotCurrentlyBorrowed { .. } => {
                "Check the active loans (menu 7) for the correct pair."
            }
            LibraryError::InvalidInput { .. } => "Re-enter the value and try again.",
            LibraryError::CopyCountOutOfBounds { .. } => {
                "Restart the session; the in-memory inventory cannot be trusted."
            }
            LibraryError::ConfigParseError { .. } => "Make sure the file is valid TOML.",
            LibraryError::InvalidConfigValueError { .. }
            | LibraryError::MissingConfigError { .. } => {
                "Fix the [lending] section of the configuration file."
            }
            LibraryError::IoError(_) => "Check that the file exists and is readable.",
        }
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lending_errors_are_recoverable() {
        let err = LibraryError::LoanCapExceeded {
            member_id: "M1".to_string(),
            limit: 5,
        };
        assert_eq!(err.category(), ErrorCategory::Lending);
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "member 'M1' already holds 5 books");
    }

    #[test]
    fn test_integrity_error_is_critical() {
        let err = LibraryError::CopyCountOutOfBounds {
            book_id: "B1".to_string(),
            available: 3,
            total: 2,
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_not_found_suggestion_depends_on_entity() {
        let book = LibraryError::NotFound {
            entity: Entity::Book,
            id: "B9".to_string(),
        };
        let member = LibraryError::NotFound {
            entity: Entity::Member,
            id: "M9".to_string(),
        };
        assert_ne!(book.recovery_suggestion(), member.recovery_suggestion());
        assert_eq!(book.user_friendly_message(), "No book with ID 'B9' exists.");
    }
}
