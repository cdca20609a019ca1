use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Not found: {message}")]
    EntityNotFound { message: String },

    #[error("Booking conflict: {message}")]
    BookingConflict { message: String },

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("JSON storage error: {message}")]
    Storage { message: String },

    #[error("Payment error: {message}")]
    Payment { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// Coarse classification of a [`HotelError`], used by the console to pick
/// exit codes and by tests to assert on the failure without matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EntityNotFound,
    BookingConflict,
    InvalidOperation,
    Storage,
    Payment,
    Io,
    Config,
}

impl HotelError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        HotelError::EntityNotFound {
            message: format!("{} {} does not exist", entity, id),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HotelError::BookingConflict {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        HotelError::InvalidOperation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        HotelError::Storage {
            message: message.into(),
        }
    }

    pub fn payment(message: impl Into<String>) -> Self {
        HotelError::Payment {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HotelError::EntityNotFound { .. } => ErrorKind::EntityNotFound,
            HotelError::BookingConflict { .. } => ErrorKind::BookingConflict,
            HotelError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            HotelError::Storage { .. } => ErrorKind::Storage,
            HotelError::Payment { .. } => ErrorKind::Payment,
            HotelError::IoError(_) => ErrorKind::Io,
            HotelError::ConfigError { .. }
            | HotelError::InvalidConfigValueError { .. } => ErrorKind::Config,
        }
    }

    /// Errors the console reports before showing the menu again. A broken
    /// console stream or bad configuration ends the session instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Io | ErrorKind::Config)
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Config => 2,
            ErrorKind::Storage | ErrorKind::Io => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HotelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = HotelError::not_found("Room", 101);
        assert_eq!(err.to_string(), "Not found: Room 101 does not exist");
        assert_eq!(err.kind(), ErrorKind::EntityNotFound);
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(HotelError::conflict("taken").is_recoverable());
        assert!(HotelError::invalid("bad").is_recoverable());
        assert!(HotelError::storage("disk full").is_recoverable());
        assert_eq!(HotelError::storage("disk full").exit_code(), 3);
        let config = HotelError::ConfigError {
            message: "bad".to_string(),
        };
        assert!(!config.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: HotelError = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
