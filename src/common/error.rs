use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RingError {
    // Ring builder
    InvalidGeometry(&'static str),
    CapacityOverflow { row: usize, col: usize },
    InvalidBits,

    // Ring reader
    SymbolNotFound,
    StructureMismatch,
    InvalidUTF8Sequence,
}

impl Display for RingError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            // Ring builder
            Self::InvalidGeometry(reason) => write!(f, "Invalid geometry: {reason}"),
            Self::CapacityOverflow { row, col } => {
                write!(f, "Payload too long for current geometry: overflow at row {row}, col {col}")
            }
            Self::InvalidBits => f.write_str("Invalid bit group"),

            // Ring reader
            Self::SymbolNotFound => f.write_str("Ring not found"),
            Self::StructureMismatch => f.write_str("Sync pattern mismatch"),
            Self::InvalidUTF8Sequence => f.write_str("Invalid UTF8 sequence"),
        }
    }
}

impl std::error::Error for RingError {}

pub type RingResult<T> = Result<T, RingError>;

#[cfg(test)]
mod error_tests {
    use super::RingError;

    #[test]
    fn test_display() {
        let err = RingError::CapacityOverflow { row: 6, col: 3 };
        assert_eq!(
            err.to_string(),
            "Payload too long for current geometry: overflow at row 6, col 3"
        );
        let err = RingError::InvalidGeometry("module size must be positive");
        assert_eq!(err.to_string(), "Invalid geometry: module size must be positive");
    }
}
