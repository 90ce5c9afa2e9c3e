//! Error type for the fallible operations of this crate.

use core::fmt;

/// Error returned by fallible operations.
///
/// Almost everything in this crate is total: masked bit operations cannot
/// fail, and misuse of packing preconditions is a debug assertion rather
/// than a runtime error. The exception is calling-convention
/// initialization, whose id may originate from external configuration
/// (for example a caller-selected target triple) and therefore reports
/// failure through a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// An argument did not identify anything supported by this build.
    InvalidArgument {
        /// What the argument failed to identify.
        what: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { what } => {
                write!(f, "invalid argument: {what}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = Error::InvalidArgument {
            what: "unrecognized calling convention id",
        };
        assert_eq!(
            format!("{}", err),
            "invalid argument: unrecognized calling convention id"
        );
    }
}
