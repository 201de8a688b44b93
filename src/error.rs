use std::collections::TryReserveError;
use std::fmt;

/// Caller bugs detected by the block builder.
///
/// These never come from bad input data. Seeing one means the code driving
/// the builder is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A builder was configured with `restart_interval == 0`.
    ZeroRestartInterval,
    /// `add` was called on a finished builder without a `reset` in between.
    AddAfterFinish,
    /// `finish` was called twice without a `reset` in between.
    FinishAfterFinish,
    /// The key is not strictly greater than the previously added key.
    KeyNotIncreasing,
    /// Records since the last restart exceeded the restart interval.
    RestartOverflow,
    /// A key, value or buffer offset does not fit in a u32.
    LengthOverflow,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Violation::ZeroRestartInterval => "restart interval must be at least 1",
            Violation::AddAfterFinish => "add called on a finished block",
            Violation::FinishAfterFinish => "finish called on a finished block",
            Violation::KeyNotIncreasing => "keys must be added in strictly increasing order",
            Violation::RestartOverflow => "records since last restart exceed restart interval",
            Violation::LengthOverflow => "length does not fit in 32 bits",
        };
        f.write_str(msg)
    }
}

/// Unified error type for the block encoder.
#[derive(Debug)]
pub enum Error {
    /// Malformed varint: no terminating group within 5 bytes, or input ran out.
    InvalidEncoding,
    /// Fewer than 4 bytes were available for a fixed32.
    Truncated,
    /// The caller broke the builder's contract.
    ContractViolation(Violation),
    /// Growing the block buffer failed.
    Alloc(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding => write!(f, "Invalid varint encoding"),
            Error::Truncated => write!(f, "Unexpected end of data"),
            Error::ContractViolation(v) => write!(f, "Contract violation: {v}"),
            Error::Alloc(e) => write!(f, "Allocation failure: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Error::Alloc(e)
    }
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::ContractViolation(v)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
