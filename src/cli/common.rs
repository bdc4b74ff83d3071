//! Shared types and helpers for CLI commands.

use serde::Serialize;
use thiserror::Error;

use crate::models::Area;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was read but is invalid (or warnings under `--strict`)
    Validation = 1,
    /// A file could not be read or written
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Human-readable message printed to stderr
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// Input is invalid.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Validation,
        }
    }

    /// File system or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Io,
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Description of the problem
    pub message: String,
}

impl ValidationMessage {
    /// Creates an error-level message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: "error".to_string(),
            message: message.into(),
        }
    }

    /// Creates a warning-level message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: "warning".to_string(),
            message: message.into(),
        }
    }

    /// Checks if this message is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Parses one page coordinate, rejecting NaN and infinities.
pub fn parse_coordinate(text: &str) -> Result<f64, String> {
    let text = text.trim();
    let value = text
        .parse::<f64>()
        .map_err(|_| format!("Invalid coordinate '{text}'"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("Coordinate must be finite, got '{text}'"))
    }
}

/// Parses an area given as `Y1,X1,Y2,X2` (the document's row-major order).
pub fn parse_area(value: &str) -> Result<Area, String> {
    let parts = value
        .split(',')
        .map(|part| parse_coordinate(part).map_err(|e| format!("{e} in area '{value}'")))
        .collect::<Result<Vec<_>, _>>()?;

    let values: [f64; 4] = parts
        .try_into()
        .map_err(|_| format!("Area must have exactly four values Y1,X1,Y2,X2, got '{value}'"))?;

    Ok(Area::from_row_major(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("bad").exit_code.code(), 1);
        assert_eq!(CliError::io("disk").exit_code.code(), 2);
        assert_eq!(CliError::io("disk").to_string(), "disk");
    }

    #[test]
    fn test_parse_area() {
        assert_eq!(
            parse_area("0, 10, 200, 110"),
            Ok(Area::from_edges(10.0, 0.0, 110.0, 200.0))
        );
        assert!(parse_area("0,10,200").is_err());
        assert!(parse_area("0,ten,200,110").is_err());
    }

    #[test]
    fn test_parse_area_rejects_non_finite() {
        for input in ["nan,0,200,100", "0,inf,200,100", "0,0,-inf,100", "0,0,200,NaN"] {
            let err = parse_area(input).unwrap_err();
            assert!(err.contains("must be finite"), "{input}: {err}");
        }
    }
}
