//! Errors raised while loading and rendering mission flight paths.

use crate::segments::Opcode;

/// Errors that can occur while loading or rendering a mission path.
#[derive(Debug)]
pub enum PathError {
    /// No record carries this mission code.
    MissionNotFound(u8),
    /// The record does not start with two ASCII digits.
    MalformedHeader,
    /// A letter with no segment routine behind it.
    UnknownOpcode { position: usize, letter: char },
    /// The record ended, or hit a non-digit, while reading operands.
    TruncatedOperands { opcode: Opcode, position: usize },
    /// The record ended before the `Z` terminator.
    MissingTerminator,
    /// A segment was handed the wrong number of operands.
    ArityMismatch {
        opcode: Opcode,
        expected: usize,
        found: usize,
    },
    /// A spline call with too few or too many control points.
    ControlPoints(usize),
    /// Launch pad outside 0..=2.
    InvalidPad(u8),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for PathError {
    fn from(e: std::io::Error) -> Self {
        PathError::Io(e)
    }
}

impl From<serde_json::Error> for PathError {
    fn from(e: serde_json::Error) -> Self {
        PathError::Json(e)
    }
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::MissionNotFound(code) => {
                write!(f, "No flight path recorded for mission {:02}", code)
            }
            PathError::MalformedHeader => {
                write!(f, "Mission record does not start with a 2-digit code")
            }
            PathError::UnknownOpcode { position, letter } => {
                write!(f, "Unknown opcode '{}' at position {}", letter, position)
            }
            PathError::TruncatedOperands { opcode, position } => write!(
                f,
                "Opcode '{}' at position {} is missing operands",
                opcode.letter(),
                position
            ),
            PathError::MissingTerminator => write!(f, "Mission record has no 'Z' terminator"),
            PathError::ArityMismatch {
                opcode,
                expected,
                found,
            } => write!(
                f,
                "Segment '{}' takes {} operands, got {}",
                opcode.letter(),
                expected,
                found
            ),
            PathError::ControlPoints(n) => {
                write!(f, "Spline needs 2-18 control points, got {}", n)
            }
            PathError::InvalidPad(pad) => write!(f, "Launch pad {} does not exist", pad),
            PathError::Io(e) => write!(f, "IO error: {}", e),
            PathError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::Io(e) => Some(e),
            PathError::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_mission_code() {
        let msg = PathError::MissionNotFound(7).to_string();
        assert!(msg.contains("07"), "{}", msg);
    }

    #[test]
    fn test_io_error_has_source() {
        let err: PathError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&PathError::MissingTerminator).is_none());
    }
}
