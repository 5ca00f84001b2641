//! Mission opcode programs.
//!
//! A record looks like `"<2-digit code><opcode><operands>...Z"`, for
//! example `"07D01E101Z"`. Each opcode letter is followed by exactly as many
//! single-digit operands as its segment takes. Characters that are not
//! letters may sit between tokens as spacing and are skipped.

use serde::{Deserialize, Serialize};

use crate::constants::path::TERMINATOR;
use crate::error::PathError;
use crate::segments::Opcode;

/// One dispatched segment with its operand digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStep {
    pub opcode: Opcode,
    pub operands: Vec<u8>,
}

impl ProgramStep {
    pub fn new(opcode: Opcode, operands: &[u8]) -> Self {
        Self {
            opcode,
            operands: operands.to_vec(),
        }
    }

    pub fn bubble_count(&self) -> usize {
        self.opcode.bubble_count(&self.operands)
    }
}

/// A parsed mission flight path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionProgram {
    /// Mission code from the record header.
    pub code: u8,
    pub steps: Vec<ProgramStep>,
}

/// Where the parser is within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    ScanningHeader,
    Dispatching,
    Terminated,
}

/// Read the 2-digit mission code at the start of a record.
pub fn header_code(record: &str) -> Option<u8> {
    let bytes = record.as_bytes();
    match bytes {
        [tens, ones, ..] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some((tens - b'0') * 10 + (ones - b'0'))
        }
        _ => None,
    }
}

impl MissionProgram {
    /// Parse a full record.
    pub fn parse(record: &str) -> Result<Self, PathError> {
        let chars: Vec<char> = record.chars().collect();
        let mut state = ParseState::ScanningHeader;
        let mut code = 0;
        let mut steps = Vec::new();
        let mut pos = 0;

        while state != ParseState::Terminated {
            match state {
                ParseState::ScanningHeader => {
                    code = header_code(record).ok_or(PathError::MalformedHeader)?;
                    pos = 2;
                    state = ParseState::Dispatching;
                }
                ParseState::Dispatching => {
                    let Some(&ch) = chars.get(pos) else {
                        return Err(PathError::MissingTerminator);
                    };

                    if ch == TERMINATOR {
                        state = ParseState::Terminated;
                        continue;
                    }

                    if !ch.is_alphabetic() {
                        pos += 1;
                        continue;
                    }

                    let opcode = Opcode::from_letter(ch).ok_or(PathError::UnknownOpcode {
                        position: pos,
                        letter: ch,
                    })?;

                    let operands = chars
                        .iter()
                        .skip(pos + 1)
                        .take(opcode.arity())
                        .map(|c| c.to_digit(10).map(|d| d as u8))
                        .collect::<Option<Vec<u8>>>()
                        .filter(|ops| ops.len() == opcode.arity())
                        .ok_or(PathError::TruncatedOperands {
                            opcode,
                            position: pos,
                        })?;

                    pos += 1 + operands.len();
                    steps.push(ProgramStep { opcode, operands });
                }
                ParseState::Terminated => {}
            }
        }

        Ok(Self { code, steps })
    }

    /// Total bubbles a render of this program places.
    pub fn bubble_count(&self) -> usize {
        self.steps.iter().map(ProgramStep::bubble_count).sum()
    }

    /// Canonical record text for this program.
    pub fn to_record(&self) -> String {
        let mut out = format!("{:02}", self.code);
        for step in &self.steps {
            out.push(step.opcode.letter());
            for &d in &step.operands {
                out.push(char::from(b'0' + d));
            }
        }
        out.push(TERMINATOR);
        out
    }
}

impl std::str::FromStr for MissionProgram {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
