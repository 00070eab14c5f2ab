use std::fmt;

use crate::segments::Age;

/// Errors raised when a segment list does not tile its age range
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// The list holds no segments at all
    Empty,
    /// A segment ends before it starts
    InvertedSegment { from: Age, to: Age },
    /// The first segment does not start at the range start
    StartMismatch { expected: Age, found: Age },
    /// The last segment does not end at the range end
    EndMismatch { expected: Age, found: Age },
    /// Two neighbouring segments overlap or leave a hole between them
    Discontinuity { previous_to: Age, next_from: Age },
    /// A range whose end lies before its start
    InvalidRange { from: Age, to: Age },
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::Empty => write!(f, "segment list is empty"),
            SegmentError::InvertedSegment { from, to } => {
                write!(f, "segment {from}..={to} ends before it starts")
            }
            SegmentError::StartMismatch { expected, found } => {
                write!(f, "first segment starts at {found}, expected {expected}")
            }
            SegmentError::EndMismatch { expected, found } => {
                write!(f, "last segment ends at {found}, expected {expected}")
            }
            SegmentError::Discontinuity {
                previous_to,
                next_from,
            } => write!(
                f,
                "segment ending at {previous_to} is followed by one starting at {next_from}"
            ),
            SegmentError::InvalidRange { from, to } => {
                write!(f, "age range {from}..={to} is empty")
            }
        }
    }
}

impl std::error::Error for SegmentError {}

/// Errors from the free-text numeric input boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Empty,
    NotANumber(String),
    NonFinite,
    Negative(f64),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no value entered"),
            ParseError::NotANumber(text) => write!(f, "'{text}' is not a number"),
            ParseError::NonFinite => write!(f, "value must be finite"),
            ParseError::Negative(value) => write!(f, "value {value} must not be negative"),
        }
    }
}

impl std::error::Error for ParseError {}
