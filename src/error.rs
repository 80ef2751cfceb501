//! # Error Types
//!
//! This module defines the error types returned by the encoders and the
//! EAN-128 field decoder.
//!
//! Every failure is local to one call and recoverable by the caller; nothing
//! here carries I/O state except [`crate::render::RenderError`], which lives
//! next to the renderer.

use thiserror::Error;

/// Main error type for barcode encoding and decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    /// A character outside the symbology's supported range
    #[error("invalid character {character:?} at position {position} for {symbology}")]
    InvalidCharacter {
        character: char,
        position: usize,
        symbology: &'static str,
    },

    /// Fixed-length symbology text with the wrong number of characters
    #[error("{symbology} requires exactly {expected} digits, got {actual}")]
    InvalidLength {
        symbology: &'static str,
        expected: usize,
        actual: usize,
    },

    /// EAN-128 data starting with an application identifier not in the catalog
    #[error("unrecognized application identifier at position {position} in {remainder:?}")]
    UnrecognizedField { position: usize, remainder: String },

    /// A fixed-length EAN-128 field that runs past the end of the data
    #[error("field ({id}) needs {expected} characters, only {available} left")]
    TruncatedField {
        id: String,
        expected: usize,
        available: usize,
    },

    /// Field content rejected by strict EAN-128 validation
    #[error("field ({id}): {reason}")]
    InvalidFieldContent { id: String, reason: String },

    /// Raw Code 128 input without a start codeword
    #[error("raw code 128 text is empty, a start codeword is required")]
    EmptyRawCode,

    /// Symbology name that does not match any supported type
    #[error("unknown symbology '{0}'")]
    UnknownSymbology(String),
}
