//! # EAN-128 Application Identifiers
//!
//! EAN-128 (GS1-128) data is a sequence of fields, each an application
//! identifier followed by its content:
//!
//! - [`catalog`]: the identifier table
//! - [`decoder`]: splitting raw data into fields and building the label
//!
//! Variable-length fields in the middle of the data end with [`FNC1`].

pub mod catalog;
pub mod decoder;

pub use catalog::{Ean128Field, fields, lookup};
pub use decoder::{DecodedField, decode_fields, to_human_text, validate};

/// Field separator in EAN-128 text (ASCII GS, the transmitted form of FNC1).
///
/// The Code 128 encoder writes it as the FNC1 codeword.
pub const FNC1: char = '\u{1D}';
