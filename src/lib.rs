//! # linebar - Linear Barcode Encoder
//!
//! linebar converts text payloads into the bar/space run lengths of linear
//! barcodes. It provides:
//!
//! - **Symbologies**: Code 128 (automatic, subset A, raw codewords), EAN-128,
//!   EAN-13, EAN-8 and Interleaved 2 of 5
//! - **EAN-128 decoding**: application identifier catalog and bracketed labels
//! - **Rendering**: grayscale images with bitmap-font labels, PNG/JPEG export
//!
//! ## Quick Start
//!
//! ```
//! use linebar::{BarcodeSpec, Symbology};
//!
//! let spec = BarcodeSpec::new(Symbology::Ean128)
//!     .code("01040123453333361503123110123456");
//!
//! // Bar and space widths, starting with a bar
//! let bars = spec.bars()?;
//! assert_eq!(&bars[..6], &[2, 1, 1, 2, 3, 2]);
//!
//! // Label printed under the bars
//! assert_eq!(spec.human_text()?, "(01)04012345333336(15)031231(10)123456");
//!
//! # Ok::<(), linebar::BarcodeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`symbology`] | Encoders and the [`Encoder`] trait |
//! | [`ean128`] | Application identifier catalog and label decoder |
//! | [`barcode`] | [`BarcodeSpec`]: symbology, code and layout |
//! | [`render`] | Raster images and file export |
//! | [`error`] | Error types |
//!
//! ## Thread Safety
//!
//! Every encoder is a stateless `static`, and the identifier catalog is built
//! once and never mutated. Encoding from many threads needs no locking.

pub mod barcode;
pub mod ean128;
pub mod error;
pub mod render;
pub mod symbology;

// Re-exports for convenience
pub use barcode::BarcodeSpec;
pub use error::BarcodeError;
pub use symbology::{BarWidths, Encoder, Symbology};
