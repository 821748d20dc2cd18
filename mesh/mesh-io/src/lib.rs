//! STL file I/O for volume estimation.
//!
//! This crate covers the file-format half of the pipeline:
//!
//! - [`sniff`] - classify a source as ASCII or binary STL
//! - [`BinaryStlReader`] - stream 50-byte triangle records from a binary body
//! - [`write_stl_binary`] / [`save_stl`] - produce binary STL
//! - [`StlSource`] - where the bytes come from ([`FileSource`], [`MemorySource`])
//!
//! ASCII STL is detected but not decoded.
//!
//! # Example
//!
//! ```
//! use mesh_io::{BinaryStlReader, MemorySource, StlFormat, StlSource, sniff, write_stl_binary};
//! use mesh_types::cube;
//!
//! let mut bytes = Vec::new();
//! write_stl_binary(&cube(10.0), &mut bytes, None).unwrap();
//! let source = MemorySource::new(bytes);
//!
//! assert_eq!(sniff(&source).unwrap(), StlFormat::Binary);
//!
//! let reader = BinaryStlReader::new(source.open().unwrap()).unwrap();
//! let volume: f64 = reader
//!     .map(|facet| facet.unwrap().triangle().signed_volume())
//!     .sum();
//! assert!((volume - 1000.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod sniff;
mod source;
mod stl;

pub use error::{IoError, IoResult};
pub use sniff::{
    SNIFF_LEN, StlFormat, binary_size_consistent, classify_prefix, matches_ascii_grammar, sniff,
};
pub use source::{FileSource, MemorySource, StlSource};
pub use stl::{
    BinaryStlReader, Facet, HEADER_SIZE, PREAMBLE_SIZE, RECORD_SIZE, expected_binary_len,
    save_stl, write_stl_binary,
};
