//! ASCII / binary STL classification.
//!
//! Binary STL has no magic number, so classification works by exclusion:
//! the first [`SNIFF_LEN`] bytes are matched against the literal ASCII facet
//! grammar
//!
//! ```text
//! facet normal <f> <f> <f>
//!   outer loop
//!     vertex <f> <f> <f>
//!     vertex <f> <f> <f>
//!     vertex <f> <f> <f>
//!   endloop
//! endfacet
//! ```
//!
//! (any whitespace, including newlines, between tokens). A match means ASCII,
//! anything else means binary.
//!
//! The grammar match is complemented by a structural check: when the total
//! length is known and equals `84 + 50 * count` for the count stored at byte
//! 80, the data is laid out exactly like a binary STL and is classified binary
//! even if its header text happens to look like a facet.

use std::fmt;
use std::io::Read;
use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::source::StlSource;
use crate::stl::{HEADER_SIZE, PREAMBLE_SIZE, expected_binary_len};

/// Number of leading bytes inspected when classifying.
pub const SNIFF_LEN: usize = 512;

/// Compiled ASCII facet grammar, built on first use.
static ASCII_FACET: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// STL encoding of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlFormat {
    /// Human-readable `solid ... endsolid` text.
    Ascii,
    /// 80-byte header, u32 count, 50-byte records.
    Binary,
}

impl StlFormat {
    /// Lower-case name of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for StlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn ascii_facet_pattern() -> String {
    // Leading '+' and "e+NN" exponents are accepted.
    let num = r"[-+0-9.eE]+";
    let triple = format!(r"{num}\s+{num}\s+{num}");
    format!(
        r"(?-u)facet\s+normal\s+{triple}\s+outer\s+loop\s+vertex\s+{triple}\s+vertex\s+{triple}\s+vertex\s+{triple}\s+endloop\s+endfacet"
    )
}

fn ascii_facet_regex() -> IoResult<&'static Regex> {
    ASCII_FACET
        .get_or_init(|| Regex::new(&ascii_facet_pattern()))
        .as_ref()
        .map_err(|e| IoError::Pattern(e.clone()))
}

/// Check whether `prefix` contains a complete ASCII facet.
///
/// # Errors
///
/// Returns [`IoError::Pattern`] if the grammar cannot be compiled.
///
/// # Example
///
/// ```
/// use mesh_io::matches_ascii_grammar;
///
/// let text = b"solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\n\
///              vertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
/// assert!(matches_ascii_grammar(text).unwrap());
/// assert!(!matches_ascii_grammar(b"solid t\nfacet normal 0 0 1\n").unwrap());
/// ```
pub fn matches_ascii_grammar(prefix: &[u8]) -> IoResult<bool> {
    Ok(ascii_facet_regex()?.is_match(prefix))
}

/// Check whether `total_len` is exactly what the count in `prefix` implies.
///
/// Returns `false` when the prefix is too short to contain the count or the
/// total length is unknown.
#[must_use]
pub fn binary_size_consistent(prefix: &[u8], total_len: Option<u64>) -> bool {
    let (Some(total), Some(count)) = (total_len, prefix.get(HEADER_SIZE..PREAMBLE_SIZE)) else {
        return false;
    };
    let count = u32::from_le_bytes([count[0], count[1], count[2], count[3]]);
    total == expected_binary_len(count)
}

/// Classify already-read leading bytes.
///
/// # Errors
///
/// Returns [`IoError::EmptyFile`] for an empty prefix, or
/// [`IoError::Pattern`] if the grammar cannot be compiled.
pub fn classify_prefix(prefix: &[u8], total_len: Option<u64>) -> IoResult<StlFormat> {
    if prefix.is_empty() {
        return Err(IoError::EmptyFile);
    }

    let prefix = &prefix[..prefix.len().min(SNIFF_LEN)];
    let grammar = matches_ascii_grammar(prefix)?;
    let structural = binary_size_consistent(prefix, total_len);

    let format = if grammar && !structural {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    };

    debug!(
        grammar_match = grammar,
        binary_layout = structural,
        format = format.as_str(),
        "Classified STL prefix"
    );

    Ok(format)
}

/// Read the leading bytes of `source` and classify them.
///
/// A short file is not an error here: a non-empty file smaller than the
/// binary preamble is classified binary and fails later, at decode time.
///
/// # Errors
///
/// Returns an error if the source cannot be opened or read, or if it is empty.
///
/// # Example
///
/// ```
/// use mesh_io::{MemorySource, StlFormat, sniff};
///
/// let binary = MemorySource::new(vec![0u8; 84]);
/// assert_eq!(sniff(&binary).unwrap(), StlFormat::Binary);
/// ```
pub fn sniff<S: StlSource>(source: &S) -> IoResult<StlFormat> {
    let total_len = source.byte_len()?;
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    source
        .open()?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)?;

    classify_prefix(&prefix, total_len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    const FACET: &str = "facet normal 0 0 1\n  outer loop\n    vertex 0 0 0\n    vertex 1 0 0\n    vertex 0 1 0\n  endloop\nendfacet";

    #[test]
    fn minimal_facet_is_ascii() {
        let text = format!("solid cube\n{FACET}\nendsolid cube\n");
        assert_eq!(classify_prefix(text.as_bytes(), None).unwrap(), StlFormat::Ascii);
    }

    #[test]
    fn grammar_tolerates_any_whitespace_and_exponents() {
        let text = "facet normal -1.0e+00 2.5E-3 +0.0\r\n\touter  loop vertex 1e3 -2 3.\n\n\
                    vertex .5 6 7 vertex 8 9 10\tendloop \n endfacet";
        assert!(matches_ascii_grammar(text.as_bytes()).unwrap());
    }

    #[test]
    fn signed_tokens_and_mixed_whitespace_are_ascii() {
        let text = "solid p\nfacet\tnormal +0 0 1\nouter\n loop\nvertex 0 0 +1.0e+00\n\
                    vertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid p\n";
        assert_eq!(classify_prefix(text.as_bytes(), None).unwrap(), StlFormat::Ascii);
    }

    #[test]
    fn incomplete_facet_is_binary() {
        let text = "solid x\nfacet normal 0 0 1\n  outer loop\n    vertex 0 0 0\n";
        assert_eq!(classify_prefix(text.as_bytes(), None).unwrap(), StlFormat::Binary);
    }

    #[test]
    fn grammar_must_fit_in_sniff_window() {
        let mut text = format!("solid padded\n{}", " ".repeat(SNIFF_LEN));
        text.push_str(FACET);
        assert_eq!(classify_prefix(text.as_bytes(), None).unwrap(), StlFormat::Binary);
    }

    #[test]
    fn zeroed_blob_is_binary() {
        assert_eq!(classify_prefix(&[0u8; 84], Some(84)).unwrap(), StlFormat::Binary);
    }

    #[test]
    fn empty_prefix_is_an_error() {
        assert!(matches!(classify_prefix(&[], Some(0)), Err(IoError::EmptyFile)));
    }

    #[test]
    fn binary_layout_overrides_facet_lookalike_body() {
        // A three-record binary file whose record bytes happen to spell a facet.
        let mut file = b"solid binary".to_vec();
        file.resize(HEADER_SIZE, b' ');
        file.extend_from_slice(&3u32.to_le_bytes());
        let mut body = FACET.as_bytes().to_vec();
        body.resize(150, b' ');
        file.extend_from_slice(&body);

        let len = Some(file.len() as u64);
        assert!(matches_ascii_grammar(&file).unwrap());
        assert!(binary_size_consistent(&file, len));
        assert_eq!(classify_prefix(&file, len).unwrap(), StlFormat::Binary);

        // Without a known length the grammar decides.
        assert_eq!(classify_prefix(&file, None).unwrap(), StlFormat::Ascii);
    }

    #[test]
    fn size_check_needs_count_field() {
        assert!(!binary_size_consistent(&[0u8; 40], Some(84)));
        assert!(!binary_size_consistent(&[0u8; 84], None));
        assert!(binary_size_consistent(&[0u8; 84], Some(84)));
    }

    #[test]
    fn sniff_reads_source() {
        let text = format!("solid s\n{FACET}\nendsolid s\n");
        let source = MemorySource::new(text.into_bytes());
        assert_eq!(sniff(&source).unwrap(), StlFormat::Ascii);

        let empty = MemorySource::new(Vec::new());
        assert!(matches!(sniff(&empty), Err(IoError::EmptyFile)));
    }

    #[test]
    fn short_nonempty_file_sniffs_binary() {
        let source = MemorySource::new(vec![7u8; 20]);
        assert_eq!(sniff(&source).unwrap(), StlFormat::Binary);
    }
}
