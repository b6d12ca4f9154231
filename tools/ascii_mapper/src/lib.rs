//! Rewrite source text containing Greek letters, sub/superscripts and math
//! symbols into ASCII-only equivalents.
//!
//! Greek letters become spelled names (θ -> theta), subscript runs become
//! suffixes (bₘₐₓ -> b_max), math symbols become operators or words, and
//! anything else is derived from its Unicode name or decomposition.
//!
//! ```
//! assert_eq!(ascii_mapper::transliterate("s\u{2097} = \u{03B8}\u{00B7}\u{03B2}").unwrap(), "s_l = theta*beta");
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod models;
pub mod scanner;
pub mod tables;

pub use engine::{transliterate, Transliterator};
pub use error::{MapperError, UnmappableChar};
