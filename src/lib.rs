//! Symmetric Delete spelling correction: build a frequency dictionary once,
//! then serve single-term suggestions, phrase-level compound correction, and
//! segmentation of run-together text.
//!
//! ```
//! use symspell_core::{Index, SymSpellConfig, Verbosity, LookupOptions};
//!
//! let mut index = Index::new(SymSpellConfig::default()).unwrap();
//! index.create_dictionary_entry("hello", 100);
//! let suggestions = index
//!     .lookup("helo", Verbosity::Top, None, &LookupOptions::default())
//!     .unwrap();
//! assert_eq!(suggestions[0].term, "hello");
//! ```

mod casing;
mod compound;
mod config;
mod distance;
mod error;
mod index;
mod segmentation;
mod shared;
mod suggestion;
mod tokenize;

pub use casing::{transfer_casing_matching, transfer_casing_similar};
pub use compound::CompoundOptions;
pub use config::SymSpellConfig;
pub use distance::Distance;
pub use error::{Error, Result};
pub use index::{Index, IndexStats, LookupOptions};
pub use segmentation::Segmentation;
pub use shared::SharedIndex;
pub use suggestion::{Suggestion, Verbosity};
pub use tokenize::{is_acronym, is_numeric, parse_words};
