//! Text processing utilities for cache-key normalization
//!
//! # Components
//!
//! - [`roman_numerals`] - Canonical roman-numeral to arabic conversion
//! - [`normalizer`] - Searchable-reference construction (special characters,
//!   whitespace, numeral style)

mod normalizer;
mod roman_numerals;

pub use normalizer::{create_searchable_reference, normalize_spaces, replace_special_chars};
pub use roman_numerals::replace_roman_numerals;
