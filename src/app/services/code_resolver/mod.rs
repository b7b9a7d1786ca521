//! BODC parameter-code resolution
//!
//! Maps a classified channel (quantity kind, raw name, raw units) to its
//! canonical identity: BODC code, canonical unit string, CF standard name and
//! long name. The mapping is a data-driven decision table keyed on
//! case-insensitive substring patterns over the raw name and unit text; the
//! table is validated for pattern uniqueness at startup.
//!
//! ## Components
//!
//! - [`table`] - the per-kind resolution rule tables and their validation
//! - [`resolver`] - `resolve()`, the uniqueness-retry protocol and flag pairing
//!
//! Kinds that may repeat within one record (temperature, salinity, oxygen,
//! conductivity, nutrients, pigments, "other") carry an ascending instance
//! suffix on their code stem; the resolver takes the first candidate not
//! already assigned in the record, bounded at four attempts. Codes without an
//! instance digit in the vocabulary get a single attempt. In both cases an
//! exhausted code space fails the channel rather than emitting a duplicate
//! code.

pub mod resolver;
pub mod table;

#[cfg(test)]
pub mod tests;

pub use resolver::{resolve, resolve_flag, Resolution};
pub use table::{validate, ResolutionRule, SuffixStyle};
