//! Collection generator core.
//!
//! Turns a row-oriented trait table (CSV), a JSON metadata template, and a
//! directory of pre-rendered artwork into a numbered sequence of
//! `(<index>.png, <index>.json)` output pairs. Rows are consumed in a
//! uniformly random order (sampling without replacement), so a full run is a
//! random permutation of the input rows, optionally truncated by a limit.
//!
//! The crate is synchronous and single-threaded by design: every step is
//! blocking filesystem I/O executed strictly in sequence. The only
//! interactive boundary (the "target directory already exists" confirmation)
//! is abstracted behind the [`confirm::Confirm`] trait so callers can run
//! non-interactively.

pub mod confirm;
pub mod error;
pub mod generator;
pub mod template;
pub mod trait_table;

pub use confirm::{AssumeYes, Confirm};
pub use error::{GenerateError, Result};
pub use generator::{GenerateConfig, GenerateSummary, generate};
pub use template::MetadataTemplate;
pub use trait_table::{Attribute, TraitRow, TraitTable};
