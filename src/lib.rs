//! sheetkv - Heuristic key-value extraction from spreadsheet-style forms
//!
//! Business forms such as resumes and skill sheets are laid out as grids where a
//! label cell ("氏名：", "Email") sits next to, or above, the value it describes.
//! This crate reads one worksheet of an XLSX/XLS workbook into a flat list of
//! non-empty cells, and infers `(key, value)` pairs from that list using
//! header detection, a synonym dictionary and a distance-decayed confidence score.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use sheetkv::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create an extractor with default settings
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     // Infer key-value pairs from the first sheet
//!     let pairs = extractor.extract_pairs(File::open("skill_sheet.xlsx")?)?;
//!     for pair in &pairs {
//!         println!("{}\t{}\t{:.2}", pair.key, pair.value, pair.confidence);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Pairing Without a Workbook
//!
//! The pairing core is pure and never fails. Cells can come from anywhere:
//!
//! ```rust
//! use sheetkv::{extract_pairs, Cell, Direction};
//!
//! let cells = vec![
//!     Cell::new(1, 1, "氏名："),
//!     Cell::new(1, 2, "山田太郎"),
//!     Cell::new(2, 1, "メール"),
//!     Cell::new(3, 1, "taro@example.com"),
//! ];
//!
//! let pairs = extract_pairs(&cells);
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(pairs[0].key, "氏名");
//! assert_eq!(pairs[1].direction, Direction::Down);
//! ```
//!
//! # LLM-Friendly Cell Listing
//!
//! ```rust,no_run
//! use std::fs::File;
//! use sheetkv::{ExtractorBuilder, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_sheet_selector(SheetSelector::Request("2".to_string()))
//!         .with_bom(false)
//!         .build()?;
//!
//!     // One line per non-empty cell: "A1<TAB>value"
//!     let tsv = extractor.convert_to_string(File::open("skill_sheet.xlsx")?)?;
//!     println!("{}", tsv);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events (sheet fallback warnings, extraction
//! summaries) and never installs a subscriber itself.

mod api;
mod builder;
mod error;
mod kv;
mod normalize;
mod output;
mod parser;
mod security;
mod text;
mod types;

// 公開API
pub use api::{OutputFormat, SheetSelector};
pub use builder::{Extractor, ExtractorBuilder};
pub use error::SheetKvError;
pub use kv::{extract_pairs, extract_pairs_with, PairingConfig};
pub use normalize::{normalize_cell_text, normalize_text};
pub use text::html_to_text;
pub use types::{Cell, CellCoord, Direction, KeyValuePair, SearchStrategy, SheetCells};
