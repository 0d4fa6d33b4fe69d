//! pkgscore - quality and trending scores for package directory entries
//!
//! A pure, stateless scoring engine. Given a library record (repository
//! statistics plus registry download counts) it derives:
//!
//! - a quality `score` (0-100) with the names of the modifiers that fired
//! - a trending `popularity` value with no fixed bounds
//!
//! ```no_run
//! use pkgscore::{input, scoring};
//!
//! let libraries = input::load_libraries(Some(std::path::Path::new("libraries.json")))?;
//! for library in &libraries {
//!     let scored = scoring::score(library);
//!     let trended = scoring::trend(library);
//!     println!("{} {} {}", library.display_name(), scored.score, trended.popularity);
//! }
//! # Ok::<(), pkgscore::error::InputError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod reporters;
pub mod scoring;
