//! # grade_core - Academic Performance Calculation Engine
//!
//! `grade_core` turns raw course marks into letter grades and grade points,
//! aggregates them into credit-weighted semester (SGPA) and cumulative (CGPA)
//! averages, projects the GPA needed to reach a target, and classifies a CGPA
//! into an honor tier. All record types are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return new values
//! - **No magic numbers**: "no data" is `None`, never NaN or -1
//! - **JSON-First**: Records round-trip through the same JSON shape the web
//!   calculator stored
//! - **Injected storage**: The engine never does I/O on its own; callers pass
//!   a [`RecordStore`]
//!
//! ## Quick Start
//!
//! ```rust
//! use grade_core::calculations::{cgpa, classify, required_gpa, HonorTier};
//! use grade_core::record::{Course, Semester, StoredData};
//!
//! let mut data = StoredData::new();
//! data.add_semester(
//!     Semester::new("Fall 2024")
//!         .with_course(Course::new("Calculus", 3).with_marks(80.0, 100.0))
//!         .with_course(Course::new("Physics", 3).with_marks(60.0, 100.0)),
//! );
//!
//! let current = cgpa(&data.semesters).unwrap();
//! assert!((current - 3.32).abs() < 1e-9);
//! assert_eq!(classify(current), HonorTier::MagnaCumLaude);
//!
//! // Need 3.5 after 18 more credit hours
//! let needed = required_gpa(current, 6.0, 3.5, 18.0).unwrap();
//! assert!((needed - 3.56).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`scale`] - Percentage threshold table and grade lookup
//! - [`record`] - Course, Semester and StoredData
//! - [`calculations`] - SGPA, CGPA, required GPA, standing, summaries
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON export/import and record stores

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod record;
pub mod scale;

// Re-export commonly used types at crate root for convenience
pub use errors::{GradeError, GradeResult};
pub use file_io::{export_to_json, import_from_json, load_or_default, FileStore, MemoryStore, RecordStore};
pub use record::{Course, Semester, StoredData};
pub use scale::{grade_from_percentage, percentage_of, Grade, GradeScale, LetterGrade};
