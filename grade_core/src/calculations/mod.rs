//! # Grade Calculations
//!
//! Stateless functions over the record types. Nothing here mutates its input
//! or touches storage; every call is independent and deterministic.
//!
//! Numeric edge cases are not errors:
//!
//! - no counted courses → `None` average
//! - no remaining credit hours, or an unreachable target → `None` requirement
//! - target already exceeded → requirement of `0.0`
//!
//! ## Available Calculations
//!
//! - [`aggregate`] - Course grading, SGPA, CGPA, derived-field refresh
//! - [`projection`] - GPA required over remaining credit hours
//! - [`standing`] - Honor tier and display letter for a CGPA
//! - [`summary`] - Whole-record report

pub mod aggregate;
pub mod projection;
pub mod standing;
pub mod summary;

// Re-export commonly used items
pub use aggregate::{
    cgpa, completed_credit_hours, evaluate_course, quality_points, sgpa, with_derived, CourseGrade,
};
pub use projection::required_gpa;
pub use standing::{classify, letter_from_gpa, HonorTier};
pub use summary::{summarize, RecordSummary, SemesterSummary};
