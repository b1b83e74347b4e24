//! # Record Summary
//!
//! One-shot report over a [`StoredData`]: per-semester SGPA, overall CGPA,
//! counted credit hours, honor tier and display letter. This is what the CLI
//! prints, and it serializes cleanly for JSON output.

use serde::{Deserialize, Serialize};

use super::aggregate::{cgpa, completed_credit_hours, evaluate_course, sgpa};
use super::standing::{classify, letter_from_gpa, HonorTier};
use crate::record::{Semester, StoredData};
use crate::scale::GradePoint;

/// Per-semester figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub id: String,
    pub name: String,
    pub sgpa: Option<GradePoint>,
    /// Courses in the semester, counted or not
    pub course_count: usize,
    /// Courses with valid marks
    pub graded_course_count: usize,
    /// Credit hours of the counted courses
    pub credit_hours: u64,
}

impl SemesterSummary {
    fn of(semester: &Semester) -> Self {
        let graded: Vec<_> = semester.courses.iter().filter_map(evaluate_course).collect();
        SemesterSummary {
            id: semester.id.clone(),
            name: semester.name.clone(),
            sgpa: sgpa(&semester.courses),
            course_count: semester.courses.len(),
            graded_course_count: graded.len(),
            credit_hours: graded.iter().map(|g| u64::from(g.credit_hours)).sum(),
        }
    }
}

/// Whole-record figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub semesters: Vec<SemesterSummary>,
    pub cgpa: Option<GradePoint>,
    /// Credit hours counted toward CGPA
    pub completed_credit_hours: u64,
    /// Present only when a CGPA exists
    pub honor_tier: Option<HonorTier>,
    /// Present only when a CGPA exists
    pub display_letter: Option<String>,
}

/// Summarize a record.
///
/// # Example
///
/// ```rust
/// use grade_core::calculations::{summarize, HonorTier};
/// use grade_core::record::{Course, Semester, StoredData};
///
/// let mut data = StoredData::new();
/// data.add_semester(Semester::new("Fall").with_course(Course::new("Math", 3).with_marks(92.0, 100.0)));
///
/// let summary = summarize(&data);
/// assert_eq!(summary.cgpa, Some(4.0));
/// assert_eq!(summary.honor_tier, Some(HonorTier::SummaCumLaude));
/// assert_eq!(summary.completed_credit_hours, 3);
/// ```
pub fn summarize(data: &StoredData) -> RecordSummary {
    let cgpa = cgpa(&data.semesters);
    RecordSummary {
        semesters: data.semesters.iter().map(SemesterSummary::of).collect(),
        cgpa,
        completed_credit_hours: completed_credit_hours(&data.semesters),
        honor_tier: cgpa.map(classify),
        display_letter: cgpa.map(|g| letter_from_gpa(g).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Course;

    #[test]
    fn test_empty_record() {
        let summary = summarize(&StoredData::new());
        assert!(summary.semesters.is_empty());
        assert_eq!(summary.cgpa, None);
        assert_eq!(summary.honor_tier, None);
        assert_eq!(summary.display_letter, None);
        assert_eq!(summary.completed_credit_hours, 0);
    }

    #[test]
    fn test_mixed_record() {
        let mut data = StoredData::new();
        data.add_semester(
            Semester::new("Fall")
                .with_course(Course::new("Math", 3).with_marks(70.0, 100.0))
                .with_course(Course::new("Pending", 2)),
        );
        data.add_semester(Semester::new("Spring"));

        let summary = summarize(&data);
        let fall = &summary.semesters[0];
        assert_eq!(fall.course_count, 2);
        assert_eq!(fall.graded_course_count, 1);
        assert_eq!(fall.credit_hours, 3);
        assert!((fall.sgpa.unwrap() - 3.33).abs() < 1e-9);
        assert_eq!(summary.semesters[1].sgpa, None);

        assert!((summary.cgpa.unwrap() - 3.33).abs() < 1e-9);
        assert_eq!(summary.honor_tier, Some(HonorTier::MagnaCumLaude));
        assert_eq!(summary.display_letter.as_deref(), Some("A-"));
    }
}
