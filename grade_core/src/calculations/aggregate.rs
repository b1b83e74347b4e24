//! # SGPA / CGPA Aggregation
//!
//! Credit-weighted grade point averages.
//!
//! Only courses with both marks present and positive total marks count.
//! Everything else is skipped silently, never treated as 0%.
//! CGPA is recomputed from every counted course across all semesters. It is
//! not an average of the per-semester SGPAs.
//!
//! ## Example
//!
//! ```rust
//! use grade_core::calculations::aggregate::sgpa;
//! use grade_core::record::Course;
//!
//! let courses = vec![
//!     Course::new("Calculus", 3).with_marks(80.0, 100.0), // 4.00
//!     Course::new("Physics", 3).with_marks(60.0, 100.0),  // 2.64
//! ];
//! let average = sgpa(&courses).unwrap();
//! assert!((average - 3.32).abs() < 1e-9);
//!
//! assert_eq!(sgpa(&[]), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::record::{Course, Semester, StoredData};
use crate::scale::{grade_from_percentage, percentage_of, GradePoint, LetterGrade, Percentage};

/// Grade for one course with valid marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseGrade {
    pub percentage: Percentage,
    pub letter: LetterGrade,
    pub grade_point: GradePoint,
    pub credit_hours: u32,
}

impl CourseGrade {
    /// credit hours × grade point
    pub fn quality_points(&self) -> f64 {
        quality_points(self.credit_hours, self.grade_point)
    }
}

/// Weighted contribution of one course: credit hours × grade point.
pub fn quality_points(credit_hours: u32, grade_point: GradePoint) -> f64 {
    f64::from(credit_hours) * grade_point
}

/// Grade a single course. `None` when marks are missing or total marks ≤ 0.
pub fn evaluate_course(course: &Course) -> Option<CourseGrade> {
    let (obtained, total) = course.valid_marks()?;
    let percentage = percentage_of(obtained, total);
    let grade = grade_from_percentage(percentage);
    Some(CourseGrade {
        percentage,
        letter: grade.letter,
        grade_point: grade.grade_point,
        credit_hours: course.credit_hours,
    })
}

/// Running Σ(credit × point) and Σ(credit) over counted courses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WeightedSum {
    quality_points: f64,
    credit_hours: u64,
}

impl WeightedSum {
    fn of<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Self {
        courses
            .into_iter()
            .filter_map(evaluate_course)
            .fold(WeightedSum::default(), |acc, grade| WeightedSum {
                quality_points: acc.quality_points + grade.quality_points(),
                credit_hours: acc.credit_hours + u64::from(grade.credit_hours),
            })
    }

    /// `None` instead of dividing by zero
    fn average(&self) -> Option<GradePoint> {
        if self.credit_hours == 0 {
            None
        } else {
            Some(self.quality_points / self.credit_hours as f64)
        }
    }
}

/// Semester grade point average over the counted courses.
pub fn sgpa(courses: &[Course]) -> Option<GradePoint> {
    WeightedSum::of(courses).average()
}

/// Cumulative grade point average over every counted course in every semester.
///
/// # Example
///
/// ```rust
/// use grade_core::calculations::aggregate::cgpa;
/// use grade_core::record::{Course, Semester};
///
/// let semesters = vec![
///     Semester::new("Fall").with_course(Course::new("A", 4).with_marks(90.0, 100.0)),
///     Semester::new("Spring").with_course(Course::new("B", 2).with_marks(50.0, 100.0)),
/// ];
/// // (4 × 4.00 + 2 × 2.00) / 6, not the mean of 4.00 and 2.00
/// let average = cgpa(&semesters).unwrap();
/// assert!((average - 20.0 / 6.0).abs() < 1e-9);
/// ```
pub fn cgpa(semesters: &[Semester]) -> Option<GradePoint> {
    WeightedSum::of(semesters.iter().flat_map(|s| s.courses.iter())).average()
}

/// Credit hours that count toward CGPA (courses with valid marks).
pub fn completed_credit_hours(semesters: &[Semester]) -> u64 {
    WeightedSum::of(semesters.iter().flat_map(|s| s.courses.iter())).credit_hours
}

/// Copy of `course` with percentage, grade and grade points filled in
/// (or cleared when the course has no valid marks).
pub fn course_with_derived(course: &Course) -> Course {
    let grade = evaluate_course(course);
    Course {
        percentage: grade.map(|g| g.percentage),
        grade: grade.map(|g| g.letter),
        grade_points: grade.map(|g| g.grade_point),
        ..course.clone()
    }
}

/// Copy of `semester` with derived course fields and SGPA.
pub fn semester_with_derived(semester: &Semester) -> Semester {
    Semester {
        id: semester.id.clone(),
        name: semester.name.clone(),
        courses: semester.courses.iter().map(course_with_derived).collect(),
        sgpa: sgpa(&semester.courses),
    }
}

/// Copy of the whole record with every derived field recomputed.
///
/// The input is left untouched, including its `lastUpdated` timestamp.
pub fn with_derived(data: &StoredData) -> StoredData {
    StoredData {
        semesters: data.semesters.iter().map(semester_with_derived).collect(),
        last_updated: data.last_updated,
        grading_system: data.grading_system.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn graded(name: &str, credits: u32, obtained: f64, total: f64) -> Course {
        Course::new(name, credits).with_marks(obtained, total)
    }

    #[test]
    fn test_sgpa_empty_is_none() {
        assert_eq!(sgpa(&[]), None);
    }

    #[test]
    fn test_sgpa_weighted_example() {
        let courses = vec![graded("A", 3, 80.0, 100.0), graded("B", 3, 60.0, 100.0)];
        let result = sgpa(&courses).unwrap();
        assert!((result - 3.32).abs() < EPS);
    }

    #[test]
    fn test_sgpa_weights_by_credits() {
        // (4 × 4.00 + 1 × 0.00) / 5 = 3.2
        let courses = vec![graded("Major", 4, 95.0, 100.0), graded("Elective", 1, 10.0, 100.0)];
        assert!((sgpa(&courses).unwrap() - 3.2).abs() < EPS);
    }

    #[test]
    fn test_invalid_marks_are_excluded() {
        let mut obtained_only = Course::new("NoTotal", 3);
        obtained_only.obtained_marks = Some(50.0);
        let zero_total = graded("ZeroTotal", 3, 50.0, 0.0);
        let no_marks = Course::new("Ungraded", 3);

        let courses = vec![graded("Counted", 2, 70.0, 100.0), obtained_only, zero_total, no_marks];
        // Only the 3.33 course counts; anything else would drag it toward 0
        assert!((sgpa(&courses).unwrap() - 3.33).abs() < EPS);
    }

    #[test]
    fn test_sgpa_none_when_nothing_counts() {
        let courses = vec![Course::new("Ungraded", 3), graded("ZeroTotal", 3, 10.0, 0.0)];
        assert_eq!(sgpa(&courses), None);
    }

    #[test]
    fn test_zero_credit_courses_do_not_divide_by_zero() {
        let courses = vec![graded("Audit", 0, 90.0, 100.0)];
        assert_eq!(sgpa(&courses), None);
    }

    #[test]
    fn test_cgpa_flattens_semesters() {
        let semesters = vec![
            Semester::new("One")
                .with_course(graded("A", 3, 85.0, 100.0))
                .with_course(graded("B", 3, 62.0, 100.0)),
            Semester::new("Two").with_course(graded("C", 1, 45.0, 100.0)),
        ];
        // (3 × 4.00 + 3 × 2.76 + 1 × 1.50) / 7
        let expected = (12.0 + 8.28 + 1.5) / 7.0;
        let result = cgpa(&semesters).unwrap();
        assert!((result - expected).abs() < EPS);

        let mean_of_sgpas = (sgpa(&semesters[0].courses).unwrap() + sgpa(&semesters[1].courses).unwrap()) / 2.0;
        assert!((result - mean_of_sgpas).abs() > 0.1);
    }

    #[test]
    fn test_cgpa_skips_empty_semesters() {
        let semesters = vec![
            Semester::new("Empty"),
            Semester::new("Graded").with_course(graded("A", 3, 80.0, 100.0)),
        ];
        assert!((cgpa(&semesters).unwrap() - 4.0).abs() < EPS);
        assert_eq!(cgpa(&[Semester::new("Empty")]), None);
        assert_eq!(cgpa(&[]), None);
    }

    #[test]
    fn test_completed_credit_hours() {
        let semesters = vec![
            Semester::new("One")
                .with_course(graded("A", 3, 85.0, 100.0))
                .with_course(Course::new("Ungraded", 4)),
            Semester::new("Two").with_course(graded("B", 2, 45.0, 100.0)),
        ];
        assert_eq!(completed_credit_hours(&semesters), 5);
    }

    #[test]
    fn test_evaluate_course() {
        let grade = evaluate_course(&graded("A", 3, 39.0, 50.0)).unwrap();
        assert_eq!(grade.percentage, 78);
        assert_eq!(grade.letter, LetterGrade::B);
        assert_eq!(grade.grade_point, 3.87);
        assert!((grade.quality_points() - 11.61).abs() < EPS);
        assert!(evaluate_course(&Course::new("Ungraded", 3)).is_none());
    }

    #[test]
    fn test_with_derived_returns_new_value() {
        let mut data = StoredData::new();
        let mut stale = Course::new("Stale", 2);
        stale.grade = Some(LetterGrade::A);
        stale.grade_points = Some(4.0);
        data.add_semester(
            Semester::new("Fall")
                .with_course(graded("Math", 3, 64.0, 100.0))
                .with_course(stale),
        );

        let derived = with_derived(&data);

        // Original untouched
        assert_eq!(data.semesters[0].sgpa, None);
        assert_eq!(data.semesters[0].courses[0].grade_points, None);

        let semester = &derived.semesters[0];
        assert!((semester.sgpa.unwrap() - 2.93).abs() < EPS);
        assert_eq!(semester.courses[0].percentage, Some(64));
        assert_eq!(semester.courses[0].grade, Some(LetterGrade::C));
        assert_eq!(semester.courses[0].grade_points, Some(2.93));
        // Ungraded course stays in the list with derived fields cleared
        assert_eq!(semester.courses.len(), 2);
        assert_eq!(semester.courses[1].grade, None);
        assert_eq!(semester.courses[1].grade_points, None);
        assert_eq!(derived.last_updated, data.last_updated);
    }
}
