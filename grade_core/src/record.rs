//! # Record Data Structures
//!
//! `StoredData` is the root container for a student's marks. It is the unit
//! of export/import and serializes to human-readable JSON with camelCase keys.
//!
//! ## Structure
//!
//! ```text
//! StoredData
//! ├── semesters: Vec<Semester> (ordered)
//! │   └── courses: Vec<Course> (ordered; marks optional)
//! ├── lastUpdated: RFC 3339 timestamp
//! └── gradingSystem: letter → default grade point (display legend only)
//! ```
//!
//! Derived fields (`percentage`, `grade`, `gradePoints`, `sgpa`) are optional
//! and only filled in by [`crate::calculations::with_derived`].
//!
//! ## Example
//!
//! ```rust
//! use grade_core::record::{Course, Semester, StoredData};
//!
//! let mut data = StoredData::new();
//! let fall = data.add_semester(Semester::new("Fall 2024"));
//! data.add_course(&fall, Course::new("Calculus I", 3).with_marks(85.0, 100.0))?;
//!
//! let json = serde_json::to_string_pretty(&data).unwrap();
//! assert!(json.contains("\"creditHours\": 3"));
//! # Ok::<(), grade_core::errors::GradeError>(())
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GradeError, GradeResult};
use crate::scale::{GradePoint, LetterGrade, Percentage};

/// Letter → default grade point legend.
///
/// Stored and exported with the record but never consulted by the
/// aggregation functions, which always use the threshold table.
pub type GradingSystem = BTreeMap<String, GradePoint>;

/// Legend written into new records: A=4, B=3, C=2, D=1, F=0.
pub static DEFAULT_GRADING_SYSTEM: Lazy<GradingSystem> = Lazy::new(|| {
    LetterGrade::ALL
        .iter()
        .zip([4.0, 3.0, 2.0, 1.0, 0.0])
        .map(|(letter, point)| (letter.code().to_string(), point))
        .collect()
});

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A single course and its (optional) marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,

    /// Display name (e.g., "Data Structures")
    pub name: String,

    /// Weight of this course in every average
    pub credit_hours: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obtained_marks: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<f64>,

    /// Derived: whole-number percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Percentage>,

    /// Derived: letter from the threshold table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<LetterGrade>,

    /// Derived: grade point from the threshold table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_points: Option<GradePoint>,
}

impl Course {
    /// Create a course without marks. A fresh UUID is used as the id.
    pub fn new(name: impl Into<String>, credit_hours: u32) -> Self {
        Course {
            id: new_id(),
            name: name.into(),
            credit_hours,
            obtained_marks: None,
            total_marks: None,
            percentage: None,
            grade: None,
            grade_points: None,
        }
    }

    /// Builder: set obtained and total marks.
    pub fn with_marks(mut self, obtained_marks: f64, total_marks: f64) -> Self {
        self.obtained_marks = Some(obtained_marks);
        self.total_marks = Some(total_marks);
        self
    }

    /// `(obtained, total)` when both are present and total is positive.
    ///
    /// Only such courses count toward SGPA/CGPA.
    pub fn valid_marks(&self) -> Option<(f64, f64)> {
        match (self.obtained_marks, self.total_marks) {
            (Some(obtained), Some(total)) if total > 0.0 => Some((obtained, total)),
            _ => None,
        }
    }

    /// Whether this course counts toward SGPA/CGPA
    pub fn is_graded(&self) -> bool {
        self.valid_marks().is_some()
    }

    /// Validate input fields.
    ///
    /// Missing marks are allowed; present marks must be finite and
    /// non-negative. A total of 0 is kept: such a course never counts
    /// toward SGPA/CGPA but stays in its semester.
    pub fn validate(&self) -> GradeResult<()> {
        if self.credit_hours == 0 {
            return Err(GradeError::invalid_input(
                "credit_hours",
                self.credit_hours.to_string(),
                format!("Credit hours for '{}' must be positive", self.name),
            ));
        }
        if let Some(obtained) = self.obtained_marks {
            if !obtained.is_finite() || obtained < 0.0 {
                return Err(GradeError::invalid_input(
                    "obtained_marks",
                    obtained.to_string(),
                    format!("Obtained marks for '{}' cannot be negative", self.name),
                ));
            }
        }
        if let Some(total) = self.total_marks {
            if !total.is_finite() || total < 0.0 {
                return Err(GradeError::invalid_input(
                    "total_marks",
                    total.to_string(),
                    format!("Total marks for '{}' cannot be negative", self.name),
                ));
            }
        }
        Ok(())
    }
}

/// One semester: an ordered list of courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,

    /// Display name (e.g., "Fall 2024")
    pub name: String,

    #[serde(default)]
    pub courses: Vec<Course>,

    /// Derived: `None` when no course has valid marks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sgpa: Option<GradePoint>,
}

impl Semester {
    /// Create an empty semester. A fresh UUID is used as the id.
    pub fn new(name: impl Into<String>) -> Self {
        Semester {
            id: new_id(),
            name: name.into(),
            courses: Vec::new(),
            sgpa: None,
        }
    }

    /// Builder: append a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Find a course by id or by name (case-insensitive).
    pub fn course(&self, key: &str) -> Option<&Course> {
        self.courses
            .iter()
            .find(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
    }

    fn course_index(&self, key: &str) -> Option<usize> {
        self.courses
            .iter()
            .position(|c| c.id == key || c.name.eq_ignore_ascii_case(key))
    }
}

/// Root record container, the unit of export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredData {
    #[serde(default)]
    pub semesters: Vec<Semester>,

    /// When the record was last edited
    pub last_updated: DateTime<Utc>,

    /// Display legend, see [`GradingSystem`]
    #[serde(default = "default_grading_system")]
    pub grading_system: GradingSystem,
}

fn default_grading_system() -> GradingSystem {
    DEFAULT_GRADING_SYSTEM.clone()
}

impl StoredData {
    /// Create an empty record with the default legend.
    pub fn new() -> Self {
        StoredData {
            semesters: Vec::new(),
            last_updated: Utc::now(),
            grading_system: default_grading_system(),
        }
    }

    /// Update the last-updated timestamp.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Append a semester. Returns its id.
    pub fn add_semester(&mut self, semester: Semester) -> String {
        let id = semester.id.clone();
        self.semesters.push(semester);
        self.touch();
        id
    }

    /// Remove a semester by id or name.
    pub fn remove_semester(&mut self, key: &str) -> GradeResult<Semester> {
        let index = self
            .semester_index(key)
            .ok_or_else(|| GradeError::not_found("Semester", key))?;
        self.touch();
        Ok(self.semesters.remove(index))
    }

    /// Find a semester by id or by name (case-insensitive).
    pub fn semester(&self, key: &str) -> Option<&Semester> {
        self.semester_index(key).map(|i| &self.semesters[i])
    }

    fn semester_index(&self, key: &str) -> Option<usize> {
        self.semesters
            .iter()
            .position(|s| s.id == key || s.name.eq_ignore_ascii_case(key))
    }

    /// Append a course to a semester (by id or name). Returns the course id.
    pub fn add_course(&mut self, semester_key: &str, course: Course) -> GradeResult<String> {
        course.validate()?;
        let index = self
            .semester_index(semester_key)
            .ok_or_else(|| GradeError::not_found("Semester", semester_key))?;
        let id = course.id.clone();
        self.semesters[index].courses.push(course);
        self.touch();
        Ok(id)
    }

    /// Remove a course (by id or name) from a semester (by id or name).
    pub fn remove_course(&mut self, semester_key: &str, course_key: &str) -> GradeResult<Course> {
        let index = self
            .semester_index(semester_key)
            .ok_or_else(|| GradeError::not_found("Semester", semester_key))?;
        let semester = &mut self.semesters[index];
        let course_index = semester
            .course_index(course_key)
            .ok_or_else(|| GradeError::not_found("Course", course_key))?;
        let course = semester.courses.remove(course_index);
        self.touch();
        Ok(course)
    }

    /// Total number of courses across all semesters
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }

    /// Validate every course in the record.
    pub fn validate(&self) -> GradeResult<()> {
        self.semesters
            .iter()
            .flat_map(|s| s.courses.iter())
            .try_for_each(Course::validate)
    }
}

impl Default for StoredData {
    fn default() -> Self {
        StoredData::new()
    }
}
