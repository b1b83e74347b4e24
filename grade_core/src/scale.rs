//! # Grade Scale
//!
//! Percentage → (letter grade, grade point) conversion via a fixed threshold
//! table. The table is data, not a formula: each row is a minimum percentage,
//! the grade point it earns, and the letter shown for it.
//!
//! ## Standard Scale
//!
//! | Percentage | Grade point | Letter |
//! |-----------|-------------|--------|
//! | 80+       | 4.00        | A      |
//! | 65 – 79   | 3.00 – 3.94 | B      |
//! | 50 – 64   | 2.00 – 2.93 | C      |
//! | 40 – 49   | 1.00 – 1.90 | D      |
//! | 0 – 39    | 0.00        | F      |
//!
//! Lookup is a linear scan in descending threshold order, first match wins.
//!
//! ## Example
//!
//! ```rust
//! use grade_core::scale::{grade_from_percentage, percentage_of, LetterGrade};
//!
//! let pct = percentage_of(79.0, 100.0);
//! let grade = grade_from_percentage(pct);
//! assert_eq!(grade.letter, LetterGrade::B);
//! assert_eq!(grade.grade_point, 3.94);
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{GradeError, GradeResult};

/// Whole-number percentage produced by [`percentage_of`].
pub type Percentage = u32;

/// Grade point on the 0.0 – 4.0 scale.
pub type GradePoint = f64;

/// Highest grade point any course can earn.
pub const MAX_GRADE_POINT: GradePoint = 4.0;

/// Letter grade assigned by the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// All letters, best first
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Single-letter code used in JSON and the grading legend
    pub fn code(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// Whether this letter is a passing grade
    pub fn is_passing(&self) -> bool {
        !matches!(self, LetterGrade::F)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One row of the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeScaleEntry {
    /// Minimum percentage (inclusive) for this row
    pub min_percentage: Percentage,
    /// Grade point earned
    pub grade_point: GradePoint,
    /// Letter shown for this row
    pub letter_grade: LetterGrade,
}

impl GradeScaleEntry {
    pub const fn new(min_percentage: Percentage, grade_point: GradePoint, letter_grade: LetterGrade) -> Self {
        GradeScaleEntry {
            min_percentage,
            grade_point,
            letter_grade,
        }
    }
}

/// Letter and grade point for one percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub letter: LetterGrade,
    pub grade_point: GradePoint,
}

impl Grade {
    /// Result for anything below the lowest passing threshold
    pub const FAILING: Grade = Grade {
        letter: LetterGrade::F,
        grade_point: 0.0,
    };
}

impl From<&GradeScaleEntry> for Grade {
    fn from(entry: &GradeScaleEntry) -> Self {
        Grade {
            letter: entry.letter_grade,
            grade_point: entry.grade_point,
        }
    }
}

use LetterGrade::{A, B, C, D, F};

/// The standard table: 41 thresholds from 80 down to 40 plus the 0 catch-all,
/// strictly descending.
pub static STANDARD_SCALE: [GradeScaleEntry; 42] = [
    GradeScaleEntry::new(80, 4.00, A),
    GradeScaleEntry::new(79, 3.94, B),
    GradeScaleEntry::new(78, 3.87, B),
    GradeScaleEntry::new(77, 3.80, B),
    GradeScaleEntry::new(76, 3.73, B),
    GradeScaleEntry::new(75, 3.67, B),
    GradeScaleEntry::new(74, 3.60, B),
    GradeScaleEntry::new(73, 3.53, B),
    GradeScaleEntry::new(72, 3.47, B),
    GradeScaleEntry::new(71, 3.40, B),
    GradeScaleEntry::new(70, 3.33, B),
    GradeScaleEntry::new(69, 3.27, B),
    GradeScaleEntry::new(68, 3.20, B),
    GradeScaleEntry::new(67, 3.13, B),
    GradeScaleEntry::new(66, 3.07, B),
    GradeScaleEntry::new(65, 3.00, B),
    GradeScaleEntry::new(64, 2.93, C),
    GradeScaleEntry::new(63, 2.87, C),
    GradeScaleEntry::new(62, 2.76, C),
    GradeScaleEntry::new(61, 2.70, C),
    GradeScaleEntry::new(60, 2.64, C),
    GradeScaleEntry::new(59, 2.57, C),
    GradeScaleEntry::new(58, 2.50, C),
    GradeScaleEntry::new(57, 2.43, C),
    GradeScaleEntry::new(56, 2.36, C),
    GradeScaleEntry::new(55, 2.30, C),
    GradeScaleEntry::new(54, 2.24, C),
    GradeScaleEntry::new(53, 2.18, C),
    GradeScaleEntry::new(52, 2.12, C),
    GradeScaleEntry::new(51, 2.06, C),
    GradeScaleEntry::new(50, 2.00, C),
    GradeScaleEntry::new(49, 1.90, D),
    GradeScaleEntry::new(48, 1.80, D),
    GradeScaleEntry::new(47, 1.70, D),
    GradeScaleEntry::new(46, 1.60, D),
    GradeScaleEntry::new(45, 1.50, D),
    GradeScaleEntry::new(44, 1.40, D),
    GradeScaleEntry::new(43, 1.30, D),
    GradeScaleEntry::new(42, 1.20, D),
    GradeScaleEntry::new(41, 1.10, D),
    GradeScaleEntry::new(40, 1.00, D),
    GradeScaleEntry::new(0, 0.00, F),
];

/// A validated threshold table.
///
/// [`GradeScale::standard`] borrows [`STANDARD_SCALE`]; custom tables go
/// through [`GradeScale::new`], which enforces the ordering and catch-all
/// invariants so [`GradeScale::lookup`] always matches.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    entries: Cow<'static, [GradeScaleEntry]>,
}

impl GradeScale {
    /// The standard 42-row scale
    pub fn standard() -> Self {
        GradeScale {
            entries: Cow::Borrowed(&STANDARD_SCALE),
        }
    }

    /// Build a custom scale.
    ///
    /// Rows must be strictly descending by threshold (at most 100), grade
    /// points must lie within [0, 4] and never increase down the table, and
    /// the last row must have a 0 threshold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grade_core::scale::{GradeScale, GradeScaleEntry, LetterGrade};
    ///
    /// let pass_fail = GradeScale::new(vec![
    ///     GradeScaleEntry::new(50, 4.0, LetterGrade::A),
    ///     GradeScaleEntry::new(0, 0.0, LetterGrade::F),
    /// ])?;
    /// assert_eq!(pass_fail.lookup(50).grade_point, 4.0);
    ///
    /// // Missing 0 catch-all
    /// assert!(GradeScale::new(vec![GradeScaleEntry::new(50, 4.0, LetterGrade::A)]).is_err());
    /// # Ok::<(), grade_core::errors::GradeError>(())
    /// ```
    pub fn new(entries: Vec<GradeScaleEntry>) -> GradeResult<Self> {
        validate_entries(&entries)?;
        Ok(GradeScale {
            entries: Cow::Owned(entries),
        })
    }

    /// Rows in descending threshold order
    pub fn entries(&self) -> &[GradeScaleEntry] {
        &self.entries
    }

    /// Highest threshold in the table; anything at or above maps to the top row
    pub fn max_threshold(&self) -> Percentage {
        self.entries.first().map(|e| e.min_percentage).unwrap_or(0)
    }

    /// Find the grade for a percentage: first row whose threshold is ≤ `percentage`.
    pub fn lookup(&self, percentage: Percentage) -> Grade {
        self.entries
            .iter()
            .find(|entry| percentage >= entry.min_percentage)
            .map(Grade::from)
            .unwrap_or(Grade::FAILING)
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        GradeScale::standard()
    }
}

fn validate_entries(entries: &[GradeScaleEntry]) -> GradeResult<()> {
    let last = entries
        .last()
        .ok_or_else(|| GradeError::invalid_scale("Scale must have at least one row"))?;

    if last.min_percentage != 0 {
        return Err(GradeError::invalid_scale(format!(
            "Last row must have a 0 threshold, found {}",
            last.min_percentage
        )));
    }

    for entry in entries {
        if entry.min_percentage > 100 {
            return Err(GradeError::invalid_scale(format!(
                "Threshold {} exceeds 100",
                entry.min_percentage
            )));
        }
        if !entry.grade_point.is_finite() || !(0.0..=MAX_GRADE_POINT).contains(&entry.grade_point) {
            return Err(GradeError::invalid_scale(format!(
                "Grade point {} at threshold {} is outside 0.0 - 4.0",
                entry.grade_point, entry.min_percentage
            )));
        }
    }

    for pair in entries.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        if lower.min_percentage >= upper.min_percentage {
            return Err(GradeError::invalid_scale(format!(
                "Thresholds must be strictly descending: {} is followed by {}",
                upper.min_percentage, lower.min_percentage
            )));
        }
        if lower.grade_point > upper.grade_point {
            return Err(GradeError::invalid_scale(format!(
                "Grade point rises from {} to {} as the threshold drops to {}",
                upper.grade_point, lower.grade_point, lower.min_percentage
            )));
        }
    }

    Ok(())
}

/// Convert marks to a whole-number percentage.
///
/// Returns 0 when `total_marks` is not positive. Otherwise rounds half up;
/// results above 100 are kept as-is.
///
/// # Example
///
/// ```rust
/// use grade_core::scale::percentage_of;
///
/// assert_eq!(percentage_of(85.0, 100.0), 85);
/// assert_eq!(percentage_of(0.0, 0.0), 0);
/// assert_eq!(percentage_of(110.0, 100.0), 110);
/// ```
pub fn percentage_of(obtained_marks: f64, total_marks: f64) -> Percentage {
    if total_marks.is_nan() || total_marks <= 0.0 {
        return 0;
    }
    let pct = (obtained_marks / total_marks * 100.0).round();
    if pct.is_finite() && pct > 0.0 {
        pct as Percentage
    } else {
        0
    }
}

/// Look up a percentage on the standard scale.
pub fn grade_from_percentage(percentage: Percentage) -> Grade {
    GradeScale::standard().lookup(percentage)
}
