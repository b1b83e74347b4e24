//! # Academic Standing
//!
//! Two independent threshold ladders over a CGPA:
//!
//! - [`classify`] → [`HonorTier`] (Summa Cum Laude … Academic Probation)
//! - [`letter_from_gpa`] → display letter (A, A-, B+ … F)
//!
//! The display ladder is unrelated to the percentage threshold table in
//! [`crate::scale`]; it only labels an average for presentation.
//!
//! ## Example
//!
//! ```rust
//! use grade_core::calculations::standing::{classify, letter_from_gpa, HonorTier};
//!
//! assert_eq!(classify(3.5), HonorTier::SummaCumLaude);
//! assert_eq!(classify(1.9), HonorTier::AcademicProbation);
//! assert_eq!(letter_from_gpa(3.4), "A-");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scale::GradePoint;

/// Honors classification, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HonorTier {
    /// CGPA ≥ 3.5
    SummaCumLaude,
    /// CGPA ≥ 3.2
    MagnaCumLaude,
    /// CGPA ≥ 2.8
    CumLaude,
    /// CGPA ≥ 2.0
    GoodStanding,
    /// CGPA < 2.0
    AcademicProbation,
}

impl HonorTier {
    /// All tiers with their inclusive lower bound, highest first
    pub const LADDER: [(GradePoint, HonorTier); 4] = [
        (3.5, HonorTier::SummaCumLaude),
        (3.2, HonorTier::MagnaCumLaude),
        (2.8, HonorTier::CumLaude),
        (2.0, HonorTier::GoodStanding),
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            HonorTier::SummaCumLaude => "Summa Cum Laude",
            HonorTier::MagnaCumLaude => "Magna Cum Laude",
            HonorTier::CumLaude => "Cum Laude",
            HonorTier::GoodStanding => "Good Standing",
            HonorTier::AcademicProbation => "Academic Probation",
        }
    }

    /// Whether this tier carries a Latin honors distinction
    pub fn is_honors(&self) -> bool {
        matches!(
            self,
            HonorTier::SummaCumLaude | HonorTier::MagnaCumLaude | HonorTier::CumLaude
        )
    }
}

impl fmt::Display for HonorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a CGPA. Lower bounds are inclusive.
pub fn classify(cgpa: GradePoint) -> HonorTier {
    HonorTier::LADDER
        .iter()
        .find(|(min, _)| cgpa >= *min)
        .map(|(_, tier)| *tier)
        .unwrap_or(HonorTier::AcademicProbation)
}

const DISPLAY_LADDER: [(GradePoint, &str); 9] = [
    (3.7, "A"),
    (3.3, "A-"),
    (3.0, "B+"),
    (2.7, "B"),
    (2.3, "B-"),
    (2.0, "C+"),
    (1.7, "C"),
    (1.3, "C-"),
    (1.0, "D"),
];

/// Display letter for an average grade point.
pub fn letter_from_gpa(gpa: GradePoint) -> &'static str {
    DISPLAY_LADDER
        .iter()
        .find(|(min, _)| gpa >= *min)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}
