//! # Required GPA Projection
//!
//! Solves for the average grade point needed over the remaining credit hours
//! to finish at a target CGPA:
//!
//! ```text
//! required = (target × (completed + remaining) − current × completed) / remaining
//! ```
//!
//! | Situation                          | Result        |
//! |------------------------------------|---------------|
//! | remaining ≤ 0                      | `None`        |
//! | required > 4.0 (unreachable)       | `None`        |
//! | required < 0 (target already met)  | `Some(0.0)`   |
//! | otherwise                          | `Some(required)` |
//!
//! "Unreachable" and "already met" must stay distinguishable, so the result
//! is never clamped to 4.0.
//!
//! ## Example
//!
//! ```rust
//! use grade_core::calculations::projection::required_gpa;
//!
//! // 60 hours at 3.0, want 3.25 after 20 more hours → need 4.0
//! assert_eq!(required_gpa(3.0, 60.0, 3.25, 20.0), Some(4.0));
//!
//! // Want 3.5 → would need 5.0
//! assert_eq!(required_gpa(3.0, 60.0, 3.5, 20.0), None);
//! ```

use crate::scale::{GradePoint, MAX_GRADE_POINT};

/// Grade point needed over `remaining_credit_hours` to reach `target_cgpa`.
///
/// See the module docs for the sentinel rules.
pub fn required_gpa(
    current_cgpa: GradePoint,
    completed_credit_hours: f64,
    target_cgpa: GradePoint,
    remaining_credit_hours: f64,
) -> Option<GradePoint> {
    if remaining_credit_hours.is_nan() || remaining_credit_hours <= 0.0 {
        return None;
    }

    let current_points = current_cgpa * completed_credit_hours;
    let target_points = target_cgpa * (completed_credit_hours + remaining_credit_hours);
    let required = (target_points - current_points) / remaining_credit_hours;

    if required.is_nan() || required > MAX_GRADE_POINT {
        return None;
    }

    Some(required.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_target() {
        // (3.5 × 80 − 3.0 × 60) / 20 = 5.0
        assert_eq!(required_gpa(3.0, 60.0, 3.5, 20.0), None);
    }

    #[test]
    fn test_target_already_met_floors_at_zero() {
        // (2.0 × 130 − 4.0 × 120) / 10 = -22
        assert_eq!(required_gpa(4.0, 120.0, 2.0, 10.0), Some(0.0));
        // (3.0 × 80 − 3.6 × 60) / 20 = 1.2
        let r = required_gpa(3.6, 60.0, 3.0, 20.0).unwrap();
        assert!((r - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_current_above_target_still_needs_points() {
        // (3.5 × 80 − 3.6 × 60) / 20 = 3.2: the remaining hours still have to
        // average 3.2 to keep the cumulative figure at 3.5
        let r = required_gpa(3.6, 60.0, 3.5, 20.0).unwrap();
        assert!((r - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_remaining_hours() {
        assert_eq!(required_gpa(3.0, 60.0, 3.0, 0.0), None);
        assert_eq!(required_gpa(3.0, 60.0, 1.0, -5.0), None);
        assert_eq!(required_gpa(0.0, 0.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_exactly_at_ceiling_is_reachable() {
        assert_eq!(required_gpa(3.0, 60.0, 3.25, 20.0), Some(4.0));
    }

    #[test]
    fn test_no_history() {
        // Nothing completed: required equals target
        let r = required_gpa(0.0, 0.0, 3.1, 15.0).unwrap();
        assert!((r - 3.1).abs() < 1e-9);
    }

    #[test]
    fn test_nan_inputs() {
        assert_eq!(required_gpa(f64::NAN, 60.0, 3.0, 20.0), None);
        assert_eq!(required_gpa(3.0, 60.0, 3.0, f64::NAN), None);
    }
}
