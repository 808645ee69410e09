//! Pure aggregation over a course map.
//!
//! Three independent computations, none of which mutate their input:
//!
//! - GPA inputs and the cumulative GPA derived from them
//! - remaining credits toward the fixed 20.0-credit target
//! - remaining CR/NCR (pass/fail) option budget
//!
//! Malformed entries (out-of-range scores, unrecognized term markers,
//! non-score non-CR/NCR values) are excluded from the sums rather than
//! reported as failures, so old account files keep loading. The excluded
//! identifiers are handed back for warning display.

use crate::domain::{
    CourseMap, CourseValue, CrNcrUsage, CreditProgress, GpaInputs, CR_NCR_BUDGET, CREDIT_TARGET,
};
use crate::grade;

/// Minimum score that earns credit toward the program target.
const PASSING_SCORE: i64 = 50;

/// Compute the GPA numerator and denominator.
///
/// Each integer-scored course contributes its credit weight to
/// `completed_credits` and `grade_point * weight` to `grade_points`. CR/NCR
/// courses never enter the GPA; they are intentional exclusions, not warnings.
pub fn gpa_inputs(courses: &CourseMap) -> GpaInputs {
    let mut grade_points = 0.0;
    let mut completed_credits = 0.0;
    let mut excluded = Vec::new();

    for (id, value) in courses {
        let CourseValue::Score(score) = value else {
            if matches!(value, CourseValue::Other(_)) {
                excluded.push(id.clone());
            }
            continue;
        };
        let Ok(band) = grade::map_score(*score) else {
            excluded.push(id.clone());
            continue;
        };
        let Some(term) = id.term_length() else {
            excluded.push(id.clone());
            continue;
        };

        let weight = term.credit_weight();
        completed_credits += weight;
        grade_points += band.points * weight;
    }

    GpaInputs {
        grade_points,
        completed_credits,
        excluded,
    }
}

/// Cumulative GPA, rounded to 2 decimal places; 0.0 when no credits count.
pub fn cgpa(courses: &CourseMap) -> f64 {
    let inputs = gpa_inputs(courses);
    if inputs.completed_credits == 0.0 {
        0.0
    } else {
        round2(inputs.grade_points / inputs.completed_credits)
    }
}

/// Credits completed (score >= 50) and credits still needed for the target.
///
/// Pass/fail entries and malformed identifiers contribute nothing; the
/// remainder is not clamped and goes negative past the target.
pub fn remaining_credit(courses: &CourseMap) -> CreditProgress {
    let mut completed = 0.0;

    for (id, value) in courses {
        let Some(score) = value.score() else {
            continue;
        };
        if grade::map_score(score).is_err() || score < PASSING_SCORE {
            continue;
        }
        completed += id.credit_weight();
    }

    CreditProgress {
        remaining: CREDIT_TARGET - completed,
        completed,
    }
}

/// CR/NCR budget left and the courses that spent it, in map order.
///
/// A CR/NCR course with an unrecognized term marker spends no budget and is
/// not listed.
pub fn cr_ncr_usage(courses: &CourseMap) -> CrNcrUsage {
    let mut remaining = CR_NCR_BUDGET;
    let mut used = Vec::new();

    for (id, value) in courses {
        if !value.is_pass_fail() {
            continue;
        }
        let Some(term) = id.term_length() else {
            continue;
        };
        remaining -= term.credit_weight();
        used.push(id.clone());
    }

    CrNcrUsage { remaining, used }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseId, PassFailMark};

    fn courses(entries: &[(&str, CourseValue)]) -> CourseMap {
        entries
            .iter()
            .map(|(id, value)| (CourseId::from(*id), value.clone()))
            .collect()
    }

    #[test]
    fn cgpa_empty_map_is_zero() {
        assert_eq!(cgpa(&CourseMap::new()), 0.0);
    }

    #[test]
    fn cgpa_weights_by_term_length() {
        // 95 -> A+ (4.0) at weight 1.0, 70 -> B- (2.7) at weight 0.5:
        // (4.0 + 1.35) / 1.5 = 3.566... -> 3.57
        let map = courses(&[
            ("MATH01Y", CourseValue::Score(95)),
            ("PHYS01H", CourseValue::Score(70)),
        ]);
        assert_eq!(cgpa(&map), 3.57);

        let inputs = gpa_inputs(&map);
        assert!((inputs.grade_points - 5.35).abs() < 1e-9);
        assert!((inputs.completed_credits - 1.5).abs() < 1e-9);
        assert!(inputs.excluded.is_empty());
    }

    #[test]
    fn gpa_excludes_pass_fail_and_malformed() {
        let map = courses(&[
            ("MATH01Y", CourseValue::Score(95)),
            ("MUS01H", CourseValue::PassFail(PassFailMark::Cr)),
            ("BAD01", CourseValue::Score(80)),
            ("CHEM01Y", CourseValue::Score(150)),
            ("ODD01H", CourseValue::Other(serde_json::json!(82.5))),
        ]);

        let inputs = gpa_inputs(&map);
        assert!((inputs.grade_points - 4.0).abs() < 1e-9);
        assert!((inputs.completed_credits - 1.0).abs() < 1e-9);
        // CR/NCR is an intentional exclusion and is not flagged.
        assert_eq!(
            inputs.excluded,
            vec![
                CourseId::from("BAD01"),
                CourseId::from("CHEM01Y"),
                CourseId::from("ODD01H"),
            ]
        );
        assert_eq!(cgpa(&map), 4.0);
    }

    #[test]
    fn remaining_credit_requires_passing_score() {
        let map = courses(&[
            ("MATH01Y", CourseValue::Score(95)),
            ("ART01H", CourseValue::Score(40)),
        ]);
        let progress = remaining_credit(&map);
        assert_eq!(progress.completed, 1.0);
        assert_eq!(progress.remaining, 19.0);
    }

    #[test]
    fn remaining_credit_ignores_pass_fail_and_malformed() {
        let map = courses(&[
            ("MATH01H", CourseValue::Score(50)),
            ("MUS01Y", CourseValue::PassFail(PassFailMark::Cr)),
            ("BAD01", CourseValue::Score(90)),
            ("HUGE01Y", CourseValue::Score(101)),
        ]);
        let progress = remaining_credit(&map);
        assert_eq!(progress.completed, 0.5);
        assert_eq!(progress.remaining, 19.5);
    }

    #[test]
    fn cr_ncr_usage_in_insertion_order() {
        let map = courses(&[
            ("MUS01H", CourseValue::PassFail(PassFailMark::Cr)),
            ("GYM01Y", CourseValue::PassFail(PassFailMark::Ncr)),
        ]);
        let usage = cr_ncr_usage(&map);
        assert_eq!(usage.remaining, 0.5);
        assert_eq!(
            usage.used,
            vec![CourseId::from("MUS01H"), CourseId::from("GYM01Y")]
        );
    }

    #[test]
    fn cr_ncr_budget_can_go_negative() {
        let map = courses(&[
            ("MUS01Y", CourseValue::PassFail(PassFailMark::Cr)),
            ("GYM01Y", CourseValue::PassFail(PassFailMark::Ncr)),
            ("ART01Y", CourseValue::PassFail(PassFailMark::Cr)),
        ]);
        let usage = cr_ncr_usage(&map);
        assert_eq!(usage.remaining, -1.0);
        assert_eq!(usage.used.len(), 3);
    }

    #[test]
    fn cr_ncr_skips_malformed_identifiers() {
        let map = courses(&[
            ("MUS01H", CourseValue::PassFail(PassFailMark::Cr)),
            ("BAD", CourseValue::PassFail(PassFailMark::Ncr)),
        ]);
        let usage = cr_ncr_usage(&map);
        assert_eq!(usage.remaining, 1.5);
        assert_eq!(usage.used, vec![CourseId::from("MUS01H")]);
    }
}
