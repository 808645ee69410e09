//! The fixed grade scale: 13 bands partitioning 0–100.
//!
//! A+ and A share the 4.0 grade point but occupy disjoint percentage ranges;
//! every other band has a distinct grade point. The table is ordered from the
//! highest band down so the first containing band wins.

/// One row of the grade scale: an inclusive percentage range mapped to a
/// letter grade and grade-point value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBand {
    pub letter: &'static str,
    pub points: f64,
    pub min: u8,
    pub max: u8,
}

/// The full scale, highest band first. The ranges are contiguous and cover
/// 0–100 with no gaps.
pub const GRADE_SCALE: [GradeBand; 13] = [
    GradeBand { letter: "A+", points: 4.0, min: 90, max: 100 },
    GradeBand { letter: "A", points: 4.0, min: 85, max: 89 },
    GradeBand { letter: "A-", points: 3.7, min: 80, max: 84 },
    GradeBand { letter: "B+", points: 3.3, min: 77, max: 79 },
    GradeBand { letter: "B", points: 3.0, min: 73, max: 76 },
    GradeBand { letter: "B-", points: 2.7, min: 70, max: 72 },
    GradeBand { letter: "C+", points: 2.3, min: 67, max: 69 },
    GradeBand { letter: "C", points: 2.0, min: 63, max: 66 },
    GradeBand { letter: "C-", points: 1.7, min: 60, max: 62 },
    GradeBand { letter: "D+", points: 1.3, min: 57, max: 59 },
    GradeBand { letter: "D", points: 1.0, min: 53, max: 56 },
    GradeBand { letter: "D-", points: 0.7, min: 50, max: 52 },
    GradeBand { letter: "F", points: 0.0, min: 0, max: 49 },
];

/// A score outside the 0–100 range covered by the scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidScore {
    pub score: i64,
}

impl std::fmt::Display for InvalidScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score {} is outside the 0-100 grade scale.", self.score)
    }
}

impl std::error::Error for InvalidScore {}

/// Map a raw score to its grade band.
///
/// Scores outside 0–100 have no band and return `InvalidScore`; callers that
/// aggregate stored data treat that as "exclude this course", never as a
/// failure.
pub fn map_score(score: i64) -> Result<&'static GradeBand, InvalidScore> {
    for band in &GRADE_SCALE {
        if (i64::from(band.min)..=i64::from(band.max)).contains(&score) {
            return Ok(band);
        }
    }
    Err(InvalidScore { score })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_0_to_100() {
        for score in 0..=100i64 {
            let containing = GRADE_SCALE
                .iter()
                .filter(|b| (i64::from(b.min)..=i64::from(b.max)).contains(&score))
                .count();
            assert_eq!(containing, 1, "score {score} must be in exactly one band");
        }
    }

    #[test]
    fn map_score_spot_checks() {
        assert_eq!(map_score(100).unwrap().letter, "A+");
        assert_eq!(map_score(90).unwrap().letter, "A+");
        assert_eq!(map_score(89).unwrap().letter, "A");
        assert_eq!(map_score(85).unwrap().points, 4.0);
        assert_eq!(map_score(70).unwrap().letter, "B-");
        assert_eq!(map_score(70).unwrap().points, 2.7);
        assert_eq!(map_score(50).unwrap().letter, "D-");
        assert_eq!(map_score(49).unwrap().letter, "F");
        assert_eq!(map_score(0).unwrap().points, 0.0);
    }

    #[test]
    fn out_of_range_scores_are_invalid() {
        assert_eq!(map_score(-1), Err(InvalidScore { score: -1 }));
        assert_eq!(map_score(101), Err(InvalidScore { score: 101 }));
        assert_eq!(map_score(1000), Err(InvalidScore { score: 1000 }));
    }
}
