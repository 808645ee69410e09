//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - written to / reloaded from the account JSON file unchanged
//! - displayed directly in the TUI and CLI reports

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Total credits required for the program.
pub const CREDIT_TARGET: f64 = 20.0;

/// Total CR/NCR (pass/fail) option budget, in credits.
pub const CR_NCR_BUDGET: f64 = 2.0;

/// Byte offset of the term marker within a course identifier.
const TERM_MARKER_INDEX: usize = 6;

/// Course duration, derived from the identifier's term marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermLength {
    /// Half-term course (`H`), worth 0.5 credits.
    Half,
    /// Full-year course (`Y`), worth 1.0 credit.
    Year,
}

impl TermLength {
    pub fn credit_weight(self) -> f64 {
        match self {
            TermLength::Half => 0.5,
            TermLength::Year => 1.0,
        }
    }
}

/// A course identifier, e.g. `MATH01Y`.
///
/// The character at byte offset 6 is the term marker (`H` or `Y`). Identifiers
/// with any other marker (or shorter than 7 bytes) carry no credit weight and
/// are excluded from every aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Term length from the marker position, or `None` for unrecognized markers.
    pub fn term_length(&self) -> Option<TermLength> {
        match self.0.as_bytes().get(TERM_MARKER_INDEX) {
            Some(b'H') => Some(TermLength::Half),
            Some(b'Y') => Some(TermLength::Year),
            _ => None,
        }
    }

    /// Credit weight of this course (0.0 for unrecognized markers).
    pub fn credit_weight(&self) -> f64 {
        self.term_length().map_or(0.0, TermLength::credit_weight)
    }

    /// Strict identifier check, used when courses are entered interactively.
    ///
    /// Stored data is never validated this way: aggregation silently excludes
    /// malformed identifiers instead so that old files keep loading.
    pub fn validate(&self) -> Result<(), MalformedIdentifier> {
        match self.term_length() {
            Some(_) => Ok(()),
            None => Err(MalformedIdentifier { id: self.0.clone() }),
        }
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A course identifier without an `H`/`Y` term marker at offset 6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedIdentifier {
    pub id: String,
}

impl std::fmt::Display for MalformedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Malformed course identifier '{}': expected 'H' or 'Y' at position 7 (e.g. MATH01Y).",
            self.id
        )
    }
}

impl std::error::Error for MalformedIdentifier {}

/// Pass/fail marker for a course taken under the CR/NCR option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PassFailMark {
    /// Credit (passed).
    Cr,
    /// No credit (not passed).
    Ncr,
}

impl PassFailMark {
    pub fn display_name(self) -> &'static str {
        match self {
            PassFailMark::Cr => "CR",
            PassFailMark::Ncr => "NCR",
        }
    }
}

/// The value recorded for a course.
///
/// Serialized untagged so the account file keeps its flat schema: an
/// integer score, the string `"CR"`/`"NCR"`, or whatever else an old file
/// contains (`Other`, excluded from all computation but preserved on re-save).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseValue {
    Score(i64),
    PassFail(PassFailMark),
    Other(Value),
}

impl CourseValue {
    pub fn score(&self) -> Option<i64> {
        match self {
            CourseValue::Score(s) => Some(*s),
            _ => None,
        }
    }

    pub fn is_pass_fail(&self) -> bool {
        matches!(self, CourseValue::PassFail(_))
    }
}

impl std::fmt::Display for CourseValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseValue::Score(s) => write!(f, "{s}"),
            CourseValue::PassFail(mark) => f.write_str(mark.display_name()),
            CourseValue::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Courses keyed by identifier, in insertion order.
pub type CourseMap = IndexMap<CourseId, CourseValue>;

/// The single persisted account record.
///
/// Storage holds exactly one of these; registering or saving grades replaces
/// it wholesale. The password is stored and compared in plaintext (a known,
/// documented non-goal of this tool).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    pub password: String,
    pub courses: CourseMap,
}

/// GPA numerator/denominator plus the entries that were excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct GpaInputs {
    /// Sum of `grade_point * credit_weight` over scored courses.
    pub grade_points: f64,
    /// Sum of credit weights over scored courses.
    pub completed_credits: f64,
    /// Identifiers excluded from the GPA: out-of-range scores, malformed
    /// identifiers, and non-score non-CR/NCR values.
    pub excluded: Vec<CourseId>,
}

/// Progress toward the fixed credit target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditProgress {
    /// `CREDIT_TARGET - completed`; may go negative, never clamped.
    pub remaining: f64,
    pub completed: f64,
}

/// CR/NCR option usage against the fixed budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CrNcrUsage {
    /// `CR_NCR_BUDGET` minus the credit weight of every CR/NCR course; may go
    /// negative, never clamped.
    pub remaining: f64,
    /// CR/NCR course identifiers, in the order they appear in the map.
    pub used: Vec<CourseId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_marker_parsing() {
        assert_eq!(CourseId::from("MATH01Y").term_length(), Some(TermLength::Year));
        assert_eq!(CourseId::from("PHYS01H").term_length(), Some(TermLength::Half));
        assert_eq!(CourseId::from("PHYS01X").term_length(), None);
        assert_eq!(CourseId::from("SHORT").term_length(), None);
        assert_eq!(CourseId::from("MATH01Y").credit_weight(), 1.0);
        assert_eq!(CourseId::from("PHYS01H").credit_weight(), 0.5);
        assert_eq!(CourseId::from("SHORT").credit_weight(), 0.0);
    }

    #[test]
    fn validate_rejects_bad_markers() {
        assert!(CourseId::from("MATH01Y").validate().is_ok());
        assert!(CourseId::from("MATH01").validate().is_err());
        assert!(CourseId::from("MATH01Q").validate().is_err());
    }

    #[test]
    fn course_value_untagged_serde() {
        let json = r#"{"MATH01Y": 95, "MUS01H": "CR", "GYM01Y": "NCR", "ODD01H": true}"#;
        let map: CourseMap = serde_json::from_str(json).unwrap();

        assert_eq!(map[&CourseId::from("MATH01Y")], CourseValue::Score(95));
        assert_eq!(
            map[&CourseId::from("MUS01H")],
            CourseValue::PassFail(PassFailMark::Cr)
        );
        assert_eq!(
            map[&CourseId::from("GYM01Y")],
            CourseValue::PassFail(PassFailMark::Ncr)
        );
        assert!(matches!(
            map[&CourseId::from("ODD01H")],
            CourseValue::Other(_)
        ));

        // Round-trips back to the same JSON values, in insertion order.
        let back = serde_json::to_string(&map).unwrap();
        assert_eq!(
            back,
            r#"{"MATH01Y":95,"MUS01H":"CR","GYM01Y":"NCR","ODD01H":true}"#
        );
    }
}
