//! Formatted output for the four account actions.

use crate::aggregate;
use crate::domain::{CourseId, CourseMap, CourseValue};
use crate::grade;

/// Format the cumulative GPA summary.
pub fn format_cgpa(courses: &CourseMap) -> String {
    let inputs = aggregate::gpa_inputs(courses);
    let cgpa = aggregate::cgpa(courses);

    let mut out = String::new();
    out.push_str(&format!("Current CGPA is {cgpa:.2}\n"));
    out.push_str(&format!(
        "({:.2} grade points over {:.1} completed credits)\n",
        inputs.grade_points, inputs.completed_credits
    ));
    out.push_str(&format_exclusions(&inputs.excluded));
    out
}

/// Format progress toward the 20.0-credit target.
pub fn format_remaining_credit(courses: &CourseMap) -> String {
    let progress = aggregate::remaining_credit(courses);

    let mut out = String::new();
    out.push_str(&format!("Remaining credit is {:.1}\n", progress.remaining));
    out.push_str(&format!("Complete credit is {:.1}\n", progress.completed));
    out
}

/// Format CR/NCR option usage.
pub fn format_cr_ncr(courses: &CourseMap) -> String {
    let usage = aggregate::cr_ncr_usage(courses);
    let used: Vec<&str> = usage.used.iter().map(CourseId::as_str).collect();

    let mut out = String::new();
    out.push_str(&format!(
        "Remaining Credit/No Credit option is {:.1}\n",
        usage.remaining
    ));
    out.push_str(&format!(
        "You used Credit/No Credit option for [{}]\n",
        used.join(", ")
    ));
    out
}

/// Format the stored courses as an aligned table.
pub fn format_course_table(courses: &CourseMap) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>6} {:>7} {:>7} {:>7}\n",
        "course", "value", "letter", "points", "credit"
    ));
    out.push_str(&format!(
        "{:-<16} {:-<6} {:-<7} {:-<7} {:-<7}\n",
        "", "", "", "", ""
    ));

    for (id, value) in courses {
        let (letter, points) = match value {
            CourseValue::Score(score) => match grade::map_score(*score) {
                Ok(band) => (band.letter.to_string(), format!("{:.1}", band.points)),
                Err(_) => ("?".to_string(), "-".to_string()),
            },
            _ => ("-".to_string(), "-".to_string()),
        };

        out.push_str(&format!(
            "{:<16} {:>6} {:>7} {:>7} {:>7}\n",
            truncate(id.as_str(), 16),
            value.to_string(),
            letter,
            points,
            format!("{:.1}", id.credit_weight()),
        ));
    }

    out
}

fn format_exclusions(excluded: &[CourseId]) -> String {
    if excluded.is_empty() {
        return String::new();
    }
    let ids: Vec<&str> = excluded.iter().map(CourseId::as_str).collect();
    format!(
        "Warning: {} entr{} excluded from the GPA: [{}]\n",
        ids.len(),
        if ids.len() == 1 { "y" } else { "ies" },
        ids.join(", ")
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseValue, PassFailMark};

    fn sample() -> CourseMap {
        let mut courses = CourseMap::new();
        courses.insert(CourseId::from("MATH01Y"), CourseValue::Score(95));
        courses.insert(CourseId::from("PHYS01H"), CourseValue::Score(70));
        courses.insert(
            CourseId::from("MUS01H"),
            CourseValue::PassFail(PassFailMark::Cr),
        );
        courses
    }

    #[test]
    fn cgpa_report_text() {
        let out = format_cgpa(&sample());
        assert!(out.starts_with("Current CGPA is 3.57\n"));
        assert!(out.contains("(5.35 grade points over 1.5 completed credits)"));
        assert!(!out.contains("Warning"));
    }

    #[test]
    fn cgpa_report_warns_about_exclusions() {
        let mut courses = sample();
        courses.insert(CourseId::from("BAD01"), CourseValue::Score(80));

        let out = format_cgpa(&courses);
        assert!(out.contains("Warning: 1 entry excluded from the GPA: [BAD01]"));
    }

    #[test]
    fn remaining_credit_report_text() {
        let mut courses = CourseMap::new();
        courses.insert(CourseId::from("MATH01Y"), CourseValue::Score(95));
        courses.insert(CourseId::from("ART01H"), CourseValue::Score(40));

        let out = format_remaining_credit(&courses);
        assert_eq!(out, "Remaining credit is 19.0\nComplete credit is 1.0\n");
    }

    #[test]
    fn cr_ncr_report_lists_courses_in_order() {
        let mut courses = CourseMap::new();
        courses.insert(
            CourseId::from("MUS01H"),
            CourseValue::PassFail(PassFailMark::Cr),
        );
        courses.insert(
            CourseId::from("GYM01Y"),
            CourseValue::PassFail(PassFailMark::Ncr),
        );

        let out = format_cr_ncr(&courses);
        assert_eq!(
            out,
            "Remaining Credit/No Credit option is 0.5\n\
             You used Credit/No Credit option for [MUS01H, GYM01Y]\n"
        );
    }

    #[test]
    fn course_table_rows() {
        let out = format_course_table(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains("MATH01Y"));
        assert!(lines[2].contains("A+"));
        assert!(lines[4].contains("CR"));
    }
}
