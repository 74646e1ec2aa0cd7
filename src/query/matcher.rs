use crate::core::types::Student;
use crate::query::ast::{FindFilter, MarkOp, TextOp};

/// Absorbs float rounding in `Mark = x`
pub const MARK_TOLERANCE: f32 = 0.01;

impl FindFilter {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            FindFilter::Name(op, value) => matches_text(&student.name, *op, value),
            FindFilter::Programme(op, value) => matches_text(&student.programme, *op, value),
            FindFilter::Mark(op, value) => matches_mark(student.mark, *op, *value),
        }
    }
}

fn matches_text(field: &str, op: TextOp, value: &str) -> bool {
    let field = field.to_lowercase();
    let value = value.to_lowercase();
    match op {
        TextOp::Equals => field == value,
        TextOp::Contains => field.contains(&value),
    }
}

fn matches_mark(mark: f32, op: MarkOp, value: f32) -> bool {
    match op {
        MarkOp::Eq => mark >= value - MARK_TOLERANCE && mark <= value + MARK_TOLERANCE,
        MarkOp::Gt => mark > value,
        MarkOp::Lt => mark < value,
        MarkOp::Ge => mark >= value,
        MarkOp::Le => mark <= value,
    }
}

/// Records matching `filter`, in store order
pub fn filter_records<'a>(records: &'a [Student], filter: &FindFilter) -> Vec<&'a Student> {
    records.iter().filter(|s| filter.matches(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_marks(marks: &[f32]) -> Vec<Student> {
        marks
            .iter()
            .enumerate()
            .map(|(i, &m)| Student::new(100000 + i as u32, "N", "P", m))
            .collect()
    }

    #[test]
    fn mark_ge_is_inclusive() {
        let records = with_marks(&[84.99, 85.0, 85.01]);
        let hits = filter_records(&records, &FindFilter::Mark(MarkOp::Ge, 85.0));
        let marks: Vec<f32> = hits.iter().map(|s| s.mark).collect();
        assert_eq!(marks, vec![85.0, 85.01]);
    }

    #[test]
    fn mark_eq_uses_tolerance() {
        let records = with_marks(&[72.5, 72.505, 72.6]);
        let hits = filter_records(&records, &FindFilter::Mark(MarkOp::Eq, 72.5));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn text_ops_ignore_case() {
        let student = Student::new(100001, "Wang Li", "Computer Science", 50.0);
        assert!(FindFilter::Name(TextOp::Contains, "wang".into()).matches(&student));
        assert!(FindFilter::Name(TextOp::Equals, "WANG LI".into()).matches(&student));
        assert!(!FindFilter::Name(TextOp::Equals, "wang".into()).matches(&student));
        assert!(FindFilter::Programme(TextOp::Equals, "computer science".into()).matches(&student));
        assert!(!FindFilter::Programme(TextOp::Equals, "wang li".into()).matches(&student));
    }
}
