use pauta::grade::{CourseHeader, Roster, RosterError};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

fn base_rows() -> Vec<Vec<String>> {
    vec![
        row(&["Total de aulas: 60"]),
        row(&["Matricula", "Aluno", "Faltas", "P1", "P2", "P3"]),
        row(&["1", "Ana", "5", "80", "75", "90"]),
        row(&["2", "Bruno", "20", "60", "55", "65"]),
    ]
}

#[test]
fn parses_header_and_students() {
    let roster = Roster::from_rows(&base_rows()).expect("parse roster");
    assert_eq!(roster.header.total_classes, 60);
    assert_eq!(roster.students.len(), 2);
    assert_eq!(roster.students[0].name, "Ana");
    assert_eq!(roster.students[0].tests, [80, 75, 90]);
}

#[test]
fn parses_example_header_cell() {
    let header = CourseHeader::parse("Total de aulas: 60").expect("parse header");
    assert_eq!(header.total_classes, 60);
}

#[test]
fn preserves_student_order() {
    let mut rows = base_rows();
    rows.push(row(&["3", "Clara", "0", "50", "50", "50"]));
    let roster = Roster::from_rows(&rows).expect("parse roster");

    let ids: Vec<&str> = roster.students.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn ignores_trailing_columns() {
    let mut rows = base_rows();
    rows[2] = row(&["1", "Ana", "5", "80", "75", "90", "stale", "stale"]);
    let roster = Roster::from_rows(&rows).expect("parse roster");
    assert_eq!(roster.students[0].tests, [80, 75, 90]);
}

#[test]
fn empty_fetch_is_missing_header() {
    let err = Roster::from_rows(&[]).expect_err("reject empty range");
    assert!(matches!(err, RosterError::MissingHeader));
}

#[test]
fn header_without_separator_is_malformed() {
    let mut rows = base_rows();
    rows[0] = row(&["Total de aulas 60"]);
    let err = Roster::from_rows(&rows).expect_err("reject header");
    assert!(matches!(err, RosterError::MalformedHeader(_)));
}

#[test]
fn header_with_non_integer_suffix_is_malformed() {
    let mut rows = base_rows();
    rows[0] = row(&["Total de aulas: sessenta"]);
    let err = Roster::from_rows(&rows).expect_err("reject header");
    assert!(matches!(err, RosterError::MalformedHeader(_)));
}

#[test]
fn zero_total_classes_is_rejected() {
    let mut rows = base_rows();
    rows[0] = row(&["Total de aulas: 0"]);
    let err = Roster::from_rows(&rows).expect_err("reject header");
    assert!(matches!(err, RosterError::ZeroClasses));
}

#[test]
fn short_student_row_is_rejected_with_its_position() {
    let mut rows = base_rows();
    rows.push(row(&["3", "Clara", "0", "50"]));
    let err = Roster::from_rows(&rows).expect_err("reject short row");
    assert!(matches!(err, RosterError::TooFewColumns { row: 5, found: 4, .. }));
}

#[test]
fn non_numeric_absences_are_rejected() {
    let mut rows = base_rows();
    rows[3] = row(&["2", "Bruno", "muitas", "60", "55", "65"]);
    let err = Roster::from_rows(&rows).expect_err("reject absences");
    assert!(matches!(err, RosterError::InvalidNumber { field: "absences", .. }));
}

#[test]
fn non_numeric_score_is_rejected() {
    let mut rows = base_rows();
    rows[2] = row(&["1", "Ana", "5", "80", "setenta", "90"]);
    let err = Roster::from_rows(&rows).expect_err("reject score");
    assert!(matches!(err, RosterError::InvalidNumber { field: "test 2", .. }));
}

#[test]
fn score_above_scale_is_rejected() {
    let mut rows = base_rows();
    rows[2] = row(&["1", "Ana", "5", "80", "101", "90"]);
    let err = Roster::from_rows(&rows).expect_err("reject score");
    assert!(matches!(err, RosterError::ScoreOutOfRange { value: 101, .. }));
}

#[test]
fn only_header_rows_yield_empty_roster() {
    let rows = base_rows()[..2].to_vec();
    let roster = Roster::from_rows(&rows).expect("parse roster");
    assert!(roster.is_empty());
}
