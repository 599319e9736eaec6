use pauta::grade::{Situation, StudentRecord, calculate_situation};

fn student(absences: u32, tests: [u32; 3]) -> StudentRecord {
    StudentRecord {
        id: "1".to_string(),
        name: "Aluno".to_string(),
        absences,
        tests,
    }
}

#[test]
fn fails_by_absence_regardless_of_scores() {
    // 20/60 = 33.3% > 25%: perfect scores cannot save the student.
    let result = calculate_situation(&student(20, [100, 100, 100]), 60);
    assert_eq!(result.situation, Situation::ReprovadoPorFalta);
    assert_eq!(result.final_grade, 0);
}

#[test]
fn absence_rate_at_exactly_the_limit_falls_through_to_grades() {
    // 15/60 = exactly 25%: only rates strictly above the limit fail.
    let result = calculate_situation(&student(15, [80, 75, 90]), 60);
    assert_eq!(result.situation, Situation::Aprovado);
}

#[test]
fn approves_high_average() {
    // Average 81.67.
    let result = calculate_situation(&student(5, [80, 75, 90]), 60);
    assert_eq!(result.situation, Situation::Aprovado);
    assert_eq!(result.final_grade, 0);
}

#[test]
fn approves_at_average_exactly_seventy() {
    let result = calculate_situation(&student(0, [70, 70, 70]), 60);
    assert_eq!(result.situation, Situation::Aprovado);
}

#[test]
fn fails_by_grade_below_fifty() {
    // Average 38.33.
    let result = calculate_situation(&student(5, [40, 45, 30]), 60);
    assert_eq!(result.situation, Situation::ReprovadoPorNota);
    assert_eq!(result.final_grade, 0);
}

#[test]
fn average_just_below_fifty_fails_by_grade() {
    // Sum 149, average 49.67.
    let result = calculate_situation(&student(0, [50, 50, 49]), 60);
    assert_eq!(result.situation, Situation::ReprovadoPorNota);
}

#[test]
fn final_exam_at_average_exactly_fifty() {
    let result = calculate_situation(&student(0, [50, 50, 50]), 60);
    assert_eq!(result.situation, Situation::ExameFinal);
    assert_eq!(result.final_grade, 50);
}

#[test]
fn final_exam_band_example() {
    // Average 60, required score 40.
    let result = calculate_situation(&student(5, [60, 55, 65]), 60);
    assert_eq!(result.situation, Situation::ExameFinal);
    assert_eq!(result.final_grade, 40);
}

#[test]
fn final_exam_score_rounds_up_from_two_thirds() {
    // Sum 181, average 60.33, required score 39.67 -> 40.
    let result = calculate_situation(&student(0, [61, 60, 60]), 60);
    assert_eq!(result.final_grade, 40);
}

#[test]
fn final_exam_score_rounds_down_from_one_third() {
    // Sum 182, average 60.67, required score 39.33 -> 39.
    let result = calculate_situation(&student(0, [61, 61, 60]), 60);
    assert_eq!(result.final_grade, 39);
}

#[test]
fn final_exam_scores_stay_within_band() {
    // Every sum whose average lands in [50, 70) must produce a required score
    // in [30, 50].
    for sum in 150u32..210 {
        let base = sum / 3;
        let tests = [base, base, sum - 2 * base];
        let result = calculate_situation(&student(0, tests), 60);
        assert_eq!(result.situation, Situation::ExameFinal, "sum {sum}");
        assert!(
            (30..=50).contains(&result.final_grade),
            "sum {sum} produced required score {}",
            result.final_grade
        );
    }
}

#[test]
fn absence_failure_wins_over_grade_failure() {
    // Both conditions hold; the absence branch is evaluated first.
    let result = calculate_situation(&student(30, [10, 10, 10]), 60);
    assert_eq!(result.situation, Situation::ReprovadoPorFalta);
}
