use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::roster::StudentRecord;

/// Absence percentage above which a student fails regardless of grades.
pub const ABSENCE_LIMIT_PCT: f64 = 25.0;

/// Minimum test average for passing outright.
pub const PASSING_AVERAGE: f64 = 70.0;

/// Test average below which a student fails outright.
pub const FAILING_AVERAGE: f64 = 50.0;

/// Categorical outcome of grading a single student.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    /// Passed on test average alone.
    Aprovado,
    /// Failed by exceeding the absence limit; grades are not considered.
    ReprovadoPorFalta,
    /// Failed on test average.
    ReprovadoPorNota,
    /// Eligible for the final exam, with a computed score to reach.
    ExameFinal,
}

impl Display for Situation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Situation::Aprovado => "Aprovado",
            Situation::ReprovadoPorFalta => "Reprovado por Falta",
            Situation::ReprovadoPorNota => "Reprovado por Nota",
            Situation::ExameFinal => "Exame Final",
        };
        write!(f, "{label}")
    }
}

/// A student's computed standing plus the final-exam score, when one applies.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SituationResult {
    /// Categorical outcome for the student.
    pub situation:   Situation,
    /// Score to reach on the final exam; zero unless `situation` is
    /// [`Situation::ExameFinal`].
    pub final_grade: u32,
}

impl SituationResult {
    /// Builds a result that carries no final-exam score.
    fn plain(situation: Situation) -> Self {
        Self {
            situation,
            final_grade: 0,
        }
    }
}

/// Computes a student's situation from their absences and test scores.
///
/// Branches are evaluated in order; the first match wins. An absence rate
/// above [`ABSENCE_LIMIT_PCT`] fails the student before any grade is looked
/// at.
///
/// * `student`: parsed roster row for one student.
/// * `total_classes`: total number of classes in the course, from the sheet
///   header.
pub fn calculate_situation(student: &StudentRecord, total_classes: u32) -> SituationResult {
    let absence_rate = f64::from(student.absences) / f64::from(total_classes) * 100.0;
    if absence_rate > ABSENCE_LIMIT_PCT {
        return SituationResult::plain(Situation::ReprovadoPorFalta);
    }

    let average = f64::from(student.tests.iter().sum::<u32>()) / 3.0;
    if average >= PASSING_AVERAGE {
        return SituationResult::plain(Situation::Aprovado);
    }
    if average < FAILING_AVERAGE {
        return SituationResult::plain(Situation::ReprovadoPorNota);
    }

    // 50 <= average < 70, so the required score lands in (30, 50]. Rounding is
    // half-away-from-zero; integer sums divided by 3 never produce an exact .5.
    let naf = 100.0 - average;
    SituationResult {
        situation:   Situation::ExameFinal,
        final_grade: naf.round() as u32,
    }
}
