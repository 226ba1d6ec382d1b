use std::io::Write;

use super::domain::ScoredRecord;
use super::questionnaire::Questionnaire;

/// Write one row per submission: index, stored score, classification, then one column per
/// question in questionnaire order. Multi-choice answers are joined with "; ".
pub fn write_history_csv<W: Write>(
    writer: W,
    questionnaire: &Questionnaire,
    records: &[ScoredRecord],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![
        "index".to_string(),
        "score".to_string(),
        "classification".to_string(),
    ];
    header.extend(questionnaire.questions().iter().map(|q| q.id.to_string()));
    csv_writer.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        let classification = questionnaire.classification().classify(record.score);
        let mut row = vec![
            index.to_string(),
            record.score.to_string(),
            classification.label.to_string(),
        ];
        row.extend(questionnaire.questions().iter().map(|question| {
            record
                .responses
                .get(question.id)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::{Answer, AssessmentCatalog, Domain, ResponseSet};

    #[test]
    fn rows_follow_questionnaire_order() {
        let catalog = AssessmentCatalog::standard();
        let questionnaire = catalog.questionnaire(Domain::Awareness);
        let records = vec![ScoredRecord {
            score: 40,
            responses: ResponseSet::new()
                .with("q1", Answer::choice("Yes"))
                .with("q2", Answer::Scale(5))
                .with(
                    "q5",
                    Answer::choices([
                        "A. Adjust tasks to match energy levels.",
                        "B. Take a short break or recharge.",
                    ]),
                ),
        }];

        let mut buffer = Vec::new();
        write_history_csv(&mut buffer, questionnaire, &records).expect("writes csv");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("index,score,classification,q1,q2,q3,q4,q5,q6,q7,q8,q9")
        );
        assert_eq!(
            lines.next(),
            Some(
                "0,40,Peak Performance,Yes,5,,,\
                 A. Adjust tasks to match energy levels.; B. Take a short break or recharge.,,,,"
            )
        );
        assert_eq!(lines.next(), None);
    }
}
