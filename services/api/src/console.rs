use std::io::{self, BufRead, Write};

use energyscan::assessments::{
    Answer, AssessmentOutcome, CompletedResponses, HistorySummary, InsightNote, QuestionKind,
    QuestionSpec, Questionnaire, ResponseAnalysis,
};
use energyscan::history::{AppendOutcome, HistoryLoad, StoreError};

pub(crate) fn render_questionnaire<W: Write>(
    questionnaire: &Questionnaire,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", questionnaire.title())?;
    writeln!(out, "{}", questionnaire.intro())?;

    let mut section = "";
    for question in questionnaire.questions() {
        if question.section != section {
            section = question.section;
            writeln!(out)?;
            writeln!(out, "{section}")?;
        }
        writeln!(out, "  {}. {}", question.id, question.prompt)?;
        render_answer_hint(question, out)?;
    }

    writeln!(out)?;
    writeln!(out, "Maximum score: {}", questionnaire.max_score())
}

fn render_answer_hint<W: Write>(question: &QuestionSpec, out: &mut W) -> io::Result<()> {
    match &question.kind {
        QuestionKind::SingleChoice { options } => {
            for option in options {
                writeln!(out, "       {}", option.value)?;
            }
        }
        QuestionKind::MultiChoice { options } => {
            writeln!(out, "       (choose any, separated by commas; blank for none)")?;
            for option in options {
                writeln!(out, "       {}", option.value)?;
            }
        }
        QuestionKind::Scale { min, max } => {
            writeln!(out, "       (a whole number from {min} to {max})")?;
        }
    }
    Ok(())
}

fn parse_answer(question: &QuestionSpec, line: &str) -> Result<Answer, String> {
    let line = line.trim();
    match &question.kind {
        QuestionKind::SingleChoice { .. } => question
            .resolve_option(line)
            .map(|option| Answer::choice(option.value))
            .ok_or_else(|| format!("'{line}' does not match any option")),
        QuestionKind::MultiChoice { .. } => {
            let mut values = Vec::new();
            for token in line.split(',').map(str::trim).filter(|token| !token.is_empty()) {
                let option = question
                    .resolve_option(token)
                    .ok_or_else(|| format!("'{token}' does not match any option"))?;
                values.push(option.value);
            }
            Ok(Answer::choices(values))
        }
        QuestionKind::Scale { .. } => line
            .parse::<i64>()
            .map(Answer::Scale)
            .map_err(|_| format!("'{line}' is not a whole number")),
    }
}

/// Ask every question in order, re-prompting until each answer is accepted.
pub(crate) fn prompt_responses<R: BufRead, W: Write>(
    questionnaire: &Questionnaire,
    input: &mut R,
    out: &mut W,
) -> io::Result<CompletedResponses> {
    writeln!(out, "{}", questionnaire.title())?;
    writeln!(out, "{}", questionnaire.intro())?;

    let mut collector = questionnaire.collector();
    let total = questionnaire.questions().len();

    for (position, question) in questionnaire.questions().iter().enumerate() {
        writeln!(out)?;
        writeln!(
            out,
            "[{}/{}] {}: {}",
            position + 1,
            total,
            question.section,
            question.prompt
        )?;
        render_answer_hint(question, out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input ended before every question was answered",
                ));
            }

            let recorded = parse_answer(question, &line).and_then(|answer| {
                collector
                    .record(question.id, answer)
                    .map_err(|err| err.to_string())
            });
            match recorded {
                Ok(()) => break,
                Err(message) => writeln!(out, "  {message}; please try again.")?,
            }
        }
    }

    collector
        .finish()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
}

pub(crate) fn render_outcome<W: Write>(outcome: &AssessmentOutcome, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} score: {} / {}",
        outcome.domain, outcome.total_score, outcome.max_score
    )?;
    writeln!(out, "Level: {}", outcome.classification.label)?;
    writeln!(out, "{}", outcome.classification.message)
}

pub(crate) fn render_persistence<W: Write>(persistence: &AppendOutcome, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", persistence.status_message())
}

pub(crate) fn render_history_table<W: Write>(
    questionnaire: &Questionnaire,
    load: &HistoryLoad,
    out: &mut W,
) -> io::Result<()> {
    if let Some(issue) = &load.issue {
        writeln!(out, "Warning: history could not be loaded: {issue}")?;
    }
    if load.records.is_empty() {
        return writeln!(out, "No {} submissions recorded yet.", questionnaire.domain());
    }

    writeln!(out, "{:>5}  {:>5}  classification", "index", "score")?;
    for (index, record) in load.records.iter().enumerate() {
        let classification = questionnaire.classification().classify(record.score);
        writeln!(
            out,
            "{:>5}  {:>5}  {}",
            index, record.score, classification.label
        )?;
    }
    Ok(())
}

fn render_notes<W: Write>(
    heading: &str,
    notes: &[InsightNote],
    empty: &str,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{heading}")?;
    if notes.is_empty() {
        return writeln!(out, "  {empty}");
    }
    for note in notes {
        writeln!(out, "  - {} ({})", note.note, note.question_id)?;
    }
    Ok(())
}

pub(crate) fn render_analysis<W: Write>(analysis: &ResponseAnalysis, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} submission #{}", analysis.domain, analysis.index)?;
    writeln!(
        out,
        "Stored score: {}, recomputed score: {}",
        analysis.stored_score, analysis.recomputed_score
    )?;
    if !analysis.consistent {
        writeln!(out, "Warning: the stored score does not match the recorded answers.")?;
    }
    writeln!(out, "Level: {}", analysis.classification.label)?;

    render_notes(
        "Strengths",
        &analysis.insights.strengths,
        "No significant strengths identified.",
        out,
    )?;
    render_notes(
        "Areas for improvement",
        &analysis.insights.improvements,
        "No significant areas for improvement were identified.",
        out,
    )
}

pub(crate) fn render_summary<W: Write>(
    summary: &HistorySummary,
    issue: Option<&StoreError>,
    out: &mut W,
) -> io::Result<()> {
    if let Some(issue) = issue {
        writeln!(out, "Warning: history could not be loaded: {issue}")?;
    }
    writeln!(out, "{} submissions: {}", summary.domain, summary.submissions)?;
    if let (Some(min), Some(max), Some(mean)) =
        (summary.min_score, summary.max_score, summary.mean_score)
    {
        writeln!(out, "Scores: min {min}, max {max}, mean {mean:.1}")?;
    }
    if let Some(latest) = &summary.latest {
        writeln!(
            out,
            "Latest: #{} scored {} ({})",
            latest.index, latest.score, latest.classification.label
        )?;
    }
    for entry in &summary.levels {
        writeln!(out, "  {:<9} {}", entry.level_label, entry.submissions)?;
    }
    Ok(())
}
