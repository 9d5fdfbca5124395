//! Plain-text rendering of quiz state and results. Nothing here mutates state.

use std::fmt::Write as _;

use quiz_core::model::{Carousel, ProgressReport, QuizSession, StudyCard, UserProfile};
use services::AttemptSummary;

const NO_SELECTION: &str = "—";
const UNKNOWN_DATE: &str = "????-??-?? ??:??";

#[must_use]
pub fn question(session: &QuizSession) -> String {
    let progress = session.progress();
    let current = session.current_question();
    let selected = session.answer_for(session.cursor());

    let mut out = String::new();
    let _ = writeln!(out, "Question {} / {}", progress.position, progress.total);
    let _ = writeln!(out, "{}", current.prompt);
    for (index, option) in current.options.iter().enumerate() {
        let marker = if selected == Some(index) { "*" } else { " " };
        let _ = writeln!(out, " {marker} {}) {option}", index + 1);
    }
    let _ = write!(out, "[{} of {} answered]", progress.answered, progress.total);
    out
}

#[must_use]
pub fn result(summary: &AttemptSummary) -> String {
    let result = &summary.result;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Your score: {} / {} ({}%)",
        result.correct,
        result.total,
        result.percent()
    );
    for line in &result.per_question {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", line.prompt);
        let _ = writeln!(
            out,
            "  Selected: {}",
            line.selected_option_text.as_deref().unwrap_or(NO_SELECTION)
        );
        let _ = writeln!(out, "  Answer:   {}", line.correct_option_text);
        let _ = writeln!(out, "  {}", if line.is_correct { "Correct" } else { "Wrong" });
    }
    let elapsed = summary.submitted_at - summary.started_at;
    let _ = write!(out, "\nTime: {}s", elapsed.num_seconds().max(0));
    out
}

#[must_use]
pub fn card_list(cards: &[StudyCard]) -> String {
    if cards.is_empty() {
        return "No cards".to_string();
    }
    let mut out = String::new();
    for (index, card) in cards.iter().enumerate() {
        let star = if card.favorited { " ♥" } else { "" };
        let saved = if card.is_saved() { "" } else { " (unsaved)" };
        let _ = writeln!(out, "{:>3}. {}{star}{saved}", index + 1, card.prompt);
        let _ = writeln!(out, "     {}", card.answer);
    }
    out.trim_end().to_string()
}

/// One card of the browse view, front and back, with its carousel position.
#[must_use]
pub fn card(cards: &[StudyCard], carousel: &Carousel, show_back: bool) -> String {
    let (Some((position, total)), Some(card)) = (carousel.position(), cards.get(carousel.center()))
    else {
        return "No cards".to_string();
    };
    let side = if show_back { &card.answer } else { &card.prompt };
    let heart = if card.favorited { "♥ Favorited" } else { "♡ Favorite" };
    format!("Card {position} of {total}  {heart}\n{side}")
}

#[must_use]
pub fn progress(report: Option<&ProgressReport>) -> String {
    let Some(report) = report else {
        return "No progress yet".to_string();
    };
    let mut out = String::new();
    let _ = writeln!(out, "Total reviewed:  {}", report.total_reviewed);
    let _ = write!(out, "Correct answers: {}", report.correct_answers);
    if !report.has_history() {
        let _ = write!(out, "\nNo dated sessions yet");
        return out;
    }
    for entry in report.entries_newest_first() {
        let date = entry.date.map_or_else(
            || UNKNOWN_DATE.to_string(),
            |at| at.format("%Y-%m-%d %H:%M").to_string(),
        );
        let _ = write!(out, "\n{date}  correct {} of {}", entry.correct, entry.total);
    }
    out
}

#[must_use]
pub fn greeting(user: Option<&UserProfile>) -> String {
    match user {
        Some(user) => format!("Signed in. Hello, {}!", user.display_name()),
        None => "Not signed in.".to_string(),
    }
}
