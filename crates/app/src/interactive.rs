//! Line-driven quiz and browse loops. Input and output are injected so the
//! loops run the same against a terminal or a test buffer.

use std::io::{self, BufRead, Write};

use quiz_core::model::{Carousel, Direction, QuizError, StudyCard};
use services::QuizRun;

use crate::render;

const QUIZ_HELP: &str =
    "Commands: <n> choose option, n next, p previous, g <n> go to question, s submit, r retry, q quit";
const BROWSE_HELP: &str = "Commands: n next, p previous, f flip, <n> jump to card, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    Choose(usize),
    Next,
    Previous,
    GoTo(usize),
    Submit,
    Retry,
    Quit,
    Help,
}

/// Parse one line of quiz input. Numbers are 1-based on the way in.
pub fn parse_quiz_command(line: &str) -> Option<QuizCommand> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let command = match head {
        "n" | "next" => QuizCommand::Next,
        "p" | "prev" | "previous" => QuizCommand::Previous,
        "s" | "submit" => QuizCommand::Submit,
        "r" | "retry" => QuizCommand::Retry,
        "q" | "quit" => QuizCommand::Quit,
        "h" | "help" | "?" => QuizCommand::Help,
        "g" | "goto" => QuizCommand::GoTo(one_based(parts.next()?)?),
        other => QuizCommand::Choose(one_based(other)?),
    };
    Some(command)
}

fn one_based(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

/// Drive a quiz until the user quits or input ends.
///
/// While results are on screen only retry and quit are accepted.
///
/// # Errors
///
/// Returns I/O errors from reading input or writing output.
pub fn run_quiz<R: BufRead, W: Write>(run: &mut QuizRun, input: R, out: &mut W) -> io::Result<()> {
    writeln!(out, "{QUIZ_HELP}")?;
    writeln!(out, "{}", render::question(run.session()))?;
    let mut showing_results = false;

    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_quiz_command(&line) else {
            if !line.trim().is_empty() {
                writeln!(out, "Unrecognized input. {QUIZ_HELP}")?;
            }
            continue;
        };

        if showing_results && !matches!(command, QuizCommand::Retry | QuizCommand::Quit) {
            writeln!(out, "Quiz submitted. r to retry, q to quit.")?;
            continue;
        }

        match command {
            QuizCommand::Quit => break,
            QuizCommand::Help => {
                writeln!(out, "{QUIZ_HELP}")?;
                continue;
            }
            QuizCommand::Submit => {
                writeln!(out, "{}", render::result(&run.submit()))?;
                showing_results = true;
                continue;
            }
            QuizCommand::Retry => {
                run.retry();
                showing_results = false;
            }
            QuizCommand::Next => {
                if !run.session_mut().next() {
                    writeln!(out, "Already at the last question.")?;
                }
            }
            QuizCommand::Previous => {
                if !run.session_mut().previous() {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            QuizCommand::GoTo(index) => {
                if let Err(err) = run.session_mut().go_to(index) {
                    writeln!(out, "{}", input_error(&err))?;
                    continue;
                }
            }
            QuizCommand::Choose(option) => {
                if let Err(err) = run.session_mut().record_current(option) {
                    writeln!(out, "{}", input_error(&err))?;
                    continue;
                }
            }
        }
        writeln!(out, "{}", render::question(run.session()))?;
    }
    Ok(())
}

/// Session errors carry 0-based indices; the user typed 1-based numbers.
fn input_error(err: &QuizError) -> String {
    match err {
        QuizError::QuestionOutOfRange { index, len } => {
            format!("No question {} (1-{len})", index + 1)
        }
        QuizError::OptionOutOfRange { index, len, .. } => {
            format!("No option {} (1-{len})", index + 1)
        }
        other => other.to_string(),
    }
}

/// Step through cards with a wrapping carousel.
///
/// # Errors
///
/// Returns I/O errors from reading input or writing output.
pub fn run_browse<R: BufRead, W: Write>(
    cards: &[StudyCard],
    input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut carousel = Carousel::new(cards.len());
    let mut show_back = false;
    writeln!(out, "{BROWSE_HELP}")?;
    writeln!(out, "{}", render::card(cards, &carousel, show_back))?;
    if carousel.is_empty() {
        return Ok(());
    }

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "n" | "next" => {
                carousel.slide(Direction::Forward);
                show_back = false;
            }
            "p" | "prev" => {
                carousel.slide(Direction::Back);
                show_back = false;
            }
            "f" | "flip" | "" => show_back = !show_back,
            other => match one_based(other) {
                Some(index) if carousel.select(index) => show_back = false,
                _ => {
                    writeln!(out, "{BROWSE_HELP}")?;
                    continue;
                }
            },
        }
        writeln!(out, "{}", render::card(cards, &carousel, show_back))?;
    }
    Ok(())
}
