use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::model::{CardSource, QuizSession, ScoredResult, SourcePlan};
use storage::LocalCache;
use tracing::{info, instrument, warn};

use crate::Clock;
use crate::api::QuizGenerator;
use crate::auth_service::require_token;
use crate::card_source::CardSourceService;
use crate::error::QuizServiceError;

//
// ─── ATTEMPT ──────────────────────────────────────────────────────────────────
//

/// Scored outcome of a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub result: ScoredResult,
}

/// One live quiz: the session plus when the current attempt began.
///
/// Retrying resets the session in place; the generated questions are kept.
#[derive(Debug, Clone)]
pub struct QuizRun {
    session: QuizSession,
    source: SourcePlan,
    started_at: DateTime<Utc>,
    clock: Clock,
}

impl QuizRun {
    #[must_use]
    pub fn new(session: QuizSession, source: SourcePlan, clock: Clock) -> Self {
        Self {
            session,
            source,
            started_at: clock.now(),
            clock,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    #[must_use]
    pub fn source(&self) -> SourcePlan {
        self.source
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Score the attempt. The session is left as-is so it can be reviewed or retried.
    #[must_use]
    pub fn submit(&self) -> AttemptSummary {
        let result = self.session.score();
        info!(correct = result.correct, total = result.total, "quiz submitted");
        AttemptSummary {
            started_at: self.started_at,
            submitted_at: self.clock.now(),
            result,
        }
    }

    /// Clear answers, rewind, and restart the attempt clock.
    pub fn retry(&mut self) {
        self.session.reset();
        self.started_at = self.clock.now();
    }
}

//
// ─── SERVICE ──────────────────────────────────────────────────────────────────
//

/// Builds quizzes: picks source cards, asks the generator for questions, and
/// only then constructs a session.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    cards: CardSourceService,
    generator: Arc<dyn QuizGenerator>,
    cache: LocalCache,
    default_count: u32,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        cards: CardSourceService,
        generator: Arc<dyn QuizGenerator>,
        cache: LocalCache,
        default_count: u32,
    ) -> Self {
        Self {
            clock,
            cards,
            generator,
            cache,
            default_count: default_count.max(1),
        }
    }

    /// Start a quiz of `count` questions (zero or `None` uses the default).
    ///
    /// Any upstream failure aborts before a session exists.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Source` when no cards are available,
    /// `Generation` when the generator fails, and `Quiz` when it returns an
    /// empty or malformed question list.
    #[instrument(skip(self))]
    pub async fn start(
        &self,
        source: CardSource,
        count: Option<u32>,
    ) -> Result<QuizRun, QuizServiceError> {
        let count = count.filter(|&n| n > 0).unwrap_or(self.default_count);
        let loaded = self.cards.load(source).await?;
        let token = require_token(&self.cache).await?;

        let questions = self
            .generator
            .generate_quiz(&token, &loaded.cards, count)
            .await
            .map_err(QuizServiceError::Generation)?;
        let session = QuizSession::new(questions).inspect_err(|err| {
            warn!(%err, "generator returned an unusable quiz");
        })?;

        info!(questions = session.len(), "quiz ready");
        Ok(QuizRun::new(session, loaded.plan, self.clock))
    }
}
