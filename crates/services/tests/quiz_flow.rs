use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::{
    CardDraft, CardId, CardSource, Question, QuizError, SourcePlan, StudyCard, UserProfile,
};
use quiz_core::time::fixed_now;
use services::api::{FlashcardApi, GenerateCardsRequest, QuizGenerator, SaveManyResponse};
use services::{ApiError, CardSourceError, CardSourceService, Clock, QuizService, QuizServiceError};
use storage::repository::Storage;

#[derive(Default)]
struct FakeBackend {
    library: Vec<StudyCard>,
    quiz: Vec<Question>,
    fail_generation: bool,
    generate_calls: Mutex<Vec<(usize, u32)>>,
    list_calls: Mutex<usize>,
}

#[async_trait]
impl FlashcardApi for FakeBackend {
    async fn list_cards(&self, _token: &str) -> Result<Vec<StudyCard>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self.library.clone())
    }

    async fn generate_cards(
        &self,
        _token: &str,
        _request: &GenerateCardsRequest,
    ) -> Result<Vec<StudyCard>, ApiError> {
        Ok(Vec::new())
    }

    async fn save_many(
        &self,
        _token: &str,
        _drafts: &[CardDraft],
    ) -> Result<SaveManyResponse, ApiError> {
        Ok(SaveManyResponse::default())
    }

    async fn toggle_favorite(&self, _token: &str, _id: &CardId) -> Result<bool, ApiError> {
        Ok(true)
    }
}

#[async_trait]
impl QuizGenerator for FakeBackend {
    async fn generate_quiz(
        &self,
        _token: &str,
        cards: &[StudyCard],
        count: u32,
    ) -> Result<Vec<Question>, ApiError> {
        self.generate_calls.lock().unwrap().push((cards.len(), count));
        if self.fail_generation {
            return Err(ApiError::MalformedResponse("quiz"));
        }
        Ok(self.quiz.clone())
    }
}

fn sample_quiz() -> Vec<Question> {
    vec![
        Question::new("2+2?", ["3", "4", "5"], 1),
        Question::new("Capital of France?", ["Berlin", "Paris", "Rome"], 1),
    ]
}

async fn signed_in_storage() -> Storage {
    let storage = Storage::in_memory();
    storage
        .cache
        .store_login("tok", &UserProfile::default())
        .await
        .unwrap();
    storage
}

fn quiz_service(storage: &Storage, backend: Arc<FakeBackend>, clock: Clock) -> QuizService {
    let source = CardSourceService::new(backend.clone(), storage.cache.clone());
    QuizService::new(clock, source, backend, storage.cache.clone(), 5)
}

#[tokio::test]
async fn quiz_from_cached_cards_runs_to_a_score() {
    let storage = signed_in_storage().await;
    storage
        .cache
        .store_generated_cards(&[StudyCard::new("2+2?", "4"), StudyCard::new("France?", "Paris")])
        .await
        .unwrap();
    let backend = Arc::new(FakeBackend {
        quiz: sample_quiz(),
        ..FakeBackend::default()
    });
    let service = quiz_service(&storage, backend.clone(), Clock::fixed(fixed_now()));

    let mut run = service.start(CardSource::Generated, Some(2)).await.unwrap();
    assert_eq!(run.source(), SourcePlan::UseCache);
    assert_eq!(*backend.list_calls.lock().unwrap(), 0);
    assert_eq!(backend.generate_calls.lock().unwrap().as_slice(), &[(2, 2)]);

    let session = run.session_mut();
    session.record_answer(0, 1).unwrap();
    session.next();
    session.record_current(0).unwrap();

    let summary = run.submit();
    assert_eq!(summary.result.total, 2);
    assert_eq!(summary.result.correct, 1);
    assert_eq!(summary.started_at, fixed_now());

    // retry keeps the questions and clears answers
    run.retry();
    assert_eq!(run.session().cursor(), 0);
    assert!(run.session().answers().is_empty());
    assert_eq!(run.session().questions(), sample_quiz().as_slice());
}

#[tokio::test]
async fn empty_cache_falls_back_to_library() {
    let storage = signed_in_storage().await;
    let backend = Arc::new(FakeBackend {
        library: vec![StudyCard::new("Q", "A").with_id(CardId::new("c1"))],
        quiz: sample_quiz(),
        ..FakeBackend::default()
    });
    let service = quiz_service(&storage, backend.clone(), Clock::fixed(fixed_now()));

    let run = service.start(CardSource::Generated, None).await.unwrap();
    assert_eq!(run.source(), SourcePlan::FetchRemote { fallback: true });
    assert_eq!(*backend.list_calls.lock().unwrap(), 1);
    // default count applies when none is given
    assert_eq!(backend.generate_calls.lock().unwrap()[0].1, 5);
}

#[tokio::test]
async fn no_cards_anywhere_skips_generation() {
    let storage = signed_in_storage().await;
    let backend = Arc::new(FakeBackend::default());
    let service = quiz_service(&storage, backend.clone(), Clock::fixed(fixed_now()));

    let err = service.start(CardSource::Saved, Some(3)).await.unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Source(CardSourceError::NoCardsAvailable {
            requested: CardSource::Saved
        })
    ));
    assert!(backend.generate_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn generator_failure_builds_no_session() {
    let storage = signed_in_storage().await;
    storage
        .cache
        .store_generated_cards(&[StudyCard::new("Q", "A")])
        .await
        .unwrap();
    let backend = Arc::new(FakeBackend {
        fail_generation: true,
        ..FakeBackend::default()
    });
    let service = quiz_service(&storage, backend, Clock::fixed(fixed_now()));

    let err = service.start(CardSource::Generated, Some(1)).await.unwrap_err();
    assert!(matches!(err, QuizServiceError::Generation(_)));
}

#[tokio::test]
async fn empty_or_malformed_quiz_is_rejected() {
    let storage = signed_in_storage().await;
    storage
        .cache
        .store_generated_cards(&[StudyCard::new("Q", "A")])
        .await
        .unwrap();

    let empty = Arc::new(FakeBackend::default());
    let err = quiz_service(&storage, empty, Clock::fixed(fixed_now()))
        .start(CardSource::Generated, Some(1))
        .await
        .unwrap_err();
    assert!(matches!(err, QuizServiceError::Quiz(QuizError::NoQuestions)));

    let malformed = Arc::new(FakeBackend {
        quiz: vec![Question::new("x", ["only"], 0)],
        ..FakeBackend::default()
    });
    let err = quiz_service(&storage, malformed, Clock::fixed(fixed_now()))
        .start(CardSource::Generated, Some(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::TooFewOptions { question: 0, len: 1 })
    ));
}

#[tokio::test]
async fn library_quiz_requires_login() {
    let storage = Storage::in_memory();
    let backend = Arc::new(FakeBackend {
        library: vec![StudyCard::new("Q", "A")],
        quiz: sample_quiz(),
        ..FakeBackend::default()
    });
    let service = quiz_service(&storage, backend, Clock::fixed(fixed_now()));

    let err = service.start(CardSource::Saved, None).await.unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Source(CardSourceError::Auth(services::AuthError::NotLoggedIn))
    ));
}
