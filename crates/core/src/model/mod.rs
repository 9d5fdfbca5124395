mod card;
mod carousel;
mod ids;
mod progress;
mod question;
mod score;
mod session;
mod settings;
mod source;
mod user;

pub use card::{CardDraft, CardError, StudyCard};
pub use carousel::{Carousel, Direction};
pub use ids::{CardId, QuestionId};
pub use progress::{ProgressEntry, ProgressReport};
pub use question::{MIN_OPTIONS, Question};
pub use score::{QuestionOutcome, ScoredResult};
pub use session::{QuizError, QuizProgress, QuizSession};
pub use settings::{
    ClientSettings, ClientSettingsDraft, ClientSettingsError, DEFAULT_API_BASE_URL,
    DEFAULT_QUESTION_COUNT, DEFAULT_QUIZ_BASE_URL, MAX_QUESTION_COUNT,
};
pub use source::{CardSource, CardSourceParseError, SourcePlan};
pub use user::UserProfile;
