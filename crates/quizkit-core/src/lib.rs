//! quizkit-core: the in-memory quiz session.
//!
//! Question loading and decoding, answer evaluation, navigation, and
//! score-report construction. Content providers and presentation plug in
//! through the traits in [`traits`].

pub mod controller;
pub mod error;
pub mod evaluator;
pub mod handoff;
pub mod model;
pub mod report;
pub mod session;
pub mod store;
pub mod traits;

pub use controller::{QuizController, Selection};
pub use error::{LoadError, ProviderError, QuizError, SessionError};
pub use model::{Question, QuestionView, QuizSummary};
pub use report::{build_report, ScoreReport};
pub use session::{QuizSession, SessionState, Step};
