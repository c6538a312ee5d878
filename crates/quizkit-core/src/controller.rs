//! Quiz controller: drives a session from presentation events.
//!
//! Owns at most one `QuizSession`. Starting a quiz discards the previous
//! session and report. Every event takes `&mut self`, so no navigation can
//! interleave with a load.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{LoadError, QuizError, SessionError};
use crate::handoff::SessionHandoff;
use crate::model::QuestionView;
use crate::report::ScoreReport;
use crate::session::{QuizSession, Step};
use crate::store::{classify_provider_error, QuestionStore};
use crate::traits::{ContentProvider, Presenter, SelectionSource};

/// Options currently checked for the question on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    checked: BTreeSet<usize>,
}

impl Selection {
    /// Toggle an option. Single-choice questions behave like a radio
    /// group: the option replaces the selection.
    pub fn toggle(&mut self, option: usize, multiple_choice: bool) {
        if multiple_choice {
            if !self.checked.remove(&option) {
                self.checked.insert(option);
            }
        } else {
            self.checked.clear();
            self.checked.insert(option);
        }
    }

    pub fn set(&mut self, options: &[usize]) {
        self.checked = options.iter().copied().collect();
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    pub fn is_checked(&self, option: usize) -> bool {
        self.checked.contains(&option)
    }
}

impl SelectionSource for Selection {
    /// Checked options in display order.
    fn capture_selections(&self) -> Vec<usize> {
        self.checked.iter().copied().collect()
    }
}

pub struct QuizController<P> {
    provider: Arc<dyn ContentProvider>,
    presenter: P,
    session: Option<QuizSession>,
    selection: Selection,
    handoff: SessionHandoff,
}

impl<P: Presenter> QuizController<P> {
    pub fn new(provider: Arc<dyn ContentProvider>, presenter: P) -> Self {
        Self {
            provider,
            presenter,
            session: None,
            selection: Selection::default(),
            handoff: SessionHandoff::default(),
        }
    }

    /// Make sure content is available, then list the catalog.
    ///
    /// A failed download is logged and listing proceeds with whatever is
    /// already present.
    pub async fn startup(&mut self) -> anyhow::Result<Vec<String>> {
        match self.provider.ensure_quizzes_available().await {
            Ok(fetched) if !fetched.is_empty() => {
                info!(count = fetched.len(), "fetched quizzes");
            }
            Ok(_) => {}
            Err(e) => warn!("could not ensure quizzes are available: {e:#}"),
        }
        self.provider.list_quizzes().await
    }

    /// A quiz was picked in the catalog; returns its question count.
    pub async fn on_quiz_selected(&mut self, quiz_name: &str) -> Result<usize, LoadError> {
        self.handoff.select_quiz(quiz_name, None);
        self.provider
            .question_count(quiz_name)
            .await
            .map_err(|e| classify_provider_error(quiz_name, &e))
    }

    /// Load a quiz and show its first question.
    ///
    /// `requested_count` is recorded in the handoff but does not limit the
    /// number of questions played.
    pub async fn on_start_quiz(
        &mut self,
        quiz_name: &str,
        requested_count: Option<usize>,
    ) -> Result<(), QuizError> {
        self.session = None;
        self.selection.clear();
        self.handoff.select_quiz(quiz_name, requested_count);

        let store = match QuestionStore::load(self.provider.as_ref(), quiz_name).await {
            Ok(store) => store,
            Err(e) => {
                warn!(quiz = quiz_name, "failed to load quiz: {e}");
                self.presenter.show_error(&e.to_string());
                return Err(e.into());
            }
        };

        let session = match QuizSession::from_store(store) {
            Ok(session) => session,
            Err(e) => {
                warn!(quiz = quiz_name, "quiz has no questions");
                self.presenter
                    .show_error(&format!("quiz '{quiz_name}' has no questions"));
                return Err(e.into());
            }
        };

        info!(quiz = quiz_name, questions = session.len(), "quiz started");
        self.session = Some(session);
        self.show(0)?;
        Ok(())
    }

    pub fn on_next(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveQuiz);
        let step = session
            .and_then(|s| s.next(&self.selection))
            .map_err(reject)?;
        self.apply(step)
    }

    pub fn on_previous(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveQuiz);
        let step = session
            .and_then(|s| s.previous(&self.selection))
            .map_err(reject)?;
        self.apply(step)
    }

    /// The user checked or unchecked an option of the current question.
    pub fn on_option_toggled(&mut self, option: usize) -> Result<(), SessionError> {
        self.on_options_toggled(&[option])
    }

    /// Toggle several options at once, in order.
    ///
    /// Either every option is applied or, if any is out of range, none is.
    /// The question is redrawn once.
    pub fn on_options_toggled(&mut self, options: &[usize]) -> Result<(), SessionError> {
        let question = self
            .session
            .as_ref()
            .ok_or(SessionError::NoActiveQuiz)
            .and_then(|s| s.current_question())
            .map_err(reject)?;

        let len = question.answers.len();
        if let Some(&bad) = options.iter().find(|&&option| option >= len) {
            return Err(reject(SessionError::OptionOutOfRange { index: bad, len }));
        }
        let multiple_choice = question.is_multiple_choice;
        for &option in options {
            self.selection.toggle(option, multiple_choice);
        }

        let view = self.current_question_view()?;
        self.presenter.show_question(&view);
        Ok(())
    }

    /// The current question with the on-screen selection.
    pub fn current_question_view(&self) -> Result<QuestionView, SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveQuiz)?;
        let mut view = session.current_view()?;
        view.selected = self.selection.capture_selections();
        Ok(view)
    }

    /// Hand the final report to the results view.
    pub fn on_quiz_ended(&mut self) -> Option<ScoreReport> {
        self.handoff.take_report()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn handoff(&self) -> &SessionHandoff {
        &self.handoff
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn apply(&mut self, step: Step) -> Result<(), SessionError> {
        match step {
            Step::Show(index) => self.show(index),
            Step::Stay(_) => Ok(()),
            Step::Ended(report) => {
                info!(
                    quiz = %report.quiz_name,
                    correct = report.correct_answers,
                    total = report.total_questions,
                    "quiz finished"
                );
                self.session = None;
                self.selection.clear();
                self.presenter.show_report(&report);
                self.handoff.report = Some(report);
                Ok(())
            }
        }
    }

    fn show(&mut self, index: usize) -> Result<(), SessionError> {
        let session = self.session.as_ref().ok_or(SessionError::NoActiveQuiz)?;
        let view = session.view(index).map_err(reject)?;
        self.selection.set(&view.selected);
        self.presenter.show_question(&view);
        Ok(())
    }
}

fn reject(err: SessionError) -> SessionError {
    warn!("ignoring navigation request: {err}");
    err
}
