use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerSlot, Question, ScoreSummary};

use super::progress::SessionProgress;
use crate::error::SessionError;

/// Outcome of committing an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub was_correct: bool,
    pub is_complete: bool,
}

/// In-memory state machine for one quiz attempt.
///
/// Selecting an option holds it as a tentative choice; `submit` commits it
/// into the answer slot and advances. Sessions are never persisted and are
/// dropped when the user finishes or abandons the quiz.
#[derive(Debug)]
pub struct QuizSession {
    topic_index: usize,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<AnswerSlot>,
    tentative: Option<usize>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over the given questions.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        topic_index: usize,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let answers = vec![AnswerSlot::Unanswered; questions.len()];
        Ok(Self {
            topic_index,
            questions,
            current: 0,
            answers,
            tentative: None,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn topic_index(&self) -> usize {
        self.topic_index
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question currently shown. Always valid; sessions never hold zero
    /// questions and the pointer stays on the last question once completed.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The tentative (uncommitted) choice for the current question, if any.
    ///
    /// Pre-populated with the recorded answer when revisiting an
    /// already-answered question.
    #[must_use]
    pub fn tentative_selection(&self) -> Option<usize> {
        self.tentative
    }

    /// Tentatively select an option for the current question. Re-selecting
    /// overwrites the previous tentative choice; nothing is committed yet.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session is finished and
    /// `SessionError::InvalidOption` for an out-of-range index; state is
    /// unchanged on error.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }

        let option_count = self.current_question().option_count();
        if index >= option_count {
            return Err(SessionError::InvalidOption {
                index,
                option_count,
            });
        }

        self.tentative = Some(index);
        Ok(())
    }

    /// Commit the tentative choice into the current answer slot and advance,
    /// completing the session on the last question.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` without a prior `select_option`
    /// and `SessionError::Completed` once finished.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<SubmitOutcome, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let choice = self.tentative.take().ok_or(SessionError::NoSelection)?;

        self.answers[self.current] = AnswerSlot::Answered(choice);
        let was_correct = self.questions[self.current].is_correct(choice);

        if self.current + 1 == self.questions.len() {
            self.completed_at = Some(now);
        } else {
            self.current += 1;
            self.tentative = self.answers[self.current].selected();
        }

        Ok(SubmitOutcome {
            was_correct,
            is_complete: self.is_complete(),
        })
    }

    /// Step back to the previous question, restoring its recorded selection
    /// as the tentative choice.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoEarlierQuestion` at the first question and
    /// `SessionError::Completed` once finished.
    pub fn go_back(&mut self) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.current == 0 {
            return Err(SessionError::NoEarlierQuestion);
        }

        self.current -= 1;
        self.tentative = self.answers[self.current].selected();
        Ok(())
    }

    /// Tally over currently-recorded answers. Computable at any time for
    /// progress display; final once the session completes.
    #[must_use]
    pub fn score(&self) -> ScoreSummary {
        let correct = self
            .answers
            .iter()
            .zip(&self.questions)
            .filter(|(slot, question)| {
                slot.selected()
                    .is_some_and(|choice| question.is_correct(choice))
            })
            .count();
        ScoreSummary::new(correct, self.questions.len())
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.answers.iter().filter(|slot| slot.is_answered()).count();
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: self.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::ScoreTier;
    use quiz_core::time::fixed_now;

    fn question(correct_index: usize) -> Question {
        let options = (0..4).map(|i| format!("option {i}")).collect();
        Question::new("Q", options, correct_index).unwrap()
    }

    fn three_question_session() -> QuizSession {
        // Correct answers are [1, 2, 0].
        let questions = vec![question(1), question(2), question(0)];
        QuizSession::new(0, questions, fixed_now()).unwrap()
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let err = QuizSession::new(0, Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn answers_one_one_zero_score_two_of_three_good() {
        let mut session = three_question_session();
        for choice in [1, 1, 0] {
            session.select_option(choice).unwrap();
            session.submit(fixed_now()).unwrap();
        }

        assert!(session.is_complete());
        let score = session.score();
        assert_eq!(score.correct, 2);
        assert_eq!(score.total, 3);
        assert_eq!(score.tier, ScoreTier::Good);
    }

    #[test]
    fn all_correct_scores_perfect() {
        let mut session = three_question_session();
        for choice in [1, 2, 0] {
            session.select_option(choice).unwrap();
            session.submit(fixed_now()).unwrap();
        }
        assert_eq!(session.score().tier, ScoreTier::Perfect);
    }

    #[test]
    fn none_correct_scores_practice() {
        let mut session = three_question_session();
        for choice in [3, 3, 3] {
            session.select_option(choice).unwrap();
            session.submit(fixed_now()).unwrap();
        }
        assert_eq!(session.score().tier, ScoreTier::Practice);
    }

    #[test]
    fn out_of_range_selection_leaves_state_unchanged() {
        let mut session = three_question_session();
        session.select_option(1).unwrap();

        let err = session.select_option(4).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidOption {
                index: 4,
                option_count: 4
            }
        ));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.tentative_selection(), Some(1));
    }

    #[test]
    fn submit_without_selection_is_rejected() {
        let mut session = three_question_session();
        let err = session.submit(fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::NoSelection));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn reselecting_overwrites_the_tentative_choice() {
        let mut session = three_question_session();
        session.select_option(0).unwrap();
        session.select_option(2).unwrap();
        assert_eq!(session.tentative_selection(), Some(2));

        let outcome = session.submit(fixed_now()).unwrap();
        assert!(outcome.was_correct);
    }

    #[test]
    fn submit_advances_and_completes_on_last_question() {
        let mut session = three_question_session();

        session.select_option(1).unwrap();
        let outcome = session.submit(fixed_now()).unwrap();
        assert!(outcome.was_correct);
        assert!(!outcome.is_complete);
        assert_eq!(session.current_index(), 1);
        assert!(session.completed_at().is_none());

        session.select_option(2).unwrap();
        session.submit(fixed_now()).unwrap();
        session.select_option(0).unwrap();
        let last = session.submit(fixed_now()).unwrap();
        assert!(last.is_complete);
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn revisiting_restores_the_recorded_selection() {
        let mut session = three_question_session();
        session.select_option(3).unwrap();
        session.submit(fixed_now()).unwrap();
        session.select_option(2).unwrap();
        session.submit(fixed_now()).unwrap();

        // Back from question 2 to question 1, then to question 0: each shows
        // its originally recorded choice pre-populated.
        session.go_back().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.tentative_selection(), Some(2));

        session.go_back().unwrap();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.tentative_selection(), Some(3));

        let err = session.go_back().unwrap_err();
        assert!(matches!(err, SessionError::NoEarlierQuestion));
    }

    #[test]
    fn resubmitting_a_revisited_question_overwrites_the_answer() {
        let mut session = three_question_session();
        session.select_option(3).unwrap();
        session.submit(fixed_now()).unwrap();

        session.go_back().unwrap();
        session.select_option(1).unwrap();
        session.submit(fixed_now()).unwrap();

        // Advancing lands back on question 1 with no recorded answer yet.
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.tentative_selection(), None);
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn completed_session_rejects_further_moves() {
        let mut session = three_question_session();
        for choice in [1, 2, 0] {
            session.select_option(choice).unwrap();
            session.submit(fixed_now()).unwrap();
        }

        assert!(matches!(
            session.select_option(0),
            Err(SessionError::Completed)
        ));
        assert!(matches!(
            session.submit(fixed_now()),
            Err(SessionError::Completed)
        ));
        assert!(matches!(session.go_back(), Err(SessionError::Completed)));
    }

    #[test]
    fn progress_counts_answered_slots() {
        let mut session = three_question_session();
        session.select_option(1).unwrap();
        session.submit(fixed_now()).unwrap();

        let progress = session.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);
    }
}
