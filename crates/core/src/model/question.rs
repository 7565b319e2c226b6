use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("correct answer index {index} is out of range for {option_count} options")]
    CorrectIndexOutOfRange { index: usize, option_count: usize },
}

/// A single multiple-choice question with one correct option.
///
/// Invariant: `options` holds at least two entries and `correct_index`
/// points inside it. Both are enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` for fewer than two options and
    /// `QuestionError::CorrectIndexOutOfRange` when `correct_index` does not
    /// point into `options`.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                option_count: options.len(),
            });
        }

        Ok(Self {
            text: text.into(),
            options,
            correct_index,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Whether the given option index is the correct one.
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}
