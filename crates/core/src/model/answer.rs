/// One answer slot in a quiz session, one per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Answered(usize),
}

impl AnswerSlot {
    /// The recorded option index, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        match self {
            Self::Unanswered => None,
            Self::Answered(index) => Some(*index),
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered(_))
    }
}
