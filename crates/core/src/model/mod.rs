mod answer;
mod icon;
mod question;
mod score;
mod settings;
mod topic;

pub use answer::AnswerSlot;
pub use icon::TopicIcon;
pub use question::{Question, QuestionError};
pub use score::{ScoreSummary, ScoreTier};
pub use settings::{
    DEFAULT_DATA_SOURCE_URL, DEFAULT_REFRESH_INTERVAL_SECS, QuizSettings, QuizSettingsDraft,
    QuizSettingsError,
};
pub use topic::{Topic, TopicEntry, TopicSet};
