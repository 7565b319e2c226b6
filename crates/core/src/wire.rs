//! Wire codec for quiz documents.
//!
//! Two generations of the question format are in circulation. The older
//! remote shape spells each question as `{text, answer, answers}` where
//! `answer` is a 1-based index encoded as a numeric string; the cached shape
//! spells it as `{text, options, correctAnswerIndex}` with a direct 0-based
//! index. Decoding accepts both; encoding always emits the cached shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, QuestionError, Topic, TopicEntry, TopicIcon, TopicSet};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("malformed quiz document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("answer {value:?} is not a number")]
    AnswerNotNumber { value: String },

    #[error("answer {value:?} is out of range for {option_count} options")]
    AnswerOutOfRange { value: String, option_count: usize },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── DECODING ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct WireTopic {
    title: String,
    #[serde(alias = "desc")]
    description: String,
    #[serde(default, rename = "iconKey", alias = "iconName")]
    icon_key: Option<TopicIcon>,
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireQuestion {
    Indexed {
        text: String,
        options: Vec<String>,
        #[serde(rename = "correctAnswerIndex")]
        correct_answer_index: usize,
    },
    Numbered {
        text: String,
        answer: String,
        answers: Vec<String>,
    },
}

impl WireTopic {
    fn resolve(self) -> Result<TopicEntry, DecodeError> {
        let topic = match self.icon_key {
            Some(icon) => Topic::new(self.title, self.description, icon),
            None => Topic::classified(self.title, self.description),
        };

        let mut questions = Vec::with_capacity(self.questions.len());
        for question in self.questions {
            questions.push(question.resolve()?);
        }

        Ok(TopicEntry { topic, questions })
    }
}

impl WireQuestion {
    fn resolve(self) -> Result<Question, DecodeError> {
        match self {
            Self::Indexed {
                text,
                options,
                correct_answer_index,
            } => Ok(Question::new(text, options, correct_answer_index)?),
            Self::Numbered {
                text,
                answer,
                answers,
            } => {
                let one_based: usize =
                    answer
                        .trim()
                        .parse()
                        .map_err(|_| DecodeError::AnswerNotNumber {
                            value: answer.clone(),
                        })?;
                if one_based == 0 || one_based > answers.len() {
                    return Err(DecodeError::AnswerOutOfRange {
                        value: answer,
                        option_count: answers.len(),
                    });
                }
                Ok(Question::new(text, answers, one_based - 1)?)
            }
        }
    }
}

/// Decode a JSON array of topic records into a `TopicSet`.
///
/// Decoding is all-or-nothing: a single invalid question invalidates the
/// whole document.
///
/// # Errors
///
/// Returns `DecodeError::Json` when the document is not a JSON array of
/// topic records, `AnswerNotNumber`/`AnswerOutOfRange` when a 1-based
/// `answer` cannot be resolved, and `Question` when a resolved index fails
/// question validation.
pub fn decode_topic_set(bytes: &[u8]) -> Result<TopicSet, DecodeError> {
    let wire: Vec<WireTopic> = serde_json::from_slice(bytes)?;
    let mut entries = Vec::with_capacity(wire.len());
    for topic in wire {
        entries.push(topic.resolve()?);
    }
    Ok(TopicSet::new(entries))
}

//
// ─── ENCODING ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct CachedTopic<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(rename = "iconKey")]
    icon_key: TopicIcon,
    questions: Vec<CachedQuestion<'a>>,
}

#[derive(Debug, Serialize)]
struct CachedQuestion<'a> {
    text: &'a str,
    options: &'a [String],
    #[serde(rename = "correctAnswerIndex")]
    correct_answer_index: usize,
}

/// Encode a `TopicSet` as the canonical cached document.
///
/// # Errors
///
/// Returns `DecodeError::Json` when serialization fails.
pub fn encode_topic_set(topics: &TopicSet) -> Result<Vec<u8>, DecodeError> {
    let cached: Vec<CachedTopic<'_>> = topics
        .iter()
        .map(|entry| CachedTopic {
            title: entry.topic.title(),
            description: entry.topic.description(),
            icon_key: entry.topic.icon(),
            questions: entry
                .questions
                .iter()
                .map(|question| CachedQuestion {
                    text: question.text(),
                    options: question.options(),
                    correct_answer_index: question.correct_index(),
                })
                .collect(),
        })
        .collect();

    Ok(serde_json::to_vec_pretty(&cached)?)
}
