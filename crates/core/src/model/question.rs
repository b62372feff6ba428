use serde::{Deserialize, Serialize};

use super::lenient;
use crate::model::QuestionId;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Letter label of an option slot as the backend names it (`a`..`d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSlot {
    A,
    B,
    C,
    D,
}

impl OptionSlot {
    pub const ALL: [OptionSlot; OPTION_COUNT] =
        [OptionSlot::A, OptionSlot::B, OptionSlot::C, OptionSlot::D];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            OptionSlot::A => 0,
            OptionSlot::B => 1,
            OptionSlot::C => 2,
            OptionSlot::D => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> char {
        match self {
            OptionSlot::A => 'A',
            OptionSlot::B => 'B',
            OptionSlot::C => 'C',
            OptionSlot::D => 'D',
        }
    }
}

/// A single multiple-choice question, immutable once loaded for a quiz.
///
/// The canonical answer is the full text of the correct option, not a letter.
/// A blank answer is kept as sent; such a question can only be failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// `None` when the backend sent an id that is not numeric.
    id: Option<QuestionId>,
    prompt: String,
    comprehension: Option<String>,
    diagram: Option<String>,
    options: [String; OPTION_COUNT],
    answer: String,
    explanation: Option<String>,
    topic: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            prompt: prompt.into(),
            comprehension: None,
            diagram: None,
            options,
            answer: answer.into(),
            explanation: None,
            topic: None,
        }
    }

    #[must_use]
    pub fn with_diagram(mut self, diagram: impl Into<String>) -> Self {
        self.diagram = non_blank(diagram.into());
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = non_blank(explanation.into());
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = non_blank(topic.into());
        self
    }

    #[must_use]
    pub fn with_comprehension(mut self, passage: impl Into<String>) -> Self {
        self.comprehension = non_blank(passage.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<QuestionId> {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn comprehension(&self) -> Option<&str> {
        self.comprehension.as_deref()
    }

    #[must_use]
    pub fn diagram(&self) -> Option<&str> {
        self.diagram.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, slot: OptionSlot) -> &str {
        &self.options[slot.index()]
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Compares a chosen option text with the canonical answer, ignoring
    /// surrounding whitespace. An empty selection is never correct.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        let selected = selected.trim();
        !selected.is_empty() && selected == self.answer.trim()
    }
}

/// Question as the backend sends it (`questionid`, `a`..`d`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "questionid", default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub comprehension: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub diagram: String,
    #[serde(rename = "question", default, deserialize_with = "lenient::text")]
    pub prompt: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub a: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub b: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub c: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub d: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub answer: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub explanation: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub topic: String,
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        Self {
            id: record.id.parse().ok(),
            prompt: record.prompt,
            comprehension: None,
            diagram: None,
            options: [record.a, record.b, record.c, record.d],
            answer: record.answer,
            explanation: None,
            topic: None,
        }
        .with_comprehension(record.comprehension)
        .with_diagram(record.diagram)
        .with_explanation(record.explanation)
        .with_topic(record.topic)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: u64, answer: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question {id}?"),
        [
            "Alpha".to_string(),
            "Beta".to_string(),
            "Gamma".to_string(),
            "Delta".to_string(),
        ],
        answer,
    )
}
