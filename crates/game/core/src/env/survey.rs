//! Survey questions asked at registration.

/// Answer type of a survey question. Only yes/no questions exist today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SurveyKind {
    #[default]
    Boolean,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurveyQuestion {
    pub question_id: u32,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SurveyKind,
}

impl SurveyQuestion {
    pub fn boolean(question_id: u32, text: impl Into<String>) -> Self {
        Self {
            question_id,
            text: text.into(),
            kind: SurveyKind::Boolean,
        }
    }
}

/// The survey, as stored under the `survey` config key.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurveySet {
    pub questions: Vec<SurveyQuestion>,
}

impl SurveySet {
    pub fn new(questions: Vec<SurveyQuestion>) -> Self {
        Self { questions }
    }

    pub fn question(&self, question_id: u32) -> Option<&SurveyQuestion> {
        self.questions
            .iter()
            .find(|question| question.question_id == question_id)
    }

    pub fn question_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.questions.iter().map(|question| question.question_id)
    }
}
