use std::fmt;

/// Stable identifier of a participant (or scannable object) in the hunt.
///
/// Player ids come from the scan-code directory and never change for the
/// lifetime of a game, unlike session tokens.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A player's response to one survey question. `None` means left blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurveyAnswer {
    pub question_id: u32,
    pub answer: Option<bool>,
}

impl SurveyAnswer {
    pub const fn new(question_id: u32, answer: Option<bool>) -> Self {
        Self {
            question_id,
            answer,
        }
    }
}

/// Identity and survey answers of a registered player.
///
/// Exactly one profile exists per [`PlayerId`]. It is created on the first
/// registration and then mutated in place, so answers survive a player
/// re-registering from a new session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub display_name: String,
    pub survey_answers: Vec<SurveyAnswer>,
}

impl PlayerProfile {
    pub fn new(player_id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            player_id,
            display_name: display_name.into(),
            survey_answers: Vec::new(),
        }
    }

    pub fn with_answers(mut self, answers: impl IntoIterator<Item = SurveyAnswer>) -> Self {
        self.survey_answers = answers.into_iter().collect();
        self
    }

    /// Stored answer to `question_id`. Missing and blank answers read as `false`.
    pub fn answer_to(&self, question_id: u32) -> bool {
        self.survey_answers
            .iter()
            .find(|answer| answer.question_id == question_id)
            .and_then(|answer| answer.answer)
            .unwrap_or(false)
    }

    /// Folds a fresh submission into the stored answers.
    ///
    /// Answers that are set in `submitted` overwrite; blank ones keep whatever
    /// was stored before. Questions never seen are appended in submission order.
    pub fn merge_answers(&mut self, submitted: &[SurveyAnswer]) {
        for incoming in submitted {
            match self
                .survey_answers
                .iter_mut()
                .find(|stored| stored.question_id == incoming.question_id)
            {
                Some(stored) => {
                    if incoming.answer.is_some() {
                        stored.answer = incoming.answer;
                    }
                }
                None => self.survey_answers.push(*incoming),
            }
        }
    }
}
