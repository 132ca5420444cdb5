//! Badge registration and session binding.

use hunt_core::{DirectoryOracle, PlayerProfile, PlayerState, SurveyAnswer, SurveySet};

use super::GameService;
use crate::api::{Registration, RegistrationKind, Result, RuntimeError};
use crate::repository::RepositoryError;

impl GameService {
    /// Registers the badge behind `scan_code` for the session `token`.
    ///
    /// 1. A session already bound to a player updates that player's profile.
    /// 2. Otherwise, if the badge's player exists, the session is rebound to
    ///    them and their progress is kept.
    /// 3. Otherwise a new player is created at the starting state.
    ///
    /// Answers are recorded for every question of the current survey.
    /// Questions missing from `answers` are stored blank, and a blank answer
    /// never overwrites one given earlier.
    pub fn register(
        &self,
        token: &str,
        scan_code: &str,
        answers: &[SurveyAnswer],
    ) -> Result<Registration> {
        let directory = self.config.directory()?;
        let entry = directory
            .by_code(scan_code)
            .ok_or_else(|| RuntimeError::UnknownScanCode(scan_code.to_owned()))?;
        let survey = self.config.survey()?;
        let submitted = survey_answers(&survey, answers);

        let (player_id, kind) = if let Some(bound) = self.players.by_token(token)? {
            let mut profile = bound.profile;
            if let Some(own) = directory.by_player_id(&profile.player_id) {
                profile.display_name = own.display_name.clone();
            }
            profile.merge_answers(&submitted);
            self.players.update_profile(&profile)?;
            (profile.player_id, RegistrationKind::Updated)
        } else if let Some(existing) = self.players.by_player_id(&entry.player_id)? {
            let mut profile = existing.profile;
            profile.merge_answers(&submitted);
            // A failed rebind leaves the old session bound to the saved answers
            self.players.update_profile(&profile)?;
            self.players.rebind_token(&entry.player_id, token)?;
            (profile.player_id, RegistrationKind::Rebound)
        } else {
            let profile = PlayerProfile::new(entry.player_id.clone(), entry.display_name.clone())
                .with_answers(submitted);
            self.players
                .create(token, profile, PlayerState::starting(&self.rules))?;
            (entry.player_id.clone(), RegistrationKind::Created)
        };

        tracing::info!(player = %player_id, %kind, "registration accepted");

        let record = self
            .players
            .by_player_id(&player_id)?
            .ok_or_else(|| RepositoryError::PlayerNotFound(player_id.clone()))?;
        Ok(Registration { kind, record })
    }
}

/// One answer per survey question, in survey order.
fn survey_answers(survey: &SurveySet, answers: &[SurveyAnswer]) -> Vec<SurveyAnswer> {
    survey
        .question_ids()
        .map(|question_id| {
            let answer = answers
                .iter()
                .find(|answer| answer.question_id == question_id)
                .and_then(|answer| answer.answer);
            SurveyAnswer::new(question_id, answer)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::repository::{
        InMemoryActionLog, InMemoryConfigStore, InMemoryPlayerRepository, PlayerRecord,
        PlayerRepository,
    };
    use hunt_content::DefaultContent;
    use hunt_core::PlayerId;

    const ADA: &str = "qr-07919-ada";

    fn service() -> GameService {
        GameService::builder()
            .config_store(Arc::new(InMemoryConfigStore::new()))
            .players(Arc::new(InMemoryPlayerRepository::new()))
            .actions(Arc::new(InMemoryActionLog::new()))
            .seed_content(DefaultContent::load().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn first_registration_creates_a_fresh_player() {
        let service = service();
        let registration = service
            .register("t1", ADA, &[SurveyAnswer::new(2, Some(true))])
            .unwrap();

        assert_eq!(registration.kind, RegistrationKind::Created);
        assert_eq!(registration.record.state, PlayerState::new(1, 5));
        assert_eq!(registration.record.profile.display_name, "Ada");
        assert_eq!(
            registration.record.profile.survey_answers,
            vec![
                SurveyAnswer::new(1, None),
                SurveyAnswer::new(2, Some(true)),
                SurveyAnswer::new(3, None),
                SurveyAnswer::new(4, None),
            ]
        );
    }

    #[test]
    fn bound_session_updates_in_place() {
        let service = service();
        service
            .register("t1", ADA, &[SurveyAnswer::new(1, Some(true))])
            .unwrap();
        let registration = service
            .register("t1", ADA, &[SurveyAnswer::new(4, Some(false))])
            .unwrap();

        assert_eq!(registration.kind, RegistrationKind::Updated);
        assert!(registration.record.profile.answer_to(1));
        assert_eq!(
            registration.record.profile.survey_answers[3],
            SurveyAnswer::new(4, Some(false))
        );
    }

    #[test]
    fn unknown_badges_are_refused() {
        let service = service();
        assert!(matches!(
            service.register("t1", "qr-forged", &[]),
            Err(RuntimeError::UnknownScanCode(_))
        ));
        assert!(service.players.list().unwrap().is_empty());
    }

    #[test]
    fn answers_for_unknown_questions_are_dropped() {
        let survey = SurveySet::new(vec![hunt_core::SurveyQuestion::boolean(1, "q")]);
        let answers = survey_answers(
            &survey,
            &[SurveyAnswer::new(9, Some(true)), SurveyAnswer::new(1, Some(false))],
        );
        assert_eq!(answers, vec![SurveyAnswer::new(1, Some(false))]);
    }

    #[test]
    fn rebinding_keeps_progress() {
        let service = service();
        service.register("t1", ADA, &[]).unwrap();
        service
            .players
            .update_state(&PlayerId::from("p01"), &PlayerState::new(9, 2))
            .unwrap();

        let registration = service.register("t2", ADA, &[]).unwrap();
        assert_eq!(registration.kind, RegistrationKind::Rebound);
        assert_eq!(registration.record.state, PlayerState::new(9, 2));
        assert_eq!(registration.record.token.as_deref(), Some("t2"));
    }

    /// Player store whose token rebinding always fails.
    struct RebindFails(InMemoryPlayerRepository);

    impl PlayerRepository for RebindFails {
        fn by_token(&self, token: &str) -> crate::repository::Result<Option<PlayerRecord>> {
            self.0.by_token(token)
        }

        fn by_player_id(
            &self,
            player_id: &PlayerId,
        ) -> crate::repository::Result<Option<PlayerRecord>> {
            self.0.by_player_id(player_id)
        }

        fn create(
            &self,
            token: &str,
            profile: PlayerProfile,
            state: PlayerState,
        ) -> crate::repository::Result<()> {
            self.0.create(token, profile, state)
        }

        fn update_state(
            &self,
            player_id: &PlayerId,
            state: &PlayerState,
        ) -> crate::repository::Result<()> {
            self.0.update_state(player_id, state)
        }

        fn update_profile(&self, profile: &PlayerProfile) -> crate::repository::Result<()> {
            self.0.update_profile(profile)
        }

        fn rebind_token(&self, _: &PlayerId, _: &str) -> crate::repository::Result<()> {
            Err(RepositoryError::Io(std::io::Error::other("disk full")))
        }

        fn unbind_token(&self, token: &str) -> crate::repository::Result<bool> {
            self.0.unbind_token(token)
        }

        fn list(&self) -> crate::repository::Result<Vec<PlayerRecord>> {
            self.0.list()
        }
    }

    #[test]
    fn failed_rebind_keeps_the_merged_answers() {
        let players = Arc::new(RebindFails(InMemoryPlayerRepository::new()));
        let service = GameService::builder()
            .config_store(Arc::new(InMemoryConfigStore::new()))
            .players(players.clone())
            .actions(Arc::new(InMemoryActionLog::new()))
            .seed_content(DefaultContent::load().unwrap())
            .build()
            .unwrap();

        service
            .register("t1", ADA, &[SurveyAnswer::new(1, Some(true))])
            .unwrap();
        assert!(matches!(
            service.register("t2", ADA, &[SurveyAnswer::new(3, Some(false))]),
            Err(RuntimeError::Repository(RepositoryError::Io(_)))
        ));

        let record = players.by_token("t1").unwrap().expect("old session kept");
        assert!(record.profile.answer_to(1));
        assert_eq!(
            record.profile.survey_answers[2],
            SurveyAnswer::new(3, Some(false))
        );
        assert!(players.by_token("t2").unwrap().is_none());
    }
}
