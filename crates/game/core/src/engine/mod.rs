//! The progression state machine.
//!
//! [`ProgressionEngine::step`] is a pure function of the player's current
//! state, the scanned code, the read-only [`Env`] and a seed. It never
//! persists anything: the caller stores the returned state and appends the
//! action log entry, and on a failed write re-runs the step from the last
//! persisted state.
mod errors;
mod metals;
mod outcome;

pub use errors::StepError;
pub use outcome::{OutcomeKind, StepOutcome};

use crate::config::GameRules;
use crate::env::{Env, LevelKind, ScanDirectoryEntry};
use crate::state::{Metal, PlayerId, PlayerState};

/// Evaluates scans against the configured [`GameRules`].
#[derive(Clone, Copy, Debug)]
pub struct ProgressionEngine<'a> {
    rules: &'a GameRules,
}

impl<'a> ProgressionEngine<'a> {
    pub fn new(rules: &'a GameRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a GameRules {
        self.rules
    }

    /// Computes the player's next state after scanning `scanned_code`.
    ///
    /// Rules apply in order: terminal victory, elimination, the grab phase or
    /// a regular question, metal grants on progress, the death check, and
    /// finally the clue lookup for the resulting level.
    pub fn step(
        &self,
        env: Env<'_>,
        state: &PlayerState,
        scanned_code: &str,
        seed: u64,
    ) -> Result<StepOutcome, StepError> {
        let rules = self.rules;

        if state.is_victorious(rules) {
            let target = env
                .directory()
                .by_code(scanned_code)
                .map(|entry| entry.player_id.clone());
            return Ok(self.finish(env, state.clone(), OutcomeKind::AlreadyVictorious, target, None));
        }

        if state.is_dead() {
            let mut next = state.clone();
            next.level = GameRules::DEAD_LEVEL;
            return Ok(self.finish(env, next, OutcomeKind::Dead, None, None));
        }

        let mut next = state.clone();
        let (mut outcome, target, mut gained) = if state.level == rules.grab_level {
            self.grab(env, &mut next, scanned_code, seed)?
        } else if rules.is_question_level(state.level) {
            self.question(env, &mut next, scanned_code)?
        } else {
            return Err(StepError::ConfigurationMissing { level: state.level });
        };

        if outcome == OutcomeKind::Progress {
            if let Some(metal) = metals::maybe_grant(rules, env.rng(), &mut next, seed) {
                gained = Some(metal);
            }
        }

        if next.lives <= 0 {
            next.lives = next.lives.max(0);
            next.level = GameRules::DEAD_LEVEL;
            outcome = OutcomeKind::Dead;
        }

        Ok(self.finish(env, next, outcome, target, gained))
    }

    /// Grab phase: take one metal from the scanned player.
    fn grab(
        &self,
        env: Env<'_>,
        next: &mut PlayerState,
        scanned_code: &str,
        seed: u64,
    ) -> Result<(OutcomeKind, Option<PlayerId>, Option<Metal>), StepError> {
        let entry = resolve(env, scanned_code)?;
        let snapshot = env
            .players()
            .snapshot(&entry.player_id)?
            .ok_or_else(|| StepError::UnregisteredTarget {
                player_id: entry.player_id.clone(),
            })?;

        let target = Some(entry.player_id.clone());
        match metals::grab_from(env.rng(), next, &snapshot.state.metals, seed) {
            Some(metal) => {
                if next.metals.is_complete() {
                    next.level += 1;
                }
                Ok((OutcomeKind::GrabbedMetal, target, Some(metal)))
            }
            None => Ok((OutcomeKind::NothingFound, target, None)),
        }
    }

    /// Regular question: judge the scan against the level definition.
    fn question(
        &self,
        env: Env<'_>,
        next: &mut PlayerState,
        scanned_code: &str,
    ) -> Result<(OutcomeKind, Option<PlayerId>, Option<Metal>), StepError> {
        let definition = env
            .levels()
            .level(next.level)
            .ok_or(StepError::ConfigurationMissing { level: next.level })?;

        let scanned = env.directory().by_code(scanned_code);
        let target = scanned.map(|entry| entry.player_id.clone());

        let correct = match &definition.kind {
            LevelKind::RosterMatch { expected_scanners } => {
                scanned.is_some_and(|entry| expected_scanners.contains(&entry.player_id))
            }
            LevelKind::SurveyMatch {
                question_id,
                expected_answer,
            } => {
                let entry = resolve(env, scanned_code)?;
                let snapshot = env.players().snapshot(&entry.player_id)?.ok_or_else(|| {
                    StepError::UnregisteredTarget {
                        player_id: entry.player_id.clone(),
                    }
                })?;
                snapshot.profile.answer_to(*question_id) == *expected_answer
            }
            LevelKind::Wildcard => true,
        };

        if correct {
            next.level += 1;
            Ok((OutcomeKind::Progress, target, None))
        } else {
            next.lives -= 1;
            Ok((OutcomeKind::LostLife, target, None))
        }
    }

    fn finish(
        &self,
        env: Env<'_>,
        state: PlayerState,
        outcome: OutcomeKind,
        target: Option<PlayerId>,
        gained: Option<Metal>,
    ) -> StepOutcome {
        let clue = env.levels().clue(state.level).to_owned();
        StepOutcome {
            state,
            outcome,
            clue,
            target,
            gained,
        }
    }
}

fn resolve<'e>(env: Env<'e>, scanned_code: &str) -> Result<&'e ScanDirectoryEntry, StepError> {
    env.directory()
        .by_code(scanned_code)
        .ok_or_else(|| StepError::UnknownTarget {
            scan_code: scanned_code.to_owned(),
        })
}
