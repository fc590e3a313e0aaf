//! Round session: the single current round for one user, with persistence
//! sequenced around the pure state-machine operations.
//!
//! The session mirrors how a scoring screen drives the engine: every shot
//! press persists the in-progress round, finishing appends the completed
//! record exactly once and clears the in-progress slot, abandoning clears
//! without appending. The repository is injected; nothing here is global.

use crate::error::{SessionError, SessionResult};
use crate::models::{Round, RoundSetup};
use crate::store::RoundRepository;

pub struct RoundSession<R: RoundRepository> {
    repo: R,
    user_id: String,
    current: Option<Round>,
}

impl<R: RoundRepository> RoundSession<R> {
    pub fn new(repo: R, user_id: impl Into<String>) -> Self {
        Self { repo, user_id: user_id.into(), current: None }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn current(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    pub fn store(&self) -> &R {
        &self.repo
    }

    pub fn store_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    /// Pick up a previously saved in-progress round, if any.
    ///
    /// Returns whether one was found. A round already held in memory is
    /// left alone when the store has nothing.
    pub fn resume(&mut self) -> SessionResult<bool> {
        match self.repo.load_in_progress_round(&self.user_id)? {
            Some(round) => {
                log::info!("Resumed round {} ({}/25 scored)", round.id, round.scored_count());
                self.current = Some(round);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Create a new round from the setup and persist it as in-progress.
    ///
    /// Any round already in progress is replaced; its last saved state is
    /// overwritten.
    pub fn start(&mut self, setup: RoundSetup) -> SessionResult<&Round> {
        if let Some(old) = &self.current {
            log::warn!("Replacing in-progress round {}", old.id);
        }

        let round = Round::new(setup);
        self.repo.save_in_progress_round(&self.user_id, &round)?;
        log::info!("Started round {} for user {}", round.id, self.user_id);

        Ok(self.current.insert(round))
    }

    /// Cycle one shot on the current round and persist the new state.
    pub fn record_shot(&mut self, index: usize) -> SessionResult<&Round> {
        let round = self.current.as_ref().ok_or(SessionError::NoActiveRound)?;
        let next = round.cycle_shot(index)?;

        self.repo.save_in_progress_round(&self.user_id, &next)?;
        Ok(self.current.insert(next))
    }

    /// Finalize the current round: append to history, clear the
    /// in-progress slot, and return the completed record.
    ///
    /// The append happens once; a failure before it leaves the round
    /// current, so the caller can retry after fixing the cause.
    pub fn finish(&mut self) -> SessionResult<Round> {
        let round = self.current.as_ref().ok_or(SessionError::NoActiveRound)?;
        let done = round.complete()?;

        self.repo.append_completed_round(&self.user_id, &done)?;
        self.current = None;
        self.repo.clear_in_progress_round(&self.user_id)?;

        log::info!(
            "Completed round {}: {}/75, {} hits",
            done.id,
            done.total_score,
            done.hit_count
        );
        Ok(done)
    }

    /// Throw the current round away, no partial save.
    pub fn abandon(&mut self) -> SessionResult<()> {
        if let Some(round) = self.current.take() {
            log::info!("Abandoned round {}", round.id);
        }
        self.repo.clear_in_progress_round(&self.user_id)?;
        Ok(())
    }

    /// The user's completed rounds, in whatever order the store keeps them.
    pub fn history(&self) -> SessionResult<Vec<Round>> {
        Ok(self.repo.load_completed_rounds(&self.user_id)?)
    }
}
