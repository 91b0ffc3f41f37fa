//! Game session controller.
//!
//! The controller owns the canonical [`Session`] and drives it through
//! `NoSession -> Starting -> Active -> GameOver`. Session data sits behind a
//! mutex that is never held across an `.await`; network round trips are
//! serialized by a [`SubmissionGuard`] so at most one is in flight.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};
use wordeau_core::{
    Guess, Hints, MAX_ATTEMPTS, SubmissionGuard, WORD_LENGTH, unused_hint_letters,
};

use crate::api::{FinishRequest, GameInfo, GuessRequest, GuessResponse, GuessService};
use crate::error::{StartError, SubmitError};
use crate::session::{Answer, Difficulty, GamePhase, Session};
use crate::storage::{SessionStore, StorageError};

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guess was recorded and the game goes on.
    Continue {
        /// Evaluated guess.
        guess: Guess,
        /// Guesses still available.
        attempts_left: usize,
    },
    /// The guess matched the secret word.
    Won {
        /// Winning guess.
        guess: Guess,
        /// Guesses used, including this one.
        attempts: usize,
    },
    /// Every attempt is used; the answer was fetched from the service.
    Lost {
        /// The secret word.
        answer: String,
    },
}

/// Point-in-time view of the controller for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Lifecycle phase.
    pub phase: GamePhase,
    /// Session credentials, once a game exists.
    pub info: Option<GameInfo>,
    /// Guess being typed.
    pub buffer: String,
    /// Accepted guesses.
    pub history: Vec<Guess>,
    /// Answer, once the game is over.
    pub answer: Option<Answer>,
    /// Active rule set.
    pub difficulty: Difficulty,
    /// Hints derived from `history`.
    pub hints: Hints,
    /// True while a request is in flight.
    pub busy: bool,
}

impl GameSnapshot {
    /// Returns the number of guesses still available.
    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.history.len())
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    session: Option<Session>,
    difficulty: Difficulty,
    starting: bool,
}

impl ControllerState {
    fn phase(&self) -> GamePhase {
        if self.starting {
            return GamePhase::Starting;
        }
        match &self.session {
            None => GamePhase::NoSession,
            Some(session) if session.is_over() => GamePhase::GameOver,
            Some(_) => GamePhase::Active,
        }
    }

    fn active_session(&mut self) -> Option<&mut Session> {
        if self.starting {
            return None;
        }
        self.session.as_mut().filter(|session| !session.is_over())
    }
}

/// Work decided under the state lock, carried out after releasing it.
enum Pending {
    Guess { info: GameInfo, word: String },
    Finish { info: GameInfo },
}

/// Clears the starting flag however the start call ends.
struct StartingFlag<'a> {
    state: &'a Mutex<ControllerState>,
}

impl Drop for StartingFlag<'_> {
    fn drop(&mut self) {
        lock(self.state).starting = false;
    }
}

fn lock(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Orchestrates one player's game against the guess service.
#[derive(Clone)]
pub struct GameController {
    service: Arc<dyn GuessService>,
    store: SessionStore,
    state: Arc<Mutex<ControllerState>>,
    guard: SubmissionGuard,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("state", &self.state)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates a controller, restoring any persisted session.
    ///
    /// An unreadable or outdated record starts the controller with no
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store itself fails.
    #[instrument(skip_all)]
    pub fn restore(
        service: Arc<dyn GuessService>,
        store: SessionStore,
    ) -> Result<Self, StorageError> {
        let difficulty = store.load_difficulty()?;
        let session = store.load_session()?;
        match &session {
            Some(session) => info!(
                session_id = session.info().id,
                guesses = session.history().len(),
                over = session.is_over(),
                "Restored session"
            ),
            None => info!("No session to restore"),
        }

        Ok(Self {
            service,
            store,
            state: Arc::new(Mutex::new(ControllerState {
                session,
                difficulty,
                starting: false,
            })),
            guard: SubmissionGuard::new(),
        })
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        lock(&self.state)
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.state().phase()
    }

    /// Returns true while a start or submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.guard.is_locked()
    }

    /// Returns the active rule set.
    pub fn difficulty(&self) -> Difficulty {
        self.state().difficulty
    }

    /// Returns a copy of everything needed to render the game.
    pub fn snapshot(&self) -> GameSnapshot {
        let state = self.state();
        let session = state.session.as_ref();
        GameSnapshot {
            phase: state.phase(),
            info: session.map(|s| s.info().clone()),
            buffer: session.map(|s| s.buffer().to_string()).unwrap_or_default(),
            history: session.map(|s| s.history().to_vec()).unwrap_or_default(),
            answer: session.and_then(|s| s.answer().cloned()),
            difficulty: state.difficulty,
            hints: session.map(Session::hints).unwrap_or_default(),
            busy: self.guard.is_locked(),
        }
    }

    /// Starts a new game, discarding any previous one.
    ///
    /// On failure the previous session (or lack of one) is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::Busy`] if a request is in flight, or
    /// [`StartError::Service`] if the service fails.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<GameInfo, StartError> {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("Start ignored, request in flight");
            return Err(StartError::Busy);
        };

        self.state().starting = true;
        let flag = StartingFlag { state: &self.state };
        let result = self.service.start_game().await;
        drop(flag);

        let info = result.map_err(|e| {
            warn!(error = %e, "Failed to start game");
            StartError::Service(e)
        })?;

        let session = Session::new(info.clone());
        self.persist(&session);
        self.state().session = Some(session);
        info!(session_id = info.id, "New game started");
        Ok(info)
    }

    /// Alias of [`start`](Self::start) for a finished or abandoned game.
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    pub async fn reset(&self) -> Result<GameInfo, StartError> {
        self.start().await
    }

    /// Starts a game only if none exists yet.
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    #[instrument(skip(self))]
    pub async fn ensure_started(&self) -> Result<(), StartError> {
        if self.phase() == GamePhase::NoSession {
            self.start().await?;
        }
        Ok(())
    }

    /// Appends a letter to the buffer.
    ///
    /// Uppercase ASCII is lowercased; anything else is ignored, as is any
    /// edit while a request is in flight. Returns true if the buffer changed.
    #[instrument(skip(self))]
    pub fn push_letter(&self, letter: char) -> bool {
        let letter = letter.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() || self.guard.is_locked() {
            return false;
        }
        let mut state = self.state();
        match state.active_session() {
            Some(session) if session.buffer.len() < WORD_LENGTH => {
                session.buffer.push(letter);
                true
            }
            _ => false,
        }
    }

    /// Removes the last letter of the buffer, if any. Ignored while a
    /// request is in flight.
    #[instrument(skip(self))]
    pub fn pop_letter(&self) -> Option<char> {
        if self.guard.is_locked() {
            return None;
        }
        self.state()
            .active_session()
            .and_then(|session| session.buffer.pop())
    }

    /// Sets the rule set for later submissions.
    #[instrument(skip(self))]
    pub fn set_difficulty(&self, difficulty: Difficulty) {
        self.state().difficulty = difficulty;
        if let Err(e) = self.store.save_difficulty(difficulty) {
            warn!(error = %e, "Failed to persist difficulty");
        }
        info!(%difficulty, "Difficulty changed");
    }

    /// Flips between hard and normal mode, returning the new setting.
    pub fn toggle_difficulty(&self) -> Difficulty {
        let next = self.difficulty().toggle();
        self.set_difficulty(next);
        next
    }

    /// Submits the buffer as a guess.
    ///
    /// When the board is already full but the answer could not be fetched
    /// earlier, this retries the finish call instead.
    ///
    /// # Errors
    ///
    /// Local checks ([`SubmitError::Busy`], [`SubmitError::IncompleteGuess`],
    /// [`SubmitError::MissingHintLetters`], ...) fail before any network call.
    /// [`SubmitError::InvalidWord`] keeps the buffer. [`SubmitError::GameAlreadyOver`]
    /// ends the game with an unknown answer.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitError> {
        let Some(_permit) = self.guard.try_acquire() else {
            debug!("Submission ignored, another is in flight");
            return Err(SubmitError::Busy);
        };

        match self.prepare_submission()? {
            Pending::Finish { info } => {
                let answer = self.finish(&info).await?;
                Ok(SubmitOutcome::Lost { answer })
            }
            Pending::Guess { info, word } => self.send_guess(info, word).await,
        }
    }

    fn prepare_submission(&self) -> Result<Pending, SubmitError> {
        let mut state = self.state();
        let difficulty = state.difficulty;
        let session = match state.session.as_mut() {
            None => return Err(SubmitError::NoActiveGame),
            Some(session) if session.is_over() => return Err(SubmitError::GameFinished),
            Some(session) => session,
        };

        if session.board_is_full() {
            info!("Board full without answer, retrying finish");
            return Ok(Pending::Finish {
                info: session.info().clone(),
            });
        }

        if !session.buffer_is_full() {
            return Err(SubmitError::IncompleteGuess {
                len: session.buffer.len(),
            });
        }

        if difficulty == Difficulty::Hard {
            let hints = session.hints();
            let missing = unused_hint_letters(&session.buffer, &hints.letters, &hints.positions);
            if !missing.is_empty() {
                info!(?missing, "Hard mode rejected guess");
                return Err(SubmitError::MissingHintLetters(missing));
            }
        }

        Ok(Pending::Guess {
            info: session.info().clone(),
            word: session.buffer.clone(),
        })
    }

    #[instrument(skip(self, info), fields(session_id = info.id))]
    async fn send_guess(
        &self,
        info: GameInfo,
        word: String,
    ) -> Result<SubmitOutcome, SubmitError> {
        let request = GuessRequest::new(info.id, info.key.clone(), word);
        let response = self.service.submit_guess(&request).await.map_err(|e| {
            warn!(error = %e, "Guess request failed");
            SubmitError::Service(e)
        })?;

        match response {
            GuessResponse::InvalidWord => {
                info!(guess = %request.guess, "Invalid word");
                Err(SubmitError::InvalidWord)
            }
            GuessResponse::GameOver => {
                warn!("Service reports game already over, answer unknown");
                self.update_session(|session| {
                    session.buffer.clear();
                    session.answer = Some(Answer::Unknown);
                });
                Err(SubmitError::GameAlreadyOver)
            }
            GuessResponse::Accepted(guess) => self.record_guess(&info, guess).await,
        }
    }

    async fn record_guess(
        &self,
        info: &GameInfo,
        guess: Guess,
    ) -> Result<SubmitOutcome, SubmitError> {
        let attempts = self.update_session(|session| {
            session.history.push(guess.clone());
            session.buffer.clear();
            if guess.is_winning() {
                session.answer = Some(Answer::Revealed(guess.word()));
            }
            session.history.len()
        });
        let attempts = attempts.ok_or(SubmitError::NoActiveGame)?;
        info!(guess = %guess, attempt = attempts, "Guess accepted");

        if guess.is_winning() {
            info!(attempts, "Game won");
            return Ok(SubmitOutcome::Won { guess, attempts });
        }
        if attempts >= MAX_ATTEMPTS {
            let answer = self.finish(info).await?;
            return Ok(SubmitOutcome::Lost { answer });
        }
        Ok(SubmitOutcome::Continue {
            guess,
            attempts_left: MAX_ATTEMPTS - attempts,
        })
    }

    #[instrument(skip(self, info), fields(session_id = info.id))]
    async fn finish(&self, info: &GameInfo) -> Result<String, SubmitError> {
        let finished = self
            .service
            .finish_game(&FinishRequest::from(info))
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch answer");
                SubmitError::Service(e)
            })?;

        self.update_session(|session| {
            session.answer = Some(Answer::Revealed(finished.answer.clone()));
        });
        info!(answer = %finished.answer, "Game lost, answer revealed");
        Ok(finished.answer)
    }

    /// Applies `change` to the current session and persists the result.
    fn update_session<T>(&self, change: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let (output, snapshot) = {
            let mut state = self.state();
            let session = state.session.as_mut()?;
            let output = change(session);
            (output, session.clone())
        };
        self.persist(&snapshot);
        Some(output)
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save_session(session) {
            warn!(error = %e, "Failed to persist session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FinishResponse, ServiceError};
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    struct NeverCalled;

    #[async_trait]
    impl GuessService for NeverCalled {
        async fn start_game(&self) -> Result<GameInfo, ServiceError> {
            Ok(GameInfo::new(1, "key".to_string(), 1))
        }

        async fn submit_guess(&self, _: &GuessRequest) -> Result<GuessResponse, ServiceError> {
            panic!("Guess should not reach the service");
        }

        async fn finish_game(&self, _: &FinishRequest) -> Result<FinishResponse, ServiceError> {
            panic!("Finish should not reach the service");
        }
    }

    fn controller() -> GameController {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        GameController::restore(Arc::new(NeverCalled), store).expect("Restore failed")
    }

    #[tokio::test]
    async fn test_buffer_editing() {
        let controller = controller();
        assert!(!controller.push_letter('a'), "No session yet");

        controller.start().await.expect("Start failed");
        for letter in "CRANES".chars() {
            controller.push_letter(letter);
        }
        assert_eq!(controller.snapshot().buffer, "crane");
        assert!(!controller.push_letter('1'));

        assert_eq!(controller.pop_letter(), Some('e'));
        assert_eq!(controller.snapshot().buffer, "cran");
    }

    #[tokio::test]
    async fn test_incomplete_guess_stays_local() {
        let controller = controller();
        controller.start().await.expect("Start failed");
        controller.push_letter('a');

        let err = controller.submit().await.expect_err("Should reject");
        assert_eq!(err, SubmitError::IncompleteGuess { len: 1 });
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_submit_without_game() {
        let controller = controller();
        assert_eq!(controller.submit().await, Err(SubmitError::NoActiveGame));
        assert_eq!(controller.phase(), GamePhase::NoSession);
    }

    #[tokio::test]
    async fn test_busy_rejects_before_checks() {
        let controller = controller();
        controller.start().await.expect("Start failed");
        controller.push_letter('a');
        let permit = controller.guard.try_acquire().expect("Guard free");

        assert_eq!(controller.submit().await, Err(SubmitError::Busy));
        assert_eq!(controller.start().await, Err(StartError::Busy));
        assert!(!controller.push_letter('b'));
        assert_eq!(controller.pop_letter(), None);

        drop(permit);
        assert_eq!(controller.pop_letter(), Some('a'));
    }
}
