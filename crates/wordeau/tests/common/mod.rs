//! Shared test doubles for the guess service.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use wordeau::{
    FinishRequest, FinishResponse, GameController, GameInfo, Guess, GuessRequest, GuessResponse,
    GuessService, LetterState, MemoryStore, ServiceError, SessionStore,
};

/// Words the fake service accepts.
pub const DICTIONARY: &[&str] = &[
    "abide", "crane", "eerie", "plumb", "fuzzy", "world", "tight", "slate", "aside",
];

/// Scores `word` against `secret` with the usual two-pass rules.
pub fn evaluate(secret: &str, word: &str) -> Guess {
    let secret: Vec<char> = secret.chars().collect();
    let letters: Vec<char> = word.chars().collect();
    let mut states = [LetterState::Absent; 5];
    let mut remaining: Vec<Option<char>> = secret.iter().copied().map(Some).collect();

    for i in 0..5 {
        if letters[i] == secret[i] {
            states[i] = LetterState::Correct;
            remaining[i] = None;
        }
    }
    for i in 0..5 {
        if states[i] == LetterState::Correct {
            continue;
        }
        if let Some(j) = remaining.iter().position(|c| *c == Some(letters[i])) {
            states[i] = LetterState::Present;
            remaining[j] = None;
        }
    }
    Guess::from_word(word, states).expect("Valid guess")
}

/// Calls seen by the fake service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub start: usize,
    pub guess: usize,
    pub finish: usize,
}

/// In-process guess service with a fixed secret word.
pub struct FakeService {
    secret: String,
    next_id: AtomicU64,
    calls: Mutex<Calls>,
    pub fail_start: AtomicBool,
    pub fail_finish: AtomicBool,
    pub report_game_over: AtomicBool,
    pub gate: Option<Arc<Notify>>,
    pub start_gate: Option<Arc<Notify>>,
}

impl FakeService {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            next_id: AtomicU64::new(1),
            calls: Mutex::new(Calls::default()),
            fail_start: AtomicBool::new(false),
            fail_finish: AtomicBool::new(false),
            report_game_over: AtomicBool::new(false),
            gate: None,
            start_gate: None,
        }
    }

    /// Holds every guess until the returned handle is notified.
    pub fn gated(secret: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut service = Self::new(secret);
        service.gate = Some(gate.clone());
        (service, gate)
    }

    /// Holds every start call until the returned handle is notified.
    pub fn gated_start(secret: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut service = Self::new(secret);
        service.start_gate = Some(gate.clone());
        (service, gate)
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl GuessService for FakeService {
    async fn start_game(&self) -> Result<GameInfo, ServiceError> {
        self.calls.lock().unwrap().start += 1;
        if let Some(gate) = &self.start_gate {
            gate.notified().await;
        }
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(ServiceError::Transport("connection refused".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(GameInfo::new(id, format!("key-{}", id), 99))
    }

    async fn submit_guess(&self, request: &GuessRequest) -> Result<GuessResponse, ServiceError> {
        self.calls.lock().unwrap().guess += 1;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.report_game_over.load(Ordering::SeqCst) {
            return Ok(GuessResponse::GameOver);
        }
        if !DICTIONARY.contains(&request.guess.as_str()) {
            return Ok(GuessResponse::InvalidWord);
        }
        Ok(GuessResponse::Accepted(evaluate(&self.secret, &request.guess)))
    }

    async fn finish_game(&self, _request: &FinishRequest) -> Result<FinishResponse, ServiceError> {
        self.calls.lock().unwrap().finish += 1;
        if self.fail_finish.load(Ordering::SeqCst) {
            return Err(ServiceError::UnexpectedStatus {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(FinishResponse::new(self.secret.clone()))
    }
}

/// Builds a controller over a fresh in-memory store.
pub fn controller(service: Arc<FakeService>) -> (GameController, Arc<MemoryStore>) {
    let raw = Arc::new(MemoryStore::new());
    let store = SessionStore::new(raw.clone());
    let controller = GameController::restore(service, store).expect("Restore failed");
    (controller, raw)
}

/// Types a word into the buffer.
pub fn type_word(controller: &GameController, word: &str) {
    while controller.pop_letter().is_some() {}
    for letter in word.chars() {
        controller.push_letter(letter);
    }
}
