//! Session state machine for a single pass over a deck.
//! Tracks card position, known/unknown counters, the one-step-back rule and
//! the stopwatch. The window only renders `SessionView` and feeds `Intent`s back.

use super::session_result::{SessionResult, summarize};
use super::stopwatch::Stopwatch;
use super::{CardEntry, Deck};
use rand::rngs::StdRng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("deck '{0}' is empty")]
    EmptyDeck(String),
}

/// User actions the session understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    MarkKnown,
    MarkUnknown,
    StepBack,
    StepForward,
    ToggleTranslation,
    StartTimer,
    ShuffleAndRestart,
    DismissResults,
    Quit,
}

/// What the host should do after an intent was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// One-level undo: after a step back the user must step forward again
/// before marking anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepState {
    #[default]
    CanGoBack,
    MustGoForward,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Presenting,
    Results(SessionResult),
}

/// Everything the window needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub deck_name: String,
    pub current_term: Option<String>,
    pub translation_visible: bool,
    pub translation_text: Option<String>,
    pub opened_count: usize,
    pub total_count: usize,
    pub known_count: usize,
    pub unknown_count: usize,
    pub stopwatch_seconds: Option<f64>,
    pub can_mark: bool,
    pub can_step_back: bool,
    pub can_step_forward: bool,
    pub results: Option<SessionResult>,
}

pub struct Session {
    deck: Deck,
    // Number of cards opened so far; the current card is `deck[position - 1]`.
    position: usize,
    known: usize,
    unknown: usize,
    step: StepState,
    translation_visible: bool,
    stopwatch: Stopwatch,
    phase: Phase,
    rng: StdRng,
}

impl Session {
    /// Starts a session over `deck` in the given order and opens the first card.
    pub fn new(deck: Deck, rng: StdRng) -> Result<Self, SessionError> {
        if deck.is_empty() {
            return Err(SessionError::EmptyDeck(deck.name));
        }
        let mut session = Self {
            deck,
            position: 0,
            known: 0,
            unknown: 0,
            step: StepState::CanGoBack,
            translation_visible: false,
            stopwatch: Stopwatch::new(),
            phase: Phase::Presenting,
            rng,
        };
        session.advance();
        Ok(session)
    }

    /// Shuffles `deck` first, then starts the session.
    pub fn start_shuffled(deck: Deck, mut rng: StdRng) -> Result<Self, SessionError> {
        let deck = deck.shuffled(&mut rng);
        Self::new(deck, rng)
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn known_count(&self) -> usize {
        self.known
    }

    pub fn unknown_count(&self) -> usize {
        self.unknown
    }

    pub fn step_state(&self) -> StepState {
        self.step
    }

    pub fn translation_visible(&self) -> bool {
        self.translation_visible
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self.phase, Phase::Presenting)
    }

    pub fn result(&self) -> Option<&SessionResult> {
        match &self.phase {
            Phase::Results(result) => Some(result),
            Phase::Presenting => None,
        }
    }

    pub fn current_card(&self) -> Option<&CardEntry> {
        if !self.is_presenting() {
            return None;
        }
        self.position
            .checked_sub(1)
            .and_then(|index| self.deck.get(index))
    }

    fn can_mark(&self) -> bool {
        self.is_presenting() && self.step == StepState::CanGoBack
    }

    fn can_step_back(&self) -> bool {
        self.is_presenting() && self.step == StepState::CanGoBack && self.position > 1
    }

    fn can_step_forward(&self) -> bool {
        self.is_presenting() && self.step == StepState::MustGoForward
    }

    /// Dispatches an intent. Intents that are not valid in the current state
    /// are ignored.
    pub fn apply(&mut self, intent: Intent) -> Control {
        let applied = match intent {
            Intent::MarkKnown => self.mark_known(),
            Intent::MarkUnknown => self.mark_unknown(),
            Intent::StepBack => self.step_back(),
            Intent::StepForward => self.step_forward(),
            Intent::ToggleTranslation => self.toggle_translation(),
            Intent::StartTimer => self.start_timer(),
            Intent::ShuffleAndRestart => {
                self.shuffle_and_restart();
                true
            }
            Intent::DismissResults => self.dismiss_results(),
            Intent::Quit => return Control::Quit,
        };
        if !applied {
            log::trace!("Ignoring {:?} at position {}", intent, self.position);
        }
        Control::Continue
    }

    /// Opens the next card, or moves to the results once the deck is exhausted.
    fn advance(&mut self) {
        if !self.is_presenting() {
            return;
        }
        if self.position < self.deck.len() {
            self.translation_visible = false;
            self.position += 1;
        } else {
            self.stopwatch.stop();
            let result = summarize(self);
            log::debug!(
                "Session finished: {} shown, {} known, {} unknown",
                result.cards_shown,
                result.known,
                result.unknown
            );
            self.phase = Phase::Results(result);
        }
    }

    pub fn mark_known(&mut self) -> bool {
        if !self.can_mark() {
            return false;
        }
        self.known += 1;
        self.advance();
        true
    }

    pub fn mark_unknown(&mut self) -> bool {
        if !self.can_mark() {
            return false;
        }
        self.unknown += 1;
        self.advance();
        true
    }

    /// Goes back to the previously opened card. Only one step is allowed,
    /// and marking stays disabled until `step_forward`.
    pub fn step_back(&mut self) -> bool {
        if !self.can_step_back() {
            return false;
        }
        self.position -= 2;
        self.step = StepState::MustGoForward;
        self.advance();
        true
    }

    pub fn step_forward(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.advance();
        self.step = StepState::CanGoBack;
        true
    }

    pub fn toggle_translation(&mut self) -> bool {
        if !self.is_presenting() {
            return false;
        }
        self.translation_visible = !self.translation_visible;
        true
    }

    pub fn start_timer(&mut self) -> bool {
        if !self.is_presenting() || self.stopwatch.was_started() {
            return false;
        }
        self.stopwatch.start();
        true
    }

    /// Reshuffles the deck and starts over from the first card.
    pub fn shuffle_and_restart(&mut self) {
        self.deck = self.deck.shuffled(&mut self.rng);
        self.position = 0;
        self.known = 0;
        self.unknown = 0;
        self.step = StepState::CanGoBack;
        self.translation_visible = false;
        self.stopwatch.reset();
        self.phase = Phase::Presenting;
        log::debug!("Restarting session with {} cards", self.deck.len());
        self.advance();
    }

    pub fn dismiss_results(&mut self) -> bool {
        if self.is_presenting() {
            return false;
        }
        self.shuffle_and_restart();
        true
    }

    pub fn view(&self) -> SessionView {
        let card = self.current_card();
        SessionView {
            deck_name: self.deck.name.clone(),
            current_term: card.map(|c| c.term.clone()),
            translation_visible: self.translation_visible,
            translation_text: card
                .filter(|_| self.translation_visible)
                .map(|c| c.translation.clone()),
            opened_count: self.position,
            total_count: self.deck.len(),
            known_count: self.known,
            unknown_count: self.unknown,
            stopwatch_seconds: self.stopwatch.sample().map(|d| d.as_secs_f64()),
            can_mark: self.can_mark(),
            can_step_back: self.can_step_back(),
            can_step_forward: self.can_step_forward(),
            results: self.result().cloned(),
        }
    }
}
