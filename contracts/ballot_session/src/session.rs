//! Voting-window state machine.
//!
//! ```text
//!   Open ──(remaining_seconds reaches 0)──► Closed
//! ```
//!
//! There is no edge back to `Open`. `has_cast` is a separate one-shot
//! latch: it flips to `true` on the first successful cast and stays there.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::candidate::{find_index, Candidate};
use crate::BallotError;

// ── Storage keys ─────────────────────────────────────────────────────────────

pub(crate) const SESSION: Symbol = symbol_short!("SESSION");

// ── Types ─────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionPhase {
    Open,
    Closed,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BallotSession {
    pub phase: SessionPhase,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    pub has_cast: bool,
    /// Current, not yet confirmed, choice.
    pub selected: Option<String>,
    /// Candidate that received this session's vote.
    pub cast_for: Option<String>,
    /// Ledger timestamp at creation; `sync_clock` measures from here.
    pub created_at: u64,
}

impl BallotSession {
    /// A zero-length window starts out closed.
    pub fn new(duration_seconds: u64, now: u64) -> Self {
        let phase = if duration_seconds == 0 {
            SessionPhase::Closed
        } else {
            SessionPhase::Open
        };
        Self {
            phase,
            duration_seconds,
            remaining_seconds: duration_seconds,
            has_cast: false,
            selected: None,
            cast_for: None,
            created_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, SessionPhase::Open)
    }

    /// One clock second. Returns `true` only on the tick that closes the
    /// window.
    pub fn tick(&mut self) -> bool {
        self.advance(1) > 0 && !self.is_open()
    }

    /// Apply up to `seconds` ticks at once and return how many were applied.
    pub fn advance(&mut self, seconds: u64) -> u64 {
        if !self.is_open() {
            return 0;
        }
        let applied = seconds.min(self.remaining_seconds);
        self.remaining_seconds -= applied;
        if self.remaining_seconds == 0 {
            self.phase = SessionPhase::Closed;
        }
        applied
    }

    /// Bring `remaining_seconds` down to what the ledger clock allows at
    /// `now`. Never adds time back, so seconds already drained by `tick`
    /// are not drained again. Returns how many seconds were applied.
    pub fn sync_to(&mut self, now: u64) -> u64 {
        let elapsed = now.saturating_sub(self.created_at);
        let allowed = self.duration_seconds.saturating_sub(elapsed);
        self.advance(self.remaining_seconds.saturating_sub(allowed))
    }

    /// Toggle the selection. Picking the current choice again clears it.
    pub fn select(
        &mut self,
        roster: &Vec<Candidate>,
        id: String,
    ) -> Result<Option<String>, BallotError> {
        if self.has_cast {
            return Err(BallotError::AlreadyCast);
        }
        if !self.is_open() {
            return Err(BallotError::SessionClosed);
        }
        if find_index(roster, &id).is_none() {
            return Err(BallotError::CandidateNotFound);
        }

        self.selected = match &self.selected {
            Some(current) if *current == id => None,
            _ => Some(id),
        };
        Ok(self.selected.clone())
    }

    /// Confirm the current selection.
    ///
    /// The latch is checked first so a repeated confirmation reports
    /// `AlreadyCast` even though the selection was cleared by the first one.
    /// Nothing is written unless every check passes.
    pub fn cast(&mut self, roster: &mut Vec<Candidate>) -> Result<Candidate, BallotError> {
        if self.has_cast {
            return Err(BallotError::AlreadyCast);
        }
        let selected = self.selected.clone().ok_or(BallotError::NoSelection)?;
        if !self.is_open() {
            return Err(BallotError::SessionClosed);
        }

        let index = find_index(roster, &selected).ok_or(BallotError::CandidateNotFound)?;
        let mut candidate = roster.get(index).ok_or(BallotError::CandidateNotFound)?;
        candidate.vote_count = candidate
            .vote_count
            .checked_add(1)
            .ok_or(BallotError::VoteCountOverflow)?;

        roster.set(index, candidate.clone());
        self.has_cast = true;
        self.cast_for = Some(selected);
        self.selected = None;

        Ok(candidate)
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn store(env: &Env, session: &BallotSession) {
    env.storage().instance().set(&SESSION, session);
}

pub(crate) fn load(env: &Env) -> Option<BallotSession> {
    env.storage().instance().get(&SESSION)
}
