#![no_std]

//! # Ballot Session
//!
//! One contract instance runs one voting attempt:
//!
//! - **Fixed roster**: candidates and their seed counts are supplied once at
//!   creation and never added or removed.
//! - **Single cast**: the voter may change their selection freely while the
//!   window is open, but only one confirmation is ever counted.
//! - **Countdown window**: `tick` (or `sync_clock`) drains the remaining
//!   seconds; reaching zero closes the session for good.
//! - **Live tally**: totals, per-candidate percentages and the current leader
//!   are derived from the roster on every read.
//! - **Login format checks**: national ID and password predicates used by the
//!   screen in front of the ballot.
//!
//! The host executes invocations one at a time, so the
//! check → increment → latch sequence in `cast_vote` cannot interleave with
//! a `tick`. A failed invocation leaves storage untouched.

pub mod candidate;
pub mod credentials;
pub mod events;
pub mod format;
pub mod session;
pub mod tally;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Env, String, Symbol, Vec,
};

use candidate::{find, load_roster, store_roster, validate_roster, Candidate};
use credentials::LoginError;
use format::Countdown;
use session::{BallotSession, SessionPhase};
use tally::{compute_leader, compute_percent, compute_tally, compute_totals, TallyResult};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");

const TTL_THRESHOLD: u32 = 17_280;
const TTL_EXTEND_TO: u32 = 518_400;

/// Window length offered by the voting screen: five minutes.
pub const DEFAULT_DURATION_SECS: u64 = 300;
/// Longest window a session accepts (30 days).
pub const MAX_DURATION_SECS: u64 = 2_592_000;

// ── Error codes ───────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum BallotError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    DuplicateCandidate = 4,
    TooManyCandidates = 5,
    CandidateNotFound = 6,
    NoSelection = 7,
    SessionClosed = 8,
    AlreadyCast = 9,
    EmptyCandidateSet = 10,
    VotingOpen = 11,
    VoteCountOverflow = 12,
}

// ── Public return types ───────────────────────────────────────────────────────

/// Everything the ballot screen needs to render its header and footer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub remaining_seconds: u64,
    pub remaining_formatted: String,
    pub has_cast: bool,
    pub selected: Option<String>,
    pub cast_for: Option<String>,
    pub candidate_count: u32,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct BallotSessionContract;

#[contractimpl]
impl BallotSessionContract {
    // ── Creation ──────────────────────────────────────────────────────────────

    /// Open a session over `candidates` lasting `duration_seconds`.
    ///
    /// A session cannot be re-created on the same instance. A duration of
    /// zero produces a session that is already closed.
    pub fn create_session(
        env: Env,
        candidates: Vec<Candidate>,
        duration_seconds: u64,
    ) -> Result<SessionView, BallotError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(BallotError::AlreadyInitialized);
        }
        if duration_seconds > MAX_DURATION_SECS {
            return Err(BallotError::InvalidInput);
        }
        validate_roster(&candidates)?;

        let session = BallotSession::new(duration_seconds, env.ledger().timestamp());

        store_roster(&env, &candidates);
        session::store(&env, &session);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_ttl(&env);

        events::publish_session_created(&env, candidates.len(), &session);
        if !session.is_open() {
            events::publish_session_closed(&env, &session);
        }

        Ok(Self::view(&env, &session, &candidates))
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Select `candidate_id`, or clear the selection if it is already the
    /// selected one. Returns the selection after the call.
    pub fn select_candidate(
        env: Env,
        candidate_id: String,
    ) -> Result<Option<String>, BallotError> {
        let (mut session, roster) = Self::load_state(&env)?;

        let selected = session.select(&roster, candidate_id)?;

        session::store(&env, &session);
        Self::extend_ttl(&env);
        events::publish_selection_changed(&env, &selected);

        Ok(selected)
    }

    /// Confirm the current selection and count it.
    ///
    /// Succeeds at most once per session; every later call fails with
    /// `AlreadyCast` and changes nothing.
    pub fn cast_vote(env: Env) -> Result<Candidate, BallotError> {
        let (mut session, mut roster) = Self::load_state(&env)?;

        let updated = session.cast(&mut roster)?;

        store_roster(&env, &roster);
        session::store(&env, &session);
        Self::extend_ttl(&env);
        events::publish_vote_cast(&env, &updated);

        Ok(updated)
    }

    /// Advance the countdown by one second. No-op once closed.
    pub fn tick(env: Env) -> Result<SessionPhase, BallotError> {
        let mut session = Self::load_session(&env)?;
        if !session.is_open() {
            return Ok(SessionPhase::Closed);
        }

        let closed_now = session.tick();
        session::store(&env, &session);
        Self::extend_ttl(&env);
        if closed_now {
            events::publish_session_closed(&env, &session);
        }

        Ok(session.phase)
    }

    /// Drain the countdown to match the ledger clock: the window may have at
    /// most `duration - (now - created_at)` seconds left.
    ///
    /// Seconds already removed by `tick` count towards that bound, so hosts
    /// may mix both clocks without closing the window early.
    pub fn sync_clock(env: Env) -> Result<SessionPhase, BallotError> {
        let mut session = Self::load_session(&env)?;
        let applied = session.sync_to(env.ledger().timestamp());
        if applied == 0 {
            return Ok(session.phase);
        }

        session::store(&env, &session);
        Self::extend_ttl(&env);
        events::publish_clock_synced(&env, applied, session.remaining_seconds);
        if !session.is_open() {
            events::publish_session_closed(&env, &session);
        }

        Ok(session.phase)
    }

    // ── Session views ─────────────────────────────────────────────────────────

    pub fn get_session(env: Env) -> Result<SessionView, BallotError> {
        let (session, roster) = Self::load_state(&env)?;
        Ok(Self::view(&env, &session, &roster))
    }

    pub fn get_phase(env: Env) -> Result<SessionPhase, BallotError> {
        Ok(Self::load_session(&env)?.phase)
    }

    pub fn get_remaining_seconds(env: Env) -> Result<u64, BallotError> {
        Ok(Self::load_session(&env)?.remaining_seconds)
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_formatted(env: Env) -> Result<String, BallotError> {
        let session = Self::load_session(&env)?;
        Ok(format::remaining_formatted(&env, session.remaining_seconds))
    }

    pub fn get_countdown(env: Env) -> Result<Countdown, BallotError> {
        Ok(format::countdown(Self::load_session(&env)?.remaining_seconds))
    }

    pub fn has_cast(env: Env) -> Result<bool, BallotError> {
        Ok(Self::load_session(&env)?.has_cast)
    }

    pub fn get_selected(env: Env) -> Result<Option<String>, BallotError> {
        Ok(Self::load_session(&env)?.selected)
    }

    pub fn get_candidates(env: Env) -> Result<Vec<Candidate>, BallotError> {
        let (_, roster) = Self::load_state(&env)?;
        Ok(roster)
    }

    pub fn get_candidate(env: Env, candidate_id: String) -> Result<Candidate, BallotError> {
        let (_, roster) = Self::load_state(&env)?;
        find(&roster, &candidate_id).ok_or(BallotError::CandidateNotFound)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Tally views ───────────────────────────────────────────────────────────

    pub fn get_tally(env: Env) -> Result<TallyResult, BallotError> {
        let (_, roster) = Self::load_state(&env)?;
        Ok(compute_tally(&env, &roster))
    }

    pub fn get_total_votes(env: Env) -> Result<u64, BallotError> {
        let (_, roster) = Self::load_state(&env)?;
        Ok(compute_totals(&roster))
    }

    pub fn get_percent(env: Env, candidate_id: String) -> Result<u32, BallotError> {
        let (_, roster) = Self::load_state(&env)?;
        let candidate = find(&roster, &candidate_id).ok_or(BallotError::CandidateNotFound)?;
        Ok(compute_percent(&candidate, compute_totals(&roster)))
    }

    /// Current front-runner; may change while the session is open.
    pub fn get_leader(env: Env) -> Result<Candidate, BallotError> {
        let (_, roster) = Self::load_state(&env)?;
        compute_leader(&roster)
    }

    /// Final result. Only available once the session has closed.
    pub fn get_winner(env: Env) -> Result<Candidate, BallotError> {
        let (session, roster) = Self::load_state(&env)?;
        if session.is_open() {
            return Err(BallotError::VotingOpen);
        }
        compute_leader(&roster)
    }

    /// `1250` → `"1.3K"`, as shown next to each candidate.
    pub fn format_vote_count(env: Env, count: u64) -> String {
        format::compact_vote_count(&env, count)
    }

    // ── Login format checks ───────────────────────────────────────────────────

    pub fn check_national_id(_env: Env, national_id: String) -> bool {
        credentials::national_id_ok(&national_id)
    }

    pub fn check_password(_env: Env, password: String) -> bool {
        credentials::password_ok(&password)
    }

    pub fn check_login(
        _env: Env,
        national_id: String,
        password: String,
    ) -> Result<(), LoginError> {
        credentials::check_login(&national_id, &password)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn load_session(env: &Env) -> Result<BallotSession, BallotError> {
        session::load(env).ok_or(BallotError::NotInitialized)
    }

    fn load_state(env: &Env) -> Result<(BallotSession, Vec<Candidate>), BallotError> {
        let session = Self::load_session(env)?;
        Ok((session, load_roster(env)))
    }

    fn view(env: &Env, session: &BallotSession, roster: &Vec<Candidate>) -> SessionView {
        SessionView {
            phase: session.phase.clone(),
            remaining_seconds: session.remaining_seconds,
            remaining_formatted: format::remaining_formatted(env, session.remaining_seconds),
            has_cast: session.has_cast,
            selected: session.selected.clone(),
            cast_for: session.cast_for.clone(),
            candidate_count: roster.len(),
        }
    }

    fn extend_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
