//! # Ballot Session Testing Framework
//!
//! Reusable harness for driving the ballot session contract through
//! property-based tests, invariant checks, state exploration and a
//! declarative scenario DSL.
//!
//! ## Layout
//!
//! ```text
//! test/framework/
//! ├── mod.rs             Core TestEnv, BallotHarness, snapshots
//! ├── generators.rs      proptest strategies for rosters and actions
//! ├── invariants.rs      State and transition invariants
//! ├── state_explorer.rs  Action-sequence exploration with coverage
//! └── scenario_dsl.rs    Given/When/Then scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{BallotHarness, TestEnv};
//!
//! let env = TestEnv::new();
//! let harness = BallotHarness::with_sample_roster(&env, 300);
//! harness.select("c2");
//! harness.cast();
//! assert!(harness.has_cast());
//! ```

extern crate std;


use ballot_session::{
    candidate::Candidate,
    session::SessionPhase,
    tally::TallyResult,
    BallotSessionContract, BallotSessionContractClient,
};
use soroban_sdk::{testutils::Ledger as _, Address, Env, String, Vec};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with ledger-time control.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            env: Env::default(),
        }
    }

    /// Set the ledger timestamp.
    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn str(&self, value: &str) -> String {
        String::from_str(&self.env, value)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Roster Fixtures ──────────────────────────────────────────────────────────

/// Plain description of a candidate, turned into a contract `Candidate` when
/// a harness is built. Keeps generators free of an `Env`.
#[derive(Debug, Clone)]
pub struct CandidateFixture {
    pub id: std::string::String,
    pub display_name: std::string::String,
    pub party_code: std::string::String,
    pub vote_count: u64,
}

impl CandidateFixture {
    pub fn new(id: &str, party_code: &str, vote_count: u64) -> Self {
        Self {
            id: id.into(),
            display_name: std::format!("Candidate {}", id),
            party_code: party_code.into(),
            vote_count,
        }
    }

    pub fn to_candidate(&self, env: &Env) -> Candidate {
        Candidate::new(
            env,
            &self.id,
            &self.display_name,
            &std::format!("Party {}", self.party_code),
            &self.party_code,
            self.vote_count,
        )
    }
}

/// The four-party roster the voting screen ships with.
pub fn sample_roster() -> std::vec::Vec<CandidateFixture> {
    std::vec![
        CandidateFixture::new("c1", "MPLA", 1_250),
        CandidateFixture::new("c2", "UNITA", 24_000),
        CandidateFixture::new("c3", "FNLA", 900_000),
        CandidateFixture::new("c4", "PRA-JÁ", 0),
    ]
}

pub fn to_roster(env: &Env, fixtures: &[CandidateFixture]) -> Vec<Candidate> {
    let mut roster = Vec::new(env);
    for fixture in fixtures {
        roster.push_back(fixture.to_candidate(env));
    }
    roster
}

// ── Ballot Harness ───────────────────────────────────────────────────────────

/// A registered ballot session contract with a created session.
pub struct BallotHarness<'a> {
    pub env: &'a TestEnv,
    pub client: BallotSessionContractClient<'static>,
    pub contract_id: Address,
    /// Candidate ids in roster order.
    pub candidate_ids: std::vec::Vec<std::string::String>,
    /// Sum of seed counts at creation.
    pub seeded_total: u64,
    pub duration_seconds: u64,
}

impl<'a> BallotHarness<'a> {
    /// Register the contract and create a session over `roster`.
    pub fn new(env: &'a TestEnv, roster: &[CandidateFixture], duration_seconds: u64) -> Self {
        let contract_id = env.env.register(BallotSessionContract, ());
        let client = BallotSessionContractClient::new(&env.env, &contract_id);

        client.create_session(&to_roster(&env.env, roster), &duration_seconds);

        Self {
            env,
            client,
            contract_id,
            candidate_ids: roster.iter().map(|c| c.id.clone()).collect(),
            seeded_total: roster.iter().map(|c| c.vote_count).sum(),
            duration_seconds,
        }
    }

    pub fn with_sample_roster(env: &'a TestEnv, duration_seconds: u64) -> Self {
        Self::new(env, &sample_roster(), duration_seconds)
    }

    /// Id of the candidate at `index`, wrapping around the roster.
    pub fn candidate_id(&self, index: usize) -> &str {
        &self.candidate_ids[index % self.candidate_ids.len()]
    }

    pub fn select(&self, id: &str) -> Option<String> {
        self.client.select_candidate(&self.env.str(id))
    }

    pub fn cast(&self) -> Candidate {
        self.client.cast_vote()
    }

    pub fn tick(&self) -> SessionPhase {
        self.client.tick()
    }

    /// Call `tick` `n` times.
    pub fn tick_n(&self, n: u64) -> SessionPhase {
        let mut phase = self.client.get_phase();
        for _ in 0..n {
            phase = self.tick();
        }
        phase
    }

    pub fn remaining(&self) -> u64 {
        self.client.get_remaining_seconds()
    }

    pub fn has_cast(&self) -> bool {
        self.client.has_cast()
    }

    pub fn total_votes(&self) -> u64 {
        self.client.get_total_votes()
    }

    pub fn tally(&self) -> TallyResult {
        self.client.get_tally()
    }

    pub fn vote_count(&self, id: &str) -> u64 {
        self.client.get_candidate(&self.env.str(id)).vote_count
    }

    /// Snapshot of all observable session state for invariant checking.
    pub fn snapshot(&self) -> BallotSnapshot {
        let view = self.client.get_session();
        let tally = self.tally();
        let vote_counts = self
            .candidate_ids
            .iter()
            .map(|id| (id.clone(), self.vote_count(id)))
            .collect();
        let percents = tally.entries.iter().map(|e| e.percent).collect();

        BallotSnapshot {
            timestamp: self.env.timestamp(),
            phase: view.phase,
            duration_seconds: self.duration_seconds,
            remaining_seconds: view.remaining_seconds,
            has_cast: view.has_cast,
            selected: view.selected.map(|s| rust_string(&s)),
            cast_for: view.cast_for.map(|s| rust_string(&s)),
            seeded_total: self.seeded_total,
            total_votes: tally.total_votes,
            vote_counts,
            percents,
        }
    }
}

/// Copy a short ASCII/UTF-8 Soroban `String` into a host string.
pub fn rust_string(value: &String) -> std::string::String {
    let mut buf = [0u8; 64];
    let len = value.len() as usize;
    value.copy_into_slice(&mut buf[..len]);
    std::string::String::from_utf8_lossy(&buf[..len]).into_owned()
}

/// Immutable snapshot of ballot session state at a point in time.
#[derive(Debug, Clone)]
pub struct BallotSnapshot {
    pub timestamp: u64,
    pub phase: SessionPhase,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    pub has_cast: bool,
    pub selected: Option<std::string::String>,
    pub cast_for: Option<std::string::String>,
    pub seeded_total: u64,
    pub total_votes: u64,
    pub vote_counts: std::vec::Vec<(std::string::String, u64)>,
    pub percents: std::vec::Vec<u32>,
}

impl BallotSnapshot {
    pub fn is_open(&self) -> bool {
        self.phase == SessionPhase::Open
    }

    pub fn sum_vote_counts(&self) -> u64 {
        self.vote_counts.iter().map(|(_, c)| c).sum()
    }

    pub fn count_of(&self, id: &str) -> Option<u64> {
        self.vote_counts
            .iter()
            .find(|(cid, _)| cid == id)
            .map(|(_, c)| *c)
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer and scenario DSL.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Ok,
    /// The contract rejected the action with this error code.
    ExpectedError(u32),
    UnexpectedError(std::string::String),
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    pub transitions_observed: usize,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            transitions_observed: 0,
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
