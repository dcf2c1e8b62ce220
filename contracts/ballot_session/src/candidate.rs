//! Candidate roster: the fixed list of choices offered by a session.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::BallotError;

// ── Storage keys ─────────────────────────────────────────────────────────────

pub(crate) const ROSTER: Symbol = symbol_short!("ROSTER");

/// Upper bound on roster size.
pub const MAX_CANDIDATES: u32 = 32;

// ── Types ─────────────────────────────────────────────────────────────────────

/// One entry on the ballot.
///
/// Everything except `vote_count` is fixed at session creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub display_name: String,
    pub party_name: String,
    /// Party acronym, e.g. `"MPLA"`.
    pub party_code: String,
    /// Hex colour used for the candidate's tally bar.
    pub party_color: String,
    /// Free-text programme shown on the details view.
    pub manifesto: String,
    /// Seed value at creation; only `cast_vote` increments it afterwards.
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(
        env: &Env,
        id: &str,
        display_name: &str,
        party_name: &str,
        party_code: &str,
        vote_count: u64,
    ) -> Self {
        Self {
            id: String::from_str(env, id),
            display_name: String::from_str(env, display_name),
            party_name: String::from_str(env, party_name),
            party_code: String::from_str(env, party_code),
            party_color: String::from_str(env, ""),
            manifesto: String::from_str(env, ""),
            vote_count,
        }
    }

    pub fn with_presentation(mut self, env: &Env, party_color: &str, manifesto: &str) -> Self {
        self.party_color = String::from_str(env, party_color);
        self.manifesto = String::from_str(env, manifesto);
        self
    }
}

// ── Roster rules ──────────────────────────────────────────────────────────────

/// Check a roster before it is stored.
///
/// Ids must be non-empty and unique. An empty roster is accepted: the
/// session still runs its clock, and the tally reports no leader.
pub fn validate_roster(roster: &Vec<Candidate>) -> Result<(), BallotError> {
    if roster.len() > MAX_CANDIDATES {
        return Err(BallotError::TooManyCandidates);
    }

    for (i, candidate) in roster.iter().enumerate() {
        if candidate.id.len() == 0 {
            return Err(BallotError::InvalidInput);
        }
        for other in roster.iter().skip(i + 1) {
            if other.id == candidate.id {
                return Err(BallotError::DuplicateCandidate);
            }
        }
    }

    Ok(())
}

/// Position of `id` in the roster.
pub fn find_index(roster: &Vec<Candidate>, id: &String) -> Option<u32> {
    roster
        .iter()
        .position(|c| c.id == *id)
        .map(|i| i as u32)
}

pub fn find(roster: &Vec<Candidate>, id: &String) -> Option<Candidate> {
    find_index(roster, id).and_then(|i| roster.get(i))
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn store_roster(env: &Env, roster: &Vec<Candidate>) {
    env.storage().instance().set(&ROSTER, roster);
}

pub(crate) fn load_roster(env: &Env) -> Vec<Candidate> {
    env.storage()
        .instance()
        .get(&ROSTER)
        .unwrap_or(Vec::new(env))
}
