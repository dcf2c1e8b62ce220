//! Read-side tally computation.
//!
//! Everything here is a pure function of the roster: no storage access,
//! no events. Percentages are rounded half-up per candidate, so a tally
//! may add up to 99 or 101.

use soroban_sdk::{contracttype, Env, String, Vec};

use crate::candidate::Candidate;
use crate::BallotError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TallyEntry {
    pub candidate_id: String,
    pub vote_count: u64,
    /// 0–100.
    pub percent: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TallyResult {
    pub total_votes: u64,
    /// One entry per candidate, in roster order.
    pub entries: Vec<TallyEntry>,
    /// `None` only for an empty roster.
    pub leader: Option<String>,
}

/// Sum of all vote counts, saturating at `u64::MAX`.
pub fn compute_totals(candidates: &Vec<Candidate>) -> u64 {
    candidates
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.vote_count))
}

/// `round_half_up(count * 100 / total)`, or 0 when nothing has been counted.
pub fn percent_of(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let total = total as u128;
    let pct = (count as u128 * 200 + total) / (2 * total);
    pct.min(100) as u32
}

pub fn compute_percent(candidate: &Candidate, total_votes: u64) -> u32 {
    percent_of(candidate.vote_count, total_votes)
}

/// Candidate with the most votes. Ties go to the earliest in roster order.
pub fn compute_leader(candidates: &Vec<Candidate>) -> Result<Candidate, BallotError> {
    let mut leader: Option<Candidate> = None;
    for candidate in candidates.iter() {
        match &leader {
            Some(best) if candidate.vote_count <= best.vote_count => {}
            _ => leader = Some(candidate),
        }
    }
    leader.ok_or(BallotError::EmptyCandidateSet)
}

pub fn compute_tally(env: &Env, candidates: &Vec<Candidate>) -> TallyResult {
    let total_votes = compute_totals(candidates);

    let mut entries = Vec::new(env);
    for candidate in candidates.iter() {
        entries.push_back(TallyEntry {
            percent: compute_percent(&candidate, total_votes),
            candidate_id: candidate.id,
            vote_count: candidate.vote_count,
        });
    }

    TallyResult {
        total_votes,
        entries,
        leader: compute_leader(candidates).ok().map(|c| c.id),
    }
}
