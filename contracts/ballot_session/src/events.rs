#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

//! Structured event publishing for the ballot session contract.

use soroban_sdk::{symbol_short, Env, String};

use crate::candidate::Candidate;
use crate::session::BallotSession;

pub fn publish_session_created(env: &Env, candidate_count: u32, session: &BallotSession) {
    env.events().publish(
        (symbol_short!("SES_NEW"),),
        (candidate_count, session.duration_seconds),
    );
}

pub fn publish_selection_changed(env: &Env, selected: &Option<String>) {
    env.events()
        .publish((symbol_short!("SELECT"),), selected.clone());
}

pub fn publish_vote_cast(env: &Env, candidate: &Candidate) {
    env.events().publish(
        (symbol_short!("VOTE_CST"), candidate.id.clone()),
        candidate.vote_count,
    );
}

pub fn publish_session_closed(env: &Env, session: &BallotSession) {
    env.events().publish(
        (symbol_short!("SES_CLS"),),
        (session.duration_seconds, session.has_cast),
    );
}

pub fn publish_clock_synced(env: &Env, applied: u64, remaining: u64) {
    env.events()
        .publish((symbol_short!("CLK_SYNC"),), (applied, remaining));
}
