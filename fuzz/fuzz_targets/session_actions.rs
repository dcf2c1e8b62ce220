#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Ledger as _, Env, String, Vec};

use ballot_session::{
    candidate::Candidate, session::SessionPhase, BallotError, BallotSessionContract,
    BallotSessionContractClient,
};

const IDS: [&str; 4] = ["c1", "c2", "c3", "c4"];

#[derive(Arbitrary, Debug)]
pub struct SessionInput {
    seeds: [u32; 4],
    roster_len: u8,
    duration: u8,
    actions: std::vec::Vec<FuzzAction>,
}

/// Every state-changing entry point, plus ledger time jumps for `sync_clock`.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Select { index: u8 },
    SelectUnknown,
    Cast,
    Tick,
    SyncClock { elapsed: u8 },
}

fuzz_target!(|input: SessionInput| {
    let env = Env::default();
    let contract_id = env.register(BallotSessionContract, ());
    let client = BallotSessionContractClient::new(&env, &contract_id);

    let len = (input.roster_len as usize % IDS.len()) + 1;
    let mut roster = Vec::new(&env);
    for i in 0..len {
        roster.push_back(Candidate::new(&env, IDS[i], "Name", "Party", "P", input.seeds[i] as u64));
    }
    let seeded_total: u64 = input.seeds[..len].iter().map(|s| *s as u64).sum();
    let duration = input.duration as u64;

    if client.try_create_session(&roster, &duration).is_err() {
        return;
    }

    let mut remaining = client.get_remaining_seconds();
    let mut cast_for: Option<String> = None;

    for action in input.actions {
        match action {
            FuzzAction::Select { index } => {
                let id = String::from_str(&env, IDS[index as usize % len]);
                let _ = client.try_select_candidate(&id);
            }
            FuzzAction::SelectUnknown => {
                let id = String::from_str(&env, "unknown");
                let result = client.try_select_candidate(&id);
                assert!(result.is_err());
            }
            FuzzAction::Cast => {
                let result = client.try_cast_vote();
                if cast_for.is_some() {
                    assert_eq!(result, Err(Ok(BallotError::AlreadyCast)));
                } else if let Ok(Ok(candidate)) = result {
                    cast_for = Some(candidate.id);
                }
            }
            FuzzAction::Tick => {
                let _ = client.try_tick();
            }
            FuzzAction::SyncClock { elapsed } => {
                env.ledger().with_mut(|li| li.timestamp += elapsed as u64);
                let _ = client.try_sync_clock();
            }
        }

        // ── Invariants checked after every action ──
        let now = client.get_remaining_seconds();
        assert!(now <= remaining, "countdown increased: {} -> {}", remaining, now);
        assert_eq!(client.get_phase() == SessionPhase::Closed, now == 0);
        remaining = now;

        let total = client.get_total_votes();
        let expected = seeded_total + u64::from(cast_for.is_some());
        assert_eq!(total, expected, "vote total drifted");
        assert_eq!(client.get_session().cast_for, cast_for);

        for entry in client.get_tally().entries.iter() {
            assert!(entry.percent <= 100);
        }
    }
});
