//! Display helpers for countdowns and vote counts.
//!
//! Text is assembled in fixed stack buffers and only then copied into a
//! Soroban `String`.

use soroban_sdk::{contracttype, Env, String};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// Large enough for `u64::MAX` digits plus separator and suffix.
pub const TEXT_BUF_LEN: usize = 32;

/// Remaining time split for a days/hours/minutes/seconds display.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Countdown {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

pub fn countdown(remaining_seconds: u64) -> Countdown {
    Countdown {
        days: remaining_seconds / SECS_PER_DAY,
        hours: ((remaining_seconds % SECS_PER_DAY) / SECS_PER_HOUR) as u32,
        minutes: ((remaining_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE) as u32,
        seconds: (remaining_seconds % SECS_PER_MINUTE) as u32,
    }
}

/// Write `value` in decimal at `buf[pos..]`, left-padded with zeros to
/// `min_width`. Returns the position after the last digit.
fn write_decimal(value: u64, min_width: usize, buf: &mut [u8; TEXT_BUF_LEN], pos: usize) -> usize {
    let mut digits = [0u8; 20];
    let mut n = value;
    let mut len = 0usize;
    loop {
        digits[len] = b'0' + (n % 10) as u8;
        len += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    let mut out = pos;
    for _ in len..min_width {
        buf[out] = b'0';
        out += 1;
    }
    for i in (0..len).rev() {
        buf[out] = digits[i];
        out += 1;
    }
    out
}

/// `MM:SS`, each part zero-padded to two digits. Minutes are not wrapped
/// into hours, so 6 000 seconds prints as `100:00`.
pub fn write_mm_ss(remaining_seconds: u64, buf: &mut [u8; TEXT_BUF_LEN]) -> usize {
    let pos = write_decimal(remaining_seconds / SECS_PER_MINUTE, 2, buf, 0);
    buf[pos] = b':';
    write_decimal(remaining_seconds % SECS_PER_MINUTE, 2, buf, pos + 1)
}

/// Compact vote count: `999`, `1.3K`, `24.0K`, `2.5M`, `1.0B`.
///
/// The tenth digit is rounded half-up, so `1_250` reads `1.3K`.
pub fn write_compact_count(count: u64, buf: &mut [u8; TEXT_BUF_LEN]) -> usize {
    const UNITS: [(u64, u8); 3] = [(1_000_000_000, b'B'), (1_000_000, b'M'), (1_000, b'K')];

    for (unit, suffix) in UNITS {
        if count >= unit {
            let unit = unit as u128;
            let tenths = (count as u128 * 10 + unit / 2) / unit;
            let pos = write_decimal((tenths / 10) as u64, 1, buf, 0);
            buf[pos] = b'.';
            buf[pos + 1] = b'0' + (tenths % 10) as u8;
            buf[pos + 2] = suffix;
            return pos + 3;
        }
    }

    write_decimal(count, 1, buf, 0)
}

pub fn remaining_formatted(env: &Env, remaining_seconds: u64) -> String {
    let mut buf = [0u8; TEXT_BUF_LEN];
    let len = write_mm_ss(remaining_seconds, &mut buf);
    String::from_bytes(env, &buf[..len])
}

pub fn compact_vote_count(env: &Env, count: u64) -> String {
    let mut buf = [0u8; TEXT_BUF_LEN];
    let len = write_compact_count(count, &mut buf);
    String::from_bytes(env, &buf[..len])
}
