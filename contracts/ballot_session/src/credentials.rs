//! Format checks that gate entry to the ballot.
//!
//! These are pure predicates on the raw bytes. They do not identify anyone;
//! they only decide whether the login form may proceed.

use soroban_sdk::{contracterror, String};

/// National identity card number: 14 characters, 12 digits and 2 letters
/// in any position (e.g. `010065116LA049`).
pub const NATIONAL_ID_LEN: usize = 14;
pub const NATIONAL_ID_DIGITS: usize = 12;
pub const NATIONAL_ID_LETTERS: usize = 2;

pub const MAX_PASSWORD_LEN: usize = 12;
pub const PASSWORD_SPECIALS: &[u8] = b"!@#$%&*?";

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LoginError {
    MissingField = 1,
    InvalidNationalId = 2,
    WeakPassword = 3,
}

pub fn is_valid_national_id(raw: &[u8]) -> bool {
    if raw.len() != NATIONAL_ID_LEN {
        return false;
    }

    let mut digits = 0usize;
    let mut letters = 0usize;
    for &b in raw {
        if b.is_ascii_digit() {
            digits += 1;
        } else if b.is_ascii_alphabetic() {
            letters += 1;
        } else {
            return false;
        }
    }

    digits == NATIONAL_ID_DIGITS && letters == NATIONAL_ID_LETTERS
}

/// 1–12 characters from `[A-Za-z0-9!@#$%&*?]` containing at least one
/// lowercase letter, one uppercase letter, one digit and one special.
pub fn is_strong_password(raw: &[u8]) -> bool {
    if raw.is_empty() || raw.len() > MAX_PASSWORD_LEN {
        return false;
    }

    let (mut lower, mut upper, mut digit, mut special) = (false, false, false, false);
    for &b in raw {
        if b.is_ascii_lowercase() {
            lower = true;
        } else if b.is_ascii_uppercase() {
            upper = true;
        } else if b.is_ascii_digit() {
            digit = true;
        } else if PASSWORD_SPECIALS.contains(&b) {
            special = true;
        } else {
            return false;
        }
    }

    lower && upper && digit && special
}

// ── Soroban string adapters ──────────────────────────────────────────────────

pub fn national_id_ok(national_id: &String) -> bool {
    if national_id.len() as usize != NATIONAL_ID_LEN {
        return false;
    }
    let mut buf = [0u8; NATIONAL_ID_LEN];
    national_id.copy_into_slice(&mut buf);
    is_valid_national_id(&buf)
}

pub fn password_ok(password: &String) -> bool {
    let len = password.len() as usize;
    if len == 0 || len > MAX_PASSWORD_LEN {
        return false;
    }
    let mut buf = [0u8; MAX_PASSWORD_LEN];
    password.copy_into_slice(&mut buf[..len]);
    is_strong_password(&buf[..len])
}

/// Checks in the order the login form reports them: both fields present,
/// then the ID, then the password.
pub fn check_login(national_id: &String, password: &String) -> Result<(), LoginError> {
    if national_id.len() == 0 || password.len() == 0 {
        return Err(LoginError::MissingField);
    }
    if !national_id_ok(national_id) {
        return Err(LoginError::InvalidNationalId);
    }
    if !password_ok(password) {
        return Err(LoginError::WeakPassword);
    }
    Ok(())
}
