#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_session::credentials::{
    is_strong_password, is_valid_national_id, MAX_PASSWORD_LEN, NATIONAL_ID_DIGITS,
    NATIONAL_ID_LEN, PASSWORD_SPECIALS,
};

fuzz_target!(|data: &[u8]| {
    let id_ok = is_valid_national_id(data);
    if id_ok {
        assert_eq!(data.len(), NATIONAL_ID_LEN);
        assert!(data.iter().all(|b| b.is_ascii_alphanumeric()));
        assert_eq!(data.iter().filter(|b| b.is_ascii_digit()).count(), NATIONAL_ID_DIGITS);
    }

    let password_ok = is_strong_password(data);
    if password_ok {
        assert!(!data.is_empty() && data.len() <= MAX_PASSWORD_LEN);
        assert!(data.iter().any(|b| b.is_ascii_lowercase()));
        assert!(data.iter().any(|b| b.is_ascii_uppercase()));
        assert!(data.iter().any(|b| b.is_ascii_digit()));
        assert!(data.iter().any(|b| PASSWORD_SPECIALS.contains(b)));
    }

    // An id has no specials and is too long to be a password.
    assert!(!(id_ok && password_ok));
});
