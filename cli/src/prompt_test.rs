use super::*;

#[test]
fn mismatch_is_reported_before_length() {
    assert_eq!(validate_new_password("abc", "abd"), Err("Passwords do not match".to_owned()));
}

#[test]
fn short_password_is_rejected() {
    assert_eq!(
        validate_new_password("12345", "12345"),
        Err("Password must be at least 6 characters long".to_owned())
    );
}

#[test]
fn length_counts_characters_not_bytes() {
    assert!(validate_new_password("ééééé", "ééééé").is_err());
    assert_eq!(validate_new_password("éééééé", "éééééé"), Ok(()));
}

#[test]
fn six_characters_is_enough() {
    assert_eq!(validate_new_password("secret", "secret"), Ok(()));
}

#[test]
fn flag_value_skips_the_prompt() {
    assert_eq!(secret(Some("hunter22".to_owned()), "Password: ").unwrap(), "hunter22");
}
