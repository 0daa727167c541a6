use fieldseal_password::validate_password_strength;

#[test]
fn strong_password_is_valid() {
    let report = validate_password_strength("SecurePass123!");
    assert!(report.valid);
    assert!(report.messages.is_empty());
}

#[test]
fn weak_password_accumulates_all_violations() {
    let report = validate_password_strength("weak");
    assert!(!report.valid);
    // Too short, no uppercase, no digit, no special character.
    assert!(report.messages.len() >= 3);

    let combined = report.messages.join("\n");
    assert!(combined.contains("uppercase"));
    assert!(combined.contains("digit"));
    assert!(combined.contains("special"));
}

#[test]
fn each_rule_is_reported_individually() {
    assert!(validate_password_strength("NOLOWERCASE123!")
        .messages
        .iter()
        .any(|m| m.contains("lowercase")));
    assert!(validate_password_strength("nouppercase123!")
        .messages
        .iter()
        .any(|m| m.contains("uppercase")));
    assert!(validate_password_strength("NoDigitsHere!")
        .messages
        .iter()
        .any(|m| m.contains("digit")));
    assert!(validate_password_strength("NoSpecial123")
        .messages
        .iter()
        .any(|m| m.contains("special")));
    assert!(validate_password_strength("Sh0rt!")
        .messages
        .iter()
        .any(|m| m.contains("at least 8")));
}

#[test]
fn over_long_password_is_rejected() {
    let long = format!("Aa1!{}", "x".repeat(130));
    let report = validate_password_strength(&long);
    assert!(!report.valid);
    assert!(report.messages.iter().any(|m| m.contains("at most 128")));
}

#[test]
fn boundary_lengths() {
    // Exactly 8 and exactly 128 characters pass the length rules.
    assert!(validate_password_strength("Abcdef1!").valid);

    let max = format!("Aa1!{}", "x".repeat(124));
    assert_eq!(max.chars().count(), 128);
    assert!(validate_password_strength(&max).valid);
}

#[test]
fn empty_password_violates_length_and_class_rules() {
    let report = validate_password_strength("");
    assert!(!report.valid);
    assert!(report.messages.len() >= 4);
}
