use super::*;

#[test]
fn acknowledgement_text_prefers_server_message() {
    let ack = Acknowledgement { message: Some("Email verified successfully".to_owned()) };
    assert_eq!(acknowledgement_text(&ack, VERIFIED), "Email verified successfully");
}

#[test]
fn acknowledgement_text_falls_back_on_blank_message() {
    assert_eq!(acknowledgement_text(&Acknowledgement::default(), RESET_SENT), RESET_SENT);
    let blank = Acknowledgement { message: Some("  ".to_owned()) };
    assert_eq!(acknowledgement_text(&blank, PASSWORD_CHANGED), PASSWORD_CHANGED);
}

#[test]
fn validate_reset_email_trims_and_checks_shape() {
    assert_eq!(validate_reset_email(" a@example.com "), Ok("a@example.com".to_owned()));
    assert_eq!(validate_reset_email("alice"), Err("Enter a valid email address."));
    assert_eq!(validate_reset_email(""), Err("Enter a valid email address."));
}

#[test]
fn validate_password_reset_requires_token_from_link() {
    assert_eq!(
        validate_password_reset("", "pw", "pw"),
        Err("This reset link is missing its token. Request a new one.")
    );
}

#[test]
fn validate_password_reset_checks_password_pair() {
    assert_eq!(validate_password_reset("tok", "", ""), Err("Enter a new password."));
    assert_eq!(validate_password_reset("tok", "pw", "other"), Err("Passwords do not match."));
    assert_eq!(
        validate_password_reset(" tok ", " pw ", " pw "),
        Ok(PasswordReset { token: "tok".to_owned(), new_password: " pw ".to_owned() })
    );
}
