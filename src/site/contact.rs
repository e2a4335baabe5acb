use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const MSG_NAME_REQUIRED: &str = "お名前を入力してください。";
pub const MSG_EMAIL_REQUIRED: &str = "メールアドレスを入力してください。";
pub const MSG_EMAIL_INVALID: &str = "正しいメールアドレス形式で入力してください。";
pub const MSG_BODY_REQUIRED: &str = "お問い合わせ内容を入力してください。";
pub const MSG_THANKS: &str = "お問い合わせありがとうございます。後日担当者よりご連絡いたします。";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Every problem found, in field order, for one combined notice.
    Rejected(Vec<&'static str>),
    /// Show the thank-you notice and clear the fields.
    Accepted { notice: &'static str },
}

impl ContactOutcome {
    pub fn alert_text(&self) -> String {
        match self {
            ContactOutcome::Rejected(errors) => errors.iter().map(|e| format!("{e}\n")).collect(),
            ContactOutcome::Accepted { notice } => notice.to_string(),
        }
    }

    pub fn should_reset(&self) -> bool {
        matches!(self, ContactOutcome::Accepted { .. })
    }
}

pub fn validate_contact_form(name: &str, email: &str, message: &str) -> ContactOutcome {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(MSG_NAME_REQUIRED);
    }
    if email.is_empty() {
        errors.push(MSG_EMAIL_REQUIRED);
    } else if !is_valid_email(email) {
        errors.push(MSG_EMAIL_INVALID);
    }
    if message.is_empty() {
        errors.push(MSG_BODY_REQUIRED);
    }

    if errors.is_empty() {
        ContactOutcome::Accepted { notice: MSG_THANKS }
    } else {
        ContactOutcome::Rejected(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("taro@example.jp"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("taro@example"));
        assert!(!is_valid_email("taro example@x.jp"));
        assert!(!is_valid_email("@example.jp"));
        assert!(!is_valid_email("taro@@example.jp"));
    }

    #[test]
    fn collects_every_error() {
        let outcome = validate_contact_form("  ", "", " ");
        assert_eq!(
            outcome,
            ContactOutcome::Rejected(vec![MSG_NAME_REQUIRED, MSG_EMAIL_REQUIRED, MSG_BODY_REQUIRED])
        );
        assert!(!outcome.should_reset());
        assert_eq!(outcome.alert_text().lines().count(), 3);
    }

    #[test]
    fn bad_email_format_is_reported() {
        let outcome = validate_contact_form("山田", "yamada@", "予約について");
        assert_eq!(outcome, ContactOutcome::Rejected(vec![MSG_EMAIL_INVALID]));
    }

    #[test]
    fn valid_form_resets() {
        let outcome = validate_contact_form(" 山田 ", " yamada@example.jp ", "予約について");
        assert!(outcome.should_reset());
        assert_eq!(outcome.alert_text(), MSG_THANKS);
    }
}
