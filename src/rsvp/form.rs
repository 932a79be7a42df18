use serde::Deserialize;

use crate::db::NewGuest;

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_MESSAGE_CHARS: usize = 500;
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_GUESTS: i64 = 10;

/// Raw form fields as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RsvpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpError {
    MissingName,
    NameTooLong,
    InvalidEmail,
    InvalidPhone,
    InvalidGuests,
    MessageTooLong,
}

impl RsvpError {
    /// Translation key for the notice shown to the guest.
    pub fn key(&self) -> &'static str {
        use RsvpError::*;
        match self {
            MissingName => "err_name",
            NameTooLong => "err_name_long",
            InvalidEmail => "err_email",
            InvalidPhone => "err_phone",
            InvalidGuests => "err_guests",
            MessageTooLong => "err_message_long",
        }
    }
}

impl RsvpForm {
    /// Checks fields in form order and reports the first failure.
    pub fn validate(self) -> Result<NewGuest, RsvpError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RsvpError::MissingName);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(RsvpError::NameTooLong);
        }

        let email = self.email.trim();
        if !is_email(email) {
            return Err(RsvpError::InvalidEmail);
        }

        let phone = self.phone.trim();
        if !is_phone(phone) {
            return Err(RsvpError::InvalidPhone);
        }

        let guests = match self.guests.trim().parse::<i64>() {
            Ok(n) if (1..=MAX_GUESTS).contains(&n) => n,
            _ => return Err(RsvpError::InvalidGuests),
        };

        let message = self.message.trim();
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(RsvpError::MessageTooLong);
        }

        Ok(NewGuest {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            guests,
            message: (!message.is_empty()).then(|| message.to_owned()),
        })
    }
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

fn is_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
        && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RsvpForm {
        RsvpForm {
            name: "  Lucía Pérez ".into(),
            email: "Lucia@Example.com".into(),
            phone: "+52 (55) 1234-5678".into(),
            guests: "2".into(),
            message: "  ¡Felicidades!  ".into(),
        }
    }

    #[test]
    fn valid_form_is_normalized() {
        assert_eq!(form().validate(), Ok(NewGuest {
            name: "Lucía Pérez".into(),
            email: "Lucia@Example.com".into(),
            phone: "+52 (55) 1234-5678".into(),
            guests: 2,
            message: Some("¡Felicidades!".into()),
        }));
    }

    #[test]
    fn email_is_trimmed_but_keeps_its_case() {
        let guest = RsvpForm { email: "  Ana.Ruiz@Correo.MX ".into(), ..form() }.validate().unwrap();
        assert_eq!(guest.email, "Ana.Ruiz@Correo.MX");
    }

    #[test]
    fn blank_message_is_absent() {
        let guest = RsvpForm { message: "   ".into(), ..form() }.validate().unwrap();
        assert_eq!(guest.message, None);
    }

    #[test]
    fn name_is_required_and_bounded() {
        assert_eq!(RsvpForm { name: " ".into(), ..form() }.validate(), Err(RsvpError::MissingName));
        assert_eq!(RsvpForm { name: "ñ".repeat(101), ..form() }.validate(), Err(RsvpError::NameTooLong));
        assert!(RsvpForm { name: "ñ".repeat(100), ..form() }.validate().is_ok());
    }

    #[test]
    fn email_must_look_like_an_address() {
        for email in ["", "lucia", "@example.com", "lucia@", "lucia@example", "lucia@@example.com", "lu cia@example.com", "lucia@example..com"] {
            assert_eq!(RsvpForm { email: email.into(), ..form() }.validate(), Err(RsvpError::InvalidEmail), "{email:?}");
        }
        assert!(RsvpForm { email: "a.b+boda@mail.example.mx".into(), ..form() }.validate().is_ok());
    }

    #[test]
    fn phone_needs_enough_digits() {
        for phone in ["", "123456", "55-1234-567x", "call me"] {
            assert_eq!(RsvpForm { phone: phone.into(), ..form() }.validate(), Err(RsvpError::InvalidPhone), "{phone:?}");
        }
        assert!(RsvpForm { phone: "5512345".into(), ..form() }.validate().is_ok());
    }

    #[test]
    fn guest_count_is_bounded() {
        for guests in ["", "0", "-1", "11", "two", "1.5"] {
            assert_eq!(RsvpForm { guests: guests.into(), ..form() }.validate(), Err(RsvpError::InvalidGuests), "{guests:?}");
        }
        for guests in ["1", " 10 "] {
            assert!(RsvpForm { guests: guests.into(), ..form() }.validate().is_ok());
        }
    }

    #[test]
    fn message_is_bounded() {
        assert_eq!(RsvpForm { message: "x".repeat(501), ..form() }.validate(), Err(RsvpError::MessageTooLong));
        assert!(RsvpForm { message: "x".repeat(500), ..form() }.validate().is_ok());
    }

    #[test]
    fn first_failing_field_wins() {
        let empty = RsvpForm::default();
        assert_eq!(empty.validate(), Err(RsvpError::MissingName));
    }

    #[test]
    fn every_error_has_a_translation() {
        use crate::i18n::Lang;
        for err in [RsvpError::MissingName, RsvpError::NameTooLong, RsvpError::InvalidEmail, RsvpError::InvalidPhone, RsvpError::InvalidGuests, RsvpError::MessageTooLong] {
            assert!(!Lang::Es.t(err.key()).is_empty());
            assert!(!Lang::En.t(err.key()).is_empty());
        }
    }
}
