use std::str::FromStr;

use email_address::Options;
use serde::{Deserialize, Serialize};

/// Plain `local@domain.tld` addresses only. Display text (`Name <a@b.com>`)
/// and domain literals (`a@[127.0.0.1]`) are rejected.
fn parse_options() -> Options {
    Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld()
}

/// A syntactically valid email address. The submitted text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(email_address::EmailAddress);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailAddress {
    type Err = email_address::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        email_address::EmailAddress::parse_with_options(s, parse_options()).map(Self)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        for (input, valid) in [
            ("a@b.com", true),
            ("max.mustermann@example.de", true),
            ("not-an-email", false),
            ("@example.com", false),
            ("foo@", false),
            ("", false),
            ("Al <a@b.com>", false),
            ("<a@b.com>", false),
            ("a@b", false),
            ("a@localhost", false),
            ("a@[127.0.0.1]", false),
            ("a@sub.example.co.uk", true),
        ] {
            assert_eq!(input.parse::<EmailAddress>().is_ok(), valid, "{input}");
        }
    }

    #[test]
    fn keeps_original_text() {
        let email = "Max.Mustermann@Example.de".parse::<EmailAddress>().unwrap();
        assert_eq!(email.as_str(), "Max.Mustermann@Example.de");
        assert_eq!(email.to_string(), "Max.Mustermann@Example.de");
    }

    #[test]
    fn serde() {
        let email: EmailAddress = serde_json::from_str(r#""a@b.com""#).unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), r#""a@b.com""#);
        serde_json::from_str::<EmailAddress>(r#""nope""#).unwrap_err();
    }
}
