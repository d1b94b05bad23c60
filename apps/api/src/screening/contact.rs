use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_DETECTED: &str = "Not detected";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("email pattern")
});

// Optional country code, optional (parenthesised) area code, then two digit groups.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s\-\.])?(?:\(?\d{2,4}\)?[\s\-\.])?\d{3,4}[\s\-\.]?\d{3,4}")
        .expect("phone pattern")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn not_detected() -> Self {
        Self {
            email: NOT_DETECTED.to_string(),
            phone: NOT_DETECTED.to_string(),
        }
    }
}

/// First email-like and first phone-like substring, or `"Not detected"`.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let first = |re: &Regex| {
        re.find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_DETECTED.to_string())
    };
    ContactInfo {
        email: first(&EMAIL_RE),
        phone: first(&PHONE_RE),
    }
}
