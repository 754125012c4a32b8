use serde::{Deserialize, Serialize};

/// A sharing group: a named, ordered list of recipient email addresses.
///
/// Email syntax is not validated; invalid addresses surface as per-recipient
/// failures when a share is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub emails: Vec<String>,
}
