use serde::{Deserialize, Serialize};

/// A CRM account entry. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub name: String,
    pub industry: String,
    pub phone: String,
}

impl AccountRecord {
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            phone: phone.into(),
        }
    }
}
