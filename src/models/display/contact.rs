//! Contact display model

use serde::Serialize;
use tabled::Tabled;

use crate::gateway::Contact;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ContactDisplay {
    #[tabled(rename = "LABEL")]
    pub label: String,

    #[tabled(rename = "HANDLE")]
    pub handle: String,

    #[tabled(rename = "LINK")]
    pub href: String,
}

impl From<&Contact> for ContactDisplay {
    fn from(contact: &Contact) -> Self {
        Self {
            label: contact.label.clone(),
            handle: contact.handle.clone(),
            href: contact.href.clone(),
        }
    }
}
