//! Contacts - flat-file contact storage
//!
//! The whole contact set lives in one JSON array. Appending reads the full
//! set, pushes the new record and rewrites the file (last writer wins).

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::errors::{PanelError, Result};

/// A single contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub nickname: String,
    pub address: String,
    /// Kept as raw JSON so records with negative or oversized numbers
    /// still load and survive a rewrite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    #[serde(default)]
    pub whitelist: bool,
}

impl Contact {
    pub fn new(nickname: &str, address: &str) -> Self {
        Contact {
            nickname: nickname.to_string(),
            address: address.to_string(),
            number: None,
            whitelist: false,
        }
    }
}

/// Persistence collaborator for contacts
pub trait ContactStore {
    /// All contacts sorted by case-insensitive nickname. Missing or
    /// malformed storage yields an empty list.
    fn load_all(&self) -> Vec<Contact>;

    /// Case-insensitive lookup by nickname
    fn find(&self, nickname: &str) -> Result<Contact> {
        let wanted = nickname.to_lowercase();
        self.load_all()
            .into_iter()
            .find(|c| c.nickname.to_lowercase() == wanted)
            .ok_or_else(|| PanelError::NotFound {
                nickname: nickname.to_string(),
            })
    }

    /// Persist one more contact
    fn append(&mut self, contact: Contact) -> Result<()>;
}

/// Sort contacts the way every list shows them
pub fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by_key(|c| c.nickname.to_lowercase());
}

/// JSON file backed contact store
#[derive(Debug, Clone)]
pub struct JsonContactStore {
    path: PathBuf,
}

impl JsonContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonContactStore { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the raw file contents in stored order
    fn read_raw(&self) -> Result<Vec<Contact>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PanelError::io(&self.path, e)),
        };

        serde_json::from_str(&data).map_err(|e| PanelError::MalformedStorage {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    /// Like `read_raw` but degrades every failure to an empty set
    fn read_lenient(&self) -> Vec<Contact> {
        match self.read_raw() {
            Ok(contacts) => contacts,
            Err(e) => {
                log::warn!("{}; treating contact list as empty", e);
                Vec::new()
            }
        }
    }

    fn write_all(&self, contacts: &[Contact]) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        contacts
            .serialize(&mut ser)
            .map_err(|e| PanelError::Serialization {
                details: e.to_string(),
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PanelError::io(parent, e))?;
            }
        }
        fs::write(&self.path, buf).map_err(|e| PanelError::io(&self.path, e))
    }
}

impl ContactStore for JsonContactStore {
    fn load_all(&self) -> Vec<Contact> {
        let mut contacts = self.read_lenient();
        sort_contacts(&mut contacts);
        contacts
    }

    fn append(&mut self, contact: Contact) -> Result<()> {
        let mut contacts = self.read_lenient();
        log::info!("appending contact {:?}", contact.nickname);
        contacts.push(contact);
        self.write_all(&contacts)
    }
}
