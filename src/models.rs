use crate::countdown::FORM_DATE_FORMAT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend primary key of an alarm, link or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmRecord {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: ItemId,
    pub name: String,
    pub link: String,
    pub image: String,
}

/// Fields of the create-alarm form. `date` is local time in the form's format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmForm {
    pub name: String,
    pub date: String,
}

impl AlarmForm {
    pub fn new(name: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            date: at.format(FORM_DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkForm {
    pub name: String,
    pub link: String,
    pub image: String,
}

/// Name and action of a task, sent when creating or editing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEdit {
    pub name: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Counting,
    Expired,
    /// The target date could not be parsed; the row is never ticked.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowStyle {
    #[default]
    Info,
    Success,
    Danger,
}
