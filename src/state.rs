use crate::countdown::{EXPIRED_MARKER, INVALID_MARKER};
use crate::models::{DisplayState, ItemId, RowStyle};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub id: ItemId,
    pub label: String,
    pub text: String,
    pub style: RowStyle,
    pub visible: bool,
    pub state: DisplayState,
}

#[derive(Debug)]
struct RowData {
    text: String,
    style: RowStyle,
    visible: bool,
    state: DisplayState,
    updates: u64,
}

/// Owned handle to one alarm's countdown row. Clones point at the same row;
/// rows of different alarms never share data.
#[derive(Debug, Clone)]
pub struct AlarmRow {
    id: ItemId,
    label: Arc<str>,
    data: Arc<Mutex<RowData>>,
}

impl AlarmRow {
    pub fn new(id: ItemId, label: &str) -> Self {
        Self {
            id,
            label: Arc::from(label),
            data: Arc::new(Mutex::new(RowData {
                text: String::new(),
                style: RowStyle::Info,
                visible: true,
                state: DisplayState::Counting,
                updates: 0,
            })),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Writes the countdown text. Ignored once the row left `Counting`.
    pub async fn show_remaining(&self, text: String) -> bool {
        let mut data = self.data.lock().await;
        if data.state != DisplayState::Counting {
            return false;
        }
        data.text = text;
        data.updates += 1;
        true
    }

    /// Returns true only for the call that performed the transition.
    pub async fn expire(&self) -> bool {
        let mut data = self.data.lock().await;
        if data.state != DisplayState::Counting {
            return false;
        }
        data.state = DisplayState::Expired;
        data.text = EXPIRED_MARKER.to_string();
        data.style = RowStyle::Danger;
        data.updates += 1;
        true
    }

    pub async fn mark_invalid(&self) {
        let mut data = self.data.lock().await;
        data.state = DisplayState::Invalid;
        data.text = INVALID_MARKER.to_string();
        data.style = RowStyle::Danger;
        data.updates += 1;
    }

    pub async fn hide(&self) {
        self.data.lock().await.visible = false;
    }

    /// Number of display writes so far.
    pub async fn updates(&self) -> u64 {
        self.data.lock().await.updates
    }

    pub async fn snapshot(&self) -> RowSnapshot {
        let data = self.data.lock().await;
        RowSnapshot {
            id: self.id,
            label: self.label.to_string(),
            text: data.text.clone(),
            style: data.style,
            visible: data.visible,
            state: data.state,
        }
    }
}
