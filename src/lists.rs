use crate::client::DashboardClient;
use crate::errors::ClientError;
use crate::models::{ItemId, RowStyle, TaskEdit};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Links,
    Tasks,
    CompletedTasks,
}

impl ListKind {
    /// Element id of the list container, blurred while its create form is open.
    pub fn container_id(self) -> &'static str {
        match self {
            ListKind::Links => "links-list",
            ListKind::Tasks | ListKind::CompletedTasks => "task-list",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowView {
    #[default]
    Standard,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub action: String,
    pub style: RowStyle,
    pub visible: bool,
    pub view: RowView,
}

impl ItemRow {
    pub fn new(id: ItemId, name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            action: action.into(),
            style: RowStyle::Info,
            visible: true,
            view: RowView::Standard,
        }
    }
}

/// A rendered list of links or tasks with its item counter. The counter and
/// the rows only change after the backend accepted the request.
#[derive(Debug)]
pub struct ItemList {
    kind: ListKind,
    client: DashboardClient,
    rows: BTreeMap<ItemId, ItemRow>,
    count: usize,
}

impl ItemList {
    pub fn new(kind: ListKind, client: DashboardClient, rows: impl IntoIterator<Item = ItemRow>) -> Self {
        let rows: BTreeMap<ItemId, ItemRow> = rows.into_iter().map(|row| (row.id, row)).collect();
        let count = rows.values().filter(|row| row.visible).count();
        Self {
            kind,
            client,
            rows,
            count,
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn row(&self, id: ItemId) -> Option<&ItemRow> {
        self.rows.get(&id)
    }

    pub async fn delete(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.visible_row(id)?;
        match self.kind {
            ListKind::Links => self.client.delete_link(id).await?,
            ListKind::Tasks | ListKind::CompletedTasks => self.client.delete_task(id).await?,
        }
        let style = match self.kind {
            ListKind::Links => None,
            ListKind::Tasks | ListKind::CompletedTasks => Some(RowStyle::Danger),
        };
        self.retire(id, style);
        info!("{:?} item {id} deleted", self.kind);
        Ok(())
    }

    pub async fn complete(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.require(ListKind::Tasks, "complete")?;
        self.visible_row(id)?;
        self.client.complete_task(id).await?;
        self.retire(id, Some(RowStyle::Success));
        Ok(())
    }

    pub async fn undo(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.require(ListKind::CompletedTasks, "undo")?;
        self.visible_row(id)?;
        self.client.undo_task(id).await?;
        self.retire(id, Some(RowStyle::Success));
        Ok(())
    }

    pub fn begin_edit(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.require_tasks("edit")?;
        self.visible_row_mut(id)?.view = RowView::Editing;
        Ok(())
    }

    /// Sends the new name/action and, once accepted, shows them in the
    /// standard view.
    pub async fn save_edit(&mut self, id: ItemId, edit: TaskEdit) -> Result<(), ClientError> {
        self.require_tasks("edit")?;
        self.visible_row(id)?;
        self.client.edit_task(id, &edit).await?;

        let row = self.visible_row_mut(id)?;
        row.name = edit.name;
        row.action = edit.action;
        row.view = RowView::Standard;
        Ok(())
    }

    /// Hides the row. Links keep their style, tasks are recoloured first.
    fn retire(&mut self, id: ItemId, style: Option<RowStyle>) {
        if let Some(row) = self.rows.get_mut(&id) {
            if let Some(style) = style {
                row.style = style;
            }
            row.visible = false;
            self.count = self.count.saturating_sub(1);
        }
    }

    fn require(&self, kind: ListKind, action: &str) -> Result<(), ClientError> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(ClientError::unsupported(format!("cannot {action} items of a {:?} list", self.kind)))
        }
    }

    fn require_tasks(&self, action: &str) -> Result<(), ClientError> {
        if self.kind == ListKind::Links {
            return Err(ClientError::unsupported(format!("cannot {action} links")));
        }
        Ok(())
    }

    fn visible_row(&self, id: ItemId) -> Result<&ItemRow, ClientError> {
        self.rows
            .get(&id)
            .filter(|row| row.visible)
            .ok_or_else(|| ClientError::unknown_item(id))
    }

    fn visible_row_mut(&mut self, id: ItemId) -> Result<&mut ItemRow, ClientError> {
        self.rows
            .get_mut(&id)
            .filter(|row| row.visible)
            .ok_or_else(|| ClientError::unknown_item(id))
    }
}

/// The "create" form toggle: showing the form blurs the list behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPanel {
    container_id: &'static str,
    form_visible: bool,
}

impl FormPanel {
    pub const ALARMS: &'static str = "alarms";

    pub fn new(container_id: &'static str) -> Self {
        Self {
            container_id,
            form_visible: false,
        }
    }

    pub fn for_list(kind: ListKind) -> Self {
        Self::new(kind.container_id())
    }

    pub fn container_id(&self) -> &'static str {
        self.container_id
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn list_filter(&self) -> &'static str {
        if self.form_visible { "blur(1.5px)" } else { "blur(0px)" }
    }

    pub fn toggle(&mut self) -> bool {
        self.form_visible = !self.form_visible;
        self.form_visible
    }
}
