use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use dashboard_client::{
    countdown::FORM_DATE_FORMAT,
    errors::ClientError,
    lists::{ItemList, ItemRow, ListKind},
    models::{AlarmForm, ItemId, LinkForm, TaskEdit},
    resolve_config,
    ui::{redraw, render_board, render_links},
    AlarmTracker, DashboardClient,
};
use std::{io::Write, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Client for the productivity dashboard", long_about = None)]
struct Args {
    /// Backend base url, overrides DASHBOARD_URL.
    #[arg(long, global = true)]
    url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Live countdown of every alarm (default).
    Alarms,
    DeleteAlarm { id: u64 },
    DeleteLink { id: u64 },
    DeleteTask { id: u64 },
    CompleteTask { id: u64 },
    UndoTask { id: u64 },
    EditTask {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        action: String,
    },
    PinnedLinks,
    /// DATE is local time, e.g. "18/10/2026 09:30".
    CreateAlarm {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
    },
    CreateTask {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        action: String,
    },
    CreateLink {
        #[arg(long)]
        name: String,
        #[arg(long)]
        link: String,
        #[arg(long)]
        image: String,
    },
    TogglePin { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    let config = resolve_config(args.url.as_deref())?;
    let client = DashboardClient::new(&config);
    info!("using backend {}", client.base_url());

    match args.command.unwrap_or(Command::Alarms) {
        Command::Alarms => watch_alarms(client, config.tick).await?,
        Command::DeleteAlarm { id } => client.delete_alarm(ItemId(id)).await?,
        Command::DeleteLink { id } => list_action(client, ListKind::Links, id, Action::Delete).await?,
        Command::DeleteTask { id } => list_action(client, ListKind::Tasks, id, Action::Delete).await?,
        Command::CompleteTask { id } => list_action(client, ListKind::Tasks, id, Action::Complete).await?,
        Command::UndoTask { id } => list_action(client, ListKind::CompletedTasks, id, Action::Undo).await?,
        Command::EditTask { id, name, action } => {
            let mut list = single_item_list(client, ListKind::Tasks, id);
            list.save_edit(ItemId(id), TaskEdit { name, action }).await?;
        }
        Command::PinnedLinks => print!("{}", render_links(&client.pinned_links().await?)),
        Command::CreateAlarm { name, date } => {
            let at = NaiveDateTime::parse_from_str(&date, FORM_DATE_FORMAT)
                .map_err(|err| ClientError::config(format!("date {date:?} is not dd/mm/yyyy hh:mm: {err}")))?;
            client.create_alarm(&AlarmForm::new(name, at)).await?;
        }
        Command::CreateTask { name, action } => client.create_task(&TaskEdit { name, action }).await?,
        Command::CreateLink { name, link, image } => client.create_link(&LinkForm { name, link, image }).await?,
        Command::TogglePin { id } => client.toggle_pin(ItemId(id)).await?,
    }

    Ok(())
}

async fn watch_alarms(client: DashboardClient, tick: Duration) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = AlarmTracker::new(client, tick);
    tracker.load().await?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut frames = tokio::time::interval(tick);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                let board = render_board(&tracker.snapshots().await);
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(redraw(&board).as_bytes())?;
                stdout.flush()?;
            }
            signal = &mut shutdown => {
                signal?;
                break;
            }
        }
    }

    tracker.shutdown();
    info!("stopped");
    Ok(())
}

enum Action {
    Delete,
    Complete,
    Undo,
}

fn single_item_list(client: DashboardClient, kind: ListKind, id: u64) -> ItemList {
    ItemList::new(kind, client, [ItemRow::new(ItemId(id), "", "")])
}

async fn list_action(
    client: DashboardClient,
    kind: ListKind,
    id: u64,
    action: Action,
) -> Result<(), ClientError> {
    let mut list = single_item_list(client, kind, id);
    match action {
        Action::Delete => list.delete(ItemId(id)).await,
        Action::Complete => list.complete(ItemId(id)).await,
        Action::Undo => list.undo(ItemId(id)).await,
    }
}
