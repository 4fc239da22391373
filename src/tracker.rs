use crate::client::DashboardClient;
use crate::clock::{Clock, SystemClock};
use crate::countdown::{parse_target, tick_at, Tick};
use crate::errors::ClientError;
use crate::models::{AlarmForm, AlarmRecord, ItemId};
use crate::state::{AlarmRow, RowSnapshot};
use chrono::{DateTime, Utc};
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

struct TrackedAlarm {
    row: AlarmRow,
    ticker: Option<JoinHandle<()>>,
}

/// Registry of alarm rows plus one tick task per counting alarm.
pub struct AlarmTracker {
    client: DashboardClient,
    clock: Arc<dyn Clock>,
    tick: Duration,
    alarms: BTreeMap<ItemId, TrackedAlarm>,
}

impl AlarmTracker {
    pub fn new(client: DashboardClient, tick: Duration) -> Self {
        Self::with_clock(client, tick, Arc::new(SystemClock))
    }

    pub fn with_clock(client: DashboardClient, tick: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            clock,
            tick,
            alarms: BTreeMap::new(),
        }
    }

    /// Fetches the alarm list once and starts tracking it.
    pub async fn load(&mut self) -> Result<usize, ClientError> {
        let alarms = self.client.fetch_alarms().await?;
        let count = alarms.len();
        self.start(alarms).await;
        Ok(count)
    }

    /// Fetches the list again and starts tracking the alarms not yet known.
    pub async fn reload(&mut self) -> Result<usize, ClientError> {
        let fresh: Vec<AlarmRecord> = self
            .client
            .fetch_alarms()
            .await?
            .into_iter()
            .filter(|alarm| !self.alarms.contains_key(&alarm.id))
            .collect();
        let count = fresh.len();
        self.start(fresh).await;
        Ok(count)
    }

    /// Submits the create-alarm form; the backend assigns the id, so the new
    /// alarm joins through a reload.
    pub async fn create(&mut self, form: &AlarmForm) -> Result<usize, ClientError> {
        self.client.create_alarm(form).await?;
        info!("alarm {:?} created for {}", form.name, form.date);
        self.reload().await
    }

    /// The first tick of every alarm runs before this returns, so each row is
    /// populated (or already expired) without waiting a full interval.
    pub async fn start(&mut self, alarms: Vec<AlarmRecord>) {
        for alarm in alarms {
            if self.alarms.contains_key(&alarm.id) {
                warn!("alarm {} listed twice, keeping the first", alarm.id);
                continue;
            }

            let row = AlarmRow::new(alarm.id, &alarm.name);
            let ticker = match parse_target(&alarm.date) {
                Some(target) => {
                    let counting = advance(&row, &self.client, self.clock.as_ref(), target).await;
                    counting.then(|| self.spawn_ticker(row.clone(), target))
                }
                None => {
                    warn!("alarm {} has an unreadable date {:?}", alarm.id, alarm.date);
                    row.mark_invalid().await;
                    None
                }
            };

            self.alarms.insert(alarm.id, TrackedAlarm { row, ticker });
        }
    }

    /// Deletes the alarm on the backend, then stops its ticks and hides its row.
    pub async fn remove(&mut self, id: ItemId) -> Result<(), ClientError> {
        if !self.alarms.contains_key(&id) {
            return Err(ClientError::unknown_item(id));
        }

        self.client.delete_alarm(id).await?;

        if let Some(tracked) = self.alarms.remove(&id) {
            if let Some(ticker) = tracked.ticker {
                ticker.abort();
            }
            tracked.row.hide().await;
        }
        info!("alarm {id} deleted");
        Ok(())
    }

    pub fn row(&self, id: ItemId) -> Option<AlarmRow> {
        self.alarms.get(&id).map(|tracked| tracked.row.clone())
    }

    pub fn is_ticking(&self, id: ItemId) -> bool {
        self.alarms
            .get(&id)
            .and_then(|tracked| tracked.ticker.as_ref())
            .is_some_and(|ticker| !ticker.is_finished())
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub async fn snapshots(&self) -> Vec<RowSnapshot> {
        let mut snapshots = Vec::with_capacity(self.alarms.len());
        for tracked in self.alarms.values() {
            snapshots.push(tracked.row.snapshot().await);
        }
        snapshots
    }

    pub fn shutdown(&mut self) {
        for tracked in self.alarms.values_mut() {
            if let Some(ticker) = tracked.ticker.take() {
                ticker.abort();
            }
        }
    }

    fn spawn_ticker(&self, row: AlarmRow, target: DateTime<Utc>) -> JoinHandle<()> {
        let client = self.client.clone();
        let clock = Arc::clone(&self.clock);
        let period = self.tick;

        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !advance(&row, &client, clock.as_ref(), target).await {
                    break;
                }
            }
            debug!("ticks for alarm {} stopped", row.id());
        })
    }
}

impl Drop for AlarmTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One tick. Returns whether the alarm keeps counting.
async fn advance(row: &AlarmRow, client: &DashboardClient, clock: &dyn Clock, target: DateTime<Utc>) -> bool {
    match tick_at(target, clock.now()) {
        Tick::Counting(text) => row.show_remaining(text).await,
        Tick::Expired => {
            if row.expire().await {
                info!("alarm {} expired", row.id());
                client.notify_expired(row.id());
            }
            false
        }
    }
}
