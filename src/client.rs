use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{AlarmForm, AlarmRecord, ItemId, LinkForm, LinkRecord, TaskEdit};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// HTTP side of the dashboard. Paths are joined under the configured base url.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    base_url: Url,
}

impl DashboardClient {
    pub fn new(config: &Config) -> Self {
        Self::with_http(Client::new(), config.base_url.clone())
    }

    pub fn with_http(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_alarms(&self) -> Result<Vec<AlarmRecord>, ClientError> {
        let alarms: Vec<AlarmRecord> = self.get_json("time/alarm").await?;
        info!("loaded {} alarms", alarms.len());
        Ok(alarms)
    }

    pub async fn pinned_links(&self) -> Result<Vec<LinkRecord>, ClientError> {
        self.get_json("links/pinned").await
    }

    /// The backend answers form posts with a redirect to the list page, which
    /// is followed.
    pub async fn create_alarm(&self, form: &AlarmForm) -> Result<(), ClientError> {
        self.submit("time/alarm", form).await
    }

    pub async fn create_task(&self, task: &TaskEdit) -> Result<(), ClientError> {
        self.submit("todo", task).await
    }

    pub async fn create_link(&self, form: &LinkForm) -> Result<(), ClientError> {
        self.submit("links", form).await
    }

    pub async fn toggle_pin(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::POST, &format!("links/{id}"), None).await
    }

    pub async fn expire_alarm(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::PUT, &format!("time/alarm/{id}"), None).await
    }

    /// Sends the expiry update in a detached task. The outcome is only logged:
    /// there is no retry and nothing waits for the response.
    pub fn notify_expired(&self, id: ItemId) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            match client.expire_alarm(id).await {
                Ok(()) => debug!("expiry of alarm {id} delivered"),
                Err(err) => warn!("expiry of alarm {id} not delivered: {err}"),
            }
        })
    }

    pub async fn delete_alarm(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::DELETE, &format!("time/alarm/{id}"), None).await
    }

    pub async fn delete_link(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::DELETE, &format!("links/{id}"), None).await
    }

    pub async fn delete_task(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::DELETE, &format!("todo/{id}"), None).await
    }

    /// The backend flips the completed flag on PUT, so completing and undoing
    /// hit the same endpoint.
    pub async fn complete_task(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::PUT, &format!("todo/{id}"), None).await
    }

    pub async fn undo_task(&self, id: ItemId) -> Result<(), ClientError> {
        self.send(Method::PUT, &format!("todo/{id}"), None).await
    }

    pub async fn edit_task(&self, id: ItemId, edit: &TaskEdit) -> Result<(), ClientError> {
        self.send(Method::POST, &format!("todo/{id}"), Some(edit)).await
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::config(format!("cannot join {path}: {err}")))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status, path));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::decode)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&TaskEdit>) -> Result<(), ClientError> {
        let mut request = self.http.request(method.clone(), self.url(path)?);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        check_status(&method, path, response.status())
    }

    async fn submit<T: Serialize + ?Sized>(&self, path: &str, form: &T) -> Result<(), ClientError> {
        let response = self.http.post(self.url(path)?).form(form).send().await?;
        check_status(&Method::POST, path, response.status())
    }
}

fn check_status(method: &Method, path: &str, status: StatusCode) -> Result<(), ClientError> {
    debug!("{method} {path} -> {status}");
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::status(status, path))
    }
}
