use crate::errors::ApiError;
use crate::models::{
    ChatLink, Credentials, LoginResponse, MessageBody, PrayerLog, StatusMessage,
};
use chrono::NaiveDate;
use reqwest::{Client, Response};
use tracing::debug;

/// Cookie-carrying client for the prayer backend.
///
/// The session lives in the client's cookie jar. Dropping the client (see
/// [`ApiClient::fresh`]) is the only way to forget it.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    /// Same backend, empty cookie jar.
    pub fn fresh(&self) -> Result<Self, reqwest::Error> {
        Self::new(self.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        debug!("POST /api/login as {username}");
        let form = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self.http.post(self.url("/api/login")).form(&form).send().await?;
        Ok(checked(resp).await?.json().await?)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<StatusMessage, ApiError> {
        debug!("POST /api/register as {username}");
        let form = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .http
            .post(self.url("/api/register"))
            .form(&form)
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!("POST /api/logout");
        let resp = self.http.post(self.url("/api/logout")).send().await?;
        checked(resp).await?;
        Ok(())
    }

    pub async fn prayers_today(&self) -> Result<Vec<PrayerLog>, ApiError> {
        debug!("GET /api/prayers/today");
        let resp = self.http.get(self.url("/api/prayers/today")).send().await?;
        Ok(checked(resp).await?.json().await?)
    }

    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<(), ApiError> {
        debug!("PUT /api/prayers/{id}?completed={completed}");
        let resp = self
            .http
            .put(self.url(&format!("/api/prayers/{id}")))
            .query(&[("completed", completed)])
            .send()
            .await?;
        checked(resp).await?;
        Ok(())
    }

    pub async fn monthly_summary(&self, year: i32, month: u32) -> Result<Vec<PrayerLog>, ApiError> {
        debug!("GET /api/summary/monthly?year={year}&month={month}");
        let resp = self
            .http
            .get(self.url("/api/summary/monthly"))
            .query(&[("year", year.to_string()), ("month", month.to_string())])
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    pub async fn weekly_summary(&self, start: NaiveDate) -> Result<Vec<PrayerLog>, ApiError> {
        debug!("GET /api/summary/weekly?start={start}");
        let resp = self
            .http
            .get(self.url("/api/summary/weekly"))
            .query(&[("start", start.format("%Y-%m-%d").to_string())])
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    pub async fn link_telegram(&self, chat_id: &str) -> Result<StatusMessage, ApiError> {
        debug!("POST /api/telegram/link");
        let form = ChatLink {
            chat_id: chat_id.to_string(),
        };
        let resp = self
            .http
            .post(self.url("/api/telegram/link"))
            .form(&form)
            .send()
            .await?;
        Ok(checked(resp).await?.json().await?)
    }

    pub async fn test_telegram(&self) -> Result<StatusMessage, ApiError> {
        debug!("POST /api/telegram/test");
        let resp = self.http.post(self.url("/api/telegram/test")).send().await?;
        Ok(checked(resp).await?.json().await?)
    }
}

async fn checked(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status,
        message: error_message(status, &body),
    })
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<MessageBody>(body)
        .ok()
        .map(|parsed| parsed.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}
