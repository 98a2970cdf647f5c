use crate::api::ApiClient;
use crate::calendar::{month_start, shift_months, shift_weeks, week_start};
use crate::errors::ApiError;
use crate::i18n::{self, Language};
use crate::models::{PrayerLog, PrayerName, StatusMessage};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Daily,
    Monthly,
    Weekly,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeText {
    /// Server-supplied text, shown verbatim.
    Server(String),
    /// Key into the localized string table.
    Local(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: NoticeText,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: NoticeText::Server(message.into()),
        }
    }

    fn error(err: &ApiError) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: NoticeText::Server(err.to_string()),
        }
    }

    fn local_error(key: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: NoticeText::Local(key),
        }
    }

    fn from_status(body: StatusMessage) -> Self {
        let ok = body
            .status
            .as_deref()
            .is_none_or(|status| status.eq_ignore_ascii_case("success"));
        Self {
            kind: if ok { NoticeKind::Success } else { NoticeKind::Error },
            text: NoticeText::Server(body.message),
        }
    }

    pub fn resolve(&self, lang: Language) -> String {
        match &self.text {
            NoticeText::Server(message) => message.clone(),
            NoticeText::Local(key) => i18n::text(lang, *key).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRow {
    pub id: i64,
    pub prayer: PrayerName,
    pub completed: bool,
}

/// The single client-side controller: which screen is visible, both
/// summary cursors, and the last data fetched for the visible screen.
///
/// Every operation runs to completion before the next one starts (the
/// caller holds it behind a mutex), so there is no request racing.
pub struct Controller {
    api: ApiClient,
    language: Language,
    screen: Screen,
    username: Option<String>,
    login_notice: Option<Notice>,
    register_notice: Option<Notice>,
    register_draft: String,
    daily_rows: Vec<ChecklistRow>,
    daily_notice: Option<Notice>,
    monthly_cursor: NaiveDate,
    monthly_entries: Vec<PrayerLog>,
    monthly_notice: Option<Notice>,
    selected_day: Option<NaiveDate>,
    weekly_cursor: NaiveDate,
    weekly_entries: Vec<PrayerLog>,
    weekly_notice: Option<Notice>,
    settings_notice: Option<Notice>,
}

impl Controller {
    pub fn new(api: ApiClient, language: Language) -> Self {
        Self::new_at(api, language, today())
    }

    pub fn new_at(api: ApiClient, language: Language, today: NaiveDate) -> Self {
        Self {
            api,
            language,
            screen: Screen::Auth,
            username: None,
            login_notice: None,
            register_notice: None,
            register_draft: String::new(),
            daily_rows: Vec::new(),
            daily_notice: None,
            monthly_cursor: month_start(today),
            monthly_entries: Vec::new(),
            monthly_notice: None,
            selected_day: None,
            weekly_cursor: week_start(today),
            weekly_entries: Vec::new(),
            weekly_notice: None,
            settings_notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn login_notice(&self) -> Option<&Notice> {
        self.login_notice.as_ref()
    }

    pub fn register_notice(&self) -> Option<&Notice> {
        self.register_notice.as_ref()
    }

    pub fn register_draft(&self) -> &str {
        &self.register_draft
    }

    pub fn daily_rows(&self) -> &[ChecklistRow] {
        &self.daily_rows
    }

    pub fn daily_notice(&self) -> Option<&Notice> {
        self.daily_notice.as_ref()
    }

    pub fn monthly_cursor(&self) -> NaiveDate {
        self.monthly_cursor
    }

    pub fn monthly_entries(&self) -> &[PrayerLog] {
        &self.monthly_entries
    }

    pub fn monthly_notice(&self) -> Option<&Notice> {
        self.monthly_notice.as_ref()
    }

    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selected_day
    }

    pub fn weekly_cursor(&self) -> NaiveDate {
        self.weekly_cursor
    }

    pub fn weekly_entries(&self) -> &[PrayerLog] {
        &self.weekly_entries
    }

    pub fn weekly_notice(&self) -> Option<&Notice> {
        self.weekly_notice.as_ref()
    }

    pub fn settings_notice(&self) -> Option<&Notice> {
        self.settings_notice.as_ref()
    }

    fn signed_in(&self) -> bool {
        self.screen != Screen::Auth
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        match self.api.login(username, password).await {
            Ok(resp) => {
                info!("signed in as {}", resp.username);
                self.username = Some(resp.username);
                self.login_notice = None;
                self.register_notice = None;
                self.screen = Screen::Daily;
                self.load_today().await
            }
            Err(err) => {
                self.login_notice = Some(Notice::error(&err));
                Err(err)
            }
        }
    }

    pub async fn register(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        match self.api.register(username, password).await {
            Ok(resp) => {
                self.register_notice = Some(Notice::success(resp.message));
                self.register_draft.clear();
                Ok(())
            }
            Err(err) => {
                self.register_notice = Some(Notice::error(&err));
                self.register_draft = username.to_string();
                Err(err)
            }
        }
    }

    /// Ends the session and returns to the initial state whatever the
    /// backend answers.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let result = self.api.logout().await;
        self.reset();
        result
    }

    fn reset(&mut self) {
        let api = match self.api.fresh() {
            Ok(api) => api,
            Err(err) => {
                error!("failed to rebuild backend client: {err}");
                self.api.clone()
            }
        };
        *self = Self::new(api, self.language);
    }

    pub async fn load_today(&mut self) -> Result<(), ApiError> {
        match self.api.prayers_today().await {
            Ok(entries) => {
                self.daily_rows = entries
                    .into_iter()
                    .map(|entry| ChecklistRow {
                        id: entry.id,
                        prayer: entry.prayer_name,
                        completed: entry.completed,
                    })
                    .collect();
                self.daily_notice = None;
                Ok(())
            }
            Err(err) => {
                self.daily_rows.clear();
                self.daily_notice = Some(Notice::local_error("load_prayers_failed"));
                Err(err)
            }
        }
    }

    /// Applies the change locally first and reverts it if the backend
    /// refuses.
    pub async fn set_completed(&mut self, id: i64, completed: bool) -> Result<(), ApiError> {
        if self.screen != Screen::Daily {
            return Ok(());
        }
        let Some(position) = self.daily_rows.iter().position(|row| row.id == id) else {
            warn!("ignoring update for unknown prayer {id}");
            return Ok(());
        };

        let previous = self.daily_rows[position].completed;
        self.daily_rows[position].completed = completed;

        match self.api.set_completed(id, completed).await {
            Ok(()) => {
                self.daily_notice = None;
                Ok(())
            }
            Err(err) => {
                if let Some(row) = self.daily_rows.get_mut(position) {
                    row.completed = previous;
                }
                self.daily_notice = Some(Notice::error(&err));
                Err(err)
            }
        }
    }

    pub async fn show_daily(&mut self) -> Result<(), ApiError> {
        if !self.signed_in() {
            return Ok(());
        }
        self.screen = Screen::Daily;
        self.load_today().await
    }

    pub async fn show_monthly(&mut self) -> Result<(), ApiError> {
        self.show_monthly_at(today()).await
    }

    pub async fn show_monthly_at(&mut self, today: NaiveDate) -> Result<(), ApiError> {
        if !self.signed_in() {
            return Ok(());
        }
        self.screen = Screen::Monthly;
        self.monthly_cursor = month_start(today);
        self.refresh_monthly().await
    }

    pub async fn previous_month(&mut self) -> Result<(), ApiError> {
        self.move_month(-1).await
    }

    pub async fn next_month(&mut self) -> Result<(), ApiError> {
        self.move_month(1).await
    }

    async fn move_month(&mut self, months: i32) -> Result<(), ApiError> {
        if self.screen != Screen::Monthly {
            return Ok(());
        }
        self.monthly_cursor = shift_months(self.monthly_cursor, months);
        self.refresh_monthly().await
    }

    pub async fn select_month(&mut self, year: i32, month: u32) -> Result<(), ApiError> {
        if self.screen != Screen::Monthly {
            return Ok(());
        }
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            warn!("ignoring invalid month {year}-{month}");
            return Ok(());
        };
        self.monthly_cursor = first;
        self.refresh_monthly().await
    }

    /// Shows one day's breakdown from the entries already fetched.
    pub fn select_day(&mut self, date: NaiveDate) {
        if self.screen == Screen::Monthly && month_start(date) == self.monthly_cursor {
            self.selected_day = Some(date);
        }
    }

    async fn refresh_monthly(&mut self) -> Result<(), ApiError> {
        self.selected_day = None;
        let (year, month) = (self.monthly_cursor.year(), self.monthly_cursor.month());
        match self.api.monthly_summary(year, month).await {
            Ok(entries) => {
                self.monthly_entries = entries;
                self.monthly_notice = None;
                Ok(())
            }
            Err(err) => {
                self.monthly_entries.clear();
                self.monthly_notice = Some(Notice::local_error("load_summary_failed"));
                Err(err)
            }
        }
    }

    pub async fn show_weekly(&mut self) -> Result<(), ApiError> {
        self.show_weekly_at(today()).await
    }

    pub async fn show_weekly_at(&mut self, today: NaiveDate) -> Result<(), ApiError> {
        if !self.signed_in() {
            return Ok(());
        }
        self.screen = Screen::Weekly;
        self.weekly_cursor = week_start(today);
        self.refresh_weekly().await
    }

    pub async fn previous_week(&mut self) -> Result<(), ApiError> {
        self.move_week(-1).await
    }

    pub async fn next_week(&mut self) -> Result<(), ApiError> {
        self.move_week(1).await
    }

    async fn move_week(&mut self, weeks: i64) -> Result<(), ApiError> {
        if self.screen != Screen::Weekly {
            return Ok(());
        }
        self.weekly_cursor = shift_weeks(week_start(self.weekly_cursor), weeks);
        self.refresh_weekly().await
    }

    async fn refresh_weekly(&mut self) -> Result<(), ApiError> {
        self.weekly_cursor = week_start(self.weekly_cursor);
        match self.api.weekly_summary(self.weekly_cursor).await {
            Ok(entries) => {
                self.weekly_entries = entries;
                self.weekly_notice = None;
                Ok(())
            }
            Err(err) => {
                self.weekly_entries.clear();
                self.weekly_notice = Some(Notice::local_error("load_weekly_failed"));
                Err(err)
            }
        }
    }

    pub fn show_settings(&mut self) {
        if !self.signed_in() {
            return;
        }
        self.screen = Screen::Settings;
        self.settings_notice = None;
    }

    pub async fn link_telegram(&mut self, chat_id: &str) -> Result<(), ApiError> {
        if self.screen != Screen::Settings {
            return Ok(());
        }
        let result = self.api.link_telegram(chat_id.trim()).await;
        self.settings_result(result)
    }

    pub async fn test_telegram(&mut self) -> Result<(), ApiError> {
        if self.screen != Screen::Settings {
            return Ok(());
        }
        let result = self.api.test_telegram().await;
        self.settings_result(result)
    }

    fn settings_result(&mut self, result: Result<StatusMessage, ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(body) => {
                self.settings_notice = Some(Notice::from_status(body));
                Ok(())
            }
            Err(err) => {
                self.settings_notice = Some(Notice::error(&err));
                Err(err)
            }
        }
    }

    /// Switches language and refreshes only the visible screen's data.
    pub async fn set_language(&mut self, language: Language) -> Result<(), ApiError> {
        self.language = language;
        match self.screen {
            Screen::Daily => self.load_today().await,
            Screen::Monthly => {
                let selected = self.selected_day;
                self.refresh_monthly().await?;
                self.selected_day = selected;
                Ok(())
            }
            Screen::Weekly => self.refresh_weekly().await,
            Screen::Auth | Screen::Settings => Ok(()),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
