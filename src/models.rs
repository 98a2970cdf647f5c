use crate::i18n::Language;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    /// Display order for every list and table.
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn index(self) -> usize {
        match self {
            PrayerName::Fajr => 0,
            PrayerName::Dhuhr => 1,
            PrayerName::Asr => 2,
            PrayerName::Maghrib => 3,
            PrayerName::Isha => 4,
        }
    }
}

/// One backend record: whether a named prayer was done on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerLog {
    pub id: i64,
    pub prayer_name: PrayerName,
    pub prayer_date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLink {
    #[serde(rename = "chatId")]
    pub chat_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionForm {
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct MonthForm {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct DayForm {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub lang: String,
}

/// Client preferences persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Prefs {
    #[serde(default)]
    pub language: Language,
}
