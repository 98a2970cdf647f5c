//! English/Arabic text layer.
//!
//! Every label the page shows comes from [`STRINGS`] through [`text`]. The
//! renderer tags each such element with its key so a language switch can be
//! checked element by element.

use crate::models::PrayerName;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }

    pub fn dir(self) -> &'static str {
        match self {
            Language::En => "ltr",
            Language::Ar => "rtl",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

/// `(key, english, arabic)`
pub const STRINGS: &[(&str, &str, &str)] = &[
    ("app_title", "Salaah Tracker", "متتبع الصلاة"),
    ("login_heading", "Login", "تسجيل الدخول"),
    ("register_heading", "Register", "إنشاء حساب"),
    ("username_placeholder", "Username", "اسم المستخدم"),
    ("password_placeholder", "Password", "كلمة المرور"),
    ("login_button", "Login", "دخول"),
    ("register_button", "Register", "تسجيل"),
    ("welcome", "Welcome, {name}!", "أهلاً، {name}!"),
    ("today_heading", "Today's Prayers", "صلوات اليوم"),
    ("logout_button", "Logout", "تسجيل الخروج"),
    ("view_monthly", "Monthly Summary", "الملخص الشهري"),
    ("view_weekly", "Weekly Summary", "الملخص الأسبوعي"),
    ("view_settings", "Notifications", "الإشعارات"),
    ("back_button", "Back to Prayers", "العودة إلى الصلوات"),
    ("previous", "Previous", "السابق"),
    ("next", "Next", "التالي"),
    ("show_button", "Show", "عرض"),
    ("month_label", "Month", "الشهر"),
    ("year_label", "Year", "السنة"),
    ("date_column", "Date", "التاريخ"),
    ("day_details", "Day details", "تفاصيل اليوم"),
    ("prayers_count", "{done}/{total} prayers", "{done}/{total} صلوات"),
    ("load_prayers_failed", "Could not load prayers.", "تعذر تحميل الصلوات."),
    ("load_summary_failed", "Error loading summary.", "خطأ في تحميل الملخص."),
    ("load_weekly_failed", "Error loading data.", "خطأ في تحميل البيانات."),
    ("no_data", "No data found for this period.", "لا توجد بيانات لهذه الفترة."),
    ("status_full", "All Complete", "مكتملة"),
    ("status_partial", "Partial", "جزئية"),
    ("status_none", "None", "لا شيء"),
    ("status_empty", "No data", "لا بيانات"),
    ("settings_heading", "Telegram Notifications", "إشعارات تيليجرام"),
    ("settings_hint", "Send /start to the bot, then paste your chat ID here.", "أرسل /start إلى البوت ثم الصق معرّف المحادثة هنا."),
    ("chat_id_placeholder", "Telegram Chat ID", "معرّف محادثة تيليجرام"),
    ("link_button", "Link", "ربط"),
    ("test_button", "Send Test", "إرسال تجربة"),
    ("language_toggle", "العربية", "English"),
    ("prayer_fajr", "Fajr", "الفجر"),
    ("prayer_dhuhr", "Dhuhr", "الظهر"),
    ("prayer_asr", "Asr", "العصر"),
    ("prayer_maghrib", "Maghrib", "المغرب"),
    ("prayer_isha", "Isha", "العشاء"),
];

/// Localized string for `key`; unknown keys render as the key itself.
pub fn text(lang: Language, key: &'static str) -> &'static str {
    STRINGS
        .iter()
        .find(|(candidate, _, _)| *candidate == key)
        .map(|(_, en, ar)| match lang {
            Language::En => *en,
            Language::Ar => *ar,
        })
        .unwrap_or(key)
}

pub fn welcome(lang: Language, username: &str) -> String {
    text(lang, "welcome").replace("{name}", username)
}

pub fn prayers_count(lang: Language, done: usize, total: usize) -> String {
    text(lang, "prayers_count")
        .replace("{done}", &done.to_string())
        .replace("{total}", &total.to_string())
}

pub fn prayer_key(prayer: PrayerName) -> &'static str {
    match prayer {
        PrayerName::Fajr => "prayer_fajr",
        PrayerName::Dhuhr => "prayer_dhuhr",
        PrayerName::Asr => "prayer_asr",
        PrayerName::Maghrib => "prayer_maghrib",
        PrayerName::Isha => "prayer_isha",
    }
}

pub fn prayer_label(lang: Language, prayer: PrayerName) -> &'static str {
    text(lang, prayer_key(prayer))
}

const WEEKDAYS_EN: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
const WEEKDAYS_AR: [&str; 7] = [
    "الأحد", "الإثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];
const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس",
    "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

pub fn weekday_name(lang: Language, weekday: Weekday) -> &'static str {
    let index = weekday.num_days_from_sunday() as usize;
    match lang {
        Language::En => WEEKDAYS_EN[index],
        Language::Ar => WEEKDAYS_AR[index],
    }
}

/// Column header for the calendar grid.
pub fn weekday_short(lang: Language, weekday: Weekday) -> String {
    match lang {
        Language::En => weekday_name(lang, weekday).chars().take(3).collect(),
        Language::Ar => weekday_name(lang, weekday).to_string(),
    }
}

pub fn month_name(lang: Language, month: u32) -> &'static str {
    let index = (month.clamp(1, 12) - 1) as usize;
    match lang {
        Language::En => MONTHS_EN[index],
        Language::Ar => MONTHS_AR[index],
    }
}

fn short_date(lang: Language, date: NaiveDate) -> String {
    match lang {
        Language::En => {
            let month: String = month_name(lang, date.month()).chars().take(3).collect();
            format!("{month} {}", date.day())
        }
        Language::Ar => format!("{} {}", date.day(), month_name(lang, date.month())),
    }
}

/// "November 2025"
pub fn month_label(lang: Language, first: NaiveDate) -> String {
    format!("{} {}", month_name(lang, first.month()), first.year())
}

/// "Nov 2 - Nov 8"
pub fn week_label(lang: Language, start: NaiveDate) -> String {
    let end = start + chrono::Duration::days(6);
    format!("{} - {}", short_date(lang, start), short_date(lang, end))
}

/// "2025-11-03 (Monday)"
pub fn day_label(lang: Language, date: NaiveDate) -> String {
    format!("{date} ({})", weekday_name(lang, date.weekday()))
}
