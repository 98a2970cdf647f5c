use crate::controller::{Controller, Notice, NoticeKind, Screen};
use crate::i18n::{self, Language};
use crate::models::{PrayerLog, PrayerName};
use crate::summary::{
    build_month, build_week, day_breakdown, DayStatus, DayTally, MonthGrid, WeekRow,
};
use chrono::{Datelike, NaiveDate, Weekday};

pub fn render_page(ctrl: &Controller, today: NaiveDate) -> String {
    let lang = ctrl.language();
    let screen = ctrl.screen();

    let body = [
        section("auth-container", screen == Screen::Auth, render_auth(ctrl)),
        section("app-container", screen == Screen::Daily, render_daily(ctrl)),
        section("summary-container", screen == Screen::Monthly, render_monthly(ctrl, today)),
        section("weekly-container", screen == Screen::Weekly, render_weekly(ctrl)),
        section("settings-container", screen == Screen::Settings, render_settings(ctrl)),
    ]
    .concat();

    INDEX_HTML
        .replace("{{LANG}}", lang.code())
        .replace("{{DIR}}", lang.dir())
        .replace("{{TITLE}}", &escape(i18n::text(lang, "app_title")))
        .replace("{{HEADING}}", &tagged("h1", "app_title", lang))
        .replace("{{OTHER_LANG}}", lang.other().code())
        .replace(
            "{{LANG_TOGGLE}}",
            &tagged_with("button", r#"type="submit" class="lang-toggle""#, "language_toggle", lang),
        )
        .replace("{{BODY}}", &body)
}

fn render_auth(ctrl: &Controller) -> String {
    let lang = ctrl.language();
    format!(
        r#"<div class="auth-grid">
  <form id="login-form" class="card" method="post" action="/auth/login">
    {heading}
    <input id="login-username" name="username" type="text" required {user_ph}>
    <input id="login-password" name="password" type="password" required {pass_ph}>
    {button}
    {message}
  </form>
  <form id="register-form" class="card" method="post" action="/auth/register">
    {reg_heading}
    <input id="register-username" name="username" type="text" required value="{draft}" {user_ph}>
    <input id="register-password" name="password" type="password" required {pass_ph}>
    {reg_button}
    {reg_message}
  </form>
</div>"#,
        heading = tagged("h2", "login_heading", lang),
        user_ph = placeholder("username_placeholder", lang),
        pass_ph = placeholder("password_placeholder", lang),
        button = tagged_with("button", r#"type="submit""#, "login_button", lang),
        message = notice("login-message", ctrl.login_notice(), lang),
        reg_heading = tagged("h2", "register_heading", lang),
        draft = escape(ctrl.register_draft()),
        reg_button = tagged_with("button", r#"type="submit""#, "register_button", lang),
        reg_message = notice("register-message", ctrl.register_notice(), lang),
    )
}

fn render_daily(ctrl: &Controller) -> String {
    let lang = ctrl.language();
    let welcome = ctrl
        .username()
        .map(|name| i18n::welcome(lang, name))
        .unwrap_or_default();

    let rows: String = ctrl
        .daily_rows()
        .iter()
        .map(|row| {
            format!(
                r#"<form class="prayer-item" method="post" action="/prayers/{id}">
      <input type="hidden" name="completed" value="{next}">
      <input type="checkbox" id="prayer-{id}" data-prayer-id="{id}"{checked} onchange="this.form.submit()">
      {label}
    </form>"#,
                id = row.id,
                next = !row.completed,
                checked = if row.completed { " checked" } else { "" },
                label = tagged_with(
                    "label",
                    &format!(r#"for="prayer-{}""#, row.id),
                    i18n::prayer_key(row.prayer),
                    lang
                ),
            )
        })
        .collect();

    format!(
        r#"<p id="welcome-message" class="subtitle">{welcome}</p>
{heading}
<div id="prayer-list">
    {rows}
</div>
{message}
<nav class="actions">
  {monthly}
  {weekly}
  {settings}
  {logout}
</nav>"#,
        welcome = escape(&welcome),
        heading = tagged("h2", "today_heading", lang),
        message = notice("daily-message", ctrl.daily_notice(), lang),
        monthly = action_button("/view/monthly", "view-summary-button", "view_monthly", lang),
        weekly = action_button("/view/weekly", "view-weekly-button", "view_weekly", lang),
        settings = action_button("/view/settings", "view-settings-button", "view_settings", lang),
        logout = action_button("/auth/logout", "logout-button", "logout_button", lang),
    )
}

fn render_monthly(ctrl: &Controller, today: NaiveDate) -> String {
    let lang = ctrl.language();
    let cursor = ctrl.monthly_cursor();
    let entries = ctrl.monthly_entries();

    let month_options: String = (1..=12)
        .map(|month| {
            format!(
                r#"<option value="{month}"{selected}>{name}</option>"#,
                selected = if month == cursor.month() { " selected" } else { "" },
                name = i18n::month_name(lang, month),
            )
        })
        .collect();
    let mut years: Vec<i32> = (0..=5).map(|offset| today.year() - offset).collect();
    if !years.contains(&cursor.year()) {
        years.push(cursor.year());
        years.sort_unstable_by(|a, b| b.cmp(a));
    }
    let year_options: String = years
        .into_iter()
        .map(|year| {
            format!(
                r#"<option value="{year}"{selected}>{year}</option>"#,
                selected = if year == cursor.year() { " selected" } else { "" },
            )
        })
        .collect();

    let results = if ctrl.monthly_notice().is_some() {
        String::new()
    } else {
        let grid = render_calendar(&build_month(cursor, entries), lang);
        if entries.is_empty() {
            format!("{}{grid}", tagged("p", "no_data", lang))
        } else {
            grid
        }
    };

    let details = ctrl
        .selected_day()
        .map(|date| render_day_details(date, entries, lang))
        .unwrap_or_default();

    format!(
        r#"{heading}
<form id="summary-form" method="post" action="/monthly/select">
  {month_label}
  <select id="summary-month" name="month">{month_options}</select>
  {year_label}
  <select id="summary-year" name="year">{year_options}</select>
  {show}
</form>
<div class="pager">
  {prev}
  <span id="current-month-label">{label}</span>
  {next}
</div>
{message}
<div id="summary-results">{results}</div>
{details}
{back}"#,
        heading = tagged("h2", "view_monthly", lang),
        month_label = tagged_with("label", r#"for="summary-month""#, "month_label", lang),
        year_label = tagged_with("label", r#"for="summary-year""#, "year_label", lang),
        show = tagged_with("button", r#"type="submit""#, "show_button", lang),
        prev = action_button("/monthly/prev", "prev-month-btn", "previous", lang),
        label = escape(&i18n::month_label(lang, cursor)),
        next = action_button("/monthly/next", "next-month-btn", "next", lang),
        message = notice("summary-message", ctrl.monthly_notice(), lang),
        back = action_button("/view/daily", "back-to-prayers-button", "back_button", lang),
    )
}

fn render_calendar(grid: &MonthGrid, lang: Language) -> String {
    let mut cells = String::new();
    for weekday in [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ] {
        cells.push_str(&format!(
            r#"<div class="calendar-head">{}</div>"#,
            escape(&i18n::weekday_short(lang, weekday))
        ));
    }
    for _ in 0..grid.leading_blanks {
        cells.push_str(r#"<div class="calendar-cell blank"></div>"#);
    }
    for day in &grid.days {
        let title = format!(
            "{} ({})",
            i18n::text(lang, day.status.label_key()),
            i18n::prayers_count(lang, day.tally.completed, day.tally.total)
        );
        cells.push_str(&format!(
            r#"<form method="post" action="/monthly/day" data-date="{date}" class="calendar-cell status-{status}"><button type="submit" name="date" value="{date}" title="{title}">{day}</button></form>"#,
            date = day.date,
            status = day.status.css_name(),
            title = escape(&title),
            day = day.date.day(),
        ));
    }
    format!(r#"<div class="calendar">{cells}</div>"#)
}

fn render_day_details(date: NaiveDate, entries: &[PrayerLog], lang: Language) -> String {
    let breakdown = day_breakdown(date, entries);
    let completed = breakdown.iter().filter(|(_, done)| *done == Some(true)).count();
    let total = breakdown.iter().filter(|(_, done)| done.is_some()).count();
    let status = DayStatus::classify(DayTally { completed, total });

    let items: String = breakdown
        .iter()
        .map(|(prayer, done)| {
            format!(
                r#"<li class="{class}">{label} {mark}</li>"#,
                class = mark_class(*done),
                label = tagged("span", i18n::prayer_key(*prayer), lang),
                mark = mark_symbol(*done),
            )
        })
        .collect();

    format!(
        r#"<div id="day-details" class="card">
  {heading}
  <p class="summary-day-item"><strong>{day}</strong> [{status}] ({count})</p>
  <ul>{items}</ul>
</div>"#,
        heading = tagged("h3", "day_details", lang),
        day = escape(&i18n::day_label(lang, date)),
        status = escape(i18n::text(lang, status.label_key())),
        count = escape(&i18n::prayers_count(lang, completed, total)),
    )
}

fn render_weekly(ctrl: &Controller) -> String {
    let lang = ctrl.language();
    let start = ctrl.weekly_cursor();
    let entries = ctrl.weekly_entries();

    let results = if ctrl.weekly_notice().is_some() {
        String::new()
    } else {
        let table = render_week_table(&build_week(start, entries), lang);
        if entries.is_empty() {
            format!("{}{table}", tagged("p", "no_data", lang))
        } else {
            table
        }
    };

    format!(
        r#"{heading}
<div class="pager">
  {prev}
  <span id="current-week-label" data-start="{start}">{label}</span>
  {next}
</div>
{message}
<div id="weekly-results">{results}</div>
{back}"#,
        heading = tagged("h2", "view_weekly", lang),
        prev = action_button("/weekly/prev", "prev-week-btn", "previous", lang),
        label = escape(&i18n::week_label(lang, start)),
        next = action_button("/weekly/next", "next-week-btn", "next", lang),
        message = notice("weekly-message", ctrl.weekly_notice(), lang),
        back = action_button("/view/daily", "back-from-weekly-button", "back_button", lang),
    )
}

fn render_week_table(rows: &[WeekRow], lang: Language) -> String {
    let header: String = PrayerName::ALL
        .iter()
        .map(|prayer| tagged("th", i18n::prayer_key(*prayer), lang))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let marks: String = row
                .marks
                .iter()
                .map(|done| {
                    format!(
                        r#"<td class="mark {}">{}</td>"#,
                        mark_class(*done),
                        mark_symbol(*done)
                    )
                })
                .collect();
            format!(
                r#"<tr data-date="{date}" class="status-{status}"><td>{label}</td>{marks}</tr>"#,
                date = row.date,
                status = DayStatus::classify(row.tally).css_name(),
                label = escape(&i18n::day_label(lang, row.date)),
            )
        })
        .collect();

    format!(
        r#"<table class="weekly-table"><thead><tr>{date}{header}</tr></thead><tbody>{body}</tbody></table>"#,
        date = tagged("th", "date_column", lang),
    )
}

fn render_settings(ctrl: &Controller) -> String {
    let lang = ctrl.language();
    format!(
        r#"{heading}
{hint}
<form id="telegram-form" method="post" action="/telegram/link">
  <input id="telegram-chat-id" name="chatId" type="text" required {chat_ph}>
  {link}
</form>
{test}
{message}
{back}"#,
        heading = tagged("h2", "settings_heading", lang),
        hint = tagged_with("p", r#"class="subtitle""#, "settings_hint", lang),
        chat_ph = placeholder("chat_id_placeholder", lang),
        link = tagged_with("button", r#"type="submit""#, "link_button", lang),
        test = action_button("/telegram/test", "telegram-test-button", "test_button", lang),
        message = notice("settings-message", ctrl.settings_notice(), lang),
        back = action_button("/view/daily", "back-from-settings-button", "back_button", lang),
    )
}

fn section(id: &str, visible: bool, body: String) -> String {
    let hidden = if visible { "" } else { " hidden" };
    format!("<section id=\"{id}\" class=\"screen{hidden}\">\n{body}\n</section>\n")
}

/// Element whose text is the localized string for `key`. `data-i18n` is
/// always the last attribute.
fn tagged(tag: &str, key: &'static str, lang: Language) -> String {
    format!(
        r#"<{tag} data-i18n="{key}">{}</{tag}>"#,
        escape(i18n::text(lang, key))
    )
}

fn tagged_with(tag: &str, attrs: &str, key: &'static str, lang: Language) -> String {
    format!(
        r#"<{tag} {attrs} data-i18n="{key}">{}</{tag}>"#,
        escape(i18n::text(lang, key))
    )
}

fn placeholder(key: &'static str, lang: Language) -> String {
    format!(
        r#"data-i18n-placeholder="{key}" placeholder="{}""#,
        escape(i18n::text(lang, key))
    )
}

fn action_button(action: &str, id: &str, key: &'static str, lang: Language) -> String {
    format!(
        r#"<form method="post" action="{action}" class="inline">{}</form>"#,
        tagged_with("button", &format!(r#"type="submit" id="{id}""#), key, lang)
    )
}

fn notice(id: &str, notice: Option<&Notice>, lang: Language) -> String {
    match notice {
        Some(notice) => {
            let class = match notice.kind {
                NoticeKind::Success => "success-message",
                NoticeKind::Error => "error-message",
            };
            format!(
                r#"<p id="{id}" class="message {class}">{}</p>"#,
                escape(&notice.resolve(lang))
            )
        }
        None => format!(r#"<p id="{id}" class="message"></p>"#),
    }
}

fn mark_class(done: Option<bool>) -> &'static str {
    match done {
        Some(true) => "mark-done",
        Some(false) => "mark-missed",
        None => "mark-none",
    }
}

fn mark_symbol(done: Option<bool>) -> &'static str {
    match done {
        Some(true) => "✓",
        Some(false) => "✗",
        None => "–",
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{LANG}}" dir="{{DIR}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&family=Noto+Naskh+Arabic:wght@400;600&display=swap');

    :root {
      --bg-1: #f3f1e7;
      --bg-2: #cfe3d0;
      --ink: #23302a;
      --accent: #2f7d5b;
      --accent-2: #2f4858;
      --warn: #d98e04;
      --danger: #c2412d;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e6efe2 60%, #f6f4ec 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    html[dir="rtl"] body {
      font-family: "Noto Naskh Arabic", "Tahoma", sans-serif;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .hidden {
      display: none !important;
    }

    .screen {
      display: grid;
      gap: 16px;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .auth-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    input[type="text"],
    input[type="password"],
    select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .lang-toggle {
      background: var(--accent-2);
    }

    form.inline {
      display: inline;
    }

    .actions,
    .pager {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
    }

    .prayer-item {
      display: flex;
      align-items: center;
      gap: 12px;
      background: white;
      border-radius: 14px;
      padding: 12px 16px;
    }

    .message {
      margin: 0;
      min-height: 1.2em;
    }

    .error-message {
      color: var(--danger);
    }

    .success-message {
      color: var(--accent);
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .calendar-head {
      text-align: center;
      font-size: 0.85rem;
      color: #8b857d;
    }

    .calendar-cell button {
      width: 100%;
      border-radius: 12px;
      padding: 10px 0;
      background: #eceae3;
      color: var(--ink);
    }

    .status-full button {
      background: var(--accent);
      color: white;
    }

    .status-partial button {
      background: var(--warn);
      color: white;
    }

    .status-none button {
      background: var(--danger);
      color: white;
    }

    .weekly-table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 14px;
    }

    .weekly-table th,
    .weekly-table td {
      padding: 8px;
      text-align: center;
    }

    .mark-done {
      color: var(--accent);
    }

    .mark-missed {
      color: var(--danger);
    }

    .mark-none {
      color: #b5b0a8;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      {{HEADING}}
      <form method="post" action="/language" class="inline">
        <input type="hidden" name="lang" value="{{OTHER_LANG}}" />
        {{LANG_TOGGLE}}
      </form>
    </header>
{{BODY}}
  </main>
</body>
</html>
"#;
