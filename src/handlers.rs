use crate::errors::{ApiError, AppError};
use crate::i18n::Language;
use crate::models::{ChatLink, CompletionForm, Credentials, DayForm, LanguageForm, MonthForm, Prefs};
use crate::state::AppState;
use crate::storage::persist_prefs;
use crate::ui::render_page;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Local;
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ctrl = state.controller.lock().await;
    Html(render_page(&ctrl, Local::now().date_naive()))
}

pub async fn login(State(state): State<AppState>, Form(form): Form<Credentials>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("login", ctrl.login(&form.username, &form.password).await);
    Redirect::to("/")
}

pub async fn register(State(state): State<AppState>, Form(form): Form<Credentials>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("register", ctrl.register(&form.username, &form.password).await);
    Redirect::to("/")
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("logout", ctrl.logout().await);
    info!("signed out");
    Redirect::to("/")
}

pub async fn set_completed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CompletionForm>,
) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("prayer update", ctrl.set_completed(id, form.completed).await);
    Redirect::to("/")
}

pub async fn view_daily(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("load today", ctrl.show_daily().await);
    Redirect::to("/")
}

pub async fn view_monthly(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("monthly summary", ctrl.show_monthly().await);
    Redirect::to("/")
}

pub async fn view_weekly(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("weekly summary", ctrl.show_weekly().await);
    Redirect::to("/")
}

pub async fn view_settings(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.show_settings();
    Redirect::to("/")
}

pub async fn previous_month(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("monthly summary", ctrl.previous_month().await);
    Redirect::to("/")
}

pub async fn next_month(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("monthly summary", ctrl.next_month().await);
    Redirect::to("/")
}

pub async fn select_month(State(state): State<AppState>, Form(form): Form<MonthForm>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("monthly summary", ctrl.select_month(form.year, form.month).await);
    Redirect::to("/")
}

pub async fn select_day(State(state): State<AppState>, Form(form): Form<DayForm>) -> Redirect {
    state.controller.lock().await.select_day(form.date);
    Redirect::to("/")
}

pub async fn previous_week(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("weekly summary", ctrl.previous_week().await);
    Redirect::to("/")
}

pub async fn next_week(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("weekly summary", ctrl.next_week().await);
    Redirect::to("/")
}

pub async fn link_telegram(State(state): State<AppState>, Form(form): Form<ChatLink>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("telegram link", ctrl.link_telegram(&form.chat_id).await);
    Redirect::to("/")
}

pub async fn test_telegram(State(state): State<AppState>) -> Redirect {
    let mut ctrl = state.controller.lock().await;
    report("telegram test", ctrl.test_telegram().await);
    Redirect::to("/")
}

pub async fn set_language(
    State(state): State<AppState>,
    Form(form): Form<LanguageForm>,
) -> Result<Redirect, AppError> {
    let language = Language::from_code(&form.lang)
        .ok_or_else(|| AppError::bad_request("lang must be 'en' or 'ar'"))?;

    persist_prefs(&state.prefs_path, &Prefs { language }).await?;

    let mut ctrl = state.controller.lock().await;
    report("language refresh", ctrl.set_language(language).await);
    Ok(Redirect::to("/"))
}

/// The failure is already on screen as a notice; this only logs it.
fn report(action: &str, result: Result<(), ApiError>) {
    if let Err(err) = result {
        match err.status() {
            Some(status) => warn!("{action} failed ({status}): {err}"),
            None => warn!("{action} failed: {err}"),
        }
    }
}
