use crate::errors::AppError;
use crate::models::Prefs;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_prefs_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_PREFS_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/prefs.json"))
}

pub async fn load_prefs(path: &Path) -> Prefs {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(prefs) => prefs,
            Err(err) => {
                error!("failed to parse prefs file: {err}");
                Prefs::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Prefs::default(),
        Err(err) => {
            error!("failed to read prefs file: {err}");
            Prefs::default()
        }
    }
}

pub async fn persist_prefs(path: &Path, prefs: &Prefs) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(prefs).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("salaah_prefs_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_defaults_to_english() {
        let prefs = load_prefs(&temp_path("missing")).await;
        assert_eq!(prefs.language, Language::En);
    }

    #[tokio::test]
    async fn language_survives_a_restart() {
        let path = temp_path("persist");
        persist_prefs(&path, &Prefs { language: Language::Ar }).await.unwrap();

        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains(r#""language": "ar""#));
        assert_eq!(load_prefs(&path).await.language, Language::Ar);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn write_failure_is_internal_error() {
        let mut path = temp_path("nodir");
        path.push("prefs.json");
        let err = persist_prefs(&path, &Prefs::default()).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn corrupt_file_falls_back() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        assert_eq!(load_prefs(&path).await.language, Language::En);
        let _ = fs::remove_file(&path).await;
    }
}
