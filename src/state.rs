use crate::controller::Controller;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub prefs_path: PathBuf,
    pub controller: Arc<Mutex<Controller>>,
}

impl AppState {
    pub fn new(prefs_path: PathBuf, controller: Controller) -> Self {
        Self {
            prefs_path,
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}
