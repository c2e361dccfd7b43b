use crate::errors::AppError;
use crate::forms::FormController;
use crate::session::SessionGate;
use crate::storage::Storage;
use crate::store::EntryStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct App {
    pub store: EntryStore,
    pub gate: SessionGate,
    pub form: FormController,
}

impl App {
    pub async fn load(storage: Storage, access_key: String) -> App {
        App {
            store: EntryStore::load(storage.clone()).await,
            gate: SessionGate::load(storage, access_key).await,
            form: FormController::new(),
        }
    }

    // Logout is a full reset: clear the flag, then rebuild the transient
    // state from whatever storage holds, like reloading the page.
    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.gate.logout().await?;
        self.store.reload().await;
        self.form.reset();
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Mutex<App>>,
}

impl AppState {
    pub fn new(app: App) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogForm;
    use crate::storage::LOGS_KEY;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("gym_state_{tag}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn logout_rebuilds_state_from_storage() {
        let path = temp_path("logout");
        let storage = Storage::load(path.clone()).await;
        let mut app = App::load(storage.clone(), "1234".to_string()).await;

        app.gate.attempt_login("1234").await.unwrap();
        let entry = app
            .form
            .submit(
                &mut app.store,
                LogForm {
                    date: "2024-03-01".to_string(),
                    weight: "80".to_string(),
                    bodyfat: String::new(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        app.form.begin_edit(&app.store, entry.id);

        // Someone rewrites the persisted history behind the app's back; the
        // logout reload must pick that up, not the in-memory copy.
        storage.set(LOGS_KEY, "[]".to_string()).await.unwrap();

        app.logout().await.unwrap();
        assert!(!app.gate.is_authenticated());
        assert!(app.store.all().is_empty());
        assert_eq!(app.form.editing_id(), None);

        std::fs::remove_file(path).ok();
    }
}
