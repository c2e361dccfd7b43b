use crate::errors::AppError;
use crate::models::{EntryFields, LogEntry, LogForm};
use crate::store::EntryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "edit",
        }
    }
}

// The log form's server-side state: which entry is being edited (None means
// the form creates), the armed delete confirmation, the raw field values the
// page shows, and the inline message from the last rejected submit.
#[derive(Default)]
pub struct FormController {
    editing_id: Option<i64>,
    pending_delete: Option<i64>,
    draft: LogForm,
    error: Option<String>,
}

impl FormController {
    pub fn new() -> FormController {
        FormController::default()
    }

    pub fn mode(&self) -> FormMode {
        if self.editing_id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing_id
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn draft(&self) -> &LogForm {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // Create or update depending on mode. Ok(None) means the edited entry
    // vanished before the submit; the form still leaves edit mode.
    pub async fn submit(
        &mut self,
        store: &mut EntryStore,
        input: LogForm,
    ) -> Result<Option<LogEntry>, AppError> {
        let fields = match validate(&input) {
            Ok(fields) => fields,
            Err(err) => {
                // Keep the attempted input so the re-rendered form shows it.
                self.draft = input;
                self.error = Some(err.message.clone());
                return Err(err);
            }
        };

        let entry = match self.editing_id {
            Some(id) => store.update(id, fields).await?,
            None => Some(store.add(fields).await?),
        };

        self.cancel_edit();
        Ok(entry)
    }

    pub fn begin_edit(&mut self, store: &EntryStore, id: i64) {
        let Some(entry) = store.get(id) else {
            return;
        };
        self.editing_id = Some(entry.id);
        self.draft = LogForm {
            date: entry.date.clone(),
            weight: entry.weight.to_string(),
            bodyfat: entry.bodyfat.map(|value| value.to_string()).unwrap_or_default(),
        };
        self.error = None;
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.draft = LogForm::default();
        self.error = None;
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub async fn confirm_delete(&mut self, store: &mut EntryStore) -> Result<bool, AppError> {
        let Some(id) = self.pending_delete else {
            return Ok(false);
        };
        let removed = store.delete(id).await?;
        self.pending_delete = None;
        if self.editing_id == Some(id) {
            self.cancel_edit();
        }
        Ok(removed)
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    // Everything transient at once; logout runs this.
    pub fn reset(&mut self) {
        self.cancel_edit();
        self.pending_delete = None;
    }
}

fn validate(input: &LogForm) -> Result<EntryFields, AppError> {
    let date = input.date.trim();
    match (date.is_empty(), parse_finite(&input.weight)) {
        (false, Some(weight)) => Ok(EntryFields {
            date: date.to_string(),
            weight,
            // A bodyfat value that fails to parse counts as not provided.
            bodyfat: parse_finite(&input.bodyfat),
        }),
        _ => Err(AppError::bad_request("Please fill in Date and Weight")),
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
