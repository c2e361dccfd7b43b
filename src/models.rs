use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub weight: f64,
    pub bodyfat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub date: String,
    pub weight: f64,
    pub bodyfat: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub bodyfat: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub latest: Option<f64>,
    pub change: Option<f64>,
    pub direction: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub mode: String,
    pub editing_id: Option<i64>,
    pub pending_delete: Option<i64>,
    pub date: String,
    pub weight: String,
    pub bodyfat: String,
    pub error: Option<String>,
}
