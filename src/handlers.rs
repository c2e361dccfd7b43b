use crate::errors::AppError;
use crate::models::{
    ActionRequest, FormResponse, LogEntry, LogForm, LoginRequest, SessionResponse, StatsResponse,
};
use crate::state::{App, AppState};
use crate::stats::compute_stats;
use crate::ui;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::{Form, Json};

// HTML surface: every post redirects back to "/", which re-renders the whole
// page from the current state. Failures a user can cause from the page
// (wrong key, invalid form input) are kept as inline state instead of an
// error response, so the redirect always lands on a page that explains them.

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let app = state.app.lock().await;
    Html(ui::render_page(&app))
}

pub async fn login_form(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    match app.gate.attempt_login(&req.key).await {
        Ok(()) => {}
        Err(err) if err.status == StatusCode::UNAUTHORIZED => {}
        Err(err) => return Err(err),
    }
    Ok(Redirect::to("/"))
}

pub async fn logout_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    app.logout().await?;
    Ok(Redirect::to("/"))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(input): Form<LogForm>,
) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    if !app.gate.is_authenticated() {
        return Ok(Redirect::to("/"));
    }
    let App { store, form, .. } = &mut *app;
    match form.submit(store, input).await {
        Ok(_) => {}
        Err(err) if err.status == StatusCode::BAD_REQUEST => {}
        Err(err) => return Err(err),
    }
    Ok(Redirect::to("/"))
}

pub async fn action_form(
    State(state): State<AppState>,
    Form(req): Form<ActionRequest>,
) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    if !app.gate.is_authenticated() {
        return Ok(Redirect::to("/"));
    }
    dispatch_action(&mut app, &req)?;
    Ok(Redirect::to("/"))
}

pub async fn cancel_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    if app.gate.is_authenticated() {
        app.form.cancel_edit();
    }
    Ok(Redirect::to("/"))
}

pub async fn confirm_delete_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    if !app.gate.is_authenticated() {
        return Ok(Redirect::to("/"));
    }
    let App { store, form, .. } = &mut *app;
    form.confirm_delete(store).await?;
    Ok(Redirect::to("/"))
}

pub async fn dismiss_delete_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut app = state.app.lock().await;
    if app.gate.is_authenticated() {
        app.form.dismiss_delete();
    }
    Ok(Redirect::to("/"))
}

// JSON API: the same operations without the page. Everything behind the gate
// answers 401 while locked; only the session endpoints are always reachable.

pub async fn api_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let app = state.app.lock().await;
    Json(SessionResponse {
        authenticated: app.gate.is_authenticated(),
    })
}

pub async fn api_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut app = state.app.lock().await;
    app.gate.attempt_login(&req.key).await?;
    Ok(Json(SessionResponse { authenticated: true }))
}

pub async fn api_logout(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut app = state.app.lock().await;
    app.logout().await?;
    Ok(Json(SessionResponse {
        authenticated: false,
    }))
}

pub async fn api_entries(State(state): State<AppState>) -> Result<Json<Vec<LogEntry>>, AppError> {
    let app = state.app.lock().await;
    require_unlocked(&app)?;
    Ok(Json(app.store.all().to_vec()))
}

pub async fn api_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let app = state.app.lock().await;
    require_unlocked(&app)?;
    let stats = compute_stats(app.store.all());
    Ok(Json(StatsResponse {
        latest: stats.latest,
        change: stats.change,
        direction: stats.direction().as_str().to_string(),
        count: stats.count,
    }))
}

pub async fn api_form(State(state): State<AppState>) -> Result<Json<FormResponse>, AppError> {
    let app = state.app.lock().await;
    require_unlocked(&app)?;
    Ok(Json(form_response(&app)))
}

pub async fn api_submit(
    State(state): State<AppState>,
    Json(input): Json<LogForm>,
) -> Result<Json<Option<LogEntry>>, AppError> {
    let mut app = state.app.lock().await;
    require_unlocked(&app)?;
    let App { store, form, .. } = &mut *app;
    let entry = form.submit(store, input).await?;
    Ok(Json(entry))
}

pub async fn api_action(
    State(state): State<AppState>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<FormResponse>, AppError> {
    let mut app = state.app.lock().await;
    require_unlocked(&app)?;
    dispatch_action(&mut app, &req)?;
    Ok(Json(form_response(&app)))
}

pub async fn api_cancel(State(state): State<AppState>) -> Result<Json<FormResponse>, AppError> {
    let mut app = state.app.lock().await;
    require_unlocked(&app)?;
    app.form.cancel_edit();
    Ok(Json(form_response(&app)))
}

pub async fn api_confirm_delete(
    State(state): State<AppState>,
) -> Result<Json<FormResponse>, AppError> {
    let mut app = state.app.lock().await;
    require_unlocked(&app)?;
    let App { store, form, .. } = &mut *app;
    form.confirm_delete(store).await?;
    Ok(Json(form_response(&app)))
}

pub async fn api_dismiss_delete(
    State(state): State<AppState>,
) -> Result<Json<FormResponse>, AppError> {
    let mut app = state.app.lock().await;
    require_unlocked(&app)?;
    app.form.dismiss_delete();
    Ok(Json(form_response(&app)))
}

fn dispatch_action(app: &mut App, req: &ActionRequest) -> Result<(), AppError> {
    match req.action.as_str() {
        "edit" => {
            let App { store, form, .. } = app;
            form.begin_edit(store, req.id);
            Ok(())
        }
        "delete" => {
            app.form.request_delete(req.id);
            Ok(())
        }
        other => Err(AppError::bad_request(format!("unknown action: {other}"))),
    }
}

fn require_unlocked(app: &App) -> Result<(), AppError> {
    if app.gate.is_authenticated() {
        Ok(())
    } else {
        Err(AppError::unauthorized("login required"))
    }
}

fn form_response(app: &App) -> FormResponse {
    let form = &app.form;
    let draft = form.draft();
    FormResponse {
        mode: form.mode().as_str().to_string(),
        editing_id: form.editing_id(),
        pending_delete: form.pending_delete(),
        date: draft.date.clone(),
        weight: draft.weight.clone(),
        bodyfat: draft.bodyfat.clone(),
        error: form.error().map(str::to_string),
    }
}
