use crate::forms::{FormController, FormMode};
use crate::models::LogEntry;
use crate::state::App;
use crate::stats::{ChangeDirection, Stats, compute_stats};
use rand::Rng;

pub const QUOTES: [&str; 5] = [
    "The pain you feel today will be the strength you feel tomorrow.",
    "Strive for progress, not perfection.",
    "Your body can stand almost anything. It’s your mind that you have to convince.",
    "Discipline is doing what needs to be done, even if you don't want to do it.",
    "Obsessed is a word the lazy use to describe the dedicated.",
];

pub fn pick_quote() -> &'static str {
    QUOTES[rand::thread_rng().gen_range(0..QUOTES.len())]
}

pub fn render_page(app: &App) -> String {
    if !app.gate.is_authenticated() {
        return render_login(app.gate.login_error());
    }

    let stats = compute_stats(app.store.all());
    render_tracker(app.store.all(), &stats, &app.form, pick_quote())
}

fn render_login(error: Option<&str>) -> String {
    LOGIN_HTML
        .replace("{{CSS}}", SHARED_CSS)
        .replace("{{ERROR}}", error.unwrap_or(""))
}

fn render_tracker(entries: &[LogEntry], stats: &Stats, form: &FormController, quote: &str) -> String {
    let draft = form.draft();
    let (title, submit_label, submit_color) = match form.mode() {
        FormMode::Create => ("Log Today's Progress", "Log Progress", "#00ff7f"),
        FormMode::Edit => ("Edit Log Entry", "Update Entry", "#ffa500"),
    };
    let cancel = match form.mode() {
        FormMode::Create => String::new(),
        FormMode::Edit => CANCEL_HTML.to_string(),
    };
    let confirm = match form.pending_delete() {
        Some(_) => CONFIRM_HTML.to_string(),
        None => String::new(),
    };

    // Fixed text first, user-supplied text last, so drafted input can never
    // be mistaken for a placeholder.
    TRACKER_HTML
        .replace("{{CSS}}", SHARED_CSS)
        .replace("{{QUOTE}}", quote)
        .replace("{{LATEST}}", &latest_text(stats))
        .replace("{{CHANGE}}", &change_text(stats))
        .replace("{{CHANGE_COLOR}}", change_color(stats.direction()))
        .replace("{{COUNT}}", &stats.count.to_string())
        .replace("{{CONFIRM}}", &confirm)
        .replace("{{FORM_TITLE}}", title)
        .replace("{{ERROR}}", form.error().unwrap_or(""))
        .replace("{{SUBMIT_COLOR}}", submit_color)
        .replace("{{SUBMIT_LABEL}}", submit_label)
        .replace("{{CANCEL}}", &cancel)
        .replace("{{DATE}}", &escape(&draft.date))
        .replace("{{WEIGHT}}", &escape(&draft.weight))
        .replace("{{BODYFAT}}", &escape(&draft.bodyfat))
        .replace("{{ROWS}}", &render_rows(entries))
}

fn latest_text(stats: &Stats) -> String {
    match stats.latest {
        Some(weight) => weight.to_string(),
        None => "--".to_string(),
    }
}

fn change_text(stats: &Stats) -> String {
    match stats.change {
        Some(change) => {
            let sign = if change > 0.0 { "+" } else { "" };
            format!("{sign}{change:.1} kg")
        }
        None => "--".to_string(),
    }
}

// Gaining reads as a warning, losing as progress.
fn change_color(direction: ChangeDirection) -> &'static str {
    match direction {
        ChangeDirection::Increase => "#ff4d4d",
        ChangeDirection::Decrease => "#00ff7f",
        ChangeDirection::Neutral => "#fff",
    }
}

fn render_rows(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return r#"<li class="empty">No logs yet. Let's go!</li>"#.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let mut details = format!("{} kg", entry.weight);
            if let Some(bodyfat) = entry.bodyfat {
                details.push_str(&format!(" | {bodyfat}% BF"));
            }
            format!(
                r#"<li>
  <div class="log-info">
    <span class="log-stats">{details}</span>
    <span class="log-date">{date}</span>
  </div>
  <div class="log-actions">
    <form method="post" action="/entries/action">
      <input type="hidden" name="action" value="edit" />
      <input type="hidden" name="id" value="{id}" />
      <button class="edit-btn" type="submit">Edit</button>
    </form>
    <form method="post" action="/entries/action">
      <input type="hidden" name="action" value="delete" />
      <input type="hidden" name="id" value="{id}" />
      <button class="delete-btn" type="submit">Delete</button>
    </form>
  </div>
</li>"#,
                date = escape(&entry.date),
                id = entry.id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const SHARED_CSS: &str = r#"
    * { box-sizing: border-box; }
    body {
      margin: 0;
      min-height: 100vh;
      background: #141420;
      color: #f2f2f2;
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 16px;
    }
    .card {
      width: min(720px, 100%);
      background: #1d1d2c;
      border: 1px solid #2c2c40;
      border-radius: 16px;
      padding: 28px;
      display: grid;
      gap: 24px;
    }
    h1 { margin: 0; font-size: 1.8rem; }
    h2 { margin: 0 0 12px; font-size: 1.15rem; color: #cfcfe0; }
    .subtitle { margin: 0; color: #8f8fa6; }
    .quote { margin: 6px 0 0; color: #00ff7f; font-style: italic; font-size: 0.95rem; }
    .error { margin: 0; min-height: 1.2em; color: #ff4d4d; font-size: 0.9rem; }
    form { display: grid; gap: 12px; }
    input {
      background: #13131f;
      border: 1px solid #34344c;
      border-radius: 8px;
      color: #f2f2f2;
      padding: 10px 12px;
      font-size: 1rem;
    }
    button {
      border: none;
      border-radius: 8px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 700;
      cursor: pointer;
    }
    .btn-primary { background: #00ff7f; color: #10101a; }
    .btn-ghost { background: transparent; color: #8f8fa6; border: 1px solid #34344c; }
    .submit-btn { color: #10101a; }
    .cancel-btn { background: #34344c; color: #f2f2f2; width: 100%; margin-top: 10px; }
    header { display: flex; justify-content: space-between; align-items: start; gap: 16px; }
    .panel { display: grid; grid-template-columns: repeat(auto-fit, minmax(140px, 1fr)); gap: 12px; }
    .stat {
      background: #13131f;
      border: 1px solid #2c2c40;
      border-radius: 12px;
      padding: 14px;
      display: grid;
      gap: 6px;
    }
    .stat .label { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.1em; color: #8f8fa6; }
    .stat .value { font-size: 1.4rem; font-weight: 700; }
    .confirm {
      background: #2a1d1d;
      border: 1px solid #ff4d4d;
      border-radius: 12px;
      padding: 14px;
      display: grid;
      gap: 10px;
    }
    .confirm p { margin: 0; }
    .confirm div { display: flex; gap: 10px; }
    .history { list-style: none; margin: 0; padding: 0; display: grid; gap: 8px; }
    .history li {
      background: #13131f;
      border: 1px solid #2c2c40;
      border-radius: 10px;
      padding: 12px 14px;
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }
    .history li.empty { justify-content: center; color: #8f8fa6; }
    .log-info { display: grid; gap: 2px; }
    .log-stats { font-weight: 700; }
    .log-date { color: #8f8fa6; font-size: 0.85rem; }
    .log-actions { display: flex; gap: 8px; }
    .edit-btn { background: #ffa500; color: #10101a; }
    .delete-btn { background: #ff4d4d; color: #fff; }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Gym Progress Tracker</title>
  <style>{{CSS}}</style>
</head>
<body>
  <main class="card">
    <header>
      <div>
        <h1>Gym Progress Tracker</h1>
        <p class="subtitle">Enter your access key to open the tracker.</p>
      </div>
    </header>
    <form method="post" action="/login">
      <input type="password" name="key" placeholder="Access Key" autofocus />
      <button class="btn-primary" type="submit">Unlock</button>
    </form>
    <p class="error" id="login-error">{{ERROR}}</p>
  </main>
</body>
</html>
"#;

const TRACKER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Gym Progress Tracker</title>
  <style>{{CSS}}</style>
</head>
<body>
  <main class="card">
    <header>
      <div>
        <h1>Gym Progress Tracker</h1>
        <p class="quote">{{QUOTE}}</p>
      </div>
      <form method="post" action="/logout">
        <button class="btn-ghost" type="submit">Logout</button>
      </form>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Latest Weight</span>
        <span class="value" id="latest-weight">{{LATEST}}</span>
      </div>
      <div class="stat">
        <span class="label">Change</span>
        <span class="value" id="weight-change" style="color:{{CHANGE_COLOR}}">{{CHANGE}}</span>
      </div>
      <div class="stat">
        <span class="label">Total Logs</span>
        <span class="value" id="total-logs">{{COUNT}}</span>
      </div>
    </section>

    {{CONFIRM}}

    <section class="progress-form">
      <h2 id="form-title">{{FORM_TITLE}}</h2>
      <p class="error">{{ERROR}}</p>
      <form method="post" action="/entries">
        <input type="date" name="date" value="{{DATE}}" />
        <input type="text" inputmode="decimal" name="weight" placeholder="Weight (kg)" value="{{WEIGHT}}" />
        <input type="text" inputmode="decimal" name="bodyfat" placeholder="Body Fat % (optional)" value="{{BODYFAT}}" />
        <button class="submit-btn" id="submit-btn" type="submit" style="background-color:{{SUBMIT_COLOR}}">{{SUBMIT_LABEL}}</button>
      </form>
      {{CANCEL}}
    </section>

    <section>
      <h2>History</h2>
      <ul class="history" id="history-list">{{ROWS}}</ul>
    </section>
  </main>
</body>
</html>
"#;

const CANCEL_HTML: &str = r#"<form method="post" action="/entries/cancel">
        <button class="cancel-btn" id="cancel-edit" type="submit">Cancel Edit</button>
      </form>"#;

const CONFIRM_HTML: &str = r#"<section class="confirm">
      <p>Are you sure you want to delete this log?</p>
      <div>
        <form method="post" action="/entries/confirm-delete">
          <button class="delete-btn" type="submit">Yes, delete</button>
        </form>
        <form method="post" action="/entries/dismiss-delete">
          <button class="btn-ghost" type="submit">No, keep it</button>
        </form>
      </div>
    </section>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryFields;
    use crate::storage::Storage;
    use crate::store::EntryStore;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("gym_ui_{tag}_{}_{nanos}.json", std::process::id()));
        path
    }

    async fn store_with(tag: &str, entries: &[(&str, f64, Option<f64>)]) -> (PathBuf, EntryStore) {
        let path = temp_path(tag);
        let mut store = EntryStore::load(Storage::load(path.clone()).await).await;
        for (date, weight, bodyfat) in entries {
            store
                .add(EntryFields {
                    date: date.to_string(),
                    weight: *weight,
                    bodyfat: *bodyfat,
                })
                .await
                .unwrap();
        }
        (path, store)
    }

    #[test]
    fn login_page_shows_the_inline_error() {
        let page = render_login(Some("Incorrect Access Key."));
        assert!(page.contains("Incorrect Access Key."));

        let clean = render_login(None);
        assert!(!clean.contains("Incorrect Access Key."));
        assert!(clean.contains(r#"action="/login""#));
    }

    #[test]
    fn picked_quote_is_always_from_the_fixed_set() {
        for _ in 0..32 {
            assert!(QUOTES.contains(&pick_quote()));
        }
    }

    #[tokio::test]
    async fn empty_history_renders_the_placeholder() {
        let (path, store) = store_with("empty", &[]).await;
        let stats = compute_stats(store.all());
        let page = render_tracker(store.all(), &stats, &FormController::new(), QUOTES[0]);

        assert!(page.contains("No logs yet. Let's go!"));
        assert!(page.contains("--"));
        assert!(page.contains(r#"id="total-logs">0<"#));
        assert!(page.contains("Log Today's Progress"));
        assert!(page.contains("Log Progress"));
        assert!(!page.contains("Cancel Edit"));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn rows_show_weight_bodyfat_date_and_actions() {
        let (path, store) = store_with(
            "rows",
            &[("2024-01-01", 80.0, None), ("2024-02-01", 78.5, Some(21.0))],
        ).await;
        let stats = compute_stats(store.all());
        let page = render_tracker(store.all(), &stats, &FormController::new(), QUOTES[1]);

        assert!(page.contains("78.5 kg | 21% BF"));
        assert!(page.contains("80 kg"));
        assert!(page.contains("2024-02-01"));
        let id = store.all()[0].id;
        assert!(page.contains(&format!(r#"name="id" value="{id}""#)));
        assert!(page.contains(r#"value="edit""#));
        assert!(page.contains(r#"value="delete""#));
        // Losing weight renders in the positive colour.
        assert!(page.contains("color:#00ff7f"));
        assert!(page.contains("-1.5 kg"));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn edit_mode_switches_the_form_labelling() {
        let (path, store) = store_with("edit", &[("2024-01-01", 80.0, None)]).await;
        let mut form = FormController::new();
        form.begin_edit(&store, store.all()[0].id);

        let stats = compute_stats(store.all());
        let page = render_tracker(store.all(), &stats, &form, QUOTES[2]);

        assert!(page.contains("Edit Log Entry"));
        assert!(page.contains("Update Entry"));
        assert!(page.contains("background-color:#ffa500"));
        assert!(page.contains("Cancel Edit"));
        assert!(page.contains(r#"value="2024-01-01""#));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn armed_delete_renders_the_confirmation_bar() {
        let (path, store) = store_with("confirm", &[("2024-01-01", 80.0, None)]).await;
        let mut form = FormController::new();
        form.request_delete(store.all()[0].id);

        let stats = compute_stats(store.all());
        let page = render_tracker(store.all(), &stats, &form, QUOTES[3]);

        assert!(page.contains("Are you sure you want to delete this log?"));
        assert!(page.contains(r#"action="/entries/confirm-delete""#));
        assert!(page.contains(r#"action="/entries/dismiss-delete""#));

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn user_supplied_dates_are_escaped() {
        let (path, store) = store_with("escape", &[("<script>alert(1)</script>", 80.0, None)]).await;
        let stats = compute_stats(store.all());
        let page = render_tracker(store.all(), &stats, &FormController::new(), QUOTES[4]);

        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));

        std::fs::remove_file(path).ok();
    }
}
