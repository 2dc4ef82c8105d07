//! Dashboard page handlers.
//!
//! Each handler reads the latest snapshot, builds view types, and renders
//! an Askama template.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use tracing::warn;

use crate::DashboardState;
use crate::views::*;

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        warn!(error = %e, "dashboard template failed to render");
        format!("<pre>Template error: {e}</pre>")
    }))
}

// ── Status Bar ──────────────────────────────────────────────────

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<header id="status-bar" class="topbar" hx-get="/dashboard/partials/status" hx-trigger="every 30s" hx-swap="outerHTML">
  <div class="services">
    <span class="services-title">Services</span>
    {% for s in bar.services %}<span class="dot {{ s.dot_class }}" title="{{ s.label }}: {{ s.status }}"></span>{% endfor %}
    <span class="summary">{{ bar.summary }}</span>
  </div>
  <div class="banner {{ bar.banner_class }}">{{ bar.banner }}</div>
</header>"#
)]
struct StatusBarPartial<'a> {
    bar: &'a StatusBarView,
}

pub async fn status_bar(State(state): State<DashboardState>) -> Html<String> {
    let snapshot = state.latest();
    let bar = StatusBarView::build(&state.registry, &snapshot);
    render(StatusBarPartial { bar: &bar })
}

// ── Status Page ─────────────────────────────────────────────────

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>BankOps — Service Status</title>
  <script src="https://unpkg.com/htmx.org@2.0.4"></script>
</head>
<body>
  {{ status_bar|safe }}
  <main>
    <table class="services-table">
      <thead><tr><th>Service</th><th>Base URL</th><th>Status</th><th>Last checked</th></tr></thead>
      <tbody>
      {% for s in bar.services %}
        <tr>
          <td>{{ s.label }} <small>({{ s.name }})</small></td>
          <td><code>{{ s.base_url }}</code></td>
          <td><span class="dot {{ s.dot_class }}"></span> {{ s.status }}</td>
          <td>{{ s.observed_display }}</td>
        </tr>
      {% endfor %}
      </tbody>
    </table>
    <p class="round">Round {{ bar.round }}</p>
  </main>
</body>
</html>"#
)]
struct StatusPage {
    status_bar: String,
    bar: StatusBarView,
}

pub async fn status_page(State(state): State<DashboardState>) -> Html<String> {
    let snapshot = state.latest();
    let bar = StatusBarView::build(&state.registry, &snapshot);
    let Html(status_bar) = render(StatusBarPartial { bar: &bar });
    render(StatusPage { status_bar, bar })
}
