//! `bankopsd check` — one health round, printed for humans or scripts.

use bankops_core::{EndpointRegistry, HealthSnapshot};
use bankops_health::{HttpProbe, PROBE_TIMEOUT, run_round};

pub async fn run(registry: &EndpointRegistry, format: &str) -> anyhow::Result<()> {
    let snapshot = run_round(registry, &HttpProbe, PROBE_TIMEOUT, 1).await;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        _ => {
            print!("{}", format_report(registry, &snapshot));
        }
    }

    Ok(())
}

/// Render a snapshot as an aligned table followed by the summary line.
pub fn format_report(registry: &EndpointRegistry, snapshot: &HealthSnapshot) -> String {
    let name_width = registry
        .iter()
        .map(|ep| ep.display_name.len())
        .max()
        .unwrap_or(0)
        .max("SERVICE".len());
    let url_width = registry
        .iter()
        .map(|ep| ep.base_url.len())
        .max()
        .unwrap_or(0)
        .max("BASE URL".len());

    let mut out = format!("{:<name_width$}  {:<url_width$}  STATUS\n", "SERVICE", "BASE URL");
    for ep in registry {
        out.push_str(&format!(
            "{:<name_width$}  {:<url_width$}  {}\n",
            ep.display_name,
            ep.base_url,
            snapshot.status_of(&ep.key).label()
        ));
    }
    out.push_str(&format!("\n{} · {}\n", snapshot.summary(), snapshot.overall.label()));
    out
}
