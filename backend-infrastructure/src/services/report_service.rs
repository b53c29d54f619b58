use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use tokio::fs;
use tracing::error;

use backend_application::queries::report_queries;
use backend_application::AppState;
use backend_domain::{DashboardSnapshot, RuntimeConfig};

pub async fn schedule_reports(state: AppState) {
    loop {
        let next = next_report_time(&state.config);
        let duration = next.signed_duration_since(Local::now());
        let sleep_ms = duration.num_milliseconds().max(0) as u64;
        tokio::time::sleep(std::time::Duration::from_millis(sleep_ms)).await;

        if let Err(err) = generate_daily_report(&state).await {
            error!("report generation failed: {}", err);
        }
    }
}

pub async fn generate_daily_report(state: &AppState) -> Result<()> {
    let now = Local::now();
    let date = now.format("%Y-%m-%d").to_string();
    let day_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| Local.from_local_datetime(&midnight).single())
        .map(|midnight| midnight.timestamp_millis());
    let snapshot = report_queries::compute_dashboard(state, day_start, None).await?;

    let report_dir = Path::new(&state.config.report_dir);
    fs::create_dir_all(report_dir).await?;
    let path = report_dir.join(format!("{}.html", date));

    let html = render_report(&date, &snapshot);
    fs::write(&path, html).await?;

    if let Some(url) = &state.config.webhook_url {
        let report_link = format!("{}/reports/{}", state.config.public_base_url, date);
        send_webhook(
            url,
            state.config.webhook_template.as_deref(),
            &date,
            &snapshot,
            &report_link,
        )
        .await?;
    }

    Ok(())
}

pub fn render_report(date: &str, snapshot: &DashboardSnapshot) -> String {
    let mut store_rows = String::new();
    let mut stores: Vec<(&String, &u64)> = snapshot.usage.by_store.iter().collect();
    stores.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (store, points) in stores {
        store_rows.push_str(&format!(
            "<tr><td class=\"store\">{store}</td><td class=\"points\">{points}</td></tr>",
            store = store,
            points = points
        ));
    }

    let mut meal_rows = String::new();
    let mut meals: Vec<(&String, &u64)> = snapshot.usage.by_meal.iter().collect();
    meals.sort_by(|a, b| a.0.cmp(b.0));
    for (meal, points) in meals {
        meal_rows.push_str(&format!(
            "<tr><td class=\"meal\">{meal}</td><td class=\"points\">{points}</td></tr>",
            meal = meal,
            points = points
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Mensa Daily Report {date}</title>
<style>
body {{
  margin: 0;
  font-family: "IBM Plex Sans", "Source Sans 3", sans-serif;
  background: #f1f5f9;
  color: #0f172a;
}}
.page {{ max-width: 960px; margin: 0 auto; padding: 32px 20px 48px; }}
.hero h1 {{ margin: 0 0 6px; font-size: 26px; }}
.hero p {{ margin: 0; color: #64748b; font-size: 14px; }}
.summary {{
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
  gap: 12px;
  margin: 18px 0 24px;
}}
.card {{
  background: #ffffff;
  padding: 16px 18px;
  border-radius: 12px;
  box-shadow: 0 6px 16px rgba(15, 23, 42, 0.08);
}}
.card .label {{
  font-size: 11px;
  text-transform: uppercase;
  letter-spacing: 0.12em;
  color: #64748b;
}}
.card .value {{ font-size: 22px; font-weight: 700; margin-top: 6px; }}
table {{
  width: 100%;
  border-collapse: collapse;
  background: #ffffff;
  border-radius: 12px;
  overflow: hidden;
  margin-bottom: 24px;
}}
th, td {{ padding: 10px 14px; text-align: left; border-bottom: 1px solid #e2e8f0; }}
th {{ font-size: 12px; text-transform: uppercase; color: #64748b; }}
</style>
</head>
<body>
<div class="page">
  <div class="hero">
    <h1>Mensa Daily Report</h1>
    <p>{date}</p>
  </div>
  <div class="summary">
    <div class="card"><div class="label">Points spent</div><div class="value">{total}</div></div>
    <div class="card"><div class="label">Usage records</div><div class="value">{records}</div></div>
    <div class="card"><div class="label">Open loans</div><div class="value">{open_loans}</div></div>
    <div class="card"><div class="label">Items outstanding</div><div class="value">{outstanding}</div></div>
  </div>
  <table>
    <thead><tr><th>Store</th><th>Points</th></tr></thead>
    <tbody>{store_rows}</tbody>
  </table>
  <table>
    <thead><tr><th>Meal</th><th>Points</th></tr></thead>
    <tbody>{meal_rows}</tbody>
  </table>
</div>
</body>
</html>"#,
        date = date,
        total = snapshot.usage.total_points_spent,
        records = snapshot.usage.records,
        open_loans = snapshot.loans.open_loans,
        outstanding = snapshot.loans.outstanding_items,
        store_rows = store_rows,
        meal_rows = meal_rows,
    )
}

async fn send_webhook(
    url: &str,
    template: Option<&str>,
    date: &str,
    snapshot: &DashboardSnapshot,
    link: &str,
) -> Result<()> {
    let template = template.unwrap_or(
        r#"{"message":"{date}: {total} points over {records} records, {open} open loans {link}"}"#,
    );
    let payload = template
        .replace("{date}", date)
        .replace("{total}", &snapshot.usage.total_points_spent.to_string())
        .replace("{records}", &snapshot.usage.records.to_string())
        .replace("{open}", &snapshot.loans.open_loans.to_string())
        .replace("{link}", link);

    let client = reqwest::Client::new();
    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

fn next_report_time(config: &RuntimeConfig) -> DateTime<Local> {
    let now = Local::now();
    let today = now.date_naive();
    let target = today
        .and_hms_opt(config.report_hour, config.report_minute, 0)
        .unwrap();
    let mut dt = Local.from_local_datetime(&target).unwrap();
    if dt <= now {
        let next = today.succ_opt().unwrap();
        let next_target = next
            .and_hms_opt(config.report_hour, config.report_minute, 0)
            .unwrap();
        dt = Local.from_local_datetime(&next_target).unwrap();
    }
    dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_domain::{LoanSummary, UsageSummary};

    #[test]
    fn report_renders_summary_and_store_rows() {
        let mut usage = UsageSummary::default();
        usage.records = 4;
        usage.total_points_spent = 96;
        usage.by_store.insert("North Canteen".to_string(), 60);
        usage.by_store.insert("Cafe West".to_string(), 36);
        usage.by_meal.insert("lunch".to_string(), 96);
        let snapshot = DashboardSnapshot {
            generated_at: 0,
            users: 12,
            usage,
            loans: LoanSummary {
                open_loans: 2,
                returned_loans: 5,
                outstanding_items: 3,
            },
        };
        let html = render_report("2026-08-05", &snapshot);
        assert!(html.contains("2026-08-05"));
        assert!(html.contains("North Canteen"));
        assert!(html.contains("96"));
        assert!(html.contains("Items outstanding"));
    }
}
