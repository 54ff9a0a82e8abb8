// src/views/pages.rs

use super::{escape_html, script_json};
use crate::models::ExportRow;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem auto; max-width: 960px; }
form label { display: block; margin-top: 0.75rem; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 0.4rem; text-align: left; vertical-align: top; }
#export-status { margin-left: 1rem; }
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

/// Search form
pub fn render_index() -> String {
    layout(
        "Business Review Search",
        r#"<h1>Business Review Search</h1>
<form method="post" action="/">
  <label for="zip_code">Zip code</label>
  <input id="zip_code" name="zip_code" required>
  <label for="search_term">Search term</label>
  <input id="search_term" name="search_term" required>
  <p><button type="submit">Search</button></p>
</form>"#,
    )
}

/// Result table plus an export button posting the rows back as JSON
pub fn render_results(
    rows: &[ExportRow],
    zip_code: &str,
    search_term: &str,
) -> Result<String, serde_json::Error> {
    let table_rows: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&row.company_name),
                escape_html(&row.location),
                escape_html(&row.stars_display()),
                escape_html(&row.review_text),
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Reviews for "{term}" near {zip}</h1>
<p>{count} reviews found. <a href="/">New search</a></p>
<button id="export">Export to Google Sheets</button><span id="export-status"></span>
<table>
<thead><tr><th>Company</th><th>Location</th><th>Stars</th><th>Review</th></tr></thead>
<tbody>
{table_rows}</tbody>
</table>
<script type="application/json" id="results-data">{data}</script>
<script>
document.getElementById("export").addEventListener("click", async () => {{
  const status = document.getElementById("export-status");
  const results = JSON.parse(document.getElementById("results-data").textContent);
  status.textContent = "Exporting...";
  try {{
    const response = await fetch("/export", {{
      method: "POST",
      headers: {{ "Content-Type": "application/json" }},
      body: JSON.stringify({{ results }}),
    }});
    const ack = await response.json();
    status.textContent = ack.message;
  }} catch (err) {{
    status.textContent = "Export failed: " + err;
  }}
}});
</script>"#,
        term = escape_html(search_term),
        zip = escape_html(zip_code),
        count = rows.len(),
        data = script_json(&rows)?,
    );

    Ok(layout("Review Results", &body))
}
