//! Server-rendered index page.
//!
//! The form is built from `FEATURE_NAMES`, so the page and the endpoint can
//! never disagree about which fields exist.

use crate::domain::features::FEATURE_NAMES;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Coffee Shop Revenue Predictor</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; color: #2b1d14; }
  h1 { font-size: 1.5rem; }
  label { display: block; margin-top: 0.75rem; font-weight: 600; }
  input { width: 100%; padding: 0.4rem; box-sizing: border-box; }
  button { margin-top: 1.25rem; padding: 0.5rem 1.5rem; }
  .model-error { background: #fde8e8; border: 1px solid #c53030; padding: 0.75rem; }
  #result { margin-top: 1.25rem; font-size: 1.2rem; }
  .failure { color: #c53030; }
</style>
</head>
<body>
<h1>Daily Coffee Shop Revenue</h1>
"#;

const PAGE_SCRIPT: &str = r#"<div id="result" aria-live="polite"></div>
<script>
const form = document.getElementById("predict-form");
const result = document.getElementById("result");
form.addEventListener("submit", async (event) => {
  event.preventDefault();
  result.className = "";
  result.textContent = "Predicting...";
  try {
    const response = await fetch("/predict", {
      method: "POST",
      body: new URLSearchParams(new FormData(form)),
    });
    const data = await response.json();
    if (data.success) {
      result.textContent = "Predicted daily revenue: $" + data.prediction.toFixed(2);
    } else {
      result.className = "failure";
      result.textContent = data.error;
    }
  } catch (err) {
    result.className = "failure";
    result.textContent = "Request failed: " + err;
  }
});
</script>
</body>
</html>
"#;

/// Renders the index page, with a banner when the model failed to load.
pub fn render_index(model_error: Option<&str>) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(err) = model_error {
        html.push_str(&format!(
            "<div class=\"model-error\" role=\"alert\">\
             <strong>Model failed to load.</strong> {}</div>\n",
            escape_html(err)
        ));
    }

    html.push_str("<form id=\"predict-form\" method=\"post\" action=\"/predict\">\n");
    for name in FEATURE_NAMES {
        html.push_str(&format!(
            concat!(
                "  <label for=\"{name}\">{label}</label>\n",
                "  <input id=\"{name}\" name=\"{name}\" type=\"number\" step=\"any\" required>\n",
            ),
            name = name,
            label = name.replace('_', " "),
        ));
    }
    html.push_str("  <button type=\"submit\">Predict</button>\n</form>\n");
    html.push_str(PAGE_SCRIPT);
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
