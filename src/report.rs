//! HTML report generation.
//!
//! Every figure becomes one `<div>` plus a `Plotly.newPlot` call, stacked
//! top to bottom in the order given. Plotly itself is loaded from its CDN,
//! so the page needs network access the first time it is opened.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::chart::Figure;
use crate::error::ChatheatError;

/// Plotly.js bundle the report loads.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Renders figures into a single HTML document.
///
/// # Example
///
/// ```rust
/// use chatheat::report::render_html;
///
/// let html = render_html(&[], "Group Chat Activity").unwrap();
/// assert!(html.contains("No group messages"));
/// ```
pub fn render_html(figures: &[Figure], title: &str) -> Result<String, ChatheatError> {
    let body = if figures.is_empty() {
        render_empty()
    } else {
        let mut sections = Vec::with_capacity(figures.len());
        for (index, figure) in figures.iter().enumerate() {
            sections.push(render_figure(index, figure)?);
        }
        sections.join("\n")
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly}" charset="utf-8"></script>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <header><h1>{title}</h1></header>
{body}
        <footer><p>Generated by chatheat</p></footer>
    </div>
</body>
</html>
"#,
        title = html_escape::encode_text(title),
        plotly = PLOTLY_CDN,
        css = inline_css(),
        body = body,
    ))
}

/// Renders and writes the report to `path`.
pub fn write_report(
    path: impl AsRef<Path>,
    figures: &[Figure],
    title: &str,
) -> Result<(), ChatheatError> {
    let path = path.as_ref();
    let html = render_html(figures, title)?;
    fs::write(path, html)?;
    debug!(path = %path.display(), figures = figures.len(), "report written");
    Ok(())
}

fn render_figure(index: usize, figure: &Figure) -> Result<String, ChatheatError> {
    let id = format!("chart-{index}");
    let spec = script_safe_json(&figure.to_json()?);
    Ok(format!(
        r#"        <section class="chart" aria-label="{label}">
            <div id="{id}"></div>
            <script>
                (function () {{
                    var fig = {spec};
                    Plotly.newPlot("{id}", fig.data, fig.layout, {{responsive: true}});
                }})();
            </script>
        </section>"#,
        label = html_escape::encode_double_quoted_attribute(figure.title()),
    ))
}

/// Escapes `<`, `>` and `&` as JSON unicode escapes.
///
/// These characters only occur inside JSON strings, so the result parses to
/// the same value, and no `</script>` or `<!--` sequence reaches the HTML
/// parser.
fn script_safe_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}

fn render_empty() -> String {
    r#"        <section class="empty">
            <p>No group messages were found in this export.</p>
        </section>"#
        .to_string()
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    color: #111827;
    background: #ffffff;
}
.container { max-width: 1400px; margin: 0 auto; padding: 2rem; }
header h1 { font-size: 1.75rem; margin: 0 0 1.5rem; }
.chart { margin-bottom: 2.5rem; }
.empty { padding: 3rem; text-align: center; color: #6b7280; }
footer { margin-top: 2rem; font-size: 0.85rem; color: #9ca3af; }
"#
}
