//! HTML page assembly.
//!
//! One tab per run, each holding a two-column grid of charts. Each chart is
//! embedded as Plotly's inline snippet and drawn on load.

use std::io::{self, Write};

use plotly::Plot;

use super::{Report, RunReport};

/// Plotly bundle loaded from the CDN
pub const DEFAULT_PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render the report to a string
pub fn render(report: &Report, plotly_src: &str) -> io::Result<String> {
    let mut buffer = Vec::new();
    write(&mut buffer, report, plotly_src)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write the full HTML document
pub fn write<W: Write>(writer: &mut W, report: &Report, plotly_src: &str) -> io::Result<()> {
    let title = escape(&report.title);

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>{title}</title>
  <script src="{plotly}"></script>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 12px; }}
    .source {{ color: #666; margin-top: -8px; }}
    .tab-bar {{ display: flex; gap: 8px; margin-bottom: 12px; flex-wrap: wrap; }}
    .tab-bar button {{
      background: #f1f1f1;
      border: 1px solid #ccc;
      padding: 8px 12px;
      cursor: pointer;
      border-radius: 6px;
      font-weight: 600;
    }}
    .tab-bar button.active {{ background: #2b8cff; color: white; border-color: #1976d2; }}
    .chart-pane {{ display: none; }}
    .chart-pane.active {{ display: block; }}
    .grid-timing {{ display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }}
    .map {{ width: 100%; min-width: 300px; }}
    .notice {{
      background: #fff4e5;
      border: 1px solid #f0b36b;
      border-radius: 6px;
      padding: 8px 12px;
      margin-bottom: 12px;
    }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p class="source">{source}</p>
"#,
        title = title,
        plotly = escape(plotly_src),
        source = escape(&report.source),
    )?;

    for notice in &report.notices {
        writeln!(writer, r#"  <div class="notice">{}</div>"#, escape(notice))?;
    }

    let mut tabs: Vec<(String, String)> = report
        .runs
        .iter()
        .map(|run| (format!("run{}", run.number), format!("Run {}", run.number)))
        .collect();
    if report.idle.is_some() {
        tabs.push(("idle".to_string(), "Idle".to_string()));
    }

    writeln!(writer, r#"  <div class="tab-bar">"#)?;
    for (i, (id, label)) in tabs.iter().enumerate() {
        let class = if i == 0 { "active" } else { "" };
        writeln!(
            writer,
            r#"    <button id="tab-btn-{id}" onclick="openTab('{id}')" class="{class}">{label}</button>"#,
            id = id,
            class = class,
            label = escape(label),
        )?;
    }
    writeln!(writer, "  </div>")?;

    writeln!(writer, r#"  <div class="tab-content">"#)?;
    for (i, run) in report.runs.iter().enumerate() {
        write_run_pane(writer, run, i == 0)?;
    }
    if let Some(idle) = &report.idle {
        let active = if report.runs.is_empty() { " active" } else { "" };
        writeln!(writer, r#"    <div id="pane-idle" class="chart-pane{}">"#, active)?;
        write_chart(writer, "idle-afr", idle)?;
        writeln!(writer, "    </div>")?;
    }
    writeln!(writer, "  </div>")?;

    writeln!(writer, "  <script>")?;
    write!(
        writer,
        r#"    function openTab(name) {{
      document.querySelectorAll('.chart-pane').forEach(p => p.classList.remove('active'));
      document.querySelectorAll('.tab-bar button').forEach(b => b.classList.remove('active'));
      document.getElementById('pane-' + name).classList.add('active');
      document.getElementById('tab-btn-' + name).classList.add('active');
      setTimeout(() => {{
        if (window.Plotly) {{
          document.querySelectorAll('#pane-' + name + ' .js-plotly-plot').forEach(gd => {{
            try {{ Plotly.Plots.resize(gd); }} catch (e) {{}}
          }});
        }}
      }}, 80);
    }}
  </script>
</body>
</html>
"#
    )?;

    Ok(())
}

/// One grid cell holding a chart drawn into the element `id`
fn write_chart<W: Write>(writer: &mut W, id: &str, plot: &Plot) -> io::Result<()> {
    writeln!(writer, r#"      <div class="map">"#)?;
    writeln!(writer, "{}", plot.to_inline_html(Some(id)))?;
    writeln!(writer, "      </div>")
}

fn write_run_pane<W: Write>(writer: &mut W, run: &RunReport, active: bool) -> io::Result<()> {
    let class = if active { " active" } else { "" };
    writeln!(
        writer,
        r#"    <div id="pane-run{}" class="chart-pane{}">"#,
        run.number, class
    )?;
    writeln!(
        writer,
        r#"      <p>{} samples at wide open throttle</p>"#,
        run.sample_count
    )?;
    for notice in &run.notices {
        writeln!(writer, r#"      <div class="notice">{}</div>"#, escape(notice))?;
    }

    writeln!(writer, r#"      <div class="grid-timing">"#)?;
    for (kind, plot) in &run.charts {
        let id = format!("run{}-{}", run.number, kind.slug());
        write_chart(writer, &id, plot)?;
    }
    writeln!(writer, "      </div>")?;
    writeln!(writer, "    </div>")?;
    Ok(())
}
