// File: crates/chart-core/src/html.rs
// Summary: Self-contained HTML export: the rendered PNG as a data URL plus the series data
// and a small script for a hover readout of the nearest sample.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine as _;
use serde::Serialize;

use crate::theme::css_hex;
use crate::{Chart, RenderOptions};

#[derive(Serialize)]
struct Payload<'a> {
    title: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    width: i32,
    height: i32,
    /// Plot rectangle in surface pixels: left, top, right, bottom.
    plot: [i32; 4],
    /// Visible data range: x_min, x_max, y_min, y_max.
    view: [f64; 4],
    series: Vec<PayloadSeries<'a>>,
}

#[derive(Serialize)]
struct PayloadSeries<'a> {
    name: &'a str,
    color: String,
    // NaN serializes as null, which the script skips
    x: Vec<f64>,
    y: Vec<f64>,
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<style>
  body { margin: 0; background: __BG__; font-family: sans-serif; }
  #wrap { position: relative; display: inline-block; }
  #chart { display: block; max-width: 100vw; height: auto; }
  #tip { position: absolute; display: none; pointer-events: none; padding: 6px 8px;
         background: rgba(20, 20, 24, 0.9); color: #eee; font-size: 12px; border-radius: 4px;
         white-space: nowrap; }
</style>
</head>
<body>
<div id="wrap">
<img id="chart" alt="__TITLE__" src="data:image/png;base64,__PNG__">
<div id="tip"></div>
</div>
<script id="chart-data" type="application/json">__DATA__</script>
<script>
(function () {
  const data = JSON.parse(document.getElementById('chart-data').textContent);
  const img = document.getElementById('chart');
  const tip = document.getElementById('tip');
  const esc = (s) => String(s).replace(/[&<>"]/g, (c) => ({'&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;'}[c]));
  const fmt = (v) => Number.isInteger(v) ? String(v) : v.toPrecision(6);
  img.addEventListener('mouseleave', () => { tip.style.display = 'none'; });
  img.addEventListener('mousemove', (ev) => {
    const r = img.getBoundingClientRect();
    const px = (ev.clientX - r.left) * data.width / r.width;
    const py = (ev.clientY - r.top) * data.height / r.height;
    const [l, t, rr, b] = data.plot;
    if (px < l || px > rr || py < t || py > b) { tip.style.display = 'none'; return; }
    const x = data.view[0] + (px - l) / (rr - l) * (data.view[1] - data.view[0]);
    const rows = [];
    for (const s of data.series) {
      let best = -1, dist = Infinity;
      for (let i = 0; i < s.x.length; i++) {
        if (s.x[i] === null || s.y[i] === null) continue;
        const d = Math.abs(s.x[i] - x);
        if (d < dist) { dist = d; best = i; }
      }
      if (best >= 0) {
        rows.push('<span style="color:' + s.color + '">&#9632;</span> ' + esc(s.name) +
          ': (' + fmt(s.x[best]) + ', ' + fmt(s.y[best]) + ')');
      }
    }
    if (rows.length === 0) { tip.style.display = 'none'; return; }
    tip.innerHTML = '<b>' + esc(data.x_label) + '</b><br>' + rows.join('<br>');
    tip.style.left = (ev.clientX - r.left + 14) + 'px';
    tip.style.top = (ev.clientY - r.top + 14) + 'px';
    tip.style.display = 'block';
  });
})();
</script>
</body>
</html>
"#;

/// Render `chart` and wrap it in a standalone HTML document.
pub fn render_to_html(chart: &Chart, opts: &RenderOptions) -> Result<String> {
    let png = chart.render_to_png_bytes(opts)?;
    let png_b64 = base64::engine::general_purpose::STANDARD.encode(png);

    let payload = Payload {
        title: &chart.title,
        x_label: &chart.x_axis.label,
        y_label: &chart.y_axis.label,
        width: opts.width,
        height: opts.height,
        plot: opts.plot_rect().as_array(),
        view: [chart.x_axis.min, chart.x_axis.max, chart.y_axis.min, chart.y_axis.max],
        series: chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| PayloadSeries {
                name: &s.label,
                color: css_hex(opts.theme.series_color(i)),
                x: s.data_xy.iter().map(|p| p.0).collect(),
                y: s.data_xy.iter().map(|p| p.1).collect(),
            })
            .collect(),
    };
    // `</` would end the script element early
    let json = serde_json::to_string(&payload)
        .context("serializing chart data")?
        .replace("</", "<\\/");

    let title = escape_html(&chart.title);
    let background = css_hex(opts.theme.background);
    Ok(fill_template(
        TEMPLATE,
        &[
            ("__TITLE__", title.as_str()),
            ("__BG__", background.as_str()),
            ("__PNG__", png_b64.as_str()),
            ("__DATA__", json.as_str()),
        ],
    ))
}

/// Substitute placeholders in a single left-to-right pass; inserted values are never rescanned.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + slots.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;
    while let Some(start) = rest.find("__") {
        match slots.iter().find(|(key, _)| rest[start..].starts_with(key)) {
            Some((key, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &rest[start + key.len()..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = &rest[start + 2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Write the HTML document to `path`, creating parent directories.
pub fn write_html(chart: &Chart, opts: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let html = render_to_html(chart, opts)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
