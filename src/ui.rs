use crate::calendar::{MonthGrid, WEEKDAY_LABELS};
use crate::dates::{date_key, display_date};
use crate::filter::{DayRow, RangeFilter};
use crate::handlers::ATTENDANCE_PATH;
use crate::navigation::NavigationTarget;
use crate::presets::Preset;
use crate::selector::DateRangeSelector;
use crate::table::{NO_MATCHES, SortState, filter_rows, sort_rows};
use chrono::NaiveDate;

const TABLE_HEADERS: [&str; 3] = ["Date", "Weekday", "Type"];

pub struct AttendancePage {
    pub today: NaiveDate,
    pub filter: RangeFilter,
    pub preset: Option<Preset>,
    pub selector: DateRangeSelector,
    pub months: Vec<MonthGrid>,
    pub rows: Vec<DayRow>,
    pub sort: SortState,
    pub needle: String,
    /// Raw query string the page was requested with.
    pub query: String,
}

pub fn render_attendance(page: &AttendancePage) -> String {
    let state = serde_json::json!({
        "start": page.selector.start(),
        "end": page.selector.end(),
        "today": page.today,
        "query": page.query,
    });

    let today = display_date(page.today);
    let start = date_key(page.filter.start);
    let end = date_key(page.filter.end);
    let range = escape(&page.selector.display_text());
    let presets = render_presets(page.preset);
    let calendar = render_months(&page.months);
    let table = render_table(page);
    let needle = escape(&page.needle);
    let state = state.to_string().replace("</", "<\\/");

    fill(
        ATTENDANCE_HTML,
        &[
            ("TODAY", &today),
            ("START", &start),
            ("END", &end),
            ("RANGE", &range),
            ("PRESETS", &presets),
            ("CALENDAR", &calendar),
            ("TABLE", &table),
            ("NEEDLE", &needle),
            ("STATE", &state),
        ],
    )
}

/// Expands `{{NAME}}` placeholders in a single pass. Inserted values are
/// copied verbatim and never scanned for placeholders themselves.
fn fill(template: &str, values: &[(&str, &String)]) -> String {
    let mut html = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        html.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let placeholder = after.find("}}").and_then(|close| {
            values
                .iter()
                .find(|(name, _)| *name == &after[..close])
                .map(|(_, value)| (close, value.as_str()))
        });
        match placeholder {
            Some((close, value)) => {
                html.push_str(value);
                rest = &after[close + 2..];
            }
            None => {
                html.push_str("{{");
                rest = after;
            }
        }
    }
    html.push_str(rest);
    html
}

fn render_presets(active: Option<Preset>) -> String {
    let mut html = String::new();
    for preset in Preset::ALL {
        let class = if Some(preset) == active {
            "preset active"
        } else {
            "preset"
        };
        html.push_str(&format!(
            r#"<button class="{class}" type="button" data-preset="{}">{}</button>"#,
            preset.name(),
            preset.label()
        ));
    }
    html
}

fn render_months(months: &[MonthGrid]) -> String {
    let mut html = String::new();
    for grid in months {
        html.push_str(&format!(
            r#"<div class="month" data-year="{}" data-month="{}"><h3>{}</h3><div class="grid">"#,
            grid.year,
            grid.month,
            grid.title()
        ));
        for label in WEEKDAY_LABELS {
            html.push_str(&format!(r#"<span class="weekday">{label}</span>"#));
        }
        for cell in grid.weeks.iter().flatten() {
            match cell {
                Some(day) => {
                    let mut class = format!("day {}", day.status.css_class());
                    if day.status.is_highlighted() {
                        class.push_str(" is-selected");
                    }
                    if day.is_today {
                        class.push_str(" is-today");
                    }
                    if day.is_weekend {
                        class.push_str(" is-weekend");
                    }
                    let disabled = if day.status.is_selectable() { "" } else { " disabled" };
                    html.push_str(&format!(
                        r#"<button class="{class}" type="button" data-date="{}"{disabled}>{}</button>"#,
                        date_key(day.date),
                        day.day
                    ));
                }
                None => html.push_str(r#"<span class="day empty"></span>"#),
            }
        }
        html.push_str("</div></div>");
    }
    html
}

fn render_table(page: &AttendancePage) -> String {
    let mut cells: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| {
            vec![
                date_key(row.date),
                row.weekday.clone(),
                if row.is_weekend { "Weekend" } else { "Workday" }.to_string(),
            ]
        })
        .collect();
    if let (Some(column), Some(direction)) = (page.sort.column, page.sort.direction) {
        if column < TABLE_HEADERS.len() {
            sort_rows(&mut cells, column, direction);
        }
    }
    let visible = filter_rows(&cells, &page.needle);

    let mut html = String::from("<table id=\"dayTable\"><thead><tr>");
    for (column, header) in TABLE_HEADERS.iter().enumerate() {
        let href = NavigationTarget::new()
            .set("sort", column.to_string())
            .set("dir", page.sort.next_for(column).as_str())
            .url(ATTENDANCE_PATH, &page.query);
        html.push_str(&format!(
            r#"<th><a href="{}">{header}<span class="sort-indicator">{}</span></a></th>"#,
            escape(&href),
            page.sort.indicator(column)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    let today = date_key(page.today);
    for index in &visible {
        let row = &cells[*index];
        let class = if row[0] == today { " class=\"is-today\"" } else { "" };
        html.push_str(&format!("<tr{class}>"));
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");

    if visible.is_empty() && !page.needle.trim().is_empty() {
        html.push_str(&format!(r#"<div class="no-results">{NO_MATCHES}</div>"#));
    }
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const ATTENDANCE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance</title>
  <style>
    :root {
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #2563eb;
      --accent-2: #7c3aed;
      --card: #ffffff;
      --bg: #f3f4f6;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 24px;
      box-shadow: 0 12px 32px rgba(31, 41, 55, 0.08);
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .range-display {
      font-weight: 700;
      color: var(--accent);
      min-height: 1.4em;
    }

    .presets {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    button {
      font: inherit;
      cursor: pointer;
    }

    .preset {
      border: 1px solid #e5e7eb;
      background: white;
      border-radius: 999px;
      padding: 6px 14px;
    }

    .preset.active {
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
      color: white;
      border-color: transparent;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 24px;
    }

    .month h3 {
      margin: 0 0 12px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .weekday {
      font-size: 0.75rem;
      text-transform: uppercase;
      color: var(--muted);
      text-align: center;
    }

    .day {
      border: none;
      border-radius: 10px;
      padding: 8px 0;
      background: transparent;
    }

    .day:hover:not([disabled]) {
      background: #dbeafe;
    }

    .day.is-today {
      outline: 2px solid #facc15;
    }

    .day-in-range {
      background: #3b82f6;
      color: white;
    }

    .day.is-selected:hover {
      filter: brightness(1.1);
    }

    .day-range-start,
    .day-range-end {
      background: linear-gradient(135deg, var(--accent), var(--accent-2));
      color: white;
      font-weight: 700;
      transform: scale(1.08);
    }

    .day-future {
      opacity: 0.5;
      cursor: not-allowed;
      background: #f3f4f6;
    }

    .custom {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    .actions {
      display: flex;
      gap: 12px;
      justify-content: flex-end;
    }

    .primary {
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
      color: white;
      border: none;
      border-radius: 12px;
      padding: 10px 18px;
      font-weight: 600;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 8px 10px;
      border-bottom: 1px solid #e5e7eb;
    }

    th a {
      color: inherit;
      text-decoration: none;
    }

    .sort-indicator {
      margin-left: 6px;
      opacity: 0.6;
    }

    tr.is-today {
      background: #fef9c3;
    }

    .no-results {
      text-align: center;
      padding: 24px;
      color: var(--muted);
    }

    #toastContainer {
      position: fixed;
      top: 16px;
      right: 16px;
      display: grid;
      gap: 8px;
      z-index: 50;
    }

    .toast {
      background: white;
      border-left: 4px solid var(--accent);
      border-radius: 10px;
      padding: 10px 14px;
      box-shadow: 0 10px 24px rgba(31, 41, 55, 0.15);
      animation: slideIn 200ms ease-out;
    }

    .toast-success { border-color: #16a34a; }
    .toast-error { border-color: #dc2626; }
    .toast-warning { border-color: #ca8a04; }

    @keyframes slideIn {
      from { opacity: 0; transform: translateX(100%); }
      to { opacity: 1; transform: translateX(0); }
    }
  </style>
</head>
<body>
  <div id="toastContainer"></div>
  <main class="app">
    <header>
      <h1>Attendance</h1>
      <p class="subtitle">Showing {{START}} to {{END}}. Today is {{TODAY}}.</p>
    </header>

    <section class="card">
      <div class="range-display" id="selectedRangeDisplay">{{RANGE}}</div>
      <div class="presets">{{PRESETS}}</div>
    </section>

    <section class="card">
      <div class="calendar" id="calendar">{{CALENDAR}}</div>
      <div class="actions">
        <button type="button" id="prevMonth">&larr;</button>
        <button type="button" id="nextMonth">&rarr;</button>
      </div>
    </section>

    <section class="card">
      <form class="custom" id="customRange">
        <label>Start <input type="date" id="customStartDate" value="{{START}}" /></label>
        <label>End <input type="date" id="customEndDate" value="{{END}}" /></label>
        <button type="submit">Use dates</button>
        <button class="primary" type="button" id="applyRange">Apply range</button>
      </form>
    </section>

    <section class="card">
      <form method="get" action="/attendance">
        <input type="hidden" name="start_date" value="{{START}}" />
        <input type="hidden" name="end_date" value="{{END}}" />
        <input type="search" name="q" placeholder="Filter days" value="{{NEEDLE}}" />
      </form>
      {{TABLE}}
    </section>
  </main>

  <script>
    const pageState = {{STATE}};
    const toastContainer = document.getElementById('toastContainer');
    const rangeDisplay = document.getElementById('selectedRangeDisplay');
    const startInput = document.getElementById('customStartDate');
    const endInput = document.getElementById('customEndDate');

    const showToast = (toast) => {
      const el = document.createElement('div');
      el.className = `toast toast-${toast.level}`;
      el.textContent = toast.message;
      toastContainer.appendChild(el);
      if (toast.duration_ms > 0) {
        setTimeout(() => el.remove(), toast.duration_ms);
      }
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ start: pageState.start, end: pageState.end, ...body })
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const restyleMonth = async (monthEl) => {
      const params = new URLSearchParams({
        year: monthEl.dataset.year,
        month: monthEl.dataset.month
      });
      if (pageState.start) params.set('start_date', pageState.start);
      if (pageState.end) params.set('end_date', pageState.end);
      const res = await fetch(`/api/calendar?${params}`);
      if (!res.ok) {
        return;
      }
      const grid = await res.json();
      grid.weeks.flat().filter(Boolean).forEach((day) => {
        const el = monthEl.querySelector(`[data-date="${day.date}"]`);
        if (!el) return;
        const classes = ['day', `day-${day.status.replace(/_/g, '-')}`];
        if (day.status === 'future_disabled') classes[1] = 'day-future';
        if (day.is_today) classes.push('is-today');
        if (day.is_weekend) classes.push('is-weekend');
        el.className = classes.join(' ');
      });
    };

    const apply = (range) => {
      pageState.start = range.start;
      pageState.end = range.end;
      rangeDisplay.textContent = range.display;
      if (range.start) startInput.value = range.start;
      if (range.end) endInput.value = range.end;
      document.querySelectorAll('[data-preset]').forEach((button) => {
        button.classList.toggle('active', button.dataset.preset === range.preset);
      });
      range.notices.forEach(showToast);
      document.querySelectorAll('.month').forEach((monthEl) => restyleMonth(monthEl));
      if (range.navigate_to) {
        window.location.href = range.navigate_to;
      }
    };

    const fail = (err) => showToast({ message: err.message, level: 'error', duration_ms: 5000 });

    document.querySelectorAll('.day[data-date]').forEach((button) => {
      button.addEventListener('click', (event) => {
        event.preventDefault();
        post('/api/range/select', { date: button.dataset.date }).then(apply).catch(fail);
      });
    });

    document.querySelectorAll('[data-preset]').forEach((button) => {
      button.addEventListener('click', () => {
        post('/api/range/preset', { preset: button.dataset.preset }).then(apply).catch(fail);
      });
    });

    document.getElementById('customRange').addEventListener('submit', (event) => {
      event.preventDefault();
      post('/api/range/custom', {
        custom_start: startInput.value,
        custom_end: endInput.value
      }).then(apply).catch(fail);
    });

    document.getElementById('applyRange').addEventListener('click', () => {
      post('/api/range/commit', {
        path: window.location.pathname,
        query: window.location.search
      }).then(apply).catch(fail);
    });

    const moveMonth = (direction) => {
      const months = document.querySelectorAll('.month');
      const focus = months[months.length - 1];
      post('/api/range/month', {
        year: Number(focus.dataset.year),
        month: Number(focus.dataset.month),
        direction,
        path: window.location.pathname,
        query: window.location.search
      }).then(apply).catch(fail);
    };

    document.getElementById('prevMonth').addEventListener('click', () => moveMonth(-1));
    document.getElementById('nextMonth').addEventListener('click', () => moveMonth(1));

    document.addEventListener('keydown', (event) => {
      if (event.key === 'Escape') {
        toastContainer.replaceChildren();
      }
    });
  </script>
</body>
</html>
"#;
