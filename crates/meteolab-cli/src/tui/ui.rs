//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │ 🌱 MeteoLab   Station │ Research │ About    #12  3000ms  │
//! ├──────────────┬──────────────┬──────────────┬─────────────┤
//! │ Temperature  │ Humidity     │ Light        │ Avg. height │
//! │ 24.3 °C      │ 66.1 %       │ 1203 lux     │ 21.4 cm     │
//! ├──────────────┴──────────────┴───────┬──────┴─────────────┤
//! │ 21-day trend (g: cycle)             │ temp vs height     │
//! ├─────────────────────────────────────┴────────────────────┤
//! │ seasonal light  Oct Nov Dec Jan Feb Mar                  │
//! ├──────────────────────────────────────────────────────────┤
//! │ q quit  tab view  g metric  p pause  s snapshot          │
//! └──────────────────────────────────────────────────────────┘

use super::app::{App, TrendMode, View};
use meteolab_core::catalog::{self, HypothesisStatus};
use meteolab_core::{Metric, SensorReading};
use ratatui::{prelude::*, widgets::*};

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title + tabs
            Constraint::Min(12),   // active view
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    match app.active_view() {
        View::Station => draw_station(f, rows[1], app),
        View::Research => draw_research(f, rows[1]),
        View::About => draw_about(f, rows[1]),
    }
    draw_keys(f, rows[2], app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let pause = if app.is_paused() { "  ⏸ paused" } else { "" };
    let seed = app.seed().map(|s| format!("  seed {s}")).unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Line::from(vec![
            Span::styled(
                format!(" 🌱 {} ", catalog::PROJECT_NAME),
                Style::default().bold().fg(Color::Green),
            ),
            Span::styled(
                format!(
                    " tick #{}  {}ms{seed}{pause} ",
                    app.ticks(),
                    app.refresh().as_millis()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    let tabs = Tabs::new(View::ALL.iter().map(|v| v.label()))
        .select(app.active_view().index())
        .highlight_style(Style::default().bold().fg(Color::Yellow))
        .block(block);

    f.render_widget(tabs, area);
}

fn draw_keys(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.status() {
        Some(status) => format!(" {status}"),
        None => " q quit   tab/1-3 view   g trend   p pause   s snapshot".to_string(),
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

// ---------------------------------------------------------------------------
// Station view
// ---------------------------------------------------------------------------

fn draw_station(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // status cards
            Constraint::Min(8),         // trend + scatter
            Constraint::Percentage(30), // seasonal light
        ])
        .split(area);

    draw_cards(f, rows[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    draw_trend(f, charts[0], app);
    draw_scatter(f, charts[1], app.history());

    draw_light(f, rows[2]);
}

fn value_style(metric: Metric, value: Option<f64>) -> Style {
    match (metric.optimal_range(), value) {
        (Some((lo, hi)), Some(v)) if v >= lo && v <= hi => Style::default().bold().fg(Color::Green),
        (Some(_), Some(_)) => Style::default().bold().fg(Color::Yellow),
        _ => Style::default().bold().fg(Color::Cyan),
    }
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (metric, col) in Metric::ALL.iter().zip(cols.iter()) {
        let reading = app.current();
        let value = reading.and_then(|r| metric.value_from(r));
        let shown = reading
            .map(|r| metric.display(r))
            .unwrap_or_else(|| "—".to_string());

        let delta = match app.live_delta(*metric) {
            Some(d) if d.abs() >= 0.05 => format!("  {d:+.1}"),
            _ => String::new(),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(shown, value_style(*metric, value)),
                Span::styled(delta, Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::styled(
                metric.hint(),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", metric.label()));
        f.render_widget(Paragraph::new(lines).block(block), *col);
    }
}

/// `(min, max)` padded so flat series still get a visible band.
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.5);
    (min - pad, max + pad)
}

fn draw_trend(f: &mut Frame, area: Rect, app: &App) {
    match app.trend_mode() {
        TrendMode::Climate => draw_climate_trend(f, area, app.history()),
        TrendMode::Single(metric) => draw_metric_trend(f, area, app.history(), metric),
    }
}

/// `(day index, value)` points for one metric.
fn series(history: &[SensorReading], metric: Metric) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .filter_map(|(i, r)| metric.value_from(r).map(|v| (i as f64, v)))
        .collect()
}

/// First and last day labels spanning `[0, x_max]`.
fn day_axis(history: &[SensorReading], x_max: f64) -> Axis<'_> {
    let first = history.first().map(|r| r.timestamp.as_str()).unwrap_or("");
    let last = history.last().map(|r| r.timestamp.as_str()).unwrap_or("");
    Axis::default()
        .bounds([0.0, x_max])
        .labels(vec![Line::from(first), Line::from(last)])
}

fn value_axis<'a>(y_min: f64, y_max: f64) -> Axis<'a> {
    Axis::default().bounds([y_min, y_max]).labels(vec![
        Line::from(format!("{y_min:.0}")),
        Line::from(format!("{y_max:.0}")),
    ])
}

fn draw_climate_trend(f: &mut Frame, area: Rect, history: &[SensorReading]) {
    let temperature = series(history, Metric::Temperature);
    let humidity = series(history, Metric::Humidity);

    let x_max = (history.len().saturating_sub(1) as f64).max(1.0);
    let (y_min, y_max) = padded_bounds(temperature.iter().chain(&humidity).map(|&(_, v)| v));

    let datasets = vec![
        Dataset::default()
            .name("Temperature (°C)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&temperature),
        Dataset::default()
            .name("Humidity (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&humidity),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}-day temperature & humidity ", history.len())),
        )
        .x_axis(day_axis(history, x_max))
        .y_axis(value_axis(y_min, y_max));

    f.render_widget(chart, area);
}

fn draw_metric_trend(f: &mut Frame, area: Rect, history: &[SensorReading], metric: Metric) {
    let data = series(history, metric);

    if data.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} trend ", metric.label()));
        let p = Paragraph::new("No data for this metric")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let x_max = (data.len().saturating_sub(1) as f64).max(1.0);
    let mut bound_values: Vec<f64> = data.iter().map(|&(_, v)| v).collect();
    let band: Vec<[(f64, f64); 2]> = metric
        .optimal_range()
        .map(|(lo, hi)| vec![[(0.0, lo), (x_max, lo)], [(0.0, hi), (x_max, hi)]])
        .unwrap_or_default();
    if let Some((lo, hi)) = metric.optimal_range() {
        bound_values.extend([lo, hi]);
    }
    let (y_min, y_max) = padded_bounds(bound_values.into_iter());

    let mut datasets = vec![
        Dataset::default()
            .name(metric.label())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
    ];
    for line in &band {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(line),
        );
    }

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {}-day {} ({}) ",
            history.len(),
            metric,
            metric.unit()
        )))
        .x_axis(day_axis(history, x_max))
        .y_axis(value_axis(y_min, y_max));

    f.render_widget(chart, area);
}

fn draw_scatter(f: &mut Frame, area: Rect, history: &[SensorReading]) {
    let points: Vec<(f64, f64)> = history
        .iter()
        .filter_map(|r| r.plant_height.map(|h| (r.temperature, h)))
        .collect();

    let (x_min, x_max) = padded_bounds(points.iter().map(|&(t, _)| t));
    let (y_min, y_max) = padded_bounds(points.iter().map(|&(_, h)| h));

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Temperature vs plant height "),
        )
        .x_axis(
            Axis::default()
                .title("°C")
                .bounds([x_min, x_max])
                .labels(vec![
                    Line::from(format!("{x_min:.0}")),
                    Line::from(format!("{x_max:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("cm")
                .bounds([y_min, y_max])
                .labels(vec![
                    Line::from(format!("{y_min:.0}")),
                    Line::from(format!("{y_max:.0}")),
                ]),
        );

    f.render_widget(chart, area);
}

fn draw_light(f: &mut Frame, area: Rect) {
    let bars: Vec<Bar> = catalog::MONTHLY_LIGHT
        .iter()
        .map(|m| {
            Bar::default()
                .value(m.lux.round() as u64)
                .label(Line::from(m.month))
                .text_value(format!("{}", m.lux.round()))
                .style(Style::default().fg(Color::Yellow))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Seasonal light (avg lux) "),
        )
        .bar_width(6)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Research view
// ---------------------------------------------------------------------------

fn badge_style(status: HypothesisStatus) -> Style {
    match status {
        HypothesisStatus::Verified => Style::default().bold().fg(Color::Black).bg(Color::Green),
        HypothesisStatus::Refuted => Style::default().bold().fg(Color::White).bg(Color::Red),
        HypothesisStatus::Pending => Style::default().bold().fg(Color::Black).bg(Color::Yellow),
    }
}

fn draw_research(f: &mut Frame, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut lines = Vec::new();
    for h in catalog::HYPOTHESES {
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", h.status.badge()), badge_style(h.status)),
            Span::raw("  "),
            Span::styled(h.student_name, Style::default().bold()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", h.statement),
            Style::default().italic(),
        )));
        lines.push(Line::from(Span::styled(
            format!("Reflection: {}", h.notes),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    let hypotheses = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Hypotheses "));
    f.render_widget(hypotheses, cols[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(6)])
        .split(cols[1]);

    let mut journal = Vec::new();
    for entry in catalog::JOURNAL {
        journal.push(Line::from(Span::styled(
            format!("{}  {}", entry.date, entry.author),
            Style::default().fg(Color::DarkGray),
        )));
        journal.push(Line::from(Span::styled(entry.title, Style::default().bold())));
        journal.push(Line::from(entry.preview));
        journal.push(Line::from(""));
    }
    let p = Paragraph::new(journal)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Research journal "));
    f.render_widget(p, right[0]);

    draw_evaluation(f, right[1]);
}

fn draw_evaluation(f: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Evaluation ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(2); catalog::EVALUATION.len()])
        .split(inner);

    for (score, row) in catalog::EVALUATION.iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .ratio((score.score / score.out_of).clamp(0.0, 1.0))
            .label(format!("{}  {:.1}/{:.0}", score.label, score.score, score.out_of));
        f.render_widget(gauge, *row);
    }
}

// ---------------------------------------------------------------------------
// About view
// ---------------------------------------------------------------------------

fn draw_about(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // summary
            Constraint::Length(3), // progress
            Constraint::Min(6),    // timeline
        ])
        .split(area);

    let summary = Paragraph::new(catalog::PROJECT_SUMMARY)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" About "));
    f.render_widget(summary, rows[0]);

    let progress = catalog::timeline_progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Project progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, rows[1]);

    let mut lines = Vec::new();
    for phase in catalog::TIMELINE {
        let (mark, style) = if phase.completed {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("·", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {mark} "), style),
            Span::styled(format!("{:<9}", phase.date), Style::default().fg(Color::DarkGray)),
            Span::styled(phase.title, Style::default().bold()),
        ]));
        lines.push(Line::from(format!("            {}", phase.description)));
    }
    let timeline = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Timeline "));
    f.render_widget(timeline, rows[2]);
}
