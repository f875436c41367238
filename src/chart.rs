//! Plotly figure descriptions for aggregate views.
//!
//! Every [`Aggregate`] becomes a [`Figure`]: a `data` array of traces and a
//! `layout` object in the shape Plotly.js expects. Figures serialize on their
//! own, so any subset can be embedded in a page or written out separately.
//!
//! Faceted views are laid out as side-by-side subplots (one per year), the
//! week heatmap as stacked rows. Axes carry explicit category arrays so the
//! browser never reorders months, weekdays or parts of day.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::CategoryOrder;
use crate::core::aggregate::{Aggregate, AggregateData, CategoryCount, HeatmapPanel, Panel};

/// Gap between facet panels, as a fraction of the plot area.
const FACET_GAP: f64 = 0.03;

/// Sequential color scale of the week heatmap.
const HEATMAP_COLORSCALE: &str = "GnBu";

/// Horizontal bins of the week heatmap.
const HEATMAP_WEEK_BINS: u32 = 52;

/// The seven available charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Messages per year
    YearCount,
    /// Messages per sender
    UserCount,
    /// Messages per month, one panel per year
    MonthByYear,
    /// Messages per weekday, one panel per year
    WeekdayByYear,
    /// Messages per hour of day
    HourCount,
    /// Messages per part of day, one panel per year
    PartOfDayByYear,
    /// Part of day against ISO week, one heatmap row per year
    PartOfDayByWeek,
}

impl ChartKind {
    /// Returns every chart, in default page order.
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::YearCount,
            ChartKind::UserCount,
            ChartKind::MonthByYear,
            ChartKind::WeekdayByYear,
            ChartKind::HourCount,
            ChartKind::PartOfDayByYear,
            ChartKind::PartOfDayByWeek,
        ]
    }

    /// Returns all chart names accepted by [`FromStr`](std::str::FromStr).
    pub fn all_names() -> &'static [&'static str] {
        &[
            "year",
            "user",
            "month",
            "weekday",
            "hour",
            "part-of-day",
            "week-heatmap",
        ]
    }

    /// Returns the figure title.
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::YearCount => "Messages Count by Year",
            ChartKind::UserCount => "Count Over Users",
            ChartKind::MonthByYear => "Month vs Count By Year",
            ChartKind::WeekdayByYear => "Weekday vs Count By Year",
            ChartKind::HourCount => "Time of Day",
            ChartKind::PartOfDayByYear => "Count by Part of Day by Year",
            ChartKind::PartOfDayByWeek => "Part of Day by Week of Year",
        }
    }

    /// Returns the figure height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            ChartKind::YearCount => 500,
            ChartKind::UserCount => 600,
            ChartKind::MonthByYear | ChartKind::WeekdayByYear | ChartKind::HourCount => 600,
            ChartKind::PartOfDayByYear | ChartKind::PartOfDayByWeek => 900,
        }
    }

    /// Name of the category axis.
    fn category_label(&self) -> &'static str {
        match self {
            ChartKind::YearCount => "year",
            ChartKind::UserCount => "displayName",
            ChartKind::MonthByYear => "month",
            ChartKind::WeekdayByYear => "weekday",
            ChartKind::HourCount => "hour",
            ChartKind::PartOfDayByYear | ChartKind::PartOfDayByWeek => "part_of_day",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "year_count" => Ok(ChartKind::YearCount),
            "user" | "user_count" => Ok(ChartKind::UserCount),
            "month" | "month_by_year" => Ok(ChartKind::MonthByYear),
            "weekday" | "weekday_by_year" => Ok(ChartKind::WeekdayByYear),
            "hour" | "hour_count" => Ok(ChartKind::HourCount),
            "part-of-day" | "part_of_day_by_year" => Ok(ChartKind::PartOfDayByYear),
            "week-heatmap" | "part_of_day_by_week" => Ok(ChartKind::PartOfDayByWeek),
            _ => Err(format!(
                "Unknown chart: '{}'. Expected one of: {}",
                s,
                ChartKind::all_names().join(", ")
            )),
        }
    }
}

/// A renderable chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub kind: ChartKind,
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Returns `true` if the figure has no traces.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serializes the figure as a Plotly `{data, layout}` object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&json!({ "data": self.data, "layout": self.layout }))
    }
}

/// Builds the figure of one aggregate.
pub fn build_figure(aggregate: &Aggregate, order: &CategoryOrder) -> Figure {
    let kind = aggregate.kind;
    let (data, layout) = match &aggregate.data {
        AggregateData::Bars(bars) if kind == ChartKind::UserCount => user_bars(bars),
        AggregateData::Bars(bars) => vertical_bars(kind, bars),
        AggregateData::Faceted(panels) => faceted_bars(kind, panels, category_array(kind, order)),
        AggregateData::Heatmap(panels) => week_heatmap(panels, order),
    };

    let mut layout = layout;
    layout["title"] = json!({ "text": kind.title() });
    layout["height"] = json!(kind.height());
    if data.is_empty() {
        layout["annotations"] = json!([{
            "text": "No group messages",
            "showarrow": false,
            "xref": "paper",
            "yref": "paper",
            "x": 0.5,
            "y": 0.5,
        }]);
    }

    Figure { kind, data, layout }
}

/// Builds figures for several aggregates, keeping their order.
pub fn build_figures(aggregates: &[Aggregate], order: &CategoryOrder) -> Vec<Figure> {
    aggregates.iter().map(|a| build_figure(a, order)).collect()
}

fn category_array<'a>(kind: ChartKind, order: &'a CategoryOrder) -> &'a [String] {
    match kind {
        ChartKind::MonthByYear => &order.months,
        ChartKind::WeekdayByYear => &order.weekdays,
        _ => &order.parts_of_day,
    }
}

fn split(bars: &[CategoryCount]) -> (Vec<&str>, Vec<usize>) {
    bars.iter().map(|b| (b.category.as_str(), b.count)).unzip()
}

fn vertical_bars(kind: ChartKind, bars: &[CategoryCount]) -> (Vec<Value>, Value) {
    let mut layout = json!({
        "xaxis": { "title": { "text": kind.category_label() }, "type": "category" },
        "yaxis": { "title": { "text": "count" } },
    });
    if kind == ChartKind::YearCount {
        layout["width"] = json!(700);
    }
    if bars.is_empty() {
        return (Vec::new(), layout);
    }

    let (x, y) = split(bars);
    let trace = json!({ "type": "bar", "x": x, "y": y, "name": "count" });
    (vec![trace], layout)
}

fn user_bars(bars: &[CategoryCount]) -> (Vec<Value>, Value) {
    let layout = json!({
        "xaxis": { "title": { "text": "count" }, "rangeslider": { "visible": true } },
        "yaxis": { "title": { "text": "displayName" }, "type": "category" },
    });
    if bars.is_empty() {
        return (Vec::new(), layout);
    }

    let (names, counts) = split(bars);
    let trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": counts,
        "y": names,
        "name": "count",
    });
    (vec![trace], layout)
}

/// Axis ids of the `index`-th subplot: (`x2`, `y2`, `xaxis2`, `yaxis2`).
fn axis_ids(index: usize) -> (String, String, String, String) {
    let suffix = if index == 0 {
        String::new()
    } else {
        (index + 1).to_string()
    };
    (
        format!("x{suffix}"),
        format!("y{suffix}"),
        format!("xaxis{suffix}"),
        format!("yaxis{suffix}"),
    )
}

/// Splits `[0, 1]` into `n` equal domains separated by [`FACET_GAP`].
fn domains(n: usize) -> Vec<[f64; 2]> {
    if n == 0 {
        return Vec::new();
    }
    let width = (1.0 - FACET_GAP * (n - 1) as f64) / n as f64;
    (0..n)
        .map(|i| {
            let start = i as f64 * (width + FACET_GAP);
            [start, (start + width).min(1.0)]
        })
        .collect()
}

fn facet_annotation(year: i32, x: f64, y: f64, vertical: bool) -> Value {
    let mut note = json!({
        "text": format!("year={year}"),
        "showarrow": false,
        "xref": "paper",
        "yref": "paper",
        "x": x,
        "y": y,
    });
    if vertical {
        note["textangle"] = json!(90);
        note["xanchor"] = json!("left");
        note["yanchor"] = json!("middle");
    } else {
        note["xanchor"] = json!("center");
        note["yanchor"] = json!("bottom");
    }
    note
}

fn faceted_bars(kind: ChartKind, panels: &[Panel], categories: &[String]) -> (Vec<Value>, Value) {
    let mut layout = json!({ "showlegend": false, "annotations": [] });
    let mut data = Vec::with_capacity(panels.len());

    for (i, (panel, domain)) in panels.iter().zip(domains(panels.len())).enumerate() {
        let (x_ref, y_ref, x_key, y_key) = axis_ids(i);
        let (x, y) = split(&panel.bars);

        data.push(json!({
            "type": "bar",
            "x": x,
            "y": y,
            "name": format!("year={}", panel.year),
            "xaxis": x_ref,
            "yaxis": y_ref,
        }));

        layout[x_key.as_str()] = json!({
            "domain": domain,
            "anchor": y_ref,
            "type": "category",
            "categoryorder": "array",
            "categoryarray": categories,
            "title": { "text": kind.category_label() },
        });
        let mut y_axis = json!({ "anchor": x_ref, "rangemode": "tozero" });
        if i == 0 {
            y_axis["title"] = json!({ "text": "count" });
        } else {
            y_axis["matches"] = json!("y");
            y_axis["showticklabels"] = json!(false);
        }
        layout[y_key.as_str()] = y_axis;

        if let Some(notes) = layout["annotations"].as_array_mut() {
            notes.push(facet_annotation(panel.year, (domain[0] + domain[1]) / 2.0, 1.0, false));
        }
    }

    (data, layout)
}

fn week_heatmap(panels: &[HeatmapPanel], order: &CategoryOrder) -> (Vec<Value>, Value) {
    let mut layout = json!({
        "coloraxis": { "colorscale": HEATMAP_COLORSCALE, "colorbar": { "title": { "text": "count" } } },
        "annotations": [],
    });
    let mut data = Vec::with_capacity(panels.len());

    // First year on top, like a facet row layout.
    let rows = domains(panels.len());
    for (i, panel) in panels.iter().enumerate() {
        let domain = rows[rows.len() - 1 - i];
        let (x_ref, y_ref, x_key, y_key) = axis_ids(i);

        let weeks: Vec<String> = panel.cells.iter().map(|c| c.week.to_string()).collect();
        let parts: Vec<&str> = panel.cells.iter().map(|c| c.part_of_day.label()).collect();
        let counts: Vec<usize> = panel.cells.iter().map(|c| c.count).collect();

        data.push(json!({
            "type": "histogram2d",
            "x": weeks,
            "y": parts,
            "z": counts,
            "histfunc": "sum",
            "nbinsx": HEATMAP_WEEK_BINS,
            "coloraxis": "coloraxis",
            "name": format!("year={}", panel.year),
            "xaxis": x_ref,
            "yaxis": y_ref,
        }));

        let mut x_axis = json!({ "anchor": y_ref, "type": "category" });
        if i == panels.len() - 1 {
            x_axis["title"] = json!({ "text": "weekofyear" });
        }
        if i > 0 {
            x_axis["matches"] = json!("x");
        }
        layout[x_key.as_str()] = x_axis;
        layout[y_key.as_str()] = json!({
            "domain": domain,
            "anchor": x_ref,
            "type": "category",
            "categoryorder": "array",
            "categoryarray": order.parts_of_day,
        });

        if let Some(notes) = layout["annotations"].as_array_mut() {
            notes.push(facet_annotation(panel.year, 1.0, (domain[0] + domain[1]) / 2.0, true));
        }
    }

    (data, layout)
}
