//! Message counts grouped by calendar features.
//!
//! Seven views are available, one per [`ChartKind`]:
//!
//! | Kind | Grouped by | Shape |
//! |------|-----------|-------|
//! | [`YearCount`](ChartKind::YearCount) | year | bars |
//! | [`UserCount`](ChartKind::UserCount) | sender | bars, ascending count |
//! | [`MonthByYear`](ChartKind::MonthByYear) | year, month | panel per year |
//! | [`WeekdayByYear`](ChartKind::WeekdayByYear) | year, weekday | panel per year, newest first |
//! | [`HourCount`](ChartKind::HourCount) | hour | bars |
//! | [`PartOfDayByYear`](ChartKind::PartOfDayByYear) | year, part of day | panel per year |
//! | [`PartOfDayByWeek`](ChartKind::PartOfDayByWeek) | year, ISO week, part of day | heatmap row per year |
//!
//! Every view counts rows, so an empty table yields empty views rather than
//! an error.
//!
//! # Example
//!
//! ```
//! use chatheat::chart::ChartKind;
//! use chatheat::config::CategoryOrder;
//! use chatheat::core::aggregate::aggregate;
//! use chatheat::core::FeatureTable;
//!
//! let empty = FeatureTable::default();
//! let view = aggregate(ChartKind::YearCount, &empty, &CategoryOrder::default());
//! assert!(view.is_empty());
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::features::PartOfDay;
use super::table::{FeatureRow, FeatureTable};
use crate::chart::ChartKind;
use crate::config::CategoryOrder;

/// Number of rows in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// One facet panel: the bars of a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub year: i32,
    pub bars: Vec<CategoryCount>,
}

/// One heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub week: u32,
    pub part_of_day: PartOfDay,
    pub count: usize,
}

/// One heatmap row: the cells of a single year, sorted by week then bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapPanel {
    pub year: i32,
    pub cells: Vec<HeatCell>,
}

/// The shape of an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum AggregateData {
    Bars(Vec<CategoryCount>),
    Faceted(Vec<Panel>),
    Heatmap(Vec<HeatmapPanel>),
}

/// A computed view, ready to be charted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub kind: ChartKind,
    #[serde(flatten)]
    pub data: AggregateData,
}

impl Aggregate {
    /// Returns `true` if no row was counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Sum of all counts in the view.
    pub fn total(&self) -> usize {
        match &self.data {
            AggregateData::Bars(bars) => bars.iter().map(|b| b.count).sum(),
            AggregateData::Faceted(panels) => panels
                .iter()
                .flat_map(|p| &p.bars)
                .map(|b| b.count)
                .sum(),
            AggregateData::Heatmap(panels) => panels
                .iter()
                .flat_map(|p| &p.cells)
                .map(|c| c.count)
                .sum(),
        }
    }

    /// Returns the bars of a flat view.
    pub fn bars(&self) -> Option<&[CategoryCount]> {
        match &self.data {
            AggregateData::Bars(bars) => Some(bars),
            _ => None,
        }
    }

    /// Returns the panels of a faceted view.
    pub fn panels(&self) -> Option<&[Panel]> {
        match &self.data {
            AggregateData::Faceted(panels) => Some(panels),
            _ => None,
        }
    }

    /// Returns the rows of a heatmap view.
    pub fn heatmap(&self) -> Option<&[HeatmapPanel]> {
        match &self.data {
            AggregateData::Heatmap(panels) => Some(panels),
            _ => None,
        }
    }
}

/// Panel ordering for faceted views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetOrder {
    Ascending,
    Descending,
}

/// Computes one view.
pub fn aggregate(kind: ChartKind, table: &FeatureTable, order: &CategoryOrder) -> Aggregate {
    let rows = table.rows();
    let data = match kind {
        ChartKind::YearCount => AggregateData::Bars(year_counts(rows)),
        ChartKind::UserCount => AggregateData::Bars(user_counts(rows)),
        ChartKind::MonthByYear => AggregateData::Faceted(faceted_counts(
            rows,
            |r| r.time.month,
            &order.months,
            order,
            FacetOrder::Ascending,
        )),
        ChartKind::WeekdayByYear => AggregateData::Faceted(faceted_counts(
            rows,
            |r| r.time.weekday,
            &order.weekdays,
            order,
            FacetOrder::Descending,
        )),
        ChartKind::HourCount => AggregateData::Bars(hour_counts(rows)),
        ChartKind::PartOfDayByYear => AggregateData::Faceted(faceted_counts(
            rows,
            |r| r.time.part_of_day.label(),
            &order.parts_of_day,
            order,
            FacetOrder::Ascending,
        )),
        ChartKind::PartOfDayByWeek => AggregateData::Heatmap(week_heatmap(rows, order)),
    };
    Aggregate { kind, data }
}

/// Computes every requested view, in request order.
pub fn aggregate_all(
    kinds: &[ChartKind],
    table: &FeatureTable,
    order: &CategoryOrder,
) -> Vec<Aggregate> {
    kinds
        .iter()
        .map(|kind| aggregate(*kind, table, order))
        .collect()
}

/// Messages per calendar year, ascending.
pub fn year_counts(rows: &[FeatureRow]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.time.year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| CategoryCount::new(year.to_string(), count))
        .collect()
}

/// Messages per sender, ascending by count then name.
///
/// Rows without a sender name are not counted.
pub fn user_counts(rows: &[FeatureRow]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for sender in rows.iter().filter_map(|r| r.message.sender()) {
        *counts.entry(sender).or_default() += 1;
    }
    let mut bars: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(sender, count)| CategoryCount::new(sender, count))
        .collect();
    bars.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.category.cmp(&b.category)));
    bars
}

/// Messages per hour of day; only hours with messages appear.
pub fn hour_counts(rows: &[FeatureRow]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.time.hour).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(hour, count)| CategoryCount::new(hour.to_string(), count))
        .collect()
}

/// Groups rows by (year, category) and lays them out as one panel per year.
///
/// Panels follow the resolved year window in `facet_order`; bars follow
/// `category_order`, with unlisted categories appended alphabetically.
/// Categories without rows are left out.
pub fn faceted_counts<'a>(
    rows: &'a [FeatureRow],
    category: impl Fn(&'a FeatureRow) -> &'a str,
    category_order: &[String],
    order: &CategoryOrder,
    facet_order: FacetOrder,
) -> Vec<Panel> {
    let mut grouped: BTreeMap<i32, HashMap<&str, usize>> = BTreeMap::new();
    for row in rows.iter().filter(|r| order.years.contains(r.time.year)) {
        *grouped
            .entry(row.time.year)
            .or_default()
            .entry(category(row))
            .or_default() += 1;
    }

    let mut years = order.years.resolve(grouped.keys().copied());
    if facet_order == FacetOrder::Descending {
        years.reverse();
    }

    years
        .into_iter()
        .filter_map(|year| {
            let counts = grouped.get(&year)?;
            Some(Panel {
                year,
                bars: ordered_bars(counts, category_order),
            })
        })
        .collect()
}

fn ordered_bars(counts: &HashMap<&str, usize>, category_order: &[String]) -> Vec<CategoryCount> {
    let mut bars: Vec<CategoryCount> = category_order
        .iter()
        .filter_map(|name| {
            counts
                .get(name.as_str())
                .map(|count| CategoryCount::new(name.clone(), *count))
        })
        .collect();

    let mut extra: Vec<CategoryCount> = counts
        .iter()
        .filter(|(name, _)| !category_order.iter().any(|o| o == *name))
        .map(|(name, count)| CategoryCount::new(*name, *count))
        .collect();
    extra.sort_by(|a, b| a.category.cmp(&b.category));
    bars.extend(extra);
    bars
}

/// Groups rows by (year, ISO week, part of day), one heatmap row per year.
pub fn week_heatmap(rows: &[FeatureRow], order: &CategoryOrder) -> Vec<HeatmapPanel> {
    let mut grouped: BTreeMap<i32, BTreeMap<(u32, PartOfDay), usize>> = BTreeMap::new();
    for row in rows.iter().filter(|r| order.years.contains(r.time.year)) {
        *grouped
            .entry(row.time.year)
            .or_default()
            .entry((row.time.week_of_year, row.time.part_of_day))
            .or_default() += 1;
    }

    order
        .years
        .resolve(grouped.keys().copied())
        .into_iter()
        .filter_map(|year| {
            let cells = grouped.get(&year)?;
            Some(HeatmapPanel {
                year,
                cells: cells
                    .iter()
                    .map(|(&(week, part_of_day), &count)| HeatCell {
                        week,
                        part_of_day,
                        count,
                    })
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearWindow;
    use crate::message::{GroupType, MessageRow};
    use chrono::TimeZone;
    use chrono_tz::Asia::Dhaka;

    fn row(sender: Option<&str>, y: i32, m: u32, d: u32, hour: u32) -> MessageRow {
        let row = MessageRow::new(
            "19:team@thread.skype",
            GroupType::Group,
            Dhaka.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap(),
        );
        match sender {
            Some(s) => row.with_sender(s),
            None => row,
        }
    }

    fn sample() -> FeatureTable {
        vec![
            row(Some("Alice"), 2019, 7, 10, 9),  // Wed, Morning
            row(Some("Alice"), 2019, 7, 10, 22), // Wed, Night
            row(Some("Bob"), 2019, 1, 5, 2),     // Sat, Late Night
            row(Some("Alice"), 2020, 3, 2, 9),   // Mon, Morning
            row(None, 2020, 3, 3, 14),           // Tue, Noon
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_year_counts() {
        let table = sample();
        let bars = year_counts(table.rows());
        assert_eq!(
            bars,
            vec![CategoryCount::new("2019", 3), CategoryCount::new("2020", 2)]
        );
    }

    #[test]
    fn test_user_counts_sorted_ascending() {
        let table = sample();
        let bars = user_counts(table.rows());
        assert_eq!(
            bars,
            vec![CategoryCount::new("Bob", 1), CategoryCount::new("Alice", 3)]
        );
    }

    #[test]
    fn test_hour_counts() {
        let table = sample();
        let bars = hour_counts(table.rows());
        let hours: Vec<&str> = bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(hours, vec!["2", "9", "14", "22"]);
        assert_eq!(bars[1].count, 2);
    }

    #[test]
    fn test_month_by_year_order() {
        let view = aggregate(ChartKind::MonthByYear, &sample(), &CategoryOrder::default());
        let panels = view.panels().unwrap();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].year, 2019);
        let months: Vec<&str> = panels[0].bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(months, vec!["January", "July"]);
        assert_eq!(panels[0].bars[1].count, 2);
    }

    #[test]
    fn test_weekday_by_year_newest_first() {
        let view = aggregate(ChartKind::WeekdayByYear, &sample(), &CategoryOrder::default());
        let panels = view.panels().unwrap();
        assert_eq!(panels[0].year, 2020);
        assert_eq!(panels[1].year, 2019);
        let days: Vec<&str> = panels[0].bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Tuesday"]);
        let days: Vec<&str> = panels[1].bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(days, vec!["Wednesday", "Saturday"]);
    }

    #[test]
    fn test_part_of_day_by_year() {
        let view = aggregate(ChartKind::PartOfDayByYear, &sample(), &CategoryOrder::default());
        let panels = view.panels().unwrap();
        let parts: Vec<&str> = panels[0].bars.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(
            parts,
            vec!["Late Night (12 am-4 am)", "Morning (8am-12pm)", "Night (8pm-12am)"]
        );
        assert_eq!(view.total(), 5);
    }

    #[test]
    fn test_week_heatmap() {
        let view = aggregate(ChartKind::PartOfDayByWeek, &sample(), &CategoryOrder::default());
        let panels = view.heatmap().unwrap();
        assert_eq!(panels.len(), 2);
        let first = &panels[0];
        assert_eq!(first.year, 2019);
        // 2019-01-05 is ISO week 1, 2019-07-10 is ISO week 28
        assert_eq!(first.cells[0].week, 1);
        assert_eq!(first.cells[0].part_of_day, PartOfDay::LateNight);
        assert_eq!(first.cells.len(), 3);
        assert_eq!(view.total(), 5);
    }

    #[test]
    fn test_fixed_window_drops_faceted_rows_only() {
        let order = CategoryOrder::default().with_years(YearWindow::fixed(2020, 2021).unwrap());
        let table = sample();

        let months = aggregate(ChartKind::MonthByYear, &table, &order);
        assert_eq!(months.panels().unwrap().len(), 1);
        assert_eq!(months.total(), 2);

        let years = aggregate(ChartKind::YearCount, &table, &order);
        assert_eq!(years.total(), 5);
    }

    #[test]
    fn test_unlisted_categories_are_appended() {
        let order = CategoryOrder {
            months: vec!["July".to_string()],
            ..CategoryOrder::default()
        };
        let view = aggregate(ChartKind::MonthByYear, &sample(), &order);
        let months: Vec<&str> = view.panels().unwrap()[0]
            .bars
            .iter()
            .map(|b| b.category.as_str())
            .collect();
        assert_eq!(months, vec!["July", "January"]);
    }

    #[test]
    fn test_empty_table_gives_empty_views() {
        let empty = FeatureTable::default();
        for view in aggregate_all(ChartKind::all(), &empty, &CategoryOrder::default()) {
            assert!(view.is_empty(), "{:?}", view.kind);
            assert_eq!(view.total(), 0);
        }
    }

    #[test]
    fn test_aggregate_serialization() {
        let view = aggregate(ChartKind::YearCount, &sample(), &CategoryOrder::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "year_count");
        assert_eq!(json["shape"], "bars");
        assert_eq!(json["data"][0]["category"], "2019");
    }
}
