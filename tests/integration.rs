//! Integration tests for the load → derive → aggregate → render pipeline

use chatheat::chart::ChartKind;
use chatheat::config::{CategoryOrder, ReportConfig, SkypeConfig, YearWindow};
use chatheat::core::aggregate::aggregate;
use chatheat::pipeline::{Pipeline, RunOutcome};
use chatheat::prelude::*;
use std::fs;
use std::path::Path;

fn fixture() -> &'static Path {
    Path::new("tests/fixtures/skype_scenario.json")
}

fn default_pipeline() -> Pipeline {
    Pipeline::new(SkypeConfig::new(), ReportConfig::new())
}

fn categories(view: &Aggregate) -> Vec<(&str, usize)> {
    view.bars()
        .unwrap()
        .iter()
        .map(|b| (b.category.as_str(), b.count))
        .collect()
}

// =========================================================================
// End-to-end scenario
// =========================================================================

#[test]
fn test_scenario_filtered_table_has_three_rows() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();

    // group rows + personal row; call log never loaded
    assert_eq!(analysis.rows, 4);
    assert_eq!(analysis.features.len(), 3);
    assert!(analysis.features.rows().iter().all(|r| r.message.is_group()));
    assert!(
        analysis
            .features
            .rows()
            .iter()
            .all(|r| r.message.conversation_id == "19:weekend@thread.skype")
    );

    let stats = analysis.stats;
    assert_eq!(stats.conversations, 4);
    assert_eq!(stats.excluded, 1);
    assert_eq!(stats.empty, 1);
    assert_eq!(stats.group, 1);
    assert_eq!(stats.personal, 1);
}

#[test]
fn test_scenario_year_count() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    let years = &analysis.aggregates[0];
    assert_eq!(years.kind, ChartKind::YearCount);
    assert_eq!(categories(years), vec![("2019", 1), ("2020", 2)]);
    assert_eq!(years.total(), analysis.features.len());
}

#[test]
fn test_scenario_user_count_ascending() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    let users = analysis
        .aggregates
        .iter()
        .find(|a| a.kind == ChartKind::UserCount)
        .unwrap();
    assert_eq!(categories(users), vec![("Joe", 1), ("Jane", 2)]);
}

#[test]
fn test_scenario_times_are_local_to_dhaka() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    let rows = analysis.features.rows();

    // 2019-07-10T03:00Z is 09:00 on a Wednesday in Dhaka
    assert_eq!(rows[0].time.weekday, "Wednesday");
    assert_eq!(rows[0].time.weekday_no, 2);
    assert_eq!(rows[0].time.hour, 9);
    assert_eq!(rows[0].time.week_of_year, 28);
    assert_eq!(rows[0].time.part_of_day, PartOfDay::Morning);

    // 2020-03-02T18:30Z crosses midnight into Tuesday
    assert_eq!(rows[1].time.weekday, "Tuesday");
    assert_eq!(rows[1].time.hour, 0);
    assert_eq!(rows[1].time.part_of_day, PartOfDay::LateNight);

    assert_eq!(rows[2].time.part_of_day, PartOfDay::Noon);
    assert_eq!(rows[2].time.month, "March");
    assert_eq!(rows[2].time.month_no, 3);
}

#[test]
fn test_scenario_group_name_decoded() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    let row = &analysis.features.rows()[0];
    assert_eq!(row.message.group_name(), Some("Jane & Joe"));
}

#[test]
fn test_scenario_weekday_panels_newest_first() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    let weekdays = analysis
        .aggregates
        .iter()
        .find(|a| a.kind == ChartKind::WeekdayByYear)
        .unwrap();
    let panels = weekdays.panels().unwrap();
    let years: Vec<i32> = panels.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2020, 2019]);
    assert_eq!(panels[0].bars[0].category, "Tuesday");
    assert_eq!(panels[0].bars[0].count, 2);
}

#[test]
fn test_scenario_month_panels_oldest_first() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    let months = analysis
        .aggregates
        .iter()
        .find(|a| a.kind == ChartKind::MonthByYear)
        .unwrap();
    let panels = months.panels().unwrap();
    assert_eq!(panels[0].year, 2019);
    assert_eq!(panels[0].bars[0].category, "July");
    assert_eq!(panels[1].bars[0].category, "March");
    assert_eq!(panels[1].bars[0].count, 2);
}

#[test]
fn test_scenario_every_view_counts_every_row() {
    let analysis = default_pipeline().analyze(fixture()).unwrap();
    assert_eq!(analysis.aggregates.len(), 7);
    for view in &analysis.aggregates {
        assert_eq!(view.total(), 3, "{} lost rows", view.kind);
    }
}

#[test]
fn test_scenario_run_writes_html() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("chat_heatmap.html");
    let report = ReportConfig::new().with_output(&output);

    let summary = Pipeline::new(SkypeConfig::new(), report)
        .run(fixture())
        .unwrap();

    assert_eq!(summary.outcome, RunOutcome::Rendered);
    assert_eq!(summary.group_rows, 3);
    assert_eq!(summary.charts.len(), 7);

    let html = fs::read_to_string(&output).unwrap();
    assert_eq!(html.matches("Plotly.newPlot").count(), 7);
    assert!(html.contains("Messages Count by Year"));
}

// =========================================================================
// Year window
// =========================================================================

#[test]
fn test_fixed_year_window_limits_facets_only() {
    let report = ReportConfig::new().with_year_window(YearWindow::fixed(2020, 2021).unwrap());
    let analysis = Pipeline::new(SkypeConfig::new(), report)
        .analyze(fixture())
        .unwrap();

    let months = analysis
        .aggregates
        .iter()
        .find(|a| a.kind == ChartKind::MonthByYear)
        .unwrap();
    let years: Vec<i32> = months.panels().unwrap().iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2020]);
    assert_eq!(months.total(), 2);

    // Flat views still see every row
    assert_eq!(analysis.aggregates[0].total(), 3);
}

// =========================================================================
// Time zone
// =========================================================================

#[test]
fn test_utc_report_zone_moves_buckets() {
    let skype = SkypeConfig::new().with_time_zone(chrono_tz::UTC);
    let analysis = Pipeline::new(skype, ReportConfig::new())
        .analyze(fixture())
        .unwrap();
    let row = &analysis.features.rows()[1];
    assert_eq!(row.time.weekday, "Monday");
    assert_eq!(row.time.hour, 18);
    assert_eq!(row.time.part_of_day, PartOfDay::Eve);
}

// =========================================================================
// Zero group conversations
// =========================================================================

#[test]
fn test_no_group_conversations() {
    let content = r#"{"conversations": [
        {"id": "8:live:bob", "displayName": "Bob", "MessageList": [
            {"displayName": "Bob", "originalarrivaltime": "2020-03-03T06:00:00Z"}
        ]},
        {"id": "48:calllogs", "displayName": null, "threadProperties": {"x": 1}, "MessageList": [
            {"originalarrivaltime": "2020-03-03T06:00:00Z"}
        ]}
    ]}"#;

    let analysis = default_pipeline().analyze_str(content).unwrap();
    assert_eq!(analysis.outcome(), RunOutcome::NoData);
    assert_eq!(analysis.aggregates.len(), 7);
    assert!(analysis.aggregates.iter().all(Aggregate::is_empty));
}

#[test]
fn test_no_data_run_writes_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("messages.json");
    fs::write(&input, r#"{"conversations": []}"#).unwrap();
    let output = dir.path().join("report.html");

    let summary = Pipeline::new(SkypeConfig::new(), ReportConfig::new().with_output(&output))
        .run(&input)
        .unwrap();

    assert_eq!(summary.outcome, RunOutcome::NoData);
    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("No group messages"));
    assert!(!html.contains("Plotly.newPlot"));
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_missing_input_file() {
    let err = default_pipeline()
        .analyze("tests/fixtures/does_not_exist.json")
        .unwrap_err();
    assert!(err.is_input_not_found());
}

#[test]
fn test_malformed_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{\"conversations\": [").unwrap();

    let err = default_pipeline().analyze(&input).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_missing_conversations_key() {
    let err = default_pipeline().analyze_str(r#"{"userId": "x"}"#).unwrap_err();
    assert!(err.is_missing_field());
}

#[test]
fn test_unparseable_timestamp_surfaces_value() {
    let content = r#"{"conversations": [{
        "id": "19:a@thread.skype", "displayName": "A", "threadProperties": {"t": 1},
        "MessageList": [{"originalarrivaltime": "03/04/2021 10:20"}]
    }]}"#;
    let err = default_pipeline().analyze_str(content).unwrap_err();
    assert!(err.is_unparseable_timestamp());
    assert!(err.to_string().contains("03/04/2021 10:20"));
}

// =========================================================================
// Library building blocks
// =========================================================================

#[test]
fn test_building_blocks_match_pipeline() {
    let table = SkypeParser::new().parse(fixture()).unwrap();
    let features = FeatureTable::from_table(table);
    let hours = aggregate(ChartKind::HourCount, &features, &CategoryOrder::default());
    assert_eq!(categories(&hours), vec![("0", 1), ("9", 1), ("12", 1)]);
}
