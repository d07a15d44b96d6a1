use chrono::NaiveDate;
use std::sync::Arc;
use streak_analyzer::{
    config::{Qualification, RowPolicy, Settings},
    fetch::FileStreakSource,
    models::{RankingMetric, StreakRecord, UNKNOWN_GAMER},
    parsing::PageParser,
    pipeline::Analyzer,
    ranking::RankingBuilder,
    report::ReportRenderer,
};

const TEST_GAMER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Win streaks</title></head>
<body>
  <div id="breadcrumbs">
    <a href="/">Home</a> &gt; <a href="/gamers">Gamers</a> &gt; <span>TestGamer</span>
  </div>
  <table id="oWinStreaks" class="maintable">
    <thead><tr><th>Started</th><th>Length</th><th>Achievements</th></tr></thead>
    <tbody>
      <tr><td><a href="/gamer/TestGamer/achievements?date=2021-03-05">05 Mar 2021</a></td><td>40</td><td>80</td></tr>
      <tr><td>01 Jan 2019</td><td>1,100</td><td>2,500</td></tr>
      <tr><td>10 Jul 2020</td><td>3</td><td>45</td></tr>
      <tr><td>11 Aug 2020</td><td>2</td><td>4</td></tr>
    </tbody>
  </table>
</body>
</html>"#;

fn parser() -> PageParser {
    let settings = Settings::default();
    PageParser::new(&settings.site, settings.parser.row_policy).unwrap()
}

#[test]
fn test_parse_then_rank() {
    let page = parser().parse(TEST_GAMER_PAGE).unwrap();
    assert_eq!(page.gamertag, "TestGamer");
    assert_eq!(page.streaks.len(), 4);

    let first = &page.streaks[0];
    assert_eq!(first.end_date(), NaiveDate::from_ymd_opt(2021, 4, 14).unwrap());
    assert_eq!(first.average_per_day(), 2.0);
    assert!((first.weighted_average(&Qualification::default()) - 2.0816).abs() < 1e-4);

    let builder = RankingBuilder::new(Qualification::default(), &Settings::default().site);
    let ranking = builder.build(&page.gamertag, &page.streaks, 2);

    let counts: Vec<u32> = ranking.best_by_count.iter().map(|s| s.achievement_count).collect();
    assert_eq!(counts, vec![2500, 80]);

    let lengths: Vec<u32> = ranking.best_by_length.iter().map(|s| s.length).collect();
    assert_eq!(lengths, vec![1100, 40]);

    let averages: Vec<u32> = ranking.best_by_average.iter().map(|s| s.achievement_count).collect();
    assert_eq!(averages, vec![45, 2500]);

    let weighted: Vec<u32> = ranking.best_by_weighted.iter().map(|s| s.achievement_count).collect();
    assert_eq!(weighted, vec![2500, 80]);
}

#[test]
fn test_weighted_ranking_with_custom_thresholds() {
    let page = parser().parse(TEST_GAMER_PAGE).unwrap();
    let rules = Qualification { min_length: 3, min_count: 40 };
    let builder = RankingBuilder::new(rules, &Settings::default().site);

    let ranking = builder.build(&page.gamertag, &page.streaks, 4);
    assert_eq!(ranking.best_by_weighted[0].achievement_count, 45);
    // The two-day streak is still below both thresholds and sorts last.
    assert_eq!(ranking.best_by_weighted[3].length, 2);
}

#[test]
fn test_unknown_gamer_ranks_empty() {
    let page = parser()
        .parse("<html><body><p>No gamer with that id</p></body></html>")
        .unwrap();
    assert_eq!(page.gamertag, UNKNOWN_GAMER);

    let builder = RankingBuilder::new(Qualification::default(), &Settings::default().site);
    let ranking = builder.build(&page.gamertag, &page.streaks, 5);
    for metric in RankingMetric::ALL {
        assert!(ranking.best_by(metric).is_empty());
    }
}

#[test]
fn test_abort_policy_rejects_corrupt_rows() {
    let html = TEST_GAMER_PAGE.replace("11 Aug 2020", "31 Feb 2020");
    let settings = Settings::default();

    let lenient = PageParser::new(&settings.site, RowPolicy::Skip).unwrap();
    let page = lenient.parse(&html).unwrap();
    assert_eq!(page.streaks.len(), 3);
    assert_eq!(page.skipped_rows, 1);

    let strict = PageParser::new(&settings.site, RowPolicy::Abort).unwrap();
    assert!(strict.parse(&html).is_err());
}

#[tokio::test]
async fn test_offline_comparison_report() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("11497.html"), TEST_GAMER_PAGE).unwrap();
    std::fs::write(dir.path().join("20768.html"), "<html><body></body></html>").unwrap();

    let settings = Settings::default();
    let analyzer = Analyzer::new(Arc::new(FileStreakSource::new(dir.path())), &settings).unwrap();
    let comparison = analyzer.compare("11497", "20768").await.unwrap();

    assert_eq!(comparison.num_to_display, 5);
    assert_eq!(comparison.first.best_by_count.len(), 4);
    assert_eq!(comparison.second.identifier, UNKNOWN_GAMER);
    assert_eq!(
        comparison.second.homepage,
        "https://www.trueachievements.com/gamer/Unknown+-+No+Such+Gamer"
    );

    let output = dir.path().join("rendered.html");
    ReportRenderer::new(settings.qualification)
        .unwrap()
        .write_to(&comparison, &output)
        .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("TestGamer vs Unknown - No Such Gamer"));
    assert!(html.contains("<td>2,500</td><td>1,100</td>"));
}

#[test]
fn test_streak_display_for_debugging() {
    let streak = StreakRecord::new(NaiveDate::from_ymd_opt(2021, 3, 5).unwrap(), 40, 80);

    assert_eq!(
        streak.to_string(),
        "March 5, 2021 to April 14, 2021         : 80 achievements in 40 days (avg: 2.000 weighted: 2.082)"
    );
}
