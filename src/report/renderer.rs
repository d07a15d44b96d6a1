use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::{
    config::Qualification,
    models::{Comparison, DisplayValue, PlayerRanking, RankingMetric, Result, StreakRecord},
};

const TEMPLATE_NAME: &str = "compare_gamers";
const TEMPLATE: &str = include_str!("../../templates/compare_gamers.hbs");
const DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Serialize)]
struct ReportContext<'a> {
    first: &'a str,
    second: &'a str,
    num_to_display: usize,
    min_length: u32,
    min_count: u32,
    sections: Vec<SectionContext<'a>>,
}

#[derive(Serialize)]
struct SectionContext<'a> {
    title: &'static str,
    players: Vec<PlayerContext<'a>>,
}

#[derive(Serialize)]
struct PlayerContext<'a> {
    identifier: &'a str,
    homepage: &'a str,
    rows: Vec<RowContext<'a>>,
}

#[derive(Serialize)]
struct RowContext<'a> {
    rank: usize,
    start: String,
    end: String,
    link: Option<&'a str>,
    achievement_count: DisplayValue,
    length: DisplayValue,
    average: DisplayValue,
    weighted: DisplayValue,
}

/// Renders a two-gamer comparison as a standalone HTML page.
pub struct ReportRenderer {
    rules: Qualification,
    registry: Handlebars<'static>,
}

impl ReportRenderer {
    pub fn new(rules: Qualification) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(TEMPLATE_NAME, TEMPLATE)?;
        registry.register_helper("format_num", Box::new(format_num));

        Ok(Self { rules, registry })
    }

    pub fn render(&self, comparison: &Comparison) -> Result<String> {
        Ok(self.registry.render(TEMPLATE_NAME, &self.context(comparison))?)
    }

    pub fn write_to(&self, comparison: &Comparison, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(comparison)?)?;
        info!("Wrote report to {}", path.display());
        Ok(())
    }

    fn context<'a>(&self, comparison: &'a Comparison) -> ReportContext<'a> {
        let sections = RankingMetric::ALL
            .iter()
            .map(|&metric| SectionContext {
                title: metric.title(),
                players: vec![
                    self.player_context(&comparison.first, metric),
                    self.player_context(&comparison.second, metric),
                ],
            })
            .collect();

        ReportContext {
            first: &comparison.first.identifier,
            second: &comparison.second.identifier,
            num_to_display: comparison.num_to_display,
            min_length: self.rules.min_length,
            min_count: self.rules.min_count,
            sections,
        }
    }

    fn player_context<'a>(&self, player: &'a PlayerRanking, metric: RankingMetric) -> PlayerContext<'a> {
        PlayerContext {
            identifier: &player.identifier,
            homepage: &player.homepage,
            rows: player
                .best_by(metric)
                .iter()
                .enumerate()
                .map(|(idx, streak)| self.row_context(idx + 1, streak))
                .collect(),
        }
    }

    fn row_context<'a>(&self, rank: usize, streak: &'a StreakRecord) -> RowContext<'a> {
        RowContext {
            rank,
            start: streak.start_date.format(DATE_FORMAT).to_string(),
            end: streak.end_date().format(DATE_FORMAT).to_string(),
            link: streak.link.as_deref(),
            achievement_count: DisplayValue::from(streak.achievement_count),
            length: DisplayValue::from(streak.length),
            average: DisplayValue::from(streak.average_per_day()),
            weighted: DisplayValue::from(streak.weighted_average(&self.rules)),
        }
    }
}

/// `{{format_num value}}` for a serialized [`DisplayValue`].
fn format_num(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("format_num", 0))?;
    let value: DisplayValue = serde_json::from_value(param.value().clone())
        .map_err(|_| RenderErrorReason::InvalidParamType("DisplayValue"))?;

    out.write(&value.to_string())?;
    Ok(())
}
