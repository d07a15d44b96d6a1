use crate::{
    config::Settings,
    fetch::StreakSource,
    models::{Comparison, PlayerRanking, Result},
    parsing::PageParser,
    ranking::RankingBuilder,
};
use futures::future::try_join;
use std::sync::Arc;
use tracing::{info, warn};

pub struct Analyzer {
    source: Arc<dyn StreakSource>,
    parser: PageParser,
    builder: RankingBuilder,
    num_to_display: usize,
}

impl Analyzer {
    pub fn new(source: Arc<dyn StreakSource>, settings: &Settings) -> Result<Self> {
        Ok(Self {
            source,
            parser: PageParser::new(&settings.site, settings.parser.row_policy)?,
            builder: RankingBuilder::new(settings.qualification, &settings.site),
            num_to_display: settings.report.num_to_display,
        })
    }

    pub fn with_num_to_display(mut self, num_to_display: usize) -> Self {
        self.num_to_display = num_to_display;
        self
    }

    /// Fetch, parse and rank one gamer's streaks.
    pub async fn process_gamer(&self, gamer_id: &str) -> Result<PlayerRanking> {
        info!("Getting streaks for gamer {}", gamer_id);
        let html = self.source.fetch_page(gamer_id).await?;

        let page = self.parser.parse(&html)?;
        if page.is_unknown() {
            warn!("Gamer {} not found", gamer_id);
        } else {
            info!(
                "Got {} streaks for {} ({} rows skipped)",
                page.streaks.len(),
                page.gamertag,
                page.skipped_rows
            );
        }

        Ok(self.builder.build(&page.gamertag, &page.streaks, self.num_to_display))
    }

    /// Process both gamers concurrently; either failure fails the comparison.
    pub async fn compare(&self, first_id: &str, second_id: &str) -> Result<Comparison> {
        let (first, second) =
            try_join(self.process_gamer(first_id), self.process_gamer(second_id)).await?;

        Ok(Comparison {
            first,
            second,
            num_to_display: self.num_to_display,
        })
    }
}
