use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::{RowPolicy, SiteSettings};
use crate::models::{ParsedPage, Result, StreakError, StreakRecord};

const ROW_DATE_FORMAT: &str = "%d %b %Y";

/// Parser for a gamer's win streaks page.
///
/// Selectors are built once from the site settings and reused for every
/// page, so one parser can serve both sides of a comparison.
pub struct PageParser {
    table: Selector,
    breadcrumbs: Selector,
    row: Selector,
    cell: Selector,
    span: Selector,
    anchor: Selector,
    origin: String,
    row_policy: RowPolicy,
}

impl PageParser {
    pub fn new(site: &SiteSettings, row_policy: RowPolicy) -> Result<Self> {
        Ok(Self {
            table: selector(&format!("table#{}", site.table_id))?,
            breadcrumbs: selector(&format!("div#{}", site.breadcrumbs_id))?,
            row: selector("tr")?,
            cell: selector("td")?,
            span: selector("span")?,
            anchor: selector("a[href]")?,
            origin: site.origin.trim_end_matches('/').to_string(),
            row_policy,
        })
    }

    /// Parse a page into the gamertag and its streaks in document order.
    ///
    /// A page without the streaks table or the breadcrumbs gamertag is a
    /// gamer that doesn't exist and yields [`ParsedPage::unknown`].
    pub fn parse(&self, html: &str) -> Result<ParsedPage> {
        let document = Html::parse_document(html);

        let Some(table) = document.select(&self.table).next() else {
            debug!("No streaks table found");
            return Ok(ParsedPage::unknown());
        };
        let Some(gamertag) = self.extract_gamertag(&document) else {
            debug!("No gamertag found in breadcrumbs");
            return Ok(ParsedPage::unknown());
        };

        let mut streaks = Vec::new();
        let mut skipped_rows = 0;

        for (row_index, row) in table.select(&self.row).enumerate() {
            match self.parse_row(row_index, &row) {
                Ok(Some(streak)) => streaks.push(streak),
                Ok(None) => continue,
                Err(e) => match self.row_policy {
                    RowPolicy::Skip => {
                        warn!("Skipping streak row for {}: {}", gamertag, e);
                        skipped_rows += 1;
                    }
                    RowPolicy::Abort => return Err(e),
                },
            }
        }

        debug!("Parsed {} streaks for {}", streaks.len(), gamertag);

        Ok(ParsedPage {
            gamertag,
            streaks,
            skipped_rows,
        })
    }

    fn extract_gamertag(&self, document: &Html) -> Option<String> {
        let breadcrumbs = document.select(&self.breadcrumbs).next()?;

        breadcrumbs
            .select(&self.span)
            .flat_map(|span| span.children().filter_map(|node| node.value().as_text()))
            .map(|text| text.trim())
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// `Ok(None)` for rows without data cells, such as the header row.
    fn parse_row(&self, row_index: usize, row: &ElementRef) -> Result<Option<StreakRecord>> {
        let cells: Vec<ElementRef> = row.select(&self.cell).collect();
        if cells.is_empty() {
            return Ok(None);
        }
        if cells.len() < 3 {
            return Err(invalid_row(row_index, format!("expected 3 cells, found {}", cells.len())));
        }

        let date_text = cell_text(&cells[0]);
        let start_date = NaiveDate::parse_from_str(&date_text, ROW_DATE_FORMAT)
            .map_err(|e| invalid_row(row_index, format!("bad date '{}': {}", date_text, e)))?;
        let length = parse_count(row_index, "length", &cells[1])?;
        let achievement_count = parse_count(row_index, "achievement count", &cells[2])?;

        let mut streak = StreakRecord::new(start_date, length, achievement_count);
        if let Some(href) = cells[0]
            .select(&self.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            streak = streak.with_link(self.absolute_link(href));
        }

        Ok(Some(streak))
    }

    fn absolute_link(&self, href: &str) -> String {
        let href = href.trim();
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{}", self.origin, href)
        } else {
            format!("{}/{}", self.origin, href)
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| StreakError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn parse_count(row_index: usize, field: &str, cell: &ElementRef) -> Result<u32> {
    let text = cell_text(cell);
    text.replace(',', "")
        .parse::<u32>()
        .map_err(|e| invalid_row(row_index, format!("bad {} '{}': {}", field, text, e)))
}

fn invalid_row(row: usize, reason: String) -> StreakError {
    StreakError::InvalidRow { row, reason }
}
