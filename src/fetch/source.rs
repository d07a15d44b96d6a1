use async_trait::async_trait;
use reqwest::{Client, Request};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::Settings;
use crate::models::{Result, StreakError};

/// Somewhere a gamer's streak page can be read from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreakSource: Send + Sync {
    /// Fetch the raw HTML of the streaks page for `gamer_id`
    async fn fetch_page(&self, gamer_id: &str) -> Result<String>;
}

pub struct HttpStreakSource {
    client: Client,
    settings: Settings,
}

impl HttpStreakSource {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.http.timeout_seconds))
            .user_agent(settings.http.user_agent.clone())
            .build()?;

        Ok(Self { client, settings })
    }

    /// The GET for a gamer's streaks page, with the id as an encoded query value.
    pub fn request(&self, gamer_id: &str) -> Result<Request> {
        Ok(self
            .client
            .get(self.settings.streaks_base_url())
            .query(&[("gamerid", gamer_id)])
            .build()?)
    }
}

#[async_trait]
impl StreakSource for HttpStreakSource {
    async fn fetch_page(&self, gamer_id: &str) -> Result<String> {
        let request = self.request(gamer_id)?;
        let url = request.url().to_string();
        info!("Fetching streaks from {}", url);

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StreakError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        info!("Fetched {} bytes for gamer {}", html.len(), gamer_id);

        Ok(html)
    }
}

/// Reads `<dir>/<gamer_id>.html`, for working offline against saved pages.
pub struct FileStreakSource {
    dir: PathBuf,
}

impl FileStreakSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page_path(&self, gamer_id: &str) -> PathBuf {
        self.dir.join(format!("{}.html", gamer_id))
    }
}

#[async_trait]
impl StreakSource for FileStreakSource {
    async fn fetch_page(&self, gamer_id: &str) -> Result<String> {
        let path = self.page_path(gamer_id);
        info!("Reading streaks from {}", path.display());

        Ok(tokio::fs::read_to_string(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_saved_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("11497.html"), "<html></html>").unwrap();

        let source = FileStreakSource::new(dir.path());

        assert_eq!(source.fetch_page("11497").await.unwrap(), "<html></html>");
        assert!(matches!(source.fetch_page("20768").await, Err(StreakError::Io(_))));
    }

    #[test]
    fn test_request_url() {
        let source = HttpStreakSource::new(Settings::default()).unwrap();
        let request = source.request("11497").unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://www.trueachievements.com/winstreaks.aspx?gamerid=11497"
        );
    }

    #[test]
    fn test_gamer_id_cannot_add_query_pairs() {
        let source = HttpStreakSource::new(Settings::default()).unwrap();
        let request = source.request("1&gamerid=99#x").unwrap();
        let url = request.url();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("gamerid".to_string(), "1&gamerid=99#x".to_string())]);
        assert_eq!(url.fragment(), None);
    }
}
