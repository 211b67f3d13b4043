use std::future::Future;

use url::Url;

use crate::dashboard::types::{RecentPrediction, StatsBucket};
use crate::http::{HttpClient, HttpError, endpoint};

const STATS_PATH: &str = "stats";
const RECENT_PATH: &str = "recent";

/// Where the dashboard refresher reads its data from.
pub trait DashboardSource: Send + Sync + 'static {
    fn fetch_stats(&self) -> impl Future<Output = Result<Vec<StatsBucket>, HttpError>> + Send;

    fn fetch_recent(
        &self,
    ) -> impl Future<Output = Result<Vec<RecentPrediction>, HttpError>> + Send;
}

/// Client for the `/stats` and `/recent` endpoints.
#[derive(Clone)]
pub struct DashboardClient {
    http: HttpClient,
    stats_url: Url,
    recent_url: Url,
}

impl DashboardClient {
    pub fn new(http: HttpClient, base_url: &Url) -> Result<Self, HttpError> {
        Ok(Self {
            http,
            stats_url: endpoint(base_url, STATS_PATH)?,
            recent_url: endpoint(base_url, RECENT_PATH)?,
        })
    }
}

impl DashboardSource for DashboardClient {
    async fn fetch_stats(&self) -> Result<Vec<StatsBucket>, HttpError> {
        self.http.get_json(self.stats_url.clone()).await
    }

    async fn fetch_recent(&self) -> Result<Vec<RecentPrediction>, HttpError> {
        self.http.get_json(self.recent_url.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    #[test]
    fn test_endpoints_keep_base_path() {
        let http = HttpClient::new(&HttpConfig::default());
        let base = Url::parse("http://localhost:8000/api").unwrap();
        let client = DashboardClient::new(http, &base).unwrap();
        assert_eq!(client.stats_url.as_str(), "http://localhost:8000/api/stats");
        assert_eq!(client.recent_url.as_str(), "http://localhost:8000/api/recent");
    }
}
