pub mod client;
pub mod refresher;
pub mod types;
pub mod view;

pub use client::{DashboardClient, DashboardSource};
pub use refresher::{DASHBOARD_REFRESH_INTERVAL, DashboardRefresher, start, start_with_interval};
pub use types::{RecentPrediction, Sentiment, StatsBucket};
pub use view::{
    CONNECTION_ERROR_MESSAGE, DashboardView, NO_DATA_MESSAGE, RECENT_REJECTED_MESSAGE,
    RECENT_ROWS, RECENT_UNREACHABLE_MESSAGE, RecentRow, RecentTable, SentimentSeries,
    SentimentTotals,
};
