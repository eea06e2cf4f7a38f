use idlink_accounts::IdentityStats;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub stats: IdentityStats,
}
