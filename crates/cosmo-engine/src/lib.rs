//! Query evaluation and catalog analytics over a loaded [`cosmo_catalog::Catalog`].

pub mod aggregate;
pub mod matcher;
pub mod rank;
pub mod recommend;

pub use aggregate::{
    brand_price_report, cross_tab, group_counts, price_report, price_stats, price_stats_by,
    summarize, CatalogSummary, CrossTab, GroupCounts, GroupPriceStats, PriceStats,
};
pub use matcher::matches;
pub use rank::{compare_for_ranking, rank};
pub use recommend::{filter, recommend, Recommendation};
