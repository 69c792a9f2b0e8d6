//! Reusable view pieces shared by the dashboard pages.

pub mod chart;
pub mod data_table;
pub mod stat_card;
pub mod ticker;

pub use chart::{RevenueBar, RevenueChart};
pub use data_table::{FilterOption, TableColumn};
pub use stat_card::{StatCard, Tone};
pub use ticker::TickerView;
