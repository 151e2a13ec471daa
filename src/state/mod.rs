pub mod app_settings;
pub mod app_state;
pub mod filter;
pub mod filter_menu;
pub mod filter_spec;
pub mod messages;
pub mod network;
pub mod pagination;
pub mod refresher;
pub mod scoreboard;
pub mod sort;
pub mod team_cache;

#[cfg(test)]
pub(crate) mod test_support;
