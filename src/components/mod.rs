pub mod filter_menu;
pub mod scoreboard;
