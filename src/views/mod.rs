pub mod cell;
pub mod common;
pub mod help_overlay;
pub mod status_bar;
pub mod table;
