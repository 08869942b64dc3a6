#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod app_command;
mod config;
mod hotkey;
mod menu_ids;
mod tray;
