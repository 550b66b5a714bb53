pub mod audio;
pub mod boss;
pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod events;
pub mod hazard;
pub mod input;
pub mod leaderboard;
pub mod level;
pub mod physics;
pub mod shop;
