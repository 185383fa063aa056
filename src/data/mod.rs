pub mod config;
pub mod database;
pub mod likes;
pub mod playlist;
pub mod queries;
pub mod song;
