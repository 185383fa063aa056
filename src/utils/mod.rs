pub mod feed;
pub mod input;
pub mod text;
pub mod timefmt;
