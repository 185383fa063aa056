pub mod error;
pub mod local_player;
pub mod metadata;
pub mod player;

#[cfg(test)]
pub mod testing;
