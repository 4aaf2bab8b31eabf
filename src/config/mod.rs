pub mod ladder;
pub mod stage;
