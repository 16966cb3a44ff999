pub mod health;
pub mod mutant;
pub mod stats;
