pub mod health;
pub mod podcast;
