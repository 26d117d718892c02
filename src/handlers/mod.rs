pub mod health;
pub mod settings_data;

pub use health::health;
