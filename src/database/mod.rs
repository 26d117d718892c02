pub mod command;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
pub mod summary;

pub use command::SettingsDataCommand;
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemorySettingsStore;
pub use postgres::PgSettingsStore;
pub use store::SettingsStore;
