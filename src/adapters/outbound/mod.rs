mod maxmind_database;

pub use maxmind_database::{MaxMindDatabase, MaxMindOpener};
