//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod novel_repo;

#[cfg(test)]
pub mod test_support;

pub use database::*;
pub use novel_repo::*;
