#![warn(clippy::pedantic)]

pub mod sqlite;

pub use sqlite::Sqlite;

#[cfg(test)]
mod tests;
