//! Domain entities and value objects.

pub mod member;
pub mod search;
pub mod team;
pub mod types;
