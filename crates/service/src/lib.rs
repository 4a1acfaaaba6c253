//! Service layer for survey records.
//! - `survey::repository`: owner-scoped persistence (SeaORM and an in-memory mock).
//! - `survey::mapper`: wire payloads to validated commands and back.
//! - `survey::service`: the operations the HTTP layer calls.

pub mod errors;
pub mod survey;
#[cfg(test)]
pub mod test_support;
