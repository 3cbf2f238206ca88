// src/services/mod.rs
//
// Database-facing operations. Handlers stay thin and delegate here so the
// same routines can be exercised directly against an in-memory pool.

pub mod accounts;
pub mod lecture;
pub mod matching;

#[cfg(test)]
pub(crate) mod test_support;
