// src/models/mod.rs

pub mod lecture;
pub mod matching;
pub mod request;
pub mod subject;
pub mod user;
