// src/handlers/mod.rs

pub mod auth;
pub mod catalog;
pub mod lecture;
pub mod matches;
pub mod requests;
