//! Core utilities shared by every calculator

pub mod money;
