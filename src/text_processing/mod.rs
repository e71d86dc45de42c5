pub mod casing;
pub mod normalization;
