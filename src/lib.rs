//! DermaScan: viewer and demo classifier for the UCI dermatology dataset.
//!
//! The [`data`] layer loads and cleans the headerless source table and
//! provides the aggregate views; [`predict`] fits a decision tree or random
//! forest on a seeded split and classifies single feature vectors;
//! [`state::Session`] ties both to a configuration for one viewing session.

pub mod config;
pub mod data;
pub mod error;
pub mod predict;
pub mod state;
