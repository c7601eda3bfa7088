//! Employer social-insurance and housing-fund contribution service.
//!
//! Policy and salary spreadsheets are validated by [`ingest`], stored by
//! [`store`], turned into per-employee contributions by [`calc`] and served
//! over HTTP by [`api`].

pub mod api;
pub mod calc;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod ingest;
pub mod model;
pub mod routes;
pub mod store;
