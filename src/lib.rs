//! PriceCalc Library
//!
//! Selling-price calculator for payment-gateway fees, VAT and the mada fee cap

pub mod calculator;
pub mod config;
pub mod persistence;
pub mod pricing;
pub mod types;
