pub mod cli;
pub mod display;
pub mod error;
pub mod formatting;
pub mod insights;
pub mod intake_loader;
pub mod nutrient_aggregator;
pub mod rdi_calculator;
pub mod rdi_table;
pub mod regimen;
pub mod schedule;
pub mod trends;
pub mod unit_converter;
