//! Unit tests for the simulation driver.


/// Reports: text tables and JSON.
pub mod report;
