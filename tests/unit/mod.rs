//! Unit test modules.

mod thresholds_test;
mod validation_test;
mod zones_test;
