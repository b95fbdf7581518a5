mod common;
mod cone_tests;
mod estimator_tests;
mod pricing_tests;
