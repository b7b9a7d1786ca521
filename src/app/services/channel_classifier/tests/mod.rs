//! Tests for channel classification

mod rules_tests;
