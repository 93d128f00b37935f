//! Integration tests for the StaticDiff comparison engine

mod comparison_flow;
mod support;
