//! Integration tests for Promptboard.
//!
//! Whole workflows, several components at a time: board manipulation,
//! credential round-trips, and the generation pipeline against a mock
//! HTTP server.

mod board_workflow_tests;
mod credential_flow_tests;
mod generation_api_tests;
mod pipeline_tests;
