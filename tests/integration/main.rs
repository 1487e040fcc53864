//! Workspace integration tests, driven through the public crate APIs.

mod helpers;

mod api_test;
mod notify_test;
mod seat_flow_test;
