#![cfg_attr(test, allow(clippy::expect_used))]

//! Shared client core for the Leasebox embed widget.
//!
//! Everything in this crate is browser-free: the panel state machine, the
//! session token contract, request planning and response decoding for the
//! Leasebox HTTP API, and the text the panels render. The wasm widget crate
//! owns the DOM and the transport; this crate owns the decisions, so the
//! behavior stays testable on the host target.

pub mod api;
pub mod format;
pub mod panel;
pub mod session;
