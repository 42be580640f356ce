//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments and their responses are checked for
//! status codes, `HX-Trigger` headers and JSON bodies.

mod arena;
mod auth;
mod booking;
mod event;
mod forum;

use rink_test_utils::prelude::*;

use crate::util::{
    days_before_today, days_from_today, into_response, json_body, log_in, status, TestContextExt,
};
