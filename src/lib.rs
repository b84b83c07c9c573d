//! prior: command-line client for the Prior knowledge exchange.
//!
//! The interesting part is [`args`]: it resolves raw arguments and an
//! optional stdin JSON document into a validated [`commands::CommandRequest`].
//! [`api`] performs the single HTTP call and [`output`] renders the result,
//! expanding [`nudge`] tokens on the way.

pub mod api;
pub mod args;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod nudge;
pub mod output;
