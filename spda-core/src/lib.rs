//! Core types for the SPDA events client.
//!
//! This crate provides everything the front ends share:
//! - `Event`, `Category` and the wire types the backend speaks
//! - `client` for talking to the events backend over HTTP
//! - `calendar` for the sliding 7-day window and its day buckets
//! - `session` for the active user

pub mod auth;
pub mod calendar;
pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod wire;

pub use category::Category;
pub use error::{SpdaError, SpdaResult};
pub use event::{Event, EventId, Location};
pub use session::{Session, SessionReader, User};
