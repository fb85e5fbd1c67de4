//! Client core for the players roster.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and turns players into a
//! pure view model the host renders into its own targets.
//!
//! # Design
//! - `RosterClient` is stateless; it holds only `base_url`.
//! - Each resource operation is split into `build_*` and `parse_*`, and
//!   every parse returns a typed `Result`.
//! - `view` produces node trees with attached `Action`s; `html` serializes
//!   them.
//! - `App` runs the fetch/render loop over a host `Transport` and explicit
//!   `RenderTarget`s, logging failures through the `log` facade.

pub mod app;
pub mod client;
pub mod error;
pub mod html;
pub mod http;
pub mod types;
pub mod view;

pub use app::{App, FormTarget, MemoryForm, MemoryTarget, RenderTarget, Screen, Transport};
pub use client::{RosterClient, DEFAULT_API_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{DeleteAck, NewPlayer, Player};
pub use view::{Action, Node, PlayerForm};
