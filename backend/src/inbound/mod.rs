//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP is the only transport; its handlers live under [`http`].

pub mod http;
