//! Shared building blocks for the staking-manager contract suite.
//!
//! This crate provides:
//! - [`access`]: flat role registry (`(role, account) -> bool`) with
//!   tracked member lists, used to gate every mutating entry point.
//! - [`ttl`]: storage time-to-live helpers shared by all contracts.

#![no_std]

pub mod access;
pub mod ttl;

pub use access::*;
