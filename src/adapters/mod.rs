//! Adapters - implementations of the ports.
//!
//! Only in-memory adapters live in this crate; database, payment
//! processor, and email adapters belong to the surrounding services.

pub mod memory;
