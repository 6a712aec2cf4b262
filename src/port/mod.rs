//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the contracts the application core is written against;
//! adapters implement them to integrate the outside world (storage today,
//! anything else later) without the core knowing.

pub mod outbound;
