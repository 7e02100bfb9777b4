//! # Witness Adapters
//!
//! Implementations of the [`Witness`](crate::provider::Witness)
//! capability: an HTTP client posting digests to a witness endpoint and a
//! Bitcoin witness anchoring digests through an
//! [`Inscriber`](crate::provider::Inscriber).

mod btco;
mod http;

pub use self::btco::BitcoinWitness;
pub use self::http::{DEFAULT_TIMEOUT, HttpWitness, HttpWitnessConfig};
