//! Cryptographic operations engine for CipherDesk
//!
//! This crate is the operation backend the platform's key-management and
//! audit-logging services call into. It provides:
//! - Symmetric encryption (AES-GCM, 128/192/256-bit keys, per-call nonces)
//! - Asymmetric encryption (RSA-OAEP) and key-pair generation (RSA, P-256)
//! - Cryptographic hashing and timing-safe integrity verification
//! - Digital signatures over raw data (RSA PKCS#1 v1.5, ECDSA P-256)
//! - Document signing with integrity binding and tamper detection
//!
//! Every operation is a synchronous, stateless unit of work: key material
//! is passed by value, used once, and never retained, so the engine can be
//! invoked concurrently without coordination. Persistence, transport, and
//! audit logging are the caller's responsibility.
//!
//! # Example
//!
//! ```rust
//! use crypto_ops::{CryptoEngine, HashRequest};
//!
//! let engine = CryptoEngine::default();
//! let response = engine.hash(&HashRequest {
//!     text: Some("hello world".to_string()),
//!     algorithm: Some("sha256".to_string()),
//! })?;
//! assert_eq!(response.digest.len(), 64);
//! # Ok::<(), crypto_ops::CryptoError>(())
//! ```

pub mod algorithm;
pub mod asymmetric;
pub mod config;
pub mod constant_time;
pub mod engine;
pub mod error;
pub mod hash;
pub mod signature;
pub mod symmetric;

pub use algorithm::{
    AesKeySize, CipherAlgorithm, HashAlgorithm, KeyAlgorithm, RsaKeySize, SignatureAlgorithm,
};
pub use config::EngineConfig;
pub use engine::*;
pub use error::{CryptoError, CryptoResult};
pub use signature::{DocumentVerification, SignaturePayload, SignedDocument};
