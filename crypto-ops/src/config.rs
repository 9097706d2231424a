//! Engine configuration.
//!
//! Defaults applied when a caller omits an optional parameter. The struct
//! is built explicitly by the embedding service and passed into
//! [`crate::engine::CryptoEngine::new`]; the engine reads no environment
//! variables and holds no ambient global state.

use crate::algorithm::{AesKeySize, RsaKeySize, SignatureAlgorithm};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Key size used when an AES operation does not request one.
    pub default_aes_key_size: AesKeySize,

    /// Modulus size used when RSA key-pair generation does not request one.
    pub default_rsa_key_size: RsaKeySize,

    /// Scheme used when a sign/verify call does not name one.
    pub default_signature_algorithm: SignatureAlgorithm,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_aes_key_size: AesKeySize::Bits256,
            default_rsa_key_size: RsaKeySize::Bits2048,
            default_signature_algorithm: SignatureAlgorithm::RsaSha256,
        }
    }
}
