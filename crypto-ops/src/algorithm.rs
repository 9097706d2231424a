//! Algorithm and key-size identifiers.
//!
//! Every identifier accepted at the operation boundary is a closed
//! enumeration parsed here. Parsing happens before any cryptographic
//! primitive runs, so an unrecognized name or size never reaches a cipher.

use crate::error::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cipher families available for encrypt/decrypt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherAlgorithm {
    Aes,
    Rsa,
}

impl FromStr for CipherAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AES" => Ok(CipherAlgorithm::Aes),
            "RSA" => Ok(CipherAlgorithm::Rsa),
            _ => Err(CryptoError::Validation(format!(
                "Invalid algorithm: {s}. Valid options: AES, RSA"
            ))),
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherAlgorithm::Aes => write!(f, "AES"),
            CipherAlgorithm::Rsa => write!(f, "RSA"),
        }
    }
}

/// Digest algorithms for the hash operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha1")]
    Sha1,
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha512")]
    Sha512,
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(CryptoError::Validation(format!(
                "Invalid algorithm: {s}. Valid options: md5, sha1, sha256, sha512"
            ))),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Sha512 => write!(f, "sha512"),
        }
    }
}

/// Signature schemes. The wire names pair the asymmetric primitive with the
/// digest it runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    #[serde(rename = "RSA-SHA256")]
    RsaSha256,
    #[serde(rename = "RSA-SHA512")]
    RsaSha512,
    #[serde(rename = "ECDSA-SHA256")]
    EcdsaSha256,
}

impl Default for SignatureAlgorithm {
    fn default() -> Self {
        SignatureAlgorithm::RsaSha256
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RSA-SHA256" => Ok(SignatureAlgorithm::RsaSha256),
            "RSA-SHA512" => Ok(SignatureAlgorithm::RsaSha512),
            "ECDSA-SHA256" => Ok(SignatureAlgorithm::EcdsaSha256),
            _ => Err(CryptoError::Validation(format!(
                "Invalid algorithm: {s}. Valid options: RSA-SHA256, RSA-SHA512, ECDSA-SHA256"
            ))),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::RsaSha256 => write!(f, "RSA-SHA256"),
            SignatureAlgorithm::RsaSha512 => write!(f, "RSA-SHA512"),
            SignatureAlgorithm::EcdsaSha256 => write!(f, "ECDSA-SHA256"),
        }
    }
}

/// Key families the generate-key operation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Aes,
    Rsa,
    Ec,
}

impl FromStr for KeyAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AES" => Ok(KeyAlgorithm::Aes),
            "RSA" => Ok(KeyAlgorithm::Rsa),
            "EC" => Ok(KeyAlgorithm::Ec),
            _ => Err(CryptoError::Validation(format!(
                "Invalid algorithm: {s}. Valid options: AES, RSA, EC"
            ))),
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Aes => write!(f, "AES"),
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::Ec => write!(f, "EC"),
        }
    }
}

/// AES key sizes in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesKeySize {
    Bits128,
    Bits192,
    Bits256,
}

impl AesKeySize {
    /// Validate a requested size before any key material is touched.
    pub fn from_bits(bits: u32) -> Result<Self, CryptoError> {
        match bits {
            128 => Ok(AesKeySize::Bits128),
            192 => Ok(AesKeySize::Bits192),
            256 => Ok(AesKeySize::Bits256),
            _ => Err(CryptoError::Validation(format!(
                "Invalid key size: {bits}. Valid options: 128, 192, 256"
            ))),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            AesKeySize::Bits128 => 128,
            AesKeySize::Bits192 => 192,
            AesKeySize::Bits256 => 256,
        }
    }

    pub fn byte_len(self) -> usize {
        (self.bits() / 8) as usize
    }
}

impl Default for AesKeySize {
    fn default() -> Self {
        AesKeySize::Bits256
    }
}

/// RSA modulus sizes in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaKeySize {
    Bits2048,
    Bits3072,
    Bits4096,
}

impl RsaKeySize {
    /// Validate a requested size before key-pair generation is attempted.
    /// Generation is the most expensive operation in the engine, so bad
    /// sizes must fail here.
    pub fn from_bits(bits: u32) -> Result<Self, CryptoError> {
        match bits {
            2048 => Ok(RsaKeySize::Bits2048),
            3072 => Ok(RsaKeySize::Bits3072),
            4096 => Ok(RsaKeySize::Bits4096),
            _ => Err(CryptoError::Validation(format!(
                "Invalid key size: {bits}. Valid options: 2048, 3072, 4096"
            ))),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            RsaKeySize::Bits2048 => 2048,
            RsaKeySize::Bits3072 => 3072,
            RsaKeySize::Bits4096 => 4096,
        }
    }
}

impl Default for RsaKeySize {
    fn default() -> Self {
        RsaKeySize::Bits2048
    }
}
