//! Asymmetric cipher engine.
//!
//! RSA-OAEP (SHA-256) encryption with PEM-encoded keys, plus key-pair
//! generation for RSA (2048/3072/4096) and P-256. Private keys are PKCS#8
//! PEM, public keys SPKI PEM. Key sizes are validated before generation is
//! attempted; generation is the most expensive operation in the engine and
//! an invalid request must not reach it.

use crate::algorithm::RsaKeySize;
use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::rngs::OsRng;
use rsa::{
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding},
    traits::PublicKeyParts,
    Oaep, RsaPrivateKey, RsaPublicKey,
};
use serde::Serialize;
use sha2::Sha256;
use zeroize::Zeroizing;

/// A PEM-encoded key pair. Ownership transfers to the caller; the engine
/// retains nothing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// RSA encryption result. `algorithm` encodes the modulus size of the key
/// actually used.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsymmetricCiphertext {
    pub ciphertext: String,
    pub algorithm: String,
    pub key_size_used: u32,
}

/// Generate an RSA key pair of the requested modulus size.
pub fn generate_rsa_key_pair(size: RsaKeySize) -> CryptoResult<KeyPair> {
    let mut rng = OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, size.bits() as usize)
        .map_err(|e| CryptoError::Generation(format!("RSA key generation failed: {e}")))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| CryptoError::Generation(format!("private key encoding failed: {e}")))?;
    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::Generation(format!("public key encoding failed: {e}")))?;

    Ok(KeyPair {
        public_key: public_pem,
        private_key: private_pem.to_string(),
    })
}

/// Generate a P-256 key pair for ECDSA signing.
pub fn generate_ec_key_pair() -> CryptoResult<KeyPair> {
    let secret = p256::SecretKey::random(&mut OsRng);

    let private_pem = secret
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| CryptoError::Generation(format!("private key encoding failed: {e}")))?;
    let public_pem = secret
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::Generation(format!("public key encoding failed: {e}")))?;

    Ok(KeyPair {
        public_key: public_pem,
        private_key: private_pem.to_string(),
    })
}

/// Encrypt `plaintext` under an SPKI PEM public key with RSA-OAEP(SHA-256).
///
/// OAEP bounds the payload by the modulus size; oversized payloads fail as
/// [`CryptoError::Encryption`]. Larger payloads belong to the symmetric
/// engine, with RSA reserved for key transport.
pub fn encrypt(plaintext: &[u8], public_key_pem: &str) -> CryptoResult<AsymmetricCiphertext> {
    let public_key = RsaPublicKey::from_public_key_pem(public_key_pem)
        .map_err(|_| CryptoError::Validation("publicKey is not a valid public key PEM".to_string()))?;

    let key_size_used = (public_key.size() * 8) as u32;

    let mut rng = OsRng;
    let ciphertext = public_key
        .encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext)
        .map_err(|_| CryptoError::Encryption)?;

    Ok(AsymmetricCiphertext {
        ciphertext: BASE64.encode(ciphertext),
        algorithm: format!("RSA-{key_size_used}"),
        key_size_used,
    })
}

/// Decrypt a base64 RSA-OAEP ciphertext with a PKCS#8 PEM private key.
///
/// All failures — unparseable key, bad base64, key mismatch, corrupt
/// input — collapse into the generic [`CryptoError::Decryption`].
pub fn decrypt(ciphertext_b64: &str, private_key_pem: &str) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let private_key =
        RsaPrivateKey::from_pkcs8_pem(private_key_pem).map_err(|_| CryptoError::Decryption)?;

    let ciphertext = BASE64
        .decode(ciphertext_b64)
        .map_err(|_| CryptoError::Decryption)?;

    private_key
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Decryption)
}
