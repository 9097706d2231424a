//! Symmetric cipher engine.
//!
//! AES-GCM for 128/192/256-bit keys with a fresh 96-bit nonce per call.
//! Ciphertext is self-contained in the versioned format
//! `v1:{nonce_b64}:{ciphertext_b64}`, so decryption needs only the token
//! and the key. Keys travel base64-encoded and are never retained past the
//! call.

use crate::algorithm::AesKeySize;
use crate::error::{CryptoError, CryptoResult};
use aes_gcm::{
    aead::{consts::U12, Aead, AeadCore, KeyInit, OsRng},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use serde::Serialize;
use zeroize::Zeroizing;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Encryption result. `algorithm` always names the key size actually used,
/// not merely the requested default.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetricCiphertext {
    pub ciphertext: String,
    pub algorithm: String,
    pub key_size_used: u32,
}

/// A freshly generated symmetric key, base64-encoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKey {
    pub key: String,
    pub key_size: u32,
}

/// Generate a random key of the requested size from the OS entropy source.
pub fn generate_key(size: AesKeySize) -> GeneratedKey {
    let mut key = Zeroizing::new(vec![0u8; size.byte_len()]);
    OsRng.fill_bytes(&mut key);
    GeneratedKey {
        key: BASE64.encode(&*key),
        key_size: size.bits(),
    }
}

/// Encrypt `plaintext` under a base64-encoded key of the given size.
///
/// A fresh random nonce is drawn per call, so encrypting the same plaintext
/// twice with the same key yields different tokens; both decrypt.
pub fn encrypt(
    plaintext: &[u8],
    key_b64: &str,
    size: AesKeySize,
) -> CryptoResult<SymmetricCiphertext> {
    let key = Zeroizing::new(
        BASE64
            .decode(key_b64)
            .map_err(|_| CryptoError::Validation("key is not valid base64".to_string()))?,
    );

    if key.len() != size.byte_len() {
        return Err(CryptoError::Validation(format!(
            "key length {} does not match AES-{}",
            key.len() * 8,
            size.bits()
        )));
    }

    let ciphertext = match size {
        AesKeySize::Bits128 => seal::<Aes128Gcm>(&key, plaintext)?,
        AesKeySize::Bits192 => seal::<Aes192Gcm>(&key, plaintext)?,
        AesKeySize::Bits256 => seal::<Aes256Gcm>(&key, plaintext)?,
    };

    Ok(SymmetricCiphertext {
        ciphertext,
        algorithm: format!("AES-{}", size.bits()),
        key_size_used: size.bits(),
    })
}

/// Decrypt a `v1:{nonce}:{ciphertext}` token.
///
/// The cipher variant is inferred from the key length. Every failure past
/// this function's boundary — wrong key, truncated token, corrupt base64,
/// tag mismatch — maps to the same generic [`CryptoError::Decryption`].
pub fn decrypt(ciphertext: &str, key_b64: &str) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let key = Zeroizing::new(
        BASE64
            .decode(key_b64)
            .map_err(|_| CryptoError::Decryption)?,
    );

    match key.len() {
        16 => open::<Aes128Gcm>(&key, ciphertext),
        24 => open::<Aes192Gcm>(&key, ciphertext),
        32 => open::<Aes256Gcm>(&key, ciphertext),
        _ => Err(CryptoError::Decryption),
    }
}

fn seal<C>(key: &[u8], plaintext: &[u8]) -> CryptoResult<String>
where
    C: Aead + KeyInit + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key).map_err(|_| CryptoError::Encryption)?;

    // 96-bit random nonce, the recommended size for GCM
    let mut nonce_bytes = [0u8; 12];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| CryptoError::Encryption)?;

    Ok(format!(
        "v1:{}:{}",
        BASE64.encode(nonce_bytes),
        BASE64.encode(&ciphertext)
    ))
}

fn open<C>(key: &[u8], token: &str) -> CryptoResult<Zeroizing<Vec<u8>>>
where
    C: Aead + KeyInit + AeadCore<NonceSize = U12>,
{
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 3 || parts[0] != "v1" {
        return Err(CryptoError::Decryption);
    }

    let nonce_bytes = BASE64.decode(parts[1]).map_err(|_| CryptoError::Decryption)?;
    if nonce_bytes.len() != 12 {
        return Err(CryptoError::Decryption);
    }

    let ciphertext = BASE64.decode(parts[2]).map_err(|_| CryptoError::Decryption)?;

    let cipher = C::new_from_slice(key).map_err(|_| CryptoError::Decryption)?;
    cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Decryption)
}
