//! Operation facade.
//!
//! The boundary external collaborators call. Requests arrive in wire shape
//! (every field optional, camelCase), so missing fields are caught here and
//! reported by name before any algorithm parsing, and algorithm membership
//! is checked before any primitive runs. The facade performs no I/O beyond
//! tracing events, never retries, and holds no state besides its config.

use crate::algorithm::{AesKeySize, CipherAlgorithm, KeyAlgorithm, RsaKeySize, SignatureAlgorithm};
use crate::config::EngineConfig;
use crate::error::{CryptoError, CryptoResult};
use crate::{asymmetric, hash, signature, symmetric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncryptRequest {
    pub text: Option<String>,
    pub algorithm: Option<String>,
    pub key_size: Option<u32>,
    pub key: Option<String>,
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptResponse {
    pub ciphertext: String,
    pub algorithm: String,
    pub key_size_used: u32,
    /// Present only when the engine generated the AES key for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecryptRequest {
    pub ciphertext: Option<String>,
    pub algorithm: Option<String>,
    pub key: Option<String>,
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    pub plaintext: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HashRequest {
    pub text: Option<String>,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashResponse {
    pub digest: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyIntegrityRequest {
    pub expected_hash: Option<String>,
    pub actual_data: Option<String>,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyIntegrityResponse {
    pub is_valid: bool,
    pub expected_hash: String,
    pub actual_hash: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateKeyRequest {
    pub algorithm: Option<String>,
    pub key_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyResponse {
    pub algorithm: String,
    pub key_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignRequest {
    pub data: Option<String>,
    pub private_key: Option<String>,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub signature: String,
    pub algorithm: String,
    pub signed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyRequest {
    pub data: Option<String>,
    pub signature: Option<String>,
    pub public_key: Option<String>,
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub is_valid: bool,
    pub algorithm: String,
    pub verified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignDocumentRequest {
    pub document: Option<String>,
    pub private_key: Option<String>,
    pub algorithm: Option<String>,
    pub signer: Option<String>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyDocumentRequest {
    pub document: Option<String>,
    pub signature: Option<String>,
    pub signature_payload: Option<Value>,
    pub public_key: Option<String>,
}

/// The engine itself. Stateless aside from configured defaults; freely
/// shareable across threads, one synchronous unit of work per call.
#[derive(Debug, Clone)]
pub struct CryptoEngine {
    config: EngineConfig,
}

impl CryptoEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn encrypt(&self, request: &EncryptRequest) -> CryptoResult<EncryptResponse> {
        let text = require(&request.text, "text")?;
        let algorithm: CipherAlgorithm = parse_required(&request.algorithm, "algorithm")?;
        debug!(operation = "encrypt", algorithm = %algorithm, "crypto operation");

        match algorithm {
            CipherAlgorithm::Aes => {
                let size = match request.key_size {
                    Some(bits) => AesKeySize::from_bits(bits)?,
                    None => self.config.default_aes_key_size,
                };
                let (key, generated_key) = match &request.key {
                    Some(key) => (key.clone(), None),
                    None => {
                        let generated = symmetric::generate_key(size);
                        (generated.key.clone(), Some(generated.key))
                    }
                };
                let result = symmetric::encrypt(text.as_bytes(), &key, size)?;
                Ok(EncryptResponse {
                    ciphertext: result.ciphertext,
                    algorithm: result.algorithm,
                    key_size_used: result.key_size_used,
                    generated_key,
                })
            }
            CipherAlgorithm::Rsa => {
                let public_key = require(&request.public_key, "publicKey")?;
                let result = asymmetric::encrypt(text.as_bytes(), public_key)?;
                Ok(EncryptResponse {
                    ciphertext: result.ciphertext,
                    algorithm: result.algorithm,
                    key_size_used: result.key_size_used,
                    generated_key: None,
                })
            }
        }
    }

    pub fn decrypt(&self, request: &DecryptRequest) -> CryptoResult<DecryptResponse> {
        let ciphertext = require(&request.ciphertext, "ciphertext")?;
        let algorithm: CipherAlgorithm = parse_required(&request.algorithm, "algorithm")?;
        debug!(operation = "decrypt", algorithm = %algorithm, "crypto operation");

        let plaintext = match algorithm {
            CipherAlgorithm::Aes => {
                let key = require(&request.key, "key")?;
                symmetric::decrypt(ciphertext, key)?
            }
            CipherAlgorithm::Rsa => {
                let private_key = require(&request.private_key, "privateKey")?;
                asymmetric::decrypt(ciphertext, private_key)?
            }
        };

        let plaintext =
            String::from_utf8(plaintext.to_vec()).map_err(|_| CryptoError::Decryption)?;
        Ok(DecryptResponse { plaintext })
    }

    pub fn hash(&self, request: &HashRequest) -> CryptoResult<HashResponse> {
        let text = require(&request.text, "text")?;
        let algorithm = parse_required(&request.algorithm, "algorithm")?;
        debug!(operation = "hash", algorithm = %algorithm, "crypto operation");

        Ok(HashResponse {
            digest: hash::digest(text.as_bytes(), algorithm),
            algorithm: algorithm.to_string(),
        })
    }

    pub fn verify_integrity(
        &self,
        request: &VerifyIntegrityRequest,
    ) -> CryptoResult<VerifyIntegrityResponse> {
        let expected_hash = require(&request.expected_hash, "expectedHash")?;
        let actual_data = require(&request.actual_data, "actualData")?;
        let algorithm = parse_required(&request.algorithm, "algorithm")?;
        debug!(operation = "verify-integrity", algorithm = %algorithm, "crypto operation");

        let result = hash::verify(actual_data.as_bytes(), expected_hash, algorithm);
        Ok(VerifyIntegrityResponse {
            is_valid: result.is_valid,
            expected_hash: result.expected,
            actual_hash: result.actual,
        })
    }

    pub fn generate_key(&self, request: &GenerateKeyRequest) -> CryptoResult<GenerateKeyResponse> {
        let algorithm: KeyAlgorithm = parse_required(&request.algorithm, "algorithm")?;
        debug!(operation = "generate-key", algorithm = %algorithm, "crypto operation");

        match algorithm {
            KeyAlgorithm::Aes => {
                let size = match request.key_size {
                    Some(bits) => AesKeySize::from_bits(bits)?,
                    None => self.config.default_aes_key_size,
                };
                let generated = symmetric::generate_key(size);
                Ok(GenerateKeyResponse {
                    algorithm: algorithm.to_string(),
                    key_size: generated.key_size,
                    key: Some(generated.key),
                    public_key: None,
                    private_key: None,
                })
            }
            KeyAlgorithm::Rsa => {
                let size = match request.key_size {
                    Some(bits) => RsaKeySize::from_bits(bits)?,
                    None => self.config.default_rsa_key_size,
                };
                let pair = asymmetric::generate_rsa_key_pair(size)?;
                Ok(GenerateKeyResponse {
                    algorithm: algorithm.to_string(),
                    key_size: size.bits(),
                    key: None,
                    public_key: Some(pair.public_key),
                    private_key: Some(pair.private_key),
                })
            }
            KeyAlgorithm::Ec => {
                if let Some(bits) = request.key_size {
                    if bits != 256 {
                        return Err(CryptoError::Validation(format!(
                            "Invalid key size: {bits}. Valid options: 256"
                        )));
                    }
                }
                let pair = asymmetric::generate_ec_key_pair()?;
                Ok(GenerateKeyResponse {
                    algorithm: algorithm.to_string(),
                    key_size: 256,
                    key: None,
                    public_key: Some(pair.public_key),
                    private_key: Some(pair.private_key),
                })
            }
        }
    }

    pub fn sign(&self, request: &SignRequest) -> CryptoResult<SignResponse> {
        let data = require(&request.data, "data")?;
        let private_key = require(&request.private_key, "privateKey")?;
        let algorithm = self.signature_algorithm(&request.algorithm)?;
        debug!(operation = "sign", algorithm = %algorithm, "crypto operation");

        let signature = signature::sign(data.as_bytes(), private_key, algorithm)?;
        Ok(SignResponse {
            signature,
            algorithm: algorithm.to_string(),
            signed_at: Utc::now(),
        })
    }

    pub fn verify(&self, request: &VerifyRequest) -> CryptoResult<VerifyResponse> {
        let data = require(&request.data, "data")?;
        let sig = require(&request.signature, "signature")?;
        let public_key = require(&request.public_key, "publicKey")?;
        let algorithm = self.signature_algorithm(&request.algorithm)?;
        debug!(operation = "verify", algorithm = %algorithm, "crypto operation");

        let is_valid = signature::verify(data.as_bytes(), sig, public_key, algorithm)?;
        Ok(VerifyResponse {
            is_valid,
            algorithm: algorithm.to_string(),
            verified_at: Utc::now(),
        })
    }

    pub fn sign_document(
        &self,
        request: &SignDocumentRequest,
    ) -> CryptoResult<signature::SignedDocument> {
        let document = require(&request.document, "document")?;
        let private_key = require(&request.private_key, "privateKey")?;
        let algorithm = self.signature_algorithm(&request.algorithm)?;
        let signer = request.signer.as_deref().unwrap_or("anonymous");
        let metadata = metadata_object(&request.metadata)?;
        debug!(operation = "sign-document", algorithm = %algorithm, "crypto operation");

        signature::sign_document(document.as_bytes(), private_key, algorithm, signer, metadata)
    }

    pub fn verify_document(
        &self,
        request: &VerifyDocumentRequest,
    ) -> CryptoResult<signature::DocumentVerification> {
        let document = require(&request.document, "document")?;
        let sig = require(&request.signature, "signature")?;
        let payload = require(&request.signature_payload, "signaturePayload")?;
        let public_key = require(&request.public_key, "publicKey")?;
        debug!(operation = "verify-document", "crypto operation");

        signature::verify_document(document.as_bytes(), sig, payload, public_key)
    }

    fn signature_algorithm(&self, requested: &Option<String>) -> CryptoResult<SignatureAlgorithm> {
        match requested {
            Some(name) => name.parse(),
            None => Ok(self.config.default_signature_algorithm),
        }
    }
}

impl Default for CryptoEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn require<'a, T>(value: &'a Option<T>, field: &str) -> CryptoResult<&'a T> {
    value.as_ref().ok_or_else(|| CryptoError::missing_field(field))
}

fn parse_required<A>(value: &Option<String>, field: &str) -> CryptoResult<A>
where
    A: FromStr<Err = CryptoError>,
{
    require(value, field)?.parse()
}

/// Metadata must be a JSON object; anything else is a validation failure.
fn metadata_object(metadata: &Option<Value>) -> CryptoResult<Map<String, Value>> {
    match metadata {
        None => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(CryptoError::Validation(
            "metadata must be an object".to_string(),
        )),
    }
}
