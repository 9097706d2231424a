//! Signature engine.
//!
//! Two operation families:
//! - raw sign/verify over caller-supplied bytes, keyed by the scheme name
//!   (RSA PKCS#1 v1.5 with SHA-256/SHA-512, or ECDSA over P-256);
//! - the document protocol, which never signs the document itself. It signs
//!   a canonical payload binding the document's SHA-256 digest to the
//!   scheme, a timestamp, the signer, and caller metadata. Verification
//!   recomputes the document digest independently of checking the
//!   signature, so "document altered after signing" and "signature forged"
//!   are distinguishable outcomes.

use crate::algorithm::{HashAlgorithm, SignatureAlgorithm};
use crate::constant_time;
use crate::error::{CryptoError, CryptoResult};
use crate::hash;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use p256::ecdsa::{
    Signature as EcdsaSignature, SigningKey as EcdsaSigningKey, VerifyingKey as EcdsaVerifyingKey,
};
use rsa::{
    pkcs1v15::{Signature as RsaSignature, SigningKey as RsaSigningKey, VerifyingKey as RsaVerifyingKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    signature::{SignatureEncoding, Signer, Verifier},
    RsaPrivateKey, RsaPublicKey,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Sha256, Sha512};

/// The structure actually signed in the document protocol. Built once at
/// signing time; the serialized form must travel with the signature, since
/// verification is impossible without the exact payload bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePayload {
    pub document_hash: String,
    pub algorithm: SignatureAlgorithm,
    pub timestamp: DateTime<Utc>,
    pub signer: String,
    pub metadata: Map<String, Value>,
}

/// Result of signing a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedDocument {
    pub signature: String,
    pub signature_payload: SignaturePayload,
    pub document_hash: String,
    pub algorithm: SignatureAlgorithm,
}

/// Payload fields echoed back to the verifier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDetails {
    pub algorithm: SignatureAlgorithm,
    pub timestamp: DateTime<Utc>,
    pub signer: String,
    pub metadata: Map<String, Value>,
}

/// Verdict of document verification. `document_integrity_valid` and
/// `signature_valid` are computed independently; `is_valid` is their AND.
/// A failed verification is a business outcome, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVerification {
    pub is_valid: bool,
    pub document_integrity_valid: bool,
    pub signature_valid: bool,
    pub signature_details: SignatureDetails,
}

/// Canonical byte encoding of a JSON value: compact UTF-8 JSON with object
/// keys in lexicographic order. serde_json's default map is ordered, so
/// serialization of a `Value` is deterministic; the same logical payload
/// always canonicalizes to the same bytes on the sign and verify paths.
pub fn canonical_bytes(value: &Value) -> CryptoResult<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| CryptoError::Signing(format!("payload canonicalization failed: {e}")))
}

/// Accept a signature payload either as a JSON object or as its serialized
/// text form. Both normalize to the same `Value`, so re-serialization drift
/// cannot invalidate a legitimate signature.
pub fn normalize_payload(presented: &Value) -> CryptoResult<Value> {
    match presented {
        Value::Object(_) => Ok(presented.clone()),
        Value::String(raw) => serde_json::from_str(raw).map_err(|_| {
            CryptoError::Validation("signaturePayload is not valid JSON".to_string())
        }),
        _ => Err(CryptoError::Validation(
            "signaturePayload must be an object or its serialized form".to_string(),
        )),
    }
}

/// Sign raw bytes. Returns the signature base64-encoded.
pub fn sign(data: &[u8], private_key_pem: &str, algorithm: SignatureAlgorithm) -> CryptoResult<String> {
    let signature = match algorithm {
        SignatureAlgorithm::RsaSha256 => {
            let signing_key = RsaSigningKey::<Sha256>::new(parse_rsa_private_key(private_key_pem)?);
            signing_key
                .try_sign(data)
                .map_err(|e| CryptoError::Signing(format!("RSA signing failed: {e}")))?
                .to_vec()
        }
        SignatureAlgorithm::RsaSha512 => {
            let signing_key = RsaSigningKey::<Sha512>::new(parse_rsa_private_key(private_key_pem)?);
            signing_key
                .try_sign(data)
                .map_err(|e| CryptoError::Signing(format!("RSA signing failed: {e}")))?
                .to_vec()
        }
        SignatureAlgorithm::EcdsaSha256 => {
            let secret = p256::SecretKey::from_pkcs8_pem(private_key_pem).map_err(|_| {
                CryptoError::Signing("privateKey is not a valid PKCS#8 EC key".to_string())
            })?;
            let signing_key = EcdsaSigningKey::from(secret);
            let signature: EcdsaSignature = signing_key
                .try_sign(data)
                .map_err(|e| CryptoError::Signing(format!("ECDSA signing failed: {e}")))?;
            signature.to_vec()
        }
    };

    Ok(BASE64.encode(signature))
}

/// Verify raw bytes against a base64 signature.
///
/// Malformed signature bytes are a verification failure (`Ok(false)`), not
/// an error; an unparseable public key is a validation failure, since the
/// verifier supplied it.
pub fn verify(
    data: &[u8],
    signature_b64: &str,
    public_key_pem: &str,
    algorithm: SignatureAlgorithm,
) -> CryptoResult<bool> {
    let Ok(signature_bytes) = BASE64.decode(signature_b64) else {
        return Ok(false);
    };

    match algorithm {
        SignatureAlgorithm::RsaSha256 => {
            let verifying_key = RsaVerifyingKey::<Sha256>::new(parse_rsa_public_key(public_key_pem)?);
            let Ok(signature) = RsaSignature::try_from(signature_bytes.as_slice()) else {
                return Ok(false);
            };
            Ok(verifying_key.verify(data, &signature).is_ok())
        }
        SignatureAlgorithm::RsaSha512 => {
            let verifying_key = RsaVerifyingKey::<Sha512>::new(parse_rsa_public_key(public_key_pem)?);
            let Ok(signature) = RsaSignature::try_from(signature_bytes.as_slice()) else {
                return Ok(false);
            };
            Ok(verifying_key.verify(data, &signature).is_ok())
        }
        SignatureAlgorithm::EcdsaSha256 => {
            let public_key = p256::PublicKey::from_public_key_pem(public_key_pem).map_err(|_| {
                CryptoError::Validation("publicKey is not a valid public key PEM".to_string())
            })?;
            let verifying_key = EcdsaVerifyingKey::from(public_key);
            let Ok(signature) = EcdsaSignature::from_slice(&signature_bytes) else {
                return Ok(false);
            };
            Ok(verifying_key.verify(data, &signature).is_ok())
        }
    }
}

/// Sign a document via the canonical-payload protocol.
///
/// The document itself is never signed; its SHA-256 digest is bound into
/// the payload, and the canonical bytes of that payload are what the
/// private key signs.
pub fn sign_document(
    document: &[u8],
    private_key_pem: &str,
    algorithm: SignatureAlgorithm,
    signer: &str,
    metadata: Map<String, Value>,
) -> CryptoResult<SignedDocument> {
    let document_hash = hash::digest(document, HashAlgorithm::Sha256);

    let payload = SignaturePayload {
        document_hash: document_hash.clone(),
        algorithm,
        timestamp: Utc::now(),
        signer: signer.to_string(),
        metadata,
    };

    let payload_value = serde_json::to_value(&payload)
        .map_err(|e| CryptoError::Signing(format!("payload serialization failed: {e}")))?;
    let signed_bytes = canonical_bytes(&payload_value)?;
    let signature = sign(&signed_bytes, private_key_pem, algorithm)?;

    Ok(SignedDocument {
        signature,
        signature_payload: payload,
        document_hash,
        algorithm,
    })
}

/// Verify a document against a signature and the payload produced at
/// signing time.
///
/// Integrity and signature are judged independently: the document digest is
/// recomputed and compared (timing-safe) with the payload's bound hash,
/// while the signature is checked over the canonical bytes of the payload
/// exactly as presented.
pub fn verify_document(
    document: &[u8],
    signature_b64: &str,
    presented_payload: &Value,
    public_key_pem: &str,
) -> CryptoResult<DocumentVerification> {
    let payload_value = normalize_payload(presented_payload)?;
    let payload: SignaturePayload = serde_json::from_value(payload_value.clone()).map_err(|_| {
        CryptoError::Validation(
            "signaturePayload is missing required fields (documentHash, algorithm, timestamp, signer, metadata)"
                .to_string(),
        )
    })?;

    let actual_hash = hash::digest(document, HashAlgorithm::Sha256);
    let document_integrity_valid =
        constant_time::ct_eq_str(&actual_hash, &payload.document_hash.to_ascii_lowercase());

    let canonical = canonical_bytes(&payload_value)?;
    let signature_valid = verify(&canonical, signature_b64, public_key_pem, payload.algorithm)?;

    Ok(DocumentVerification {
        is_valid: document_integrity_valid && signature_valid,
        document_integrity_valid,
        signature_valid,
        signature_details: SignatureDetails {
            algorithm: payload.algorithm,
            timestamp: payload.timestamp,
            signer: payload.signer,
            metadata: payload.metadata,
        },
    })
}

fn parse_rsa_private_key(pem: &str) -> CryptoResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .map_err(|_| CryptoError::Signing("privateKey is not a valid PKCS#8 RSA key".to_string()))
}

fn parse_rsa_public_key(pem: &str) -> CryptoResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|_| CryptoError::Validation("publicKey is not a valid public key PEM".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::RsaKeySize;
    use crate::asymmetric;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test metadata must be an object"),
        }
    }

    #[test]
    fn test_raw_sign_verify_rsa_sha256() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let signature = sign(b"audit batch 7", &pair.private_key, SignatureAlgorithm::RsaSha256).unwrap();

        assert!(verify(b"audit batch 7", &signature, &pair.public_key, SignatureAlgorithm::RsaSha256).unwrap());
        assert!(!verify(b"audit batch 8", &signature, &pair.public_key, SignatureAlgorithm::RsaSha256).unwrap());
    }

    #[test]
    fn test_raw_sign_verify_rsa_sha512() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let signature = sign(b"payload", &pair.private_key, SignatureAlgorithm::RsaSha512).unwrap();

        assert!(verify(b"payload", &signature, &pair.public_key, SignatureAlgorithm::RsaSha512).unwrap());
        // Same bytes under the sibling scheme must not verify
        assert!(!verify(b"payload", &signature, &pair.public_key, SignatureAlgorithm::RsaSha256).unwrap());
    }

    #[test]
    fn test_raw_sign_verify_ecdsa() {
        let pair = asymmetric::generate_ec_key_pair().unwrap();
        let signature = sign(b"telemetry frame", &pair.private_key, SignatureAlgorithm::EcdsaSha256).unwrap();

        assert!(verify(b"telemetry frame", &signature, &pair.public_key, SignatureAlgorithm::EcdsaSha256).unwrap());
        assert!(!verify(b"telemetry frame 2", &signature, &pair.public_key, SignatureAlgorithm::EcdsaSha256).unwrap());
    }

    #[test]
    fn test_malformed_signature_is_false_not_error() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        assert!(!verify(b"data", "!!not-base64!!", &pair.public_key, SignatureAlgorithm::RsaSha256).unwrap());
        assert!(!verify(b"data", "c2hvcnQ=", &pair.public_key, SignatureAlgorithm::RsaSha256).unwrap());
    }

    #[test]
    fn test_sign_document_binds_sha256() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let metadata = object(json!({ "title": "Test Document" }));

        let signed = sign_document(
            b"document content",
            &pair.private_key,
            SignatureAlgorithm::RsaSha256,
            "alice",
            metadata,
        )
        .unwrap();

        assert_eq!(
            signed.signature_payload.document_hash,
            hash::digest(b"document content", HashAlgorithm::Sha256)
        );
        assert_eq!(signed.document_hash, signed.signature_payload.document_hash);
        assert_eq!(signed.signature_payload.signer, "alice");

        let payload_value = serde_json::to_value(&signed.signature_payload).unwrap();
        let verdict =
            verify_document(b"document content", &signed.signature, &payload_value, &pair.public_key).unwrap();

        assert!(verdict.is_valid);
        assert!(verdict.document_integrity_valid);
        assert!(verdict.signature_valid);
        assert_eq!(verdict.signature_details.signer, "alice");
        assert_eq!(
            verdict.signature_details.metadata.get("title"),
            Some(&json!("Test Document"))
        );
    }

    #[test]
    fn test_tampered_document_flags() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let signed = sign_document(
            b"original content",
            &pair.private_key,
            SignatureAlgorithm::RsaSha256,
            "alice",
            Map::new(),
        )
        .unwrap();

        let payload_value = serde_json::to_value(&signed.signature_payload).unwrap();
        let verdict =
            verify_document(b"altered content", &signed.signature, &payload_value, &pair.public_key).unwrap();

        // Signature still covers the untouched payload; only integrity breaks
        assert!(!verdict.document_integrity_valid);
        assert!(verdict.signature_valid);
        assert!(!verdict.is_valid);
    }

    #[test]
    fn test_tampered_signature_flags() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let signed = sign_document(
            b"original content",
            &pair.private_key,
            SignatureAlgorithm::RsaSha256,
            "alice",
            Map::new(),
        )
        .unwrap();

        let forged = sign(b"something else", &pair.private_key, SignatureAlgorithm::RsaSha256).unwrap();
        let payload_value = serde_json::to_value(&signed.signature_payload).unwrap();
        let verdict =
            verify_document(b"original content", &forged, &payload_value, &pair.public_key).unwrap();

        assert!(verdict.document_integrity_valid);
        assert!(!verdict.signature_valid);
        assert!(!verdict.is_valid);
    }

    #[test]
    fn test_reconciled_hash_still_fails_signature() {
        // An attacker who rewrites documentHash to match a tampered document
        // breaks the signature instead
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let signed = sign_document(
            b"original content",
            &pair.private_key,
            SignatureAlgorithm::RsaSha256,
            "alice",
            Map::new(),
        )
        .unwrap();

        let mut payload_value = serde_json::to_value(&signed.signature_payload).unwrap();
        payload_value["documentHash"] =
            json!(hash::digest(b"altered content", HashAlgorithm::Sha256));

        let verdict =
            verify_document(b"altered content", &signed.signature, &payload_value, &pair.public_key).unwrap();

        assert!(verdict.document_integrity_valid);
        assert!(!verdict.signature_valid);
        assert!(!verdict.is_valid);
    }

    #[test]
    fn test_payload_accepted_as_string_form() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let signed = sign_document(
            b"document content",
            &pair.private_key,
            SignatureAlgorithm::RsaSha256,
            "alice",
            object(json!({ "title": "Test Document" })),
        )
        .unwrap();

        let payload_value = serde_json::to_value(&signed.signature_payload).unwrap();
        let serialized = Value::String(serde_json::to_string(&payload_value).unwrap());

        let verdict =
            verify_document(b"document content", &signed.signature, &serialized, &pair.public_key).unwrap();
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_payload_missing_fields_is_validation() {
        let pair = asymmetric::generate_rsa_key_pair(RsaKeySize::Bits2048).unwrap();
        let err = verify_document(b"doc", "c2ln", &json!({ "signer": "alice" }), &pair.public_key)
            .unwrap_err();
        assert!(err.to_string().contains("signaturePayload"));
    }

    #[test]
    fn test_document_sign_verify_with_ecdsa() {
        let pair = asymmetric::generate_ec_key_pair().unwrap();
        let signed = sign_document(
            b"ec document",
            &pair.private_key,
            SignatureAlgorithm::EcdsaSha256,
            "bob",
            Map::new(),
        )
        .unwrap();

        let payload_value = serde_json::to_value(&signed.signature_payload).unwrap();
        let verdict =
            verify_document(b"ec document", &signed.signature, &payload_value, &pair.public_key).unwrap();
        assert!(verdict.is_valid);
        assert_eq!(verdict.signature_details.algorithm, SignatureAlgorithm::EcdsaSha256);
    }
}
