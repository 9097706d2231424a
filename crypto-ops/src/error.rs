use thiserror::Error;

/// Error taxonomy surfaced across the operation boundary.
///
/// `Decryption` and `Encryption` carry no detail on purpose: a caller (or an
/// attacker relaying through one) must not be able to distinguish a wrong key
/// from corrupt padding or a truncated message.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Decryption failed")]
    Decryption,

    #[error("Encryption failed")]
    Encryption,

    #[error("Key generation failed: {0}")]
    Generation(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

impl CryptoError {
    /// Validation error for a missing required field, naming the field.
    pub fn missing_field(name: &str) -> Self {
        CryptoError::Validation(format!("{name} is required"))
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_the_field() {
        let err = CryptoError::missing_field("publicKey");
        assert_eq!(err.to_string(), "Validation failed: publicKey is required");
    }

    #[test]
    fn test_decryption_error_is_generic() {
        assert_eq!(CryptoError::Decryption.to_string(), "Decryption failed");
    }
}
