use serde::{Deserialize, Serialize};

/// The artifacts the provider returns for one issued credential.
///
/// Persisted to three PEM files keyed by device name; nothing is retained
/// in memory after the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    /// Provider-assigned certificate ARN
    pub certificate_arn: String,

    /// Certificate, PEM-encoded
    pub certificate_pem: String,

    /// Public key, PEM-encoded
    pub public_key_pem: String,

    /// Private key, PEM-encoded
    pub private_key_pem: String,
}

/// Summary row from the registry's certificate listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    /// Provider-assigned certificate ARN
    pub arn: String,

    /// Provider-assigned certificate id
    pub id: String,
}

/// Summary row from the registry's policy listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySummary {
    /// Policy name
    pub name: String,

    /// Provider-assigned policy ARN
    pub arn: String,
}
