//! Ed25519 keyring and capability fakes for integration tests.
#![allow(dead_code)]

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, TimeZone, Utc};
use credibil_cel::{
    BITCOIN_ORDINALS_2024, EDDSA_JCS_2022, Inscriber, Inscription, PROOF_TYPE, Proof, Signer,
    Witness,
};
use ed25519_dalek::{Signer as _, SigningKey};
use multibase::Base;
use rand::rngs::OsRng;

/// Fixed instant used where tests need reproducible timestamps.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("should build instant")
}

/// In-memory Ed25519 keyring implementing the signer capability.
#[derive(Clone)]
pub struct Keyring {
    did: String,
    secret_key: String,
    cryptosuite: &'static str,
}

pub fn new_keyring() -> Keyring {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_multi =
        multibase::encode(Base::Base58Btc, signing_key.verifying_key().as_bytes());
    Keyring {
        did: format!("did:key:{verifying_multi}"),
        secret_key: Base64UrlUnpadded::encode_string(signing_key.as_bytes()),
        cryptosuite: EDDSA_JCS_2022,
    }
}

impl Keyring {
    pub fn did(&self) -> String {
        self.did.clone()
    }

    /// Make the keyring produce proofs with a different cryptosuite.
    pub fn with_cryptosuite(mut self, cryptosuite: &'static str) -> Self {
        self.cryptosuite = cryptosuite;
        self
    }

    fn signing_key(&self) -> anyhow::Result<SigningKey> {
        let decoded = Base64UrlUnpadded::decode_vec(&self.secret_key)?;
        let secret: ed25519_dalek::SecretKey =
            decoded.try_into().map_err(|_| anyhow::anyhow!("invalid secret key"))?;
        Ok(SigningKey::from_bytes(&secret))
    }
}

impl Signer for Keyring {
    async fn sign(&self, input: &[u8]) -> anyhow::Result<Proof> {
        let signature = self.signing_key()?.sign(input);
        let value = multibase::encode(Base::Base58Btc, signature.to_bytes());
        Ok(Proof {
            type_: PROOF_TYPE.to_string(),
            cryptosuite: self.cryptosuite.to_string(),
            created: Some(fixed_instant()),
            verification_method: format!("{}#key-1", self.did),
            proof_purpose: "assertionMethod".to_string(),
            proof_value: value,
            ..Proof::default()
        })
    }
}

/// Signer returning a structurally incomplete proof.
pub struct BrokenSigner;

impl Signer for BrokenSigner {
    async fn sign(&self, _input: &[u8]) -> anyhow::Result<Proof> {
        Ok(Proof { type_: PROOF_TYPE.to_string(), ..Proof::default() })
    }
}

/// In-process witness countersigning digests with its own keyring.
pub struct TestWitness {
    keyring: Keyring,
}

impl TestWitness {
    pub fn new() -> Self {
        Self { keyring: new_keyring() }
    }

    pub fn did(&self) -> String {
        self.keyring.did()
    }
}

impl Witness for TestWitness {
    async fn witness(&self, digest: &str) -> credibil_cel::Result<Proof> {
        let mut proof = self.keyring.sign(digest.as_bytes()).await?;
        proof.witnessed_at = Some(fixed_instant());
        Ok(proof)
    }
}

/// Witness returning a proof without `witnessedAt`.
pub struct ForgetfulWitness {
    keyring: Keyring,
}

impl ForgetfulWitness {
    pub fn new() -> Self {
        Self { keyring: new_keyring() }
    }
}

impl Witness for ForgetfulWitness {
    async fn witness(&self, digest: &str) -> credibil_cel::Result<Proof> {
        Ok(self.keyring.sign(digest.as_bytes()).await?)
    }
}

/// Inscriber returning a fixed anchoring receipt.
pub struct TestInscriber {
    pub txid: String,
    pub inscription_id: String,
    pub satoshi: String,
    pub block_height: Option<u64>,
}

impl TestInscriber {
    pub fn new() -> Self {
        Self {
            txid: "abc123".to_string(),
            inscription_id: "abc123i0".to_string(),
            satoshi: "1234567890".to_string(),
            block_height: Some(800_000),
        }
    }
}

impl Inscriber for TestInscriber {
    async fn inscribe_data(
        &self, payload: &[u8], content_type: &str, _fee_rate: Option<u64>,
    ) -> anyhow::Result<Inscription> {
        assert_eq!(content_type, "application/json");
        assert!(!payload.is_empty());
        Ok(Inscription {
            txid: self.txid.clone(),
            inscription_id: self.inscription_id.clone(),
            satoshi: self.satoshi.clone(),
            block_height: self.block_height,
        })
    }
}

/// A witness proof with the `bitcoin-ordinals-2024` cryptosuite, as used
/// by tests that bypass the inscriber.
pub fn bitcoin_proof() -> Proof {
    Proof {
        type_: PROOF_TYPE.to_string(),
        cryptosuite: BITCOIN_ORDINALS_2024.to_string(),
        created: Some(fixed_instant()),
        verification_method: "did:btco:witness#key-1".to_string(),
        proof_purpose: "assertionMethod".to_string(),
        proof_value: "zAttestation".to_string(),
        witnessed_at: Some(fixed_instant()),
        txid: Some("abc123".to_string()),
        inscription_id: Some("abc123i0".to_string()),
        satoshi: Some("1234567890".to_string()),
        block_height: Some(800_000),
    }
}
