//! Bitcoin ordinal witness.
//!
//! Inscribes a fixed-schema attestation of the entry digest through an
//! [`Inscriber`] and returns a proof enriched with the anchoring
//! metadata. The inscription is the signature analogue at this layer; the
//! proof value content-addresses the inscribed attestation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::proof::{BITCOIN_ORDINALS_2024, PROOF_TYPE, Proof};
use crate::provider::{Inscriber, Witness};
use crate::{Error, Result, canonical, hash};

const ATTESTATION_CONTEXT: &str = "https://w3id.org/cel/v1";
const ATTESTATION_TYPE: &str = "BitcoinWitnessAttestation";

// Attestation inscribed on-chain for each witnessed digest.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Attestation<'a> {
    #[serde(rename = "@context")]
    context: &'a str,
    #[serde(rename = "type")]
    type_: &'a str,
    digest_multibase: &'a str,
    witnessed_at: String,
}

/// Witness anchored by Bitcoin ordinal inscriptions.
pub struct BitcoinWitness<I> {
    inscriber: I,
    verification_method: String,
    fee_rate: Option<u64>,
    at: Option<DateTime<Utc>>,
}

impl<I: Inscriber> BitcoinWitness<I> {
    /// Create a witness around an inscriber.
    ///
    /// The verification method identifies the witness in the proofs it
    /// produces, typically a DID URL.
    #[must_use]
    pub fn new(inscriber: I, verification_method: &str) -> Self {
        Self {
            inscriber,
            verification_method: verification_method.to_string(),
            fee_rate: None,
            at: None,
        }
    }

    /// Fee rate in sats/vbyte, passed through to the inscriber.
    #[must_use]
    pub const fn fee_rate(mut self, sats_per_vbyte: u64) -> Self {
        self.fee_rate = Some(sats_per_vbyte);
        self
    }

    /// Override the `witnessedAt` timestamp. Defaults to now.
    #[must_use]
    pub const fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }
}

impl<I: Inscriber> Witness for BitcoinWitness<I> {
    async fn witness(&self, digest: &str) -> Result<Proof> {
        let witnessed_at = self.at.unwrap_or_else(Utc::now);
        let attestation = Attestation {
            context: ATTESTATION_CONTEXT,
            type_: ATTESTATION_TYPE,
            digest_multibase: digest,
            witnessed_at: witnessed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let payload = canonical::to_vec(&attestation)?;

        let inscription = match self
            .inscriber
            .inscribe_data(&payload, "application/json", self.fee_rate)
            .await
        {
            Ok(inscription) => inscription,
            Err(e) => {
                tracing::error!("inscription via {} failed: {e}", self.verification_method);
                return Err(Error::WitnessUnavailable {
                    url: self.verification_method.clone(),
                    status_code: None,
                    body: Some(e.to_string()),
                });
            }
        };

        Ok(Proof {
            type_: PROOF_TYPE.to_string(),
            cryptosuite: BITCOIN_ORDINALS_2024.to_string(),
            created: Some(witnessed_at),
            verification_method: self.verification_method.clone(),
            proof_purpose: "assertionMethod".to_string(),
            proof_value: hash::digest(&payload),
            witnessed_at: Some(witnessed_at),
            txid: Some(inscription.txid),
            inscription_id: Some(inscription.inscription_id),
            satoshi: Some(inscription.satoshi),
            block_height: inscription.block_height,
        })
    }
}
