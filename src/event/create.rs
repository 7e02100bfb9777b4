//! Create operation: start a new event log.

use serde_json::Value;

use super::{RESOURCE_ADDED, WithSigner, WithoutSigner, normalize, require_jcs, validate_proof};
use crate::Result;
use crate::log::{EventEntry, EventKind, EventLog};
use crate::provider::Signer;

/// Builder for the first entry of a new event log.
pub struct CreateBuilder<S> {
    data: Value,
    signer: S,
}

impl CreateBuilder<WithoutSigner> {
    /// Start a create operation with the initial payload.
    ///
    /// Non-object payloads are wrapped as `{"value": …}` before signing.
    #[must_use]
    pub const fn new(data: Value) -> Self {
        Self { data, signer: WithoutSigner }
    }

    /// Attach the controller's signer.
    #[must_use]
    pub fn signer<S: Signer>(self, signer: &S) -> CreateBuilder<WithSigner<'_, S>> {
        CreateBuilder { data: self.data, signer: WithSigner(signer) }
    }
}

impl<S: Signer> CreateBuilder<WithSigner<'_, S>> {
    /// Build a one-event log.
    ///
    /// # Errors
    ///
    /// Will fail with `InvalidProof` if the signer returns a structurally
    /// incomplete proof, or `CryptosuiteRequired` if the proof does not
    /// use `eddsa-jcs-2022`.
    pub async fn build(self) -> Result<EventLog> {
        let entry = EventEntry {
            kind: EventKind::Create,
            data: normalize(self.data, RESOURCE_ADDED),
            previous_event: None,
            proof: Vec::new(),
        };

        let proof = self.signer.0.sign(&entry.signing_input()?).await?;
        validate_proof(&proof)?;
        require_jcs(&proof)?;

        EventLog::default().append(EventEntry { proof: vec![proof], ..entry })
    }
}
