//! # Signature Verifier
//!
//! Key resolution against a [`KeyDirectory`], then token verification.

use serde_json::Value;
use shared_crypto::P256PublicKey;
use shared_types::{owner_of, Result, SignatureFailure};
use tracing::debug;

use dl_03_state_resolver::IdentityState;

use crate::domain::keys::decode_key;
use crate::domain::token::verify_token;
use crate::ports::outbound::KeyDirectory;

pub struct SignatureVerifier<'a, D: KeyDirectory + ?Sized> {
    directory: &'a D,
}

impl<'a, D: KeyDirectory + ?Sized> SignatureVerifier<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// `publicKeyMultibase` of the identity owning `vm_ref`.
    ///
    /// Only `Valid` identities resolve: an absent, pending or revoked owner
    /// cannot sign.
    pub fn resolve_public_key(&self, vm_ref: &str) -> std::result::Result<String, SignatureFailure> {
        let owner = owner_of(vm_ref);
        let unresolvable = |reason: &str| SignatureFailure::KeyUnresolvable {
            reference: vm_ref.to_string(),
            reason: reason.to_string(),
        };

        match self.directory.identity_state(owner) {
            IdentityState::Valid => {}
            IdentityState::Absent => return Err(unresolvable("identity not found")),
            IdentityState::Pending => return Err(unresolvable("identity pending sealing")),
            IdentityState::Revoked => return Err(unresolvable("identity revoked")),
        }

        let identity = self
            .directory
            .latest_identity(owner)
            .ok_or_else(|| unresolvable("identity not found"))?;
        Ok(identity.verification_method.public_key_multibase)
    }

    /// Resolved and decoded key for `vm_ref`.
    pub fn resolve_key(&self, vm_ref: &str) -> std::result::Result<P256PublicKey, SignatureFailure> {
        let material = self.resolve_public_key(vm_ref)?;
        decode_key(&material, vm_ref)
    }

    /// Verify `token` under the key of `vm_ref` and return the signed claims.
    pub fn verify_signed_payload(&self, token: &str, vm_ref: &str) -> Result<Value> {
        let key = self.resolve_key(vm_ref)?;
        let claims = verify_token(token, &key)?;
        debug!("[dl-04] Proof by {} verified", vm_ref);
        Ok(claims)
    }
}
