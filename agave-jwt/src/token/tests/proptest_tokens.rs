use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{TimeZone, Utc};
use der::{DecodePem, Encode};
use proptest::prelude::*;
use rsa::{RsaPublicKey, pkcs1v15::{Signature, VerifyingKey}, pkcs8::DecodePublicKey};
use sha2::Sha256;
use signature::Verifier;
use x509_cert::Certificate;

use crate::{
    keystore::PrivateKey,
    token::{RoleList, TokenService, compute_thumbprint},
};

const TENANT_KEY_PEM: &str = include_str!("../../../tests/fixtures/unencrypted-tenant.pem");
const TENANT_CERT_PEM: &str = include_str!("../../../tests/fixtures/tenant.crt");

static TENANT_KEY: LazyLock<PrivateKey> =
    LazyLock::new(|| PrivateKey::from_pkcs8_pem(TENANT_KEY_PEM, "").expect("fixture key"));
static TENANT_CERT: LazyLock<Certificate> =
    LazyLock::new(|| Certificate::from_pem(TENANT_CERT_PEM).expect("fixture certificate"));

fn verifying_key() -> VerifyingKey<Sha256> {
    let spki = TENANT_CERT.tbs_certificate.subject_public_key_info.to_der().unwrap();
    VerifyingKey::new(RsaPublicKey::from_public_key_der(&spki).unwrap())
}

fn verifies(signing_input: &str, signature_segment: &str) -> bool {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(signature_segment) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
        return false;
    };
    verifying_key().verify(signing_input.as_bytes(), &signature).is_ok()
}

proptest! {
    // RSA signing dominates; keep the case count low
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_issued_token_properties(
        tenant_id in "[A-Z0-9_]{1,16}",
        username in "[a-z0-9._-]{1,32}",
        timestamp in 1_000_000_000i64..4_000_000_000i64,
    ) {
        let now = Utc.timestamp_opt(timestamp, 0).unwrap();
        let token = TokenService::default()
            .issue_token_at(&tenant_id, &username, &TENANT_KEY, &TENANT_CERT, now)
            .expect("issuance failed");
        let compact = token.serialize();

        prop_assert_eq!(compact.matches('.').count(), 2);
        prop_assert!(compact.split('.').all(|s| !s.is_empty()));

        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(token.payload_segment()).unwrap()).unwrap();
        prop_assert_eq!(payload["exp"].as_i64().unwrap() - payload["iat"].as_i64().unwrap(), 240);
        let role = RoleList::new(&tenant_id, &username).to_string();
        prop_assert_eq!(payload["http://wso2.org/claims/role"].as_str(), Some(role.as_str()));

        prop_assert!(verifies(&token.signing_input(), token.signature_segment()));
    }

    #[test]
    fn test_tampered_payload_never_verifies(
        username in "[a-z]{1,12}",
        position in any::<prop::sample::Index>(),
    ) {
        let token = TokenService::default()
            .issue_token_at("TACC", &username, &TENANT_KEY, &TENANT_CERT, Utc::now())
            .expect("issuance failed");

        let mut payload: Vec<u8> = token.payload_segment().as_bytes().to_vec();
        let index = position.index(payload.len());
        payload[index] = if payload[index] == b'A' { b'B' } else { b'A' };
        let payload = String::from_utf8(payload).unwrap();

        let signing_input = format!("{}.{payload}", token.header_segment());
        prop_assert!(!verifies(&signing_input, token.signature_segment()));
    }

    #[test]
    fn test_thumbprint_is_deterministic(der in prop::collection::vec(any::<u8>(), 0..2048)) {
        let thumbprint = compute_thumbprint(&der);
        prop_assert_eq!(&thumbprint, &compute_thumbprint(&der));
        prop_assert_eq!(thumbprint.len(), 56);
    }

    #[test]
    fn test_thumbprint_changes_with_any_byte(
        der in prop::collection::vec(any::<u8>(), 1..2048),
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut tampered = der.clone();
        let index = position.index(tampered.len());
        tampered[index] ^= flip;
        prop_assert_ne!(compute_thumbprint(&der), compute_thumbprint(&tampered));
    }
}
