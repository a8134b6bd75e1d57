// Path: crates/jam-crypto/src/sign/eddsa/tests/mod.rs
use super::*;

#[test]
fn sign_then_verify_succeeds() {
    let keypair = Ed25519KeyPair::generate().expect("keypair");
    let message = b"work report signable bytes";
    let signature = keypair.sign(message).expect("sign");
    assert!(verify(message, &signature, &keypair.public_key_bytes()).expect("verify"));
}

#[test]
fn verify_fails_on_tampered_message() {
    let keypair = Ed25519KeyPair::generate().expect("keypair");
    let signature = keypair.sign(b"original").expect("sign");
    assert!(!verify(b"tampered", &signature, &keypair.public_key_bytes()).expect("verify"));
}

#[test]
fn from_seed_is_deterministic() {
    let seed = [7u8; 32];
    let a = Ed25519KeyPair::from_seed(&seed).expect("keypair");
    let b = Ed25519KeyPair::from_seed(&seed).expect("keypair");
    assert_eq!(a.public_key_bytes(), b.public_key_bytes());
}
