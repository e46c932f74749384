
// # 🧪 Streaming context tests
//
// Pre-keyed encrypt/decrypt pairs: repeated round-trips, per-call IVs and
// keystream continuity for CTR and RC4.

mod support;

use cipher_core::config::ContextConfig;
use cipher_core::symmetric::descriptor::{AES_128_CBC, AES_128_CTR, DES_CBC, RC4};
use cipher_core::symmetric::{CipherContext, DecryptContext, EncryptContext};
use cipher_core::types::{CipherError, Direction};

const KEY: &[u8] = b"This is the key";
const IV: &[u8] = b"12345678";

// ## 1️⃣ Three round-trips through one AES-128-CBC pair

#[test]
fn aes_128_cbc_three_round_trips() {
    support::init_tracing();
    let input = support::FOX.as_bytes();

    let mut enc = EncryptContext::new(&AES_128_CBC, Some(KEY), IV, None).unwrap();
    let mut dec = DecryptContext::new(&AES_128_CBC, Some(KEY), IV, None).unwrap();
    assert_eq!(enc.direction(), Direction::Encrypt);
    assert_eq!(dec.direction(), Direction::Decrypt);

    for _ in 0..3 {
        let ct = enc.encrypt(input, input.len()).unwrap();
        assert_ne!(&ct[..], input);
        assert_eq!(ct.len() % 16, 0);
        let pt = dec.decrypt(&ct, ct.len()).unwrap();
        assert_eq!(pt, input);
    }

    assert_eq!(enc.counters().finals, 3);
    assert_eq!(dec.counters().finals, 3);
}

// ## 2️⃣ Every cipher, repeated calls

#[test]
fn every_cipher_streams_in_lockstep() {
    let input = support::FOX.as_bytes();
    for algorithm in support::real_ciphers() {
        let mut enc = EncryptContext::new(algorithm, Some(KEY), IV, None).unwrap();
        let mut dec = DecryptContext::new(algorithm, Some(KEY), IV, None).unwrap();
        for round in 0..3 {
            let ct = enc.encrypt(input, input.len()).unwrap();
            assert_ne!(&ct[..], input, "{algorithm} round {round}");
            let pt = dec.decrypt(&ct, ct.len()).unwrap();
            assert_eq!(pt, input, "{algorithm} round {round}");
        }
    }
}

#[test]
fn streaming_matches_single_shot_on_first_call() {
    let input = support::FOX.as_bytes();
    for algorithm in support::real_ciphers() {
        let mut enc = EncryptContext::new(algorithm, Some(KEY), IV, None).unwrap();
        let streamed = enc.encrypt(input, input.len()).unwrap();
        let single = CipherContext::new(algorithm).encrypt(input, Some(KEY), IV).unwrap();
        assert_eq!(streamed, single, "{algorithm}");
    }
}

// ## 3️⃣ Chaining modes restart, CTR and RC4 continue

#[test]
fn cbc_restarts_from_the_bound_iv() {
    let mut enc = EncryptContext::new(&AES_128_CBC, Some(KEY), IV, None).unwrap();
    let first = enc.encrypt(b"repeat me", 9).unwrap();
    let second = enc.encrypt(b"repeat me", 9).unwrap();
    assert_eq!(first, second);
}

#[test]
fn ctr_counter_runs_on_across_calls() {
    let p1 = b"first frame of sixteen+ bytes";
    let p2 = b"second frame, different text!";
    let mut enc = EncryptContext::new(&AES_128_CTR, Some(KEY), IV, None).unwrap();
    let mut dec = DecryptContext::new(&AES_128_CTR, Some(KEY), IV, None).unwrap();

    let c1 = enc.encrypt(p1, p1.len()).unwrap();
    let c2 = enc.encrypt(p2, p2.len()).unwrap();
    // a reused keystream would make c1 ^ c2 equal p1 ^ p2
    let cx: Vec<u8> = c1.iter().zip(&c2).map(|(a, b)| a ^ b).collect();
    let px: Vec<u8> = p1.iter().zip(p2.iter()).map(|(a, b)| a ^ b).collect();
    assert_ne!(cx, px);

    // the same plaintext twice yields two different frames
    let c3 = enc.encrypt(b"abc", 3).unwrap();
    let c4 = enc.encrypt(b"abc", 3).unwrap();
    assert_ne!(c3, c4);

    assert_eq!(dec.decrypt(&c1, c1.len()).unwrap(), p1);
    assert_eq!(dec.decrypt(&c2, c2.len()).unwrap(), p2);
    assert_eq!(dec.decrypt(&c3, 3).unwrap(), b"abc");
    assert_eq!(dec.decrypt(&c4, 3).unwrap(), b"abc");
}

#[test]
fn ctr_restarts_when_an_iv_is_given() {
    let input = support::FOX.as_bytes();
    let mut enc = EncryptContext::new(&AES_128_CTR, Some(KEY), IV, None).unwrap();
    let first = enc.encrypt(input, input.len()).unwrap();
    enc.encrypt(input, input.len()).unwrap();
    assert_eq!(enc.encrypt_with_iv(input, IV, input.len()).unwrap(), first);
}

#[test]
fn rc4_keystream_continues_across_calls() {
    let mut enc = EncryptContext::new(&RC4, Some(KEY), IV, None).unwrap();
    let mut dec = DecryptContext::new(&RC4, Some(KEY), IV, None).unwrap();

    let first = enc.encrypt(b"same plaintext", 14).unwrap();
    let second = enc.encrypt(b"same plaintext", 14).unwrap();
    assert_ne!(first, second);

    assert_eq!(dec.decrypt(&first, first.len()).unwrap(), b"same plaintext");
    assert_eq!(dec.decrypt(&second, second.len()).unwrap(), b"same plaintext");
}

// ## 4️⃣ Per-call IVs

#[test]
fn per_call_iv_overrides_and_sticks() {
    let mut enc = EncryptContext::new(&DES_CBC, Some(KEY), IV, None).unwrap();
    let mut dec = DecryptContext::new(&DES_CBC, Some(KEY), IV, None).unwrap();

    let bound = enc.encrypt(b"payload!", 8).unwrap();
    let other = enc.encrypt_with_iv(b"payload!", b"abcdefgh", 8).unwrap();
    assert_ne!(bound, other);
    // later calls keep the new IV
    assert_eq!(enc.encrypt(b"payload!", 8).unwrap(), other);

    assert_eq!(dec.decrypt_with_iv(&other, b"abcdefgh", other.len()).unwrap(), b"payload!");
}

#[test]
fn short_per_call_iv_is_zero_padded() {
    let mut enc = EncryptContext::new(&AES_128_CBC, Some(KEY), IV, None).unwrap();
    let short = enc.encrypt_with_iv(b"data", b"xy", 4).unwrap();
    let padded = enc.encrypt_with_iv(b"data", b"xy\0\0\0\0\0\0\0\0\0\0\0\0\0\0", 4).unwrap();
    assert_eq!(short, padded);
}

// ## 5️⃣ Errors

#[test]
fn count_past_input_is_rejected() {
    let mut enc = EncryptContext::new(&AES_128_CBC, Some(KEY), IV, None).unwrap();
    let err = enc.encrypt(b"abc", 4).unwrap_err();
    assert!(matches!(err, CipherError::CountOutOfRange { count: 4, len: 3 }));
}

#[test]
fn strict_construction_rejects_short_key() {
    let err = EncryptContext::with_config(&AES_128_CBC, Some(KEY), IV, None, &ContextConfig::strict())
        .unwrap_err();
    assert!(matches!(err, CipherError::InvalidKeyLen { expected: 16, actual: 15 }));
}

#[test]
fn strict_config_rejects_short_per_call_iv() {
    let key = b"sixteen byte key";
    let iv = b"sixteen byte iv!";
    let strict = ContextConfig::strict();
    let mut enc = EncryptContext::with_config(&AES_128_CBC, Some(&key[..]), iv, None, &strict).unwrap();
    let mut dec = DecryptContext::with_config(&AES_128_CBC, Some(&key[..]), iv, None, &strict).unwrap();

    let err = enc.encrypt_with_iv(b"data", b"xy", 4).unwrap_err();
    assert!(matches!(err, CipherError::InvalidIvLen { expected: 16, actual: 2 }));
    let err = dec.decrypt_with_iv(&[0u8; 16], b"xy", 16).unwrap_err();
    assert!(matches!(err, CipherError::InvalidIvLen { expected: 16, actual: 2 }));

    // exact-length IVs still pass
    let ct = enc.encrypt_with_iv(b"data", iv, 4).unwrap();
    assert_eq!(dec.decrypt_with_iv(&ct, iv, ct.len()).unwrap(), b"data");
}

#[test]
fn unpadded_stream_rejects_partial_blocks() {
    let mut enc = EncryptContext::new(&AES_128_CBC, Some(KEY), IV, Some(false)).unwrap();
    assert_eq!(enc.encrypt(&[0u8; 32], 32).unwrap().len(), 32);
    assert!(matches!(
        enc.encrypt(&[0u8; 33], 33),
        Err(CipherError::NotBlockAligned { block_size: 16, remainder: 1 })
    ));
    // recovers on the next call
    assert!(enc.encrypt(&[0u8; 16], 16).is_ok());
}
