
// # 🧪 Single-shot cipher context tests
//
// Round-trips over the whole catalog, known-answer vectors, padding and
// count handling, and stream-cipher IV whitening.

mod support;

use cipher_core::config::{ContextConfig, LengthPolicy};
use cipher_core::symmetric::descriptor::{
    AES_128_CBC, AES_128_CFB, AES_128_CFB8, AES_128_CTR, AES_128_ECB, AES_128_OFB, AES_256_CBC,
    DES_CFB64, DES_CFB8, DES_EDE3_CBC, IDEA_CBC, IDEA_ECB, NULL, RC2_40_CBC, RC2_ECB, RC4,
};
use cipher_core::symmetric::{catalog, whiten_key, CipherContext};
use cipher_core::types::{CipherError, Direction};

const NIST_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const NIST_IV: &str = "000102030405060708090a0b0c0d0e0f";
const NIST_PT: &str = "6bc1bee22e409f96e93d7e117393172a";

fn h(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

// ## 1️⃣ Round-trips

#[test]
fn every_cipher_round_trips() {
    support::init_tracing();
    let key = b"This is the key";
    let iv = b"12345678";

    for &algorithm in catalog() {
        let mut ctx = CipherContext::new(algorithm);
        for len in [0usize, 1, 15, 16, 17, 140] {
            let input: Vec<u8> = (0..len as u8).collect();
            let ct = ctx.encrypt(&input, Some(key), iv).unwrap();
            let pt = ctx.decrypt(&ct, Some(key), iv).unwrap();
            assert_eq!(pt, input, "{algorithm} len {len}");
        }
    }
}

#[test]
fn ciphertext_differs_from_plaintext() {
    let input = support::FOX.as_bytes();
    for algorithm in support::real_ciphers() {
        let mut ctx = CipherContext::new(algorithm);
        let ct = ctx.encrypt(input, Some(b"0123456789abcdef"), b"iv-iv-iv").unwrap();
        assert_ne!(&ct[..], input, "{algorithm}");
    }

    let mut null = CipherContext::new(&NULL);
    assert_eq!(null.encrypt(input, None, b"").unwrap(), input);
}

#[test]
fn block_modes_pad_to_the_next_block() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    assert_eq!(ctx.encrypt(&[0u8; 15], None, b"").unwrap().len(), 16);
    assert_eq!(ctx.encrypt(&[0u8; 16], None, b"").unwrap().len(), 32);

    let mut des = CipherContext::new(&DES_EDE3_CBC);
    assert_eq!(des.encrypt(&[0u8; 140], None, b"").unwrap().len(), 144);
}

#[test]
fn missing_key_means_zero_key() {
    let mut a = CipherContext::new(&AES_256_CBC);
    let mut b = CipherContext::new(&AES_256_CBC);
    let x = a.encrypt(b"payload", None, b"").unwrap();
    let y = b.encrypt(b"payload", Some(&[0u8; 32]), &[0u8; 16]).unwrap();
    assert_eq!(x, y);
}

#[test]
fn over_long_key_is_truncated() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    let long = b"0123456789abcdef-and-some-more";
    let x = ctx.encrypt(b"payload", Some(long), b"iv").unwrap();
    let y = ctx.encrypt(b"payload", Some(&long[..16]), b"iv").unwrap();
    assert_eq!(x, y);
}

// ## 2️⃣ Known-answer vectors (FIPS-197, SP 800-38A)

#[test]
fn aes_128_ecb_fips197() {
    let mut ctx = CipherContext::new(&AES_128_ECB);
    let ct = ctx
        .encrypt_with_padding(
            &h("00112233445566778899aabbccddeeff"),
            Some(&h("000102030405060708090a0b0c0d0e0f")),
            b"",
            false,
        )
        .unwrap();
    assert_eq!(hex::encode(ct), "69c4e0d86a7b0430d8cdb78070b4c55a");
}

#[test]
fn aes_128_cbc_sp800_38a() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    let ct = ctx
        .encrypt_with_padding(&h(NIST_PT), Some(&h(NIST_KEY)), &h(NIST_IV), false)
        .unwrap();
    assert_eq!(hex::encode(&ct), "7649abac8119b246cee98e9b12e9197d");

    let pt = ctx.decrypt_with_padding(&ct, Some(&h(NIST_KEY)), &h(NIST_IV), false).unwrap();
    assert_eq!(hex::encode(pt), NIST_PT);
}

#[test]
fn aes_128_cfb_ofb_ctr_sp800_38a() {
    let key = h(NIST_KEY);
    let pt = h(NIST_PT);

    let cfb = CipherContext::new(&AES_128_CFB).encrypt(&pt, Some(&key), &h(NIST_IV)).unwrap();
    assert_eq!(hex::encode(cfb), "3b3fd92eb72dad20333449f8e83cfb4a");

    let ofb = CipherContext::new(&AES_128_OFB).encrypt(&pt, Some(&key), &h(NIST_IV)).unwrap();
    assert_eq!(hex::encode(ofb), "3b3fd92eb72dad20333449f8e83cfb4a");

    let ctr_iv = h("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let ctr = CipherContext::new(&AES_128_CTR).encrypt(&pt, Some(&key), &ctr_iv).unwrap();
    assert_eq!(hex::encode(ctr), "874d6191b620e3261bef6864990db6ce");
}

#[test]
fn aes_128_cfb8_sp800_38a() {
    let mut ctx = CipherContext::new(&AES_128_CFB8);
    let ct = ctx
        .encrypt(&h("6bc1bee22e409f96e93d7e117393172aae2d"), Some(&h(NIST_KEY)), &h(NIST_IV))
        .unwrap();
    assert_eq!(hex::encode(ct), "3b79424c9c0dd436bace9e0ed4586a4f32b9");
}

#[test]
fn idea_ecb_known_answer() {
    let mut ctx = CipherContext::new(&IDEA_ECB);
    let key = h("00010002000300040005000600070008");
    let ct = ctx.encrypt_with_padding(&h("0000000100020003"), Some(&key), b"", false).unwrap();
    assert_eq!(hex::encode(&ct), "11fbed2b01986de5");
    let pt = ctx.decrypt_with_padding(&ct, Some(&key), b"", false).unwrap();
    assert_eq!(hex::encode(pt), "0000000100020003");
}

#[test]
fn rc2_ecb_rfc2268() {
    let mut ctx = CipherContext::new(&RC2_ECB);
    let key = h("88bca90e90875a7f0f79c384627bafb2");
    let ct = ctx.encrypt_with_padding(&[0u8; 8], Some(&key), b"", false).unwrap();
    assert_eq!(hex::encode(ct), "2269552ab0f85ca6");
}

#[test]
fn des_cfb8_feeds_back_one_byte() {
    let input = support::FOX.as_bytes();
    let key = b"8bytekey";
    let iv = b"initvect";
    let cfb8 = CipherContext::new(&DES_CFB8).encrypt(input, Some(&key[..]), iv).unwrap();
    let cfb64 = CipherContext::new(&DES_CFB64).encrypt(input, Some(&key[..]), iv).unwrap();
    assert_eq!(cfb8.len(), input.len());
    // both start from E(iv); the shift register diverges after one byte
    assert_eq!(cfb8[0], cfb64[0]);
    assert_ne!(&cfb8[1..], &cfb64[1..]);

    let back = CipherContext::new(&DES_CFB8).decrypt(&cfb8, Some(&key[..]), iv).unwrap();
    assert_eq!(back, input);
}

#[test]
fn short_key_ciphers_round_trip() {
    let input = support::FOX.as_bytes();
    let key = b"forty";
    let mut rc2 = CipherContext::new(&RC2_40_CBC);
    let ct = rc2.encrypt(input, Some(&key[..]), b"12345678").unwrap();
    assert_eq!(rc2.decrypt(&ct, Some(&key[..]), b"12345678").unwrap(), input);

    let mut idea = CipherContext::new(&IDEA_CBC);
    let ct = idea.encrypt(input, Some(b"sixteen byte key".as_slice()), b"12345678").unwrap();
    assert_eq!(ct.len() % 8, 0);
    assert_eq!(idea.decrypt(&ct, Some(b"sixteen byte key".as_slice()), b"12345678").unwrap(), input);
}

// ## 3️⃣ Padding and count handling

#[test]
fn unpadded_misaligned_input_fails() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    let err = ctx.encrypt_with_padding(&[0u8; 21], None, b"", false).unwrap_err();
    assert!(matches!(err, CipherError::NotBlockAligned { block_size: 16, remainder: 5 }));
}

#[test]
fn truncated_ciphertext_fails_to_finalize() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    let ct = ctx.encrypt(b"sixteen byte msg", Some(b"k"), b"iv").unwrap();
    let err = ctx.decrypt(&ct[..ct.len() - 1], Some(b"k"), b"iv").unwrap_err();
    assert!(matches!(err, CipherError::WrongFinalBlockLen { block_size: 16, actual: 15 }));

    // the context stays usable after a failed call
    assert_eq!(ctx.decrypt(&ct, Some(b"k"), b"iv").unwrap(), b"sixteen byte msg");
    assert_eq!(ctx.counters().failures, 1);
}

#[test]
fn wrong_key_never_yields_the_plaintext() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    let ct = ctx.encrypt(support::FOX.as_bytes(), Some(b"right"), b"").unwrap();
    match ctx.decrypt(&ct, Some(b"wrong"), b"") {
        Ok(pt) => assert_ne!(pt, support::FOX.as_bytes()),
        Err(err) => assert!(matches!(err, CipherError::BadDecrypt)),
    }
}

#[test]
fn count_limits_the_processed_prefix() {
    let mut ctx = CipherContext::new(&RC4);
    let input = b"0123456789";
    let prefix = ctx.crypt(input, 4, Some(b"k"), b"", Direction::Encrypt, None).unwrap();
    let whole = ctx.crypt(&input[..4], 4, Some(b"k"), b"", Direction::Encrypt, None).unwrap();
    assert_eq!(prefix, whole);

    let err = ctx.crypt(input, 11, Some(b"k"), b"", Direction::Encrypt, None).unwrap_err();
    assert!(matches!(err, CipherError::CountOutOfRange { count: 11, len: 10 }));
}

#[test]
fn config_padding_is_the_fallback() {
    let config = ContextConfig::new(None, None, Some(false));
    let mut ctx = CipherContext::with_config(&AES_128_CBC, config);
    assert_eq!(ctx.encrypt(&[0u8; 32], None, b"").unwrap().len(), 32);
    // explicit argument wins
    assert_eq!(ctx.encrypt_with_padding(&[0u8; 32], None, b"", true).unwrap().len(), 48);
}

#[test]
fn strict_config_rejects_short_key_and_iv() {
    let mut ctx = CipherContext::with_config(&AES_128_CBC, ContextConfig::strict());
    let err = ctx.encrypt(b"x", Some(b"short"), &[0u8; 16]).unwrap_err();
    assert!(matches!(err, CipherError::InvalidKeyLen { expected: 16, actual: 5 }));

    let config = ContextConfig::new(None, Some(LengthPolicy::Strict), None);
    let mut ctx = CipherContext::with_config(&AES_128_CBC, config);
    let err = ctx.encrypt(b"x", Some(b"short"), b"1234").unwrap_err();
    assert!(matches!(err, CipherError::InvalidIvLen { expected: 16, actual: 4 }));

    assert!(ctx.encrypt(b"x", Some(b"short"), &[0u8; 16]).is_ok());
}

// ## 4️⃣ IV handling: whitening for stream ciphers only

#[test]
fn stream_cipher_folds_iv_into_key() {
    let key = *b"0123456789abcdef";
    let iv = b"12345678";
    let mut whitened = key;
    whiten_key(&mut whitened, iv);

    let mut ctx = CipherContext::new(&RC4);
    let with_iv = ctx.encrypt(support::FOX.as_bytes(), Some(&key), iv).unwrap();
    let pre_whitened = ctx.encrypt(support::FOX.as_bytes(), Some(&whitened), b"").unwrap();
    assert_eq!(with_iv, pre_whitened);

    let other_iv = ctx.encrypt(support::FOX.as_bytes(), Some(&key), b"87654321").unwrap();
    assert_ne!(with_iv, other_iv);
}

#[test]
fn stream_cipher_is_deterministic_across_contexts() {
    let mut a = CipherContext::new(&RC4);
    let mut b = CipherContext::new(&RC4);
    let x = a.encrypt(b"same input", Some(b"key"), b"iv").unwrap();
    let y = b.encrypt(b"same input", Some(b"key"), b"iv").unwrap();
    assert_eq!(x, y);
    // each crypt call starts a fresh keystream
    assert_eq!(a.encrypt(b"same input", Some(b"key"), b"iv").unwrap(), x);
}

#[test]
fn ecb_ignores_the_iv() {
    let mut ctx = CipherContext::new(&AES_128_ECB);
    let x = ctx.encrypt(b"payload", Some(b"key"), b"one IV").unwrap();
    let y = ctx.encrypt(b"payload", Some(b"key"), b"another IV").unwrap();
    assert_eq!(x, y);
}

#[test]
fn cbc_uses_the_iv() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    let x = ctx.encrypt(b"payload", Some(b"key"), b"one IV").unwrap();
    let y = ctx.encrypt(b"payload", Some(b"key"), b"another IV").unwrap();
    assert_ne!(x, y);
}

// ## 5️⃣ Telemetry

#[test]
fn counters_track_calls_and_bytes() {
    let mut ctx = CipherContext::new(&AES_128_CBC);
    ctx.encrypt(&[0u8; 20], None, b"").unwrap();
    let c = ctx.counters();
    assert_eq!(c.updates, 1);
    assert_eq!(c.finals, 1);
    assert_eq!(c.bytes_in, 20);
    assert_eq!(c.bytes_out, 32);
    assert!(ctx.snapshot().sanity_check());
}
