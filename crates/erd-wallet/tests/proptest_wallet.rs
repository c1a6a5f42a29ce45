use proptest::prelude::*;

use erd_primitives::SecretKey;
use erd_wallet::keystore::{EncryptedKeystore, Randomness};
use erd_wallet::WalletError;

proptest! {
    // Each case runs scrypt twice; keep the case count small.
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn keystore_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        password in "[ -~]{0,24}",
        salt in prop::array::uniform32(any::<u8>()),
        iv in prop::array::uniform16(any::<u8>()),
    ) {
        let key = SecretKey::from_bytes(&seed).unwrap();
        let randomness = Randomness { salt, iv, id: "b2f3c4d5-0000-4000-8000-000000000000".to_string() };

        let keystore = EncryptedKeystore::encrypt(&key, &password, Some(randomness.clone())).unwrap();
        let json = keystore.to_json().unwrap();
        let parsed = EncryptedKeystore::from_json(&json).unwrap();
        prop_assert_eq!(parsed.decrypt(&password).unwrap(), key.clone());

        let again = EncryptedKeystore::encrypt(&key, &password, Some(randomness)).unwrap();
        prop_assert_eq!(again.to_json().unwrap(), json);

        let wrong = format!("{password}!");
        prop_assert!(matches!(parsed.decrypt(&wrong), Err(WalletError::MacMismatch)));
    }
}
