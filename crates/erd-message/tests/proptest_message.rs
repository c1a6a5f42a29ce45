use proptest::prelude::*;

use erd_message::{Message, UserVerifier};
use erd_primitives::{SecretKey, Signable};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signed_messages_verify_only_for_signer(
        seed in prop::array::uniform32(any::<u8>()),
        other_seed in prop::array::uniform32(any::<u8>()),
        body in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assume!(seed != other_seed);
        let key = SecretKey::from_bytes(&seed).unwrap();
        let address = key.generate_public_key().to_address();
        let other = SecretKey::from_bytes(&other_seed).unwrap().generate_public_key().to_address();

        let mut message = Message::new(body);
        let payload = message.serialize_for_signing(&address).unwrap();
        message.apply_signature(key.sign(&payload), &address);

        prop_assert!(UserVerifier::from_address(&address).verify(&message).unwrap());
        prop_assert!(!UserVerifier::from_address(&other).verify(&message).unwrap());
    }
}
