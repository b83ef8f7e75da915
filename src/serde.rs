//! Custom serde representations.

/// Serializes a [`BigUint`](num_bigint::BigUint) as a base-10 string.
///
/// The derived representation of `BigUint` is a digit-limb sequence, which is
/// useless in plan files meant for operator review.
pub mod biguint_string {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        BigUint::from_str(&raw)
            .map_err(|_| D::Error::custom(format!("invalid unsigned integer `{raw}`")))
    }
}
