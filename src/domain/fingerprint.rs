use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::error::UnhashableParameterError;

/// Bytes of the blake3 digest kept in the fingerprint
const FINGERPRINT_BYTES: usize = 16;

/// Identifies the parameter state that produced the displayed results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Fingerprint(s.to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fingerprint an ordered list of scalar parameter values.
///
/// Numbers are compared by value, so `5` and `5.0` fingerprint identically.
/// Lists and maps are rejected.
pub fn fingerprint(values: &[Value]) -> Result<Fingerprint, UnhashableParameterError> {
    let mut hasher = blake3::Hasher::new();
    for (position, value) in values.iter().enumerate() {
        encode_value(&mut hasher, position, value)?;
    }
    let digest = hasher.finalize();
    Ok(Fingerprint(hex::encode(&digest.as_bytes()[..FINGERPRINT_BYTES])))
}

fn encode_value(
    hasher: &mut blake3::Hasher,
    position: usize,
    value: &Value,
) -> Result<(), UnhashableParameterError> {
    match value {
        Value::Null => {
            hasher.update(b"n");
        }
        Value::Bool(b) => {
            hasher.update(&[b'b', *b as u8]);
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                encode_integer(hasher, i);
            } else if let Some(u) = n.as_u64() {
                hasher.update(b"u");
                hasher.update(&u.to_le_bytes());
            } else if let Some(f) = n.as_f64() {
                encode_float(hasher, f);
            }
        }
        Value::String(s) => {
            hasher.update(b"s");
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }
        Value::Array(_) => {
            return Err(UnhashableParameterError {
                position,
                kind: "list",
            })
        }
        Value::Object(_) => {
            return Err(UnhashableParameterError {
                position,
                kind: "map",
            })
        }
    }
    Ok(())
}

fn encode_integer(hasher: &mut blake3::Hasher, i: i64) {
    hasher.update(b"i");
    hasher.update(&i.to_le_bytes());
}

fn encode_float(hasher: &mut blake3::Hasher, f: f64) {
    // Integral floats collapse onto the integer encoding.
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        encode_integer(hasher, f as i64);
    } else {
        hasher.update(b"f");
        hasher.update(&f.to_bits().to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let values = [json!(0), json!(3), json!(4), json!(10.0)];
        assert_eq!(fingerprint(&values).unwrap(), fingerprint(&values).unwrap());
    }

    #[test]
    fn test_fingerprint_is_hex() {
        let fp = fingerprint(&[json!(1), json!("a")]).unwrap();
        assert_eq!(fp.as_str().len(), FINGERPRINT_BYTES * 2);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_changes_with_any_field() {
        let base = [json!(0), json!(3), json!(4), json!(10.0)];
        let base_fp = fingerprint(&base).unwrap();
        for position in 0..base.len() {
            let mut changed = base.clone();
            changed[position] = json!(99);
            assert_ne!(fingerprint(&changed).unwrap(), base_fp, "position {}", position);
        }
    }

    #[test]
    fn test_fingerprint_depends_on_order() {
        let a = fingerprint(&[json!(3), json!(4)]).unwrap();
        let b = fingerprint(&[json!(4), json!(3)]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_integral_float_matches_integer() {
        let a = fingerprint(&[json!(5)]).unwrap();
        let b = fingerprint(&[json!(5.0)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, fingerprint(&[json!(5.5)]).unwrap());
    }

    #[test]
    fn test_string_boundaries_are_unambiguous() {
        let a = fingerprint(&[json!("ab"), json!("c")]).unwrap();
        let b = fingerprint(&[json!("a"), json!("bc")]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_list_value_is_unhashable() {
        let err = fingerprint(&[json!(0), json!([1, 2])]).unwrap_err();
        assert_eq!(err, UnhashableParameterError { position: 1, kind: "list" });
    }

    #[test]
    fn test_map_value_is_unhashable() {
        let err = fingerprint(&[json!({"a": 1})]).unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.kind, "map");
    }

    #[test]
    fn test_random_distinct_tuples_do_not_collide() {
        let mut rng = rand::thread_rng();
        let mut tuples = HashSet::new();
        while tuples.len() < 1000 {
            let tuple: (u64, u32, u32, u32) = (
                rng.gen_range(0..2),
                rng.gen_range(1..=20),
                rng.gen_range(1..=200),
                rng.gen_range(10..=300),
            );
            tuples.insert(tuple);
        }

        let fingerprints: HashSet<Fingerprint> = tuples
            .iter()
            .map(|(vehicle, vehicles, clients, time)| {
                fingerprint(&[json!(vehicle), json!(vehicles), json!(clients), json!(*time as f64)])
                    .unwrap()
            })
            .collect();
        assert_eq!(fingerprints.len(), tuples.len());
    }
}
