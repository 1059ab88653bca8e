//! Deterministic form-urlencoded query codec.
//!
//! Authorization request URLs must be byte-identical across builds, and the
//! redirect query must survive peers that treat `+` as an encoded space. The
//! encoder therefore emits only percent escapes: a space lands on the wire
//! as `%20` and a literal `+` as `%2B`.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Serialize `params` as a query string with byte-wise ascending key order.
pub(crate) fn encode(params: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in params {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&escape(key));
        out.push('=');
        out.push_str(&escape(value));
    }
    out
}

/// Percent-encode one component. `byte_serialize` already escapes a literal
/// `+` as `%2B` and renders a space as `+`; rewriting that `+` to `%20`
/// leaves no bare `+` on the wire.
fn escape(component: &str) -> String {
    let serialized: String = form_urlencoded::byte_serialize(component.as_bytes()).collect();
    serialized.replace('+', "%20")
}

/// Decode a raw query string into key/value pairs: `+` means space, `%2B`
/// means a literal plus, everything else is generic percent-decoding.
pub(crate) fn decode(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn encodes_in_ascending_key_order() {
        let encoded = encode(&params(&[("b", "2"), ("a", "1"), ("c", "3")]));
        assert_eq!(encoded, "a=1&b=2&c=3");
    }

    #[test]
    fn space_becomes_percent_20() {
        let encoded = encode(&params(&[("scope", "openid profile")]));
        assert_eq!(encoded, "scope=openid%20profile");
    }

    #[test]
    fn literal_plus_becomes_percent_2b() {
        let encoded = encode(&params(&[("nonce", "nonce+nonce")]));
        assert_eq!(encoded, "nonce=nonce%2Bnonce");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let encoded = encode(&params(&[("redirect_uri", "scheme:/cb?x=1&y=2")]));
        assert_eq!(encoded, "redirect_uri=scheme%3A%2Fcb%3Fx%3D1%26y%3D2");
    }

    #[test]
    fn decode_turns_plus_into_space() {
        let pairs = decode("scope=openid+profile");
        assert_eq!(pairs, vec![("scope".into(), "openid profile".into())]);
    }

    #[test]
    fn decode_turns_percent_2b_into_plus() {
        let pairs = decode("nonce=nonce%2Bnonce");
        assert_eq!(pairs, vec![("nonce".into(), "nonce+nonce".into())]);
    }

    #[test]
    fn round_trips_values_with_plus_space_and_reserved() {
        for value in ["nonce+nonce", "a b+c", "+", " ", "a=b&c", "100%+done", "日本語+"] {
            let encoded = encode(&params(&[("v", value)]));
            let query = encoded.strip_prefix("v=").unwrap();
            let decoded = decode(&format!("v={query}"));
            assert_eq!(decoded[0].1, value, "round trip failed for {value:?}");
        }
    }

    #[test]
    fn decode_of_empty_query_is_empty() {
        assert!(decode("").is_empty());
    }
}
