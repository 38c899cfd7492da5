use std::fmt;

use identity::{identifier, Identifier, Uuid};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

identifier!(Username, backing: String);
identifier!(Homepage, backing: Url);
identifier!(OrderId, backing: Uuid);
identifier!(Sequence, backing: u64);
identifier!(Score, backing: f64);

fn round_trip<I: Identifier>(json: &str) -> String {
    let id: I = serde_json::from_str(json).unwrap();
    serde_json::to_string(&id).unwrap()
}

#[test]
fn string_is_encoded_bare() {
    assert_eq!(round_trip::<Username>(r#""ada""#), r#""ada""#);
    let id = Username::new("grace".to_string());
    assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("grace"));
}

#[test]
fn url_round_trips() {
    let json = r#""https://example.com/users/7?tab=posts""#;
    assert_eq!(round_trip::<Homepage>(json), json);
    let id: Homepage = serde_json::from_str(json).unwrap();
    assert_eq!(id.raw_value().host_str(), Some("example.com"));
}

#[test]
fn uuid_is_encoded_lowercase() {
    let upper = r#""67E55044-10B1-426F-9247-BB680E5FE0C8""#;
    assert_eq!(
        round_trip::<OrderId>(upper),
        r#""67e55044-10b1-426f-9247-bb680e5fe0c8""#
    );
    let lower: OrderId = serde_json::from_str(&upper.to_lowercase()).unwrap();
    let from_upper: OrderId = serde_json::from_str(upper).unwrap();
    assert_eq!(lower, from_upper);
}

#[test]
fn integers_and_floats_round_trip() {
    assert_eq!(round_trip::<Sequence>("18446744073709551615"), "18446744073709551615");
    for json in ["0.1", "3.25", "-1e-7", "1.7976931348623157e308"] {
        let id: Score = serde_json::from_str(json).unwrap();
        let back: Score = serde_json::from_str(&serde_json::to_string(&id).unwrap()).unwrap();
        assert_eq!(id, back);
        assert_eq!(id.raw_value().to_bits(), json.parse::<f64>().unwrap().to_bits());
    }
}

#[test]
fn malformed_raw_values_are_rejected() {
    assert!(serde_json::from_str::<OrderId>(r#""not-a-uuid""#).is_err());
    assert!(serde_json::from_str::<Sequence>("-1").is_err());
    assert!(serde_json::from_str::<Username>(r#"{"raw_value":"ada"}"#).is_err());
}

/// Hand-written identifier that only accepts even numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EvenId(u32);

impl Identifier for EvenId {
    type RawValue = u32;

    fn from_raw_value(raw_value: u32) -> Option<Self> {
        (raw_value % 2 == 0).then_some(EvenId(raw_value))
    }

    fn raw_value(&self) -> &u32 {
        &self.0
    }

    fn into_raw_value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EvenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for EvenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        identity::codec::serialize_raw_value(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for EvenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        identity::codec::deserialize::<Self, D>(deserializer)
    }
}

#[test]
fn rejected_raw_value_reports_the_type() {
    assert_eq!(serde_json::from_str::<EvenId>("4").unwrap(), EvenId(4));
    let e = serde_json::from_str::<EvenId>("5").unwrap_err();
    assert!(e.to_string().contains("Invalid raw value for"), "{}", e);
    assert!(e.to_string().contains("EvenId"), "{}", e);
}

#[test]
fn uuid_round_trips_through_a_binary_format() {
    let id = OrderId::new(Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap());
    let bytes = bincode::serialize(&id).unwrap();
    let back: OrderId = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, id);

    let sequence = Sequence::new(42);
    let back: Sequence = bincode::deserialize(&bincode::serialize(&sequence).unwrap()).unwrap();
    assert_eq!(back, sequence);
}
