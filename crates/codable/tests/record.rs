use codable::{Decode, DecodeError, KeySet, Record, from_json, record};
use serde_json::json;

fn next_id() -> u64 {
    42
}

record! {
    #[derive(Clone, Debug, PartialEq)]
    pub struct Item {
        pub id: u64,
        pub name: Option<String>,
    }
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Tally {
        pub id: u64 = next_id(),
        pub count: i64,
    }
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Legacy {
        pub code: String,
        pub level: u8,
    }

    impl codable::Decode for Legacy {
        fn decode<C>(container: &C) -> Result<Self, codable::DecodeError>
        where
            C: codable::KeyedContainer + ?Sized,
        {
            Ok(Self {
                code: container.decode::<String>("legacy_code")?,
                level: container.decode_if_present::<u8>("level")?.unwrap_or(1),
            })
        }
    }
}

record! {
    #[codable(defaults = "decode_if_present")]
    #[derive(Debug)]
    pub struct Profile {
        #[codable(rename = "displayName")]
        pub display: String,
        pub retries: u8 = 3,
        pub nickname: Option<String> = None,
        #[codable(skip)]
        pub cache: Vec<u8>,
        pub shout: String { self.display.to_uppercase() },
    }
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Wrapper<T> {
        pub inner: T,
        pub tag: Option<String>,
    }
}

record! {
    #[derive(Debug, PartialEq)]
    pub struct Counter {
        pub hits: u32,
    }

    impl Counter {
        pub fn new(hits: u32) -> Self {
            Self { hits: hits.max(1) }
        }
    }
}

record! {
    #[codable(defaults = "decode_if_present")]
    #[derive(Debug, PartialEq)]
    pub struct Limits {
        pub max: u32 = 10,
    }
}

fn keys<K: KeySet>() -> Vec<&'static str> {
    K::ALL.iter().map(|k| k.as_str()).collect()
}

//
// Scenario A
//

#[test]
fn item_keys_follow_declaration_order() {
    assert_eq!(ItemKey::ALL, &[ItemKey::Id, ItemKey::Name]);
    assert_eq!(keys::<ItemKey>(), vec!["id", "name"]);
    assert_eq!(ItemKey::from_key("name"), Some(ItemKey::Name));
    assert_eq!(ItemKey::from_key("missing"), None);
}

#[test]
fn item_decodes_required_and_optional_fields() {
    let item: Item = from_json(&json!({ "id": 7, "name": "seven" })).unwrap();

    assert_eq!(item, Item::new(7, Some("seven".to_string())));
}

#[test]
fn item_optional_field_may_be_missing_or_null() {
    let missing: Item = from_json(&json!({ "id": 7 })).unwrap();
    let null: Item = from_json(&json!({ "id": 7, "name": null })).unwrap();

    assert_eq!(missing, Item::new(7, None));
    assert_eq!(null, Item::new(7, None));
}

#[test]
fn item_required_field_must_be_present_and_valid() {
    let missing = from_json::<Item>(&json!({ "name": "seven" })).unwrap_err();
    assert!(matches!(missing, DecodeError::MissingKey { ref key } if key == "id"));

    let invalid = from_json::<Item>(&json!({ "id": "seven" })).unwrap_err();
    assert!(matches!(invalid, DecodeError::InvalidValue { ref key, .. } if key == "id"));
}

#[test]
fn decoding_requires_an_object() {
    let err = from_json::<Item>(&json!([1, 2])).unwrap_err();

    assert_eq!(err.to_string(), "expected an object, found an array");
}

//
// Scenario B
//

#[test]
fn tally_default_field_is_left_to_its_initializer() {
    assert_eq!(keys::<TallyKey>(), vec!["count"]);
    assert_eq!(Tally::new(3), Tally { id: 42, count: 3 });

    let decoded: Tally = from_json(&json!({ "id": 1, "count": 3 })).unwrap();
    assert_eq!(decoded, Tally { id: 42, count: 3 });
}

#[test]
fn tally_default_field_is_marked_excluded() {
    assert_eq!(Tally::TYPE_NAME, "Tally");
    assert_eq!(Tally::EXCLUDED, &["id"]);
    assert!(Tally::is_excluded("id"));
    assert!(!Tally::is_excluded("count"));
}

//
// Scenario C
//

#[test]
fn legacy_keeps_its_hand_written_decoder() {
    let decoded: Legacy = from_json(&json!({ "legacy_code": "x" })).unwrap();

    assert_eq!(
        decoded,
        Legacy {
            code: "x".to_string(),
            level: 1,
        }
    );
}

#[test]
fn legacy_still_gets_a_plain_constructor_and_keys() {
    assert_eq!(
        Legacy::new("x".to_string(), 2),
        Legacy {
            code: "x".to_string(),
            level: 2,
        }
    );
    assert_eq!(keys::<LegacyKey>(), vec!["code", "level"]);
}

//
// Options, markers and computed fields
//

#[test]
fn profile_uses_renamed_key() {
    assert_eq!(keys::<ProfileKey>(), vec!["displayName"]);
}

#[test]
fn profile_defaults_apply_when_keys_are_absent() {
    let profile: Profile = from_json(&json!({ "displayName": "ada" })).unwrap();

    assert_eq!(profile.display, "ada");
    assert_eq!(profile.retries, 3);
    assert_eq!(profile.nickname, None);
    assert!(profile.cache.is_empty());
    assert_eq!(profile.shout(), "ADA");
}

#[test]
fn profile_defaults_are_overridden_when_keys_are_present() {
    let profile: Profile = from_json(&json!({
        "displayName": "ada",
        "retries": 5,
        "nickname": "A",
        "cache": [1, 2, 3],
    }))
    .unwrap();

    assert_eq!(profile.retries, 5);
    assert_eq!(profile.nickname.as_deref(), Some("A"));
    assert!(profile.cache.is_empty());
}

#[test]
fn profile_constructor_takes_only_storage_fields() {
    let profile = Profile::new("grace".to_string());

    assert_eq!(profile.retries, 3);
    assert_eq!(profile.shout(), "GRACE");
}

#[test]
fn profile_markers_list_every_non_eligible_field() {
    assert_eq!(Profile::EXCLUDED, &["retries", "nickname", "cache", "shout"]);
}

#[test]
fn fully_defaulted_record_decodes_under_decode_if_present() {
    let fallback: Limits = from_json(&json!({})).unwrap();
    let present: Limits = from_json(&json!({ "max": 3 })).unwrap();

    assert_eq!(fallback, Limits { max: 10 });
    assert_eq!(present, Limits { max: 3 });
    assert_eq!(Limits::EXCLUDED, &["max"]);
}

//
// Generics and hand-written constructors
//

#[test]
fn generic_records_decode_their_parameters() {
    let wrapper: Wrapper<Vec<u8>> = from_json(&json!({ "inner": [1, 2] })).unwrap();

    assert_eq!(wrapper, Wrapper::new(vec![1, 2], None));
    assert_eq!(keys::<WrapperKey>(), vec!["inner", "tag"]);
}

#[test]
fn matching_hand_written_constructor_is_not_duplicated() {
    assert_eq!(Counter::new(0), Counter { hits: 1 });

    let map = json!({ "hits": 0 }).as_object().cloned().unwrap();
    let decoded = Counter::decode(&map).unwrap();
    assert_eq!(decoded, Counter { hits: 0 });
}
