//! Banner payloads that arrive either as a slot object or as a flat list.
//!
//! Nothing in the payload says which shape it is; the shape depends on the
//! endpoint, but one type is shared by all banner endpoints. Resolution is by
//! trial, in a fixed order:
//!
//! 1. a JSON object carrying at least one known slot → [`BannerResult::Slots`]
//! 2. a JSON array of banner entries → [`BannerResult::List`]
//! 3. anything else → [`BannerError::TypeMismatch`]
//!
//! Callers must not depend on which branch wins for a value that would parse
//! both ways.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::BannerAd;

/// Named banner slots of the object shape.
///
/// An object whose known slots are all absent or `null` has no slot present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerSlots {
    #[serde(rename = "CategoryCenterAD", skip_serializing_if = "Option::is_none")]
    pub category_center: Option<Vec<BannerAd>>,
    #[serde(rename = "AD1", skip_serializing_if = "Option::is_none")]
    pub ad1: Option<Vec<BannerAd>>,
    #[serde(rename = "AD2", skip_serializing_if = "Option::is_none")]
    pub ad2: Option<Vec<BannerAd>>,
    #[serde(rename = "AD3", skip_serializing_if = "Option::is_none")]
    pub ad3: Option<Vec<BannerAd>>,
    #[serde(rename = "AD4", skip_serializing_if = "Option::is_none")]
    pub ad4: Option<Vec<BannerAd>>,
}

impl BannerSlots {
    /// True when no slot is present at all.
    pub fn is_empty(&self) -> bool {
        self.category_center.is_none()
            && self.ad1.is_none()
            && self.ad2.is_none()
            && self.ad3.is_none()
            && self.ad4.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BannerError {
    #[error("malformed banner payload: {0}")]
    Malformed(String),

    #[error("expected banner slots or banner list (as slots: {slots}; as list: {list})")]
    TypeMismatch { slots: String, list: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BannerResult {
    Slots(BannerSlots),
    List(Vec<BannerAd>),
}

impl BannerResult {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BannerError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| BannerError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, BannerError> {
        let slots = match decode_slots(&value) {
            Ok(slots) => return Ok(BannerResult::Slots(slots)),
            Err(reason) => reason,
        };
        match serde_json::from_value::<Vec<BannerAd>>(value) {
            Ok(list) => Ok(BannerResult::List(list)),
            Err(e) => Err(BannerError::TypeMismatch {
                slots,
                list: e.to_string(),
            }),
        }
    }

    /// Every banner in slot order (category center, AD1..AD4) or list order.
    pub fn banners(&self) -> Vec<&BannerAd> {
        match self {
            BannerResult::Slots(slots) => [
                &slots.category_center,
                &slots.ad1,
                &slots.ad2,
                &slots.ad3,
                &slots.ad4,
            ]
            .into_iter()
            .flatten()
            .flatten()
            .collect(),
            BannerResult::List(list) => list.iter().collect(),
        }
    }
}

fn decode_slots(value: &Value) -> Result<BannerSlots, String> {
    if !value.is_object() {
        return Err("not an object".to_string());
    }
    let slots = BannerSlots::deserialize(value).map_err(|e| e.to_string())?;
    if slots.is_empty() {
        return Err("no banner slot present".to_string());
    }
    Ok(slots)
}

impl<'de> Deserialize<'de> for BannerResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        BannerResult::from_value(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_object_decodes_as_slots() {
        let json = br#"{"AD1":[{"name":"a"}],"AD2":[{"name":"b"},{"name":"c"}]}"#;
        let BannerResult::Slots(slots) = BannerResult::from_slice(json).unwrap() else {
            panic!("expected slots");
        };
        assert_eq!(slots.ad1.as_ref().map(Vec::len), Some(1));
        assert_eq!(slots.ad2.as_ref().map(Vec::len), Some(2));
        assert!(slots.ad3.is_none());
        assert!(slots.category_center.is_none());
    }

    #[test]
    fn bare_array_decodes_as_list() {
        let json = br#"[{"name":"a","sort":1},{"name":"b","sort":2}]"#;
        let BannerResult::List(list) = BannerResult::from_slice(json).unwrap() else {
            panic!("expected list");
        };
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].sort, Some(2));
    }

    #[test]
    fn empty_array_is_an_empty_list() {
        assert_eq!(
            BannerResult::from_slice(b"[]").unwrap(),
            BannerResult::List(Vec::new())
        );
    }

    #[test]
    fn object_without_slots_is_type_mismatch() {
        let bodies: [&[u8]; 4] = [
            br#"{"foo":[]}"#,
            b"{}",
            br#"{"AD1":null}"#,
            br#"{"CategoryCenterAD":null,"AD4":null}"#,
        ];
        for json in bodies {
            let err = BannerResult::from_slice(json).unwrap_err();
            assert!(matches!(err, BannerError::TypeMismatch { .. }), "{err:?}");
        }
    }

    #[test]
    fn wrongly_typed_slot_is_type_mismatch() {
        let err = BannerResult::from_slice(br#"{"AD1":"not a list"}"#).unwrap_err();
        assert!(matches!(err, BannerError::TypeMismatch { .. }), "{err:?}");

        let err = BannerResult::from_slice(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, BannerError::TypeMismatch { .. }), "{err:?}");
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = BannerResult::from_slice(b"{").unwrap_err();
        assert!(matches!(err, BannerError::Malformed(_)));
    }

    #[test]
    fn deserialize_impl_uses_same_policy() {
        let result: BannerResult =
            serde_json::from_str(r#"{"CategoryCenterAD":[{"name":"c"}]}"#).unwrap();
        assert!(matches!(result, BannerResult::Slots(_)));

        let err = serde_json::from_str::<BannerResult>(r#""text""#).unwrap_err();
        assert!(err.to_string().contains("expected banner slots or banner list"));
    }

    #[test]
    fn banners_flattens_slots_in_order() {
        let json = br#"{"AD2":[{"name":"second"}],"CategoryCenterAD":[{"name":"first"}]}"#;
        let result = BannerResult::from_slice(json).unwrap();
        let names: Vec<_> = result
            .banners()
            .into_iter()
            .filter_map(|banner| banner.name.as_deref())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn mismatch_inside_envelope_is_decoding_failure() {
        let body = br#"{"code":200,"data":"not a banner"}"#;
        let err = crate::envelope::decode::<BannerResult>(body).unwrap_err();
        assert!(matches!(err, crate::error::ApiError::DecodingFailed(_)), "{err:?}");
    }
}
