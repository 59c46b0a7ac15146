use serde::{Deserialize, Serialize};

use super::checklist::CheckItem;

/// The inspection payload sent to the check submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub vehicle_id: String,
    /// Non-finite readings serialize as `null`.
    pub odometer_km: f64,
    pub items: Vec<CheckItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of an accepted submission. An empty body yields the default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CheckReceipt {
    #[serde(default)]
    pub id: Option<String>,
}

/// Trims a note; blank notes become `None` so the field is omitted.
pub fn normalize_note(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::model::{CheckItemKey, CheckStatus, Checklist};

    fn make_check(note: Option<&str>) -> Check {
        let mut checklist = Checklist::new();
        checklist.set_status(CheckItemKey::Brakes, CheckStatus::Fail);
        Check {
            vehicle_id: "v1".into(),
            odometer_km: 120500.5,
            items: checklist.items().to_vec(),
            note: note.map(Into::into),
        }
    }

    mod normalize_note {
        use super::*;

        #[test]
        fn whitespace_only_is_omitted() {
            assert_eq!(normalize_note("   "), None);
        }

        #[test]
        fn empty_is_omitted() {
            assert_eq!(normalize_note(""), None);
        }

        #[test]
        fn surrounding_whitespace_is_stripped() {
            assert_eq!(normalize_note("  hi  "), Some("hi".into()));
        }

        #[test]
        fn inner_whitespace_is_kept() {
            assert_eq!(
                normalize_note("\tpads worn, replace soon\n"),
                Some("pads worn, replace soon".into())
            );
        }

        #[quickcheck]
        fn result_is_never_blank_or_padded(s: String) -> bool {
            match normalize_note(&s) {
                None => s.trim().is_empty(),
                Some(note) => !note.is_empty() && note == note.trim(),
            }
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn payload_uses_camel_case_and_includes_note() {
            let json = serde_json::to_string_pretty(&make_check(Some("pads worn"))).unwrap();
            insta::assert_snapshot!(json, @r#"
            {
              "vehicleId": "v1",
              "odometerKm": 120500.5,
              "items": [
                {
                  "key": "TYRES",
                  "status": "OK"
                },
                {
                  "key": "BRAKES",
                  "status": "FAIL"
                },
                {
                  "key": "LIGHTS",
                  "status": "OK"
                },
                {
                  "key": "OIL",
                  "status": "OK"
                },
                {
                  "key": "COOLANT",
                  "status": "OK"
                }
              ],
              "note": "pads worn"
            }
            "#);
        }

        #[test]
        fn missing_note_is_omitted_entirely() {
            let value = serde_json::to_value(make_check(None)).unwrap();
            assert!(value.get("note").is_none());
        }

        #[test]
        fn nan_odometer_is_sent_as_null() {
            let mut check = make_check(None);
            check.odometer_km = f64::NAN;
            let value = serde_json::to_value(&check).unwrap();
            assert!(value["odometerKm"].is_null());
        }
    }

    mod receipt {
        use super::*;

        #[test]
        fn deserializes_with_id() {
            let receipt: CheckReceipt = serde_json::from_str(r#"{"id":"chk-7"}"#).unwrap();
            assert_eq!(receipt.id.as_deref(), Some("chk-7"));
        }

        #[test]
        fn ignores_unknown_fields_and_missing_id() {
            let receipt: CheckReceipt = serde_json::from_str(r#"{"status":"accepted"}"#).unwrap();
            assert_eq!(receipt, CheckReceipt::default());
        }
    }
}
