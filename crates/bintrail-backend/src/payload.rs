//! Wire-format descriptors from "binaries published" notification payloads.
//!
//! A payload is an ordered JSON array of descriptors, one per published
//! binary. The format is lenient by design: any field may be absent or
//! null, and the build time may arrive as a number or a numeric string.
//! Coercion happens once here, so the rest of the engine operates on a
//! strongly-typed struct.

use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};

fn empty_is_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

/// Deserializes an epoch-seconds build time.
///
/// Accepts a positive integer, a numeric string, or null. A zero, negative,
/// or unparseable value degrades to `None` rather than failing the payload.
fn lenient_epoch<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EpochVisitor;

    impl<'de> Visitor<'de> for EpochVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an epoch timestamp as integer, string, or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok((v > 0).then(|| v as i64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok((v > 0).then_some(v))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok((v > 0.0).then(|| v as i64))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.parse::<i64>().ok().filter(|&n| n > 0))
        }
    }

    deserializer.deserialize_any(EpochVisitor)
}

/// One binary artifact descriptor as carried by a notification payload.
///
/// The identity fields (`name` through `medium`) locate the artifact slot
/// in a repository; the remaining fields describe its content and optional
/// cross references. Wire names follow the payload format.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BinaryDescriptor {
    #[serde(default, deserialize_with = "empty_is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub version: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub release: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub epoch: Option<String>,

    #[serde(default, rename = "binaryarch", deserialize_with = "empty_is_none")]
    pub arch: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub medium: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub disturl: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub supportstatus: Option<String>,

    #[serde(default, deserialize_with = "lenient_epoch")]
    pub buildtime: Option<i64>,

    #[serde(default, rename = "updateinfoid", deserialize_with = "empty_is_none")]
    pub updateinfo_id: Option<String>,

    #[serde(default, rename = "updateinfoversion", deserialize_with = "empty_is_none")]
    pub updateinfo_version: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub project: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub package: Option<String>,

    #[serde(default, rename = "patchinforef", deserialize_with = "empty_is_none")]
    pub patchinfo_ref: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_descriptor() {
        let json = r#"{
            "name": "curl",
            "version": "8.5.0",
            "release": "1.2",
            "epoch": "0",
            "binaryarch": "x86_64",
            "medium": "dvd5",
            "disturl": "obs://build/openSUSE/curl",
            "supportstatus": "l3",
            "buildtime": 1714650000,
            "updateinfoid": "SUSE-2026-1",
            "updateinfoversion": "1",
            "project": "openSUSE",
            "package": "curl",
            "patchinforef": "openSUSE/patchinfo.1"
        }"#;

        let desc: BinaryDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.name.as_deref(), Some("curl"));
        assert_eq!(desc.arch.as_deref(), Some("x86_64"));
        assert_eq!(desc.buildtime, Some(1714650000));
        assert_eq!(desc.updateinfo_id.as_deref(), Some("SUSE-2026-1"));
        assert_eq!(desc.patchinfo_ref.as_deref(), Some("openSUSE/patchinfo.1"));
    }

    #[test]
    fn test_sparse_descriptor() {
        let desc: BinaryDescriptor = serde_json::from_str(r#"{"name": "foo"}"#).unwrap();
        assert_eq!(desc.name.as_deref(), Some("foo"));
        assert_eq!(desc.version, None);
        assert_eq!(desc.buildtime, None);
        assert_eq!(desc.medium, None);
    }

    #[test]
    fn test_empty_strings_become_none() {
        let desc: BinaryDescriptor =
            serde_json::from_str(r#"{"name": "", "version": "", "medium": ""}"#).unwrap();
        assert_eq!(desc.name, None);
        assert_eq!(desc.version, None);
        assert_eq!(desc.medium, None);
    }

    #[test]
    fn test_buildtime_coercion() {
        let cases = [
            (r#"{"buildtime": 1000}"#, Some(1000)),
            (r#"{"buildtime": "1000"}"#, Some(1000)),
            (r#"{"buildtime": 0}"#, None),
            (r#"{"buildtime": "0"}"#, None),
            (r#"{"buildtime": -5}"#, None),
            (r#"{"buildtime": "garbage"}"#, None),
            (r#"{"buildtime": null}"#, None),
            (r#"{}"#, None),
        ];

        for (json, expected) in cases {
            let desc: BinaryDescriptor = serde_json::from_str(json).unwrap();
            assert_eq!(desc.buildtime, expected, "for {json}");
        }
    }

    #[test]
    fn test_payload_is_ordered() {
        let json = r#"[{"name": "b"}, {"name": "a"}, {"name": "c"}]"#;
        let payload: Vec<BinaryDescriptor> = serde_json::from_str(json).unwrap();
        let names: Vec<_> = payload.iter().map(|d| d.name.as_deref().unwrap()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
