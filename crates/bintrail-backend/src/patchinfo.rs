//! Patch-info documents from the source store.

use serde::{Deserialize, Serialize};

/// The subset of a patch-info document bintrail consumes.
///
/// Only the packager matters here; it becomes the `maintainer` of release
/// records created while the document still exists. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Patchinfo {
    #[serde(default)]
    pub packager: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patchinfo() {
        let pi: Patchinfo =
            serde_json::from_str(r#"{"packager": "maintbot", "summary": "security update"}"#)
                .unwrap();
        assert_eq!(pi.packager.as_deref(), Some("maintbot"));

        let pi: Patchinfo = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(pi.packager, None);
    }
}
