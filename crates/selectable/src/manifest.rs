use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SelectableError};
use crate::namespace::{Candidate, Member, Namespace};
use crate::selector::Selector;

#[derive(Debug, Deserialize)]
struct NamespaceManifest {
    name: String,
    #[serde(default)]
    members: Vec<MemberManifest>,
}

#[derive(Debug, Deserialize)]
struct MemberManifest {
    name: String,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    selectable_for: Option<Value>,
}

/// Candidate described by a namespace manifest rather than a Rust type.
///
/// The declaration is kept as raw JSON and only read when the registry
/// indexes the namespace, so a malformed one fails there.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestCandidate {
    name: String,
    selectable_for: Option<Value>,
}

impl ManifestCandidate {
    pub fn new(name: impl Into<String>, selectable_for: Option<Value>) -> Self {
        Self {
            name: name.into(),
            selectable_for,
        }
    }
}

impl Candidate for ManifestCandidate {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn selectable_for(&self) -> Option<Selector> {
        self.selectable_for.clone().map(Selector::from)
    }
}

impl Namespace {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let manifest: NamespaceManifest = serde_json::from_str(raw)?;
        Self::from_manifest(manifest)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    fn from_manifest(manifest: NamespaceManifest) -> Result<Self> {
        let mut namespace = Namespace::new(manifest.name);
        for member in manifest.members {
            if member.name.trim().is_empty() {
                return Err(SelectableError::Manifest(format!(
                    "member without a name in {}",
                    namespace.name()
                )));
            }
            let entry = match (member.value, member.selectable_for) {
                (Some(_), Some(_)) => {
                    return Err(SelectableError::Manifest(format!(
                        "{} cannot be both a constant and a selectable type",
                        namespace.qualify(&member.name)
                    )));
                }
                (Some(value), None) => Member::Constant(value),
                (None, declared) => {
                    Member::Type(Arc::new(ManifestCandidate::new(member.name.clone(), declared)))
                }
            };
            namespace.insert(member.name, entry);
        }
        Ok(namespace)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::selector::TypeToken;

    #[test]
    fn loads_types_and_constants_in_order() -> anyhow::Result<()> {
        let raw = json!({
            "name": "Tester",
            "members": [
                {"name": "StringTestClass", "selectable_for": ["strings"]},
                {"name": "VERSION", "value": "0.1.1"},
                {"name": "FloatTestClass", "selectable_for": [{"type": "Float"}]},
                {"name": "NotSelectable"}
            ]
        })
        .to_string();
        let namespace = Namespace::from_json_str(&raw)?;
        assert_eq!(namespace.name(), "Tester");
        let names = namespace
            .members()
            .map(|(name, _)| name.to_string())
            .collect::<Vec<String>>();
        assert_eq!(
            names,
            vec!["StringTestClass", "VERSION", "FloatTestClass", "NotSelectable"]
        );

        assert!(matches!(namespace.get("VERSION"), Some(Member::Constant(_))));
        let float = namespace
            .get("FloatTestClass")
            .and_then(Member::as_candidate)
            .and_then(|candidate| candidate.selectable_for());
        assert_eq!(
            float,
            Some(Selector::List(vec![Selector::Type(TypeToken::named("Float"))]))
        );
        let plain = namespace
            .get("NotSelectable")
            .and_then(Member::as_candidate)
            .map(|candidate| candidate.selectable_for());
        assert_eq!(plain, Some(None));
        Ok(())
    }

    #[test]
    fn non_array_declaration_is_kept_for_discovery() -> anyhow::Result<()> {
        let raw = r#"{"name": "MisconfiguredTester", "members": [{"name": "NotArray", "selectable_for": "notanarray"}]}"#;
        let namespace = Namespace::from_json_str(raw)?;
        let declared = namespace
            .get("NotArray")
            .and_then(Member::as_candidate)
            .and_then(|candidate| candidate.selectable_for());
        assert_eq!(declared, Some(Selector::from("notanarray")));
        Ok(())
    }

    #[test]
    fn odd_declarations_load_without_error() -> anyhow::Result<()> {
        let raw = json!({
            "name": "M",
            "members": [
                {"name": "Flag", "selectable_for": true},
                {"name": "Object", "selectable_for": {"a": 1}},
                {"name": "Nulls", "selectable_for": [null]}
            ]
        })
        .to_string();
        let namespace = Namespace::from_json_str(&raw)?;
        let declared = |name: &str| {
            namespace
                .get(name)
                .and_then(Member::as_candidate)
                .and_then(|candidate| candidate.selectable_for())
        };
        assert_eq!(declared("Flag"), Some(Selector::Json(json!(true))));
        assert_eq!(declared("Object"), Some(Selector::Json(json!({"a": 1}))));
        assert_eq!(
            declared("Nulls"),
            Some(Selector::List(vec![Selector::Json(json!(null))]))
        );
        Ok(())
    }

    #[test]
    fn rejects_malformed_members() {
        let both = r#"{"name": "T", "members": [{"name": "X", "value": 1, "selectable_for": []}]}"#;
        let err = Namespace::from_json_str(both).err().map(|err| err.to_string());
        assert_eq!(
            err.as_deref(),
            Some("invalid namespace manifest: T::X cannot be both a constant and a selectable type")
        );

        let unnamed = r#"{"name": "T", "members": [{"name": " "}]}"#;
        assert!(matches!(
            Namespace::from_json_str(unnamed),
            Err(SelectableError::Manifest(_))
        ));

        assert!(matches!(
            Namespace::from_json_str("not json"),
            Err(SelectableError::Json(_))
        ));
    }

    #[test]
    fn load_reads_manifest_from_disk() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("namespace.json");
        std::fs::write(
            &path,
            r#"{"name": "OnDisk", "members": [{"name": "Only", "selectable_for": [1, 2]}]}"#,
        )?;
        let namespace = Namespace::load(&path)?;
        assert_eq!(namespace.name(), "OnDisk");
        assert_eq!(namespace.len(), 1);

        let missing = Namespace::load(temp.path().join("missing.json"));
        assert!(matches!(missing, Err(SelectableError::Io(_))));
        Ok(())
    }
}
