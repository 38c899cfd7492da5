//! TOML schema read by `identity-gen generate`.
//!
//! ```toml
//! runtime = "::identity"
//! output = "src/ids.rs"
//! imports = ["uuid::Uuid"]
//!
//! [[identifier]]
//! declare = "pub OrderId, backing: Uuid, adopts: Ord"
//!
//! [[identifier]]
//! name = "UserId"
//! backing = "String"
//! adopts = ["Ord"]
//! visibility = "pub"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::identifier::analyze::{ADOPTS_LABEL, BACKING_LABEL};
use crate::{Context, DeclarationRequest, Error, Options, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default = "default_runtime")]
    pub runtime: String,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default, rename = "identifier")]
    pub identifiers: Vec<Entry>,
}

/// One identifier, either as a labeled declaration or as separate fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Declare {
        declare: String,
    },
    Fields {
        name: String,
        backing: String,
        #[serde(default)]
        adopts: Vec<String>,
        #[serde(default)]
        visibility: Option<String>,
    },
}

fn default_runtime() -> String {
    "::identity".to_string()
}

impl Schema {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read schema {}", path.display()))?;
        let schema = Self::parse(&content)
            .map_err(|e| Error::Schema(format!("{}: {}", path.display(), e)))?;
        debug!(
            path = %path.display(),
            identifiers = schema.identifiers.len(),
            "loaded schema"
        );
        Ok(schema)
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The schema's `output`, taken relative to the directory of the schema
    /// file at `schema_path`.
    pub fn resolve_output(&self, schema_path: &Path) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        Some(match schema_path.parent() {
            Some(dir) => dir.join(output),
            None => output.clone(),
        })
    }

    pub fn options(&self) -> Result<Options> {
        let runtime = syn::parse_str(&self.runtime).map_err(|e| {
            Error::Schema(format!("runtime `{}` is not a path: {}", self.runtime, e))
        })?;
        Ok(Options::with_runtime(runtime))
    }
}

impl Entry {
    /// The labeled declaration this entry stands for. Field entries go
    /// through the same validation as hand-written declarations.
    pub fn declaration(&self) -> String {
        match self {
            Entry::Declare { declare } => declare.clone(),
            Entry::Fields {
                name,
                backing,
                adopts,
                visibility,
            } => {
                let mut declaration = String::new();
                if let Some(visibility) = visibility {
                    declaration.push_str(visibility);
                    declaration.push(' ');
                }
                declaration.push_str(&format!("{}, {}: {}", name, BACKING_LABEL, backing));
                if !adopts.is_empty() {
                    declaration.push_str(&format!(", {}: {}", ADOPTS_LABEL, adopts.join(", ")));
                }
                declaration
            }
        }
    }

    pub fn request(&self) -> Result<DeclarationRequest> {
        let declaration = self.declaration();
        DeclarationRequest::parse_str(&declaration).map_err(|e| Error::Syntax(declaration, e))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.declaration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
        imports = ["uuid::Uuid"]

        [[identifier]]
        declare = "pub OrderId, backing: Uuid, adopts: Ord"

        [[identifier]]
        name = "UserId"
        backing = "String"
        adopts = ["Ord", "Copy"]
        visibility = "pub(crate)"

        [[identifier]]
        name = "Port"
        backing = "u16"
    "#;

    #[test]
    fn parses_both_entry_forms() {
        let schema = Schema::parse(SCHEMA).unwrap();
        assert_eq!(schema.runtime, "::identity");
        assert_eq!(schema.output, None);
        assert_eq!(schema.imports, vec!["uuid::Uuid"]);
        let declarations: Vec<String> =
            schema.identifiers.iter().map(Entry::declaration).collect();
        assert_eq!(
            declarations,
            vec![
                "pub OrderId, backing: Uuid, adopts: Ord",
                "pub(crate) UserId, backing: String, adopts: Ord, Copy",
                "Port, backing: u16",
            ]
        );
    }

    #[test]
    fn runtime_must_be_a_path() {
        let schema = Schema::parse("runtime = \"not a path\"").unwrap();
        assert!(matches!(schema.options(), Err(Error::Schema(_))));
        let schema = Schema::parse("runtime = \"crate::ids\"").unwrap();
        assert!(schema.options().is_ok());
    }

    #[test]
    fn field_entries_are_parsed_into_requests() {
        let entry = Entry::Fields {
            name: "Port".to_string(),
            backing: "u16".to_string(),
            adopts: vec![],
            visibility: Some("pub".to_string()),
        };
        let request = entry.request().ok().unwrap();
        assert_eq!(request.arguments.len(), 2);
    }

    #[test]
    fn output_is_relative_to_the_schema_file() {
        let schema = Schema::parse("output = \"src/ids.rs\"").unwrap();
        assert_eq!(
            schema.resolve_output(Path::new("crates/app/identity.toml")),
            Some(PathBuf::from("crates/app/src/ids.rs"))
        );
        assert_eq!(
            schema.resolve_output(Path::new("identity.toml")),
            Some(PathBuf::from("src/ids.rs"))
        );

        let schema = Schema::parse("output = \"/tmp/ids.rs\"").unwrap();
        assert_eq!(
            schema.resolve_output(Path::new("crates/app/identity.toml")),
            Some(PathBuf::from("/tmp/ids.rs"))
        );
        assert_eq!(Schema::parse("").unwrap().resolve_output(Path::new("a/b.toml")), None);
    }
}
