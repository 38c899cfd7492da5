use std::fmt;

use quote::ToTokens;
use syn::{parse_quote, Attribute, Ident, ItemStruct, Path, Visibility};

use crate::identifier::analyze::{IdentifiableModel, Model};

/// Where generated code finds the `identity` runtime.
#[derive(Debug, Clone)]
pub struct Options {
    pub runtime: Path,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            runtime: parse_quote!(::identity),
        }
    }
}

impl Options {
    pub fn with_runtime(runtime: Path) -> Self {
        Options { runtime }
    }
}

pub struct Ir {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub backing: Ident,
    pub backing_kind: BackingKind,
    pub capabilities: Vec<Capability>,
    pub runtime: Path,
}

pub struct IdentifiableIr {
    pub host: ItemStruct,
    pub id: Ir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackingKind {
    Uuid,
    Float,
    Plain,
}

pub struct Capability {
    pub ident: Ident,
    pub plan: Plan,
}

/// How an adopted capability turns into code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// `PartialOrd` and `Ord` delegating to the raw value.
    TotalOrder,
    /// `PartialOrd` only.
    PartialOrder,
    /// Added to the derive list.
    Derive,
    /// Already provided by every identifier.
    Implied,
    /// `impl Capability for Name {}`, relying on provided methods.
    Marker,
}

pub fn lower(model: Model, options: &Options) -> Ir {
    let Model {
        attrs,
        vis,
        name,
        backing,
        capabilities,
    } = model;
    let backing_kind = backing_kind(&backing);
    let mut capabilities: Vec<Capability> = capabilities
        .into_iter()
        .map(|ident| Capability {
            plan: plan(&ident),
            ident,
        })
        .collect();
    // `Ord` already brings `PartialOrd` along.
    if capabilities.iter().any(|c| c.plan == Plan::TotalOrder) {
        for capability in capabilities.iter_mut() {
            if capability.plan == Plan::PartialOrder {
                capability.plan = Plan::Implied;
            }
        }
    }
    Ir {
        attrs,
        vis,
        name,
        backing,
        backing_kind,
        capabilities,
        runtime: options.runtime.clone(),
    }
}

pub fn lower_identifiable(model: IdentifiableModel, options: &Options) -> IdentifiableIr {
    let IdentifiableModel { host, id } = model;
    IdentifiableIr {
        host,
        id: lower(id, options),
    }
}

fn backing_kind(backing: &Ident) -> BackingKind {
    if backing == "Uuid" {
        BackingKind::Uuid
    } else if backing == "f32" || backing == "f64" {
        BackingKind::Float
    } else {
        BackingKind::Plain
    }
}

fn plan(capability: &Ident) -> Plan {
    match capability.to_string().as_str() {
        "Ord" => Plan::TotalOrder,
        "PartialOrd" => Plan::PartialOrder,
        "Copy" | "Default" => Plan::Derive,
        "Identifier" | "Debug" | "Clone" | "PartialEq" | "Eq" | "Hash"
        | "Display" | "Serialize" | "Deserialize" | "Send" | "Sync" => {
            Plan::Implied
        }
        _ => Plan::Marker,
    }
}

/// Renders the signature of the generated type, e.g.
/// `pub struct OrderId: Identifier, Ord { raw_value: Uuid }`.
impl fmt::Display for Ir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !matches!(self.vis, Visibility::Inherited) {
            write!(f, "{} ", self.vis.to_token_stream())?;
        }
        write!(f, "struct {}: Identifier", self.name)?;
        for capability in &self.capabilities {
            write!(f, ", {}", capability.ident)?;
        }
        write!(f, " {{ raw_value: {} }}", self.backing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::analyze::analyze;
    use crate::request::DeclarationRequest;

    fn ir(source: &str) -> Ir {
        let request = DeclarationRequest::parse_str(source).unwrap();
        lower(analyze(request).ok().unwrap(), &Options::default())
    }

    #[test]
    fn signature_lists_capabilities_in_order() {
        assert_eq!(
            ir("ImageId, backing: Uuid, adopts: ResourceId, FileId, MediaId").to_string(),
            "struct ImageId: Identifier, ResourceId, FileId, MediaId { raw_value: Uuid }"
        );
        assert_eq!(
            ir("pub ID, backing: Uuid").to_string(),
            "pub struct ID: Identifier { raw_value: Uuid }"
        );
    }

    #[test]
    fn capabilities_are_planned() {
        let ir = ir("Score, backing: f64, adopts: PartialOrd, Ord, Copy, Hash, Tagged");
        assert_eq!(ir.backing_kind, BackingKind::Float);
        let plans: Vec<Plan> = ir.capabilities.iter().map(|c| c.plan).collect();
        assert_eq!(
            plans,
            vec![
                Plan::Implied,
                Plan::TotalOrder,
                Plan::Derive,
                Plan::Implied,
                Plan::Marker
            ]
        );
    }

    #[test]
    fn uuid_backing_is_recognized() {
        assert_eq!(ir("X, backing: Uuid").backing_kind, BackingKind::Uuid);
        assert_eq!(ir("X, backing: String").backing_kind, BackingKind::Plain);
    }
}
