use serde::{Deserialize, Serialize};

use super::Expr;
use crate::meta::MetaExpr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SchemeKind {
    #[strum(serialize = "Basic")]
    Basic,
    #[strum(serialize = "APIKey")]
    ApiKey,
    #[strum(serialize = "JWT")]
    Jwt,
    #[serde(rename = "oauth2")]
    #[strum(serialize = "OAuth2")]
    OAuth2,
    #[default]
    #[strum(serialize = "None")]
    None,
}

/// A security scheme methods may require.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeExpr {
    pub name: String,
    pub kind: SchemeKind,
    pub description: String,
    pub scopes: Vec<ScopeExpr>,
    pub meta: MetaExpr,
}

impl SchemeExpr {
    pub fn new(name: impl Into<String>, kind: SchemeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }
}

impl Expr for SchemeExpr {
    fn eval_name(&self) -> String {
        format!("{} security scheme {:?}", self.kind, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeExpr {
    pub name: String,
    pub description: String,
}
