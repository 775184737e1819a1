use serde::{Deserialize, Serialize};

use super::Expr;
use crate::meta::MetaExpr;

/// Structural description of a data type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeExpr {
    pub description: String,
    /// Name of the underlying type, e.g. "String" or "Object".
    pub type_name: String,
    pub fields: Vec<FieldExpr>,
    pub required: Vec<String>,
    pub meta: MetaExpr,
}

impl AttributeExpr {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&AttributeExpr> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.attribute)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldExpr {
    pub name: String,
    pub attribute: AttributeExpr,
}

/// A named type defined by the design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTypeExpr {
    pub name: String,
    pub attribute: AttributeExpr,
}

impl UserTypeExpr {
    pub fn new(name: impl Into<String>, attribute: AttributeExpr) -> Self {
        Self {
            name: name.into(),
            attribute,
        }
    }
}

impl Expr for UserTypeExpr {
    fn eval_name(&self) -> String {
        format!("type {:?}", self.name)
    }
}

/// A user type describing a method result. The identifier (usually a media
/// type) distinguishes generated variants of the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultTypeExpr {
    pub name: String,
    pub identifier: String,
    pub attribute: AttributeExpr,
    pub views: Vec<ViewExpr>,
}

impl ResultTypeExpr {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn view(&self, name: &str) -> Option<&ViewExpr> {
        self.views.iter().find(|v| v.name == name)
    }
}

impl Expr for ResultTypeExpr {
    fn eval_name(&self) -> String {
        format!("result type {:?}", self.name)
    }
}

/// A named projection of a result type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewExpr {
    pub name: String,
    /// Names of the attribute fields rendered by the view.
    pub fields: Vec<String>,
}

/// Borrowed handle on either kind of user type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserType<'a> {
    User(&'a UserTypeExpr),
    Result(&'a ResultTypeExpr),
}

impl<'a> UserType<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            UserType::User(t) => &t.name,
            UserType::Result(t) => &t.name,
        }
    }

    pub fn attribute(&self) -> &'a AttributeExpr {
        match *self {
            UserType::User(t) => &t.attribute,
            UserType::Result(t) => &t.attribute,
        }
    }

    pub fn as_result_type(&self) -> Option<&'a ResultTypeExpr> {
        match *self {
            UserType::Result(t) => Some(t),
            UserType::User(_) => None,
        }
    }
}

impl Expr for UserType<'_> {
    fn eval_name(&self) -> String {
        match self {
            UserType::User(t) => t.eval_name(),
            UserType::Result(t) => t.eval_name(),
        }
    }
}

/// Result types synthesized while the design is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedTypes(Vec<ResultTypeExpr>);

impl GeneratedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the generated result type with the given identifier.
    pub fn lookup(&self, identifier: &str) -> Option<&ResultTypeExpr> {
        self.0.iter().find(|t| t.identifier == identifier)
    }

    /// Records `result_type` unless a type with the same identifier was
    /// already generated. Returns the recorded type either way.
    pub fn insert_unique(&mut self, result_type: ResultTypeExpr) -> &ResultTypeExpr {
        let index = match self
            .0
            .iter()
            .position(|t| t.identifier == result_type.identifier)
        {
            Some(index) => index,
            None => {
                self.0.push(result_type);
                self.0.len() - 1
            }
        };
        &self.0[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultTypeExpr> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a GeneratedTypes {
    type Item = &'a ResultTypeExpr;
    type IntoIter = std::slice::Iter<'a, ResultTypeExpr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Native representation a user type converts to or is created from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalType {
    /// Fully qualified path of the native type.
    pub path: String,
}

impl ExternalType {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Pairs a user type with an external type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMap {
    /// Name of the user type.
    pub user: String,
    pub external: ExternalType,
}

impl TypeMap {
    pub fn new(user: impl Into<String>, external: ExternalType) -> Self {
        Self {
            user: user.into(),
            external,
        }
    }
}
