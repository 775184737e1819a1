use serde::{Deserialize, Serialize};

use super::Expr;
use crate::meta::MetaExpr;

/// A service groups related methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceExpr {
    pub name: String,
    pub description: String,
    pub methods: Vec<MethodExpr>,
    /// Errors shared by all the service methods.
    pub errors: Vec<ErrorExpr>,
    pub meta: MetaExpr,
}

impl ServiceExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a method owned by this service and returns it for further setup.
    pub fn add_method(&mut self, name: impl Into<String>) -> &mut MethodExpr {
        let method = MethodExpr::new(name, self.name.clone());
        self.methods.push(method);
        let last = self.methods.len() - 1;
        &mut self.methods[last]
    }

    pub fn method(&self, name: &str) -> Option<&MethodExpr> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Looks up an error declared on the service.
    pub fn error(&self, name: &str) -> Option<&ErrorExpr> {
        self.errors.iter().find(|e| e.name == name)
    }
}

impl Expr for ServiceExpr {
    fn eval_name(&self) -> String {
        format!("service {:?}", self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodExpr {
    pub name: String,
    /// Name of the owning service.
    pub service: String,
    pub description: String,
    /// Name of the payload type, if any.
    pub payload: Option<String>,
    /// Name of the result type, if any.
    pub result: Option<String>,
    pub errors: Vec<ErrorExpr>,
    pub meta: MetaExpr,
}

impl MethodExpr {
    pub fn new(name: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            ..Default::default()
        }
    }
}

impl Expr for MethodExpr {
    fn eval_name(&self) -> String {
        format!("method {:?} of service {:?}", self.name, self.service)
    }
}

/// An error a method may return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorExpr {
    pub name: String,
    pub description: String,
    /// Name of the type describing the error payload.
    pub type_name: String,
}

impl ErrorExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Expr for ErrorExpr {
    fn eval_name(&self) -> String {
        format!("error {:?}", self.name)
    }
}
