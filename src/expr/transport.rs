use serde::{Deserialize, Serialize};

use super::Expr;
use crate::meta::MetaExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Transport {
    #[strum(serialize = "HTTP")]
    Http,
    #[strum(serialize = "gRPC")]
    Grpc,
}

/// A transport binding of a service that may extend a parent binding.
///
/// A binding is named after the service it binds. When `parent_name` names
/// another binding of the same transport, the parent has to be evaluated
/// first.
pub trait TransportService: Expr {
    const TRANSPORT: Transport;

    fn name(&self) -> &str;

    fn parent_name(&self) -> Option<&str>;
}

/// HTTP binding of a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServiceExpr {
    /// Name of the bound service.
    pub service: String,
    pub parent_name: Option<String>,
    /// Path prefixes shared by all the endpoints.
    pub paths: Vec<String>,
    pub endpoints: Vec<HttpEndpointExpr>,
    pub file_servers: Vec<FileServerExpr>,
    pub meta: MetaExpr,
}

impl HttpServiceExpr {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn endpoint(&self, method: &str) -> Option<&HttpEndpointExpr> {
        self.endpoints.iter().find(|e| e.method == method)
    }
}

impl TransportService for HttpServiceExpr {
    const TRANSPORT: Transport = Transport::Http;

    fn name(&self) -> &str {
        &self.service
    }

    fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }
}

impl Expr for HttpServiceExpr {
    fn eval_name(&self) -> String {
        format!("HTTP service {:?}", self.service)
    }
}

/// HTTP binding of a method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpEndpointExpr {
    pub method: String,
    pub service: String,
    pub routes: Vec<RouteExpr>,
    pub meta: MetaExpr,
}

impl HttpEndpointExpr {
    pub fn new(method: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            service: service.into(),
            ..Default::default()
        }
    }
}

impl Expr for HttpEndpointExpr {
    fn eval_name(&self) -> String {
        format!("HTTP endpoint {:?} of service {:?}", self.method, self.service)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteExpr {
    pub verb: String,
    pub path: String,
}

/// Serves static content under one or more request paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerExpr {
    pub service: String,
    pub file_path: String,
    pub request_paths: Vec<String>,
    pub meta: MetaExpr,
}

impl FileServerExpr {
    pub fn new(service: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            file_path: file_path.into(),
            ..Default::default()
        }
    }
}

impl Expr for FileServerExpr {
    fn eval_name(&self) -> String {
        format!("file server {:?} of service {:?}", self.file_path, self.service)
    }
}

/// gRPC binding of a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcServiceExpr {
    pub service: String,
    pub parent_name: Option<String>,
    pub endpoints: Vec<GrpcEndpointExpr>,
    pub meta: MetaExpr,
}

impl GrpcServiceExpr {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn endpoint(&self, method: &str) -> Option<&GrpcEndpointExpr> {
        self.endpoints.iter().find(|e| e.method == method)
    }
}

impl TransportService for GrpcServiceExpr {
    const TRANSPORT: Transport = Transport::Grpc;

    fn name(&self) -> &str {
        &self.service
    }

    fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }
}

impl Expr for GrpcServiceExpr {
    fn eval_name(&self) -> String {
        format!("gRPC service {:?}", self.service)
    }
}

/// gRPC binding of a method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcEndpointExpr {
    pub method: String,
    pub service: String,
    pub meta: MetaExpr,
}

impl GrpcEndpointExpr {
    pub fn new(method: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            service: service.into(),
            ..Default::default()
        }
    }
}

impl Expr for GrpcEndpointExpr {
    fn eval_name(&self) -> String {
        format!("gRPC endpoint {:?} of service {:?}", self.method, self.service)
    }
}
