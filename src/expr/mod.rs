//! Design nodes.
//!
//! Nodes are produced by DSL execution and accumulate in a
//! [`RootExpr`](crate::root::RootExpr). The walker hands them to evaluators
//! as [`Expression`] values, a closed set of borrowed variants so that
//! evaluators can dispatch on the node kind without downcasting.

mod api;
mod security;
mod service;
mod transport;
mod types;

pub use api::{ApiExpr, GrpcExpr, HostExpr, HttpExpr, ServerExpr};
pub use security::{SchemeExpr, SchemeKind, ScopeExpr};
pub use service::{ErrorExpr, MethodExpr, ServiceExpr};
pub use transport::{
    FileServerExpr, GrpcEndpointExpr, GrpcServiceExpr, HttpEndpointExpr, HttpServiceExpr,
    RouteExpr, Transport, TransportService,
};
pub use types::{
    AttributeExpr, ExternalType, FieldExpr, GeneratedTypes, ResultTypeExpr, TypeMap, UserType,
    UserTypeExpr, ViewExpr,
};

/// Capability shared by every design node.
pub trait Expr {
    /// Human readable name of the node, used when reporting errors.
    fn eval_name(&self) -> String;
}

/// Kind tag of an [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ExprKind {
    Api,
    Attribute,
    ResultType,
    Service,
    Method,
    HttpService,
    HttpEndpoint,
    FileServer,
    GrpcService,
    GrpcEndpoint,
}

/// A node handed to an evaluator during a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expression<'a> {
    Api(&'a ApiExpr),
    /// Structural attribute of the user type named `owner`.
    Attribute {
        owner: &'a str,
        attribute: &'a AttributeExpr,
    },
    ResultType(&'a ResultTypeExpr),
    Service(&'a ServiceExpr),
    Method(&'a MethodExpr),
    HttpService(&'a HttpServiceExpr),
    HttpEndpoint(&'a HttpEndpointExpr),
    FileServer(&'a FileServerExpr),
    GrpcService(&'a GrpcServiceExpr),
    GrpcEndpoint(&'a GrpcEndpointExpr),
}

impl<'a> Expression<'a> {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expression::Api(_) => ExprKind::Api,
            Expression::Attribute { .. } => ExprKind::Attribute,
            Expression::ResultType(_) => ExprKind::ResultType,
            Expression::Service(_) => ExprKind::Service,
            Expression::Method(_) => ExprKind::Method,
            Expression::HttpService(_) => ExprKind::HttpService,
            Expression::HttpEndpoint(_) => ExprKind::HttpEndpoint,
            Expression::FileServer(_) => ExprKind::FileServer,
            Expression::GrpcService(_) => ExprKind::GrpcService,
            Expression::GrpcEndpoint(_) => ExprKind::GrpcEndpoint,
        }
    }

    /// Name identifying the node within its kind.
    ///
    /// Attributes answer with the name of their owning type, transport
    /// services with the bound service name and file servers with the
    /// served path.
    pub fn name(&self) -> &'a str {
        match *self {
            Expression::Api(api) => &api.name,
            Expression::Attribute { owner, .. } => owner,
            Expression::ResultType(rt) => &rt.name,
            Expression::Service(s) => &s.name,
            Expression::Method(m) => &m.name,
            Expression::HttpService(s) => &s.service,
            Expression::HttpEndpoint(e) => &e.method,
            Expression::FileServer(f) => &f.file_path,
            Expression::GrpcService(s) => &s.service,
            Expression::GrpcEndpoint(e) => &e.method,
        }
    }
}

impl Expr for Expression<'_> {
    fn eval_name(&self) -> String {
        match self {
            Expression::Api(api) => api.eval_name(),
            Expression::Attribute { owner, .. } => format!("attribute of type {:?}", owner),
            Expression::ResultType(rt) => rt.eval_name(),
            Expression::Service(s) => s.eval_name(),
            Expression::Method(m) => m.eval_name(),
            Expression::HttpService(s) => s.eval_name(),
            Expression::HttpEndpoint(e) => e.eval_name(),
            Expression::FileServer(f) => f.eval_name(),
            Expression::GrpcService(s) => s.eval_name(),
            Expression::GrpcEndpoint(e) => e.eval_name(),
        }
    }
}

/// Splits an `"attribute:element"` mapping into its attribute and transport
/// element names. The element defaults to the attribute name.
///
/// Used to map transport fields such as HTTP headers onto attributes.
pub fn name_map(encoded: &str) -> (&str, &str) {
    let mut parts = encoded.split(':');
    let attribute = parts.next().unwrap_or_default();
    let element = parts.next().unwrap_or(attribute);
    (attribute, element)
}
