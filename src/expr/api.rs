use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use super::{Expr, GrpcServiceExpr, HttpServiceExpr};
use crate::meta::MetaExpr;

/// Top level API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiExpr {
    pub name: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub servers: Vec<ServerExpr>,
    pub http: HttpExpr,
    pub grpc: GrpcExpr,
    pub meta: MetaExpr,
}

impl ApiExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Distinct URL schemes used by the hosts of all servers, sorted.
    pub fn schemes(&self) -> Vec<String> {
        let schemes: BTreeSet<String> = self
            .servers
            .iter()
            .flat_map(ServerExpr::schemes)
            .collect();
        schemes.into_iter().collect()
    }
}

impl Expr for ApiExpr {
    fn eval_name(&self) -> String {
        format!("API {:?}", self.name)
    }
}

/// A server hosting a subset of the API services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerExpr {
    pub name: String,
    pub description: String,
    /// Names of the services exposed by the server.
    pub services: Vec<String>,
    pub hosts: Vec<HostExpr>,
}

impl ServerExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Schemes of every host URI that parses, in declaration order. May
    /// contain duplicates.
    pub fn schemes(&self) -> impl Iterator<Item = String> + '_ {
        self.hosts.iter().flat_map(HostExpr::schemes)
    }
}

impl Expr for ServerExpr {
    fn eval_name(&self) -> String {
        format!("server {:?}", self.name)
    }
}

/// A host of a server, reachable through one or more URIs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostExpr {
    pub name: String,
    pub description: String,
    pub uris: Vec<String>,
    /// Default values for the `{variable}` placeholders used in `uris`.
    pub variables: IndexMap<String, String>,
}

impl HostExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// URIs with every known `{variable}` replaced by its default value.
    pub fn resolved_uris(&self) -> impl Iterator<Item = String> + '_ {
        self.uris.iter().map(|uri| {
            self.variables
                .iter()
                .fold(uri.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{}}}", name), value)
                })
        })
    }

    fn schemes(&self) -> impl Iterator<Item = String> + '_ {
        self.resolved_uris().filter_map(|uri| match Url::parse(&uri) {
            Ok(parsed) => Some(parsed.scheme().to_string()),
            Err(e) => {
                trace!("skipping unparsable URI {:?}: {}", uri, e);
                None
            }
        })
    }
}

/// HTTP transport bindings of the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpExpr {
    /// Common path prefix of all HTTP endpoints.
    pub path: String,
    pub services: Vec<HttpServiceExpr>,
}

impl HttpExpr {
    pub fn service(&self, name: &str) -> Option<&HttpServiceExpr> {
        self.services.iter().find(|s| s.service == name)
    }
}

/// gRPC transport bindings of the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcExpr {
    pub services: Vec<GrpcServiceExpr>,
}

impl GrpcExpr {
    pub fn service(&self, name: &str) -> Option<&GrpcServiceExpr> {
        self.services.iter().find(|s| s.service == name)
    }
}
