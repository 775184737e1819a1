//! # Root Registry
//!
//! [`RootExpr`] owns every top level collection built by DSL execution: the
//! API description, services, errors, user and result types, generated
//! types, type maps, security schemes and annotations.
//!
//! A registry is built once per evaluation run and then:
//!
//! 1. walked in stages by [`RootExpr::walk_sets`] (see [`crate::walker`]),
//! 2. validated by [`RootExpr::validate`],
//! 3. queried by generators through the `lookup_*` methods.
//!
//! Lookups return the first node with a matching name; names are expected
//! to be unique within a collection. A miss is `None`, never an error.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    config::{self, EvalConfig},
    eval::{EvalResult, Root},
    expr::{
        ApiExpr, ErrorExpr, GeneratedTypes, GrpcServiceExpr, HttpServiceExpr, ResultTypeExpr,
        SchemeExpr, ServiceExpr, TypeMap, UserType, UserTypeExpr,
    },
    meta::MetaExpr,
    validation::ValidationErrors,
    walker::{order_services, SetWalker, StagedWalker},
    InternalResult,
};

/// Eval name of the design root.
pub const EVAL_NAME: &str = "design";

const PACKAGES: [&str; 2] = [
    concat!(env!("CARGO_CRATE_NAME"), "::expr"),
    concat!(env!("CARGO_CRATE_NAME"), "::dsl"),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootExpr {
    pub api: Option<ApiExpr>,
    pub services: Vec<ServiceExpr>,
    /// Errors shared by all the API methods.
    pub errors: Vec<ErrorExpr>,
    pub types: Vec<UserTypeExpr>,
    pub result_types: Vec<ResultTypeExpr>,
    pub generated_types: GeneratedTypes,
    /// User type to external type mappings.
    pub conversions: Vec<TypeMap>,
    /// External type to user type mappings.
    pub creations: Vec<TypeMap>,
    pub schemes: Vec<SchemeExpr>,
    pub meta: MetaExpr,
    #[serde(skip)]
    config: EvalConfig,
}

impl RootExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Builds a registry from its JSON representation.
    pub fn from_json(json: &str) -> InternalResult<Self> {
        config::from_str(json)
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EvalConfig) {
        self.config = config;
    }

    pub fn api(&self) -> Option<&ApiExpr> {
        self.api.as_ref()
    }

    /// Returns the API node, creating an empty one if the design declares
    /// none.
    pub fn ensure_api(&mut self) -> &mut ApiExpr {
        api_or_default(&mut self.api, &self.config)
    }

    /// Presents the design nodes to `walk`, one batch per stage, creating the
    /// API node first if needed. Stops at the first error.
    pub fn walk_sets(&mut self, walk: &mut SetWalker<'_>) -> EvalResult<()> {
        let Self {
            api,
            types,
            result_types,
            services,
            config,
            ..
        } = self;
        let api = api_or_default(api, config);

        StagedWalker {
            api,
            types,
            result_types,
            services,
            ordering: config.transport_ordering,
        }
        .run(walk)
    }

    /// HTTP services in walk order. Empty without an API node.
    pub fn ordered_http_services(&self) -> EvalResult<Vec<&HttpServiceExpr>> {
        match &self.api {
            Some(api) => order_services(&api.http.services, self.config.transport_ordering),
            None => Ok(Vec::new()),
        }
    }

    /// gRPC services in walk order. Empty without an API node.
    pub fn ordered_grpc_services(&self) -> EvalResult<Vec<&GrpcServiceExpr>> {
        match &self.api {
            Some(api) => order_services(&api.grpc.services, self.config.transport_ordering),
            None => Ok(Vec::new()),
        }
    }

    /// Looks up a user type by name, then a result type.
    pub fn lookup_user_type(&self, name: &str) -> Option<UserType<'_>> {
        let found = self
            .types
            .iter()
            .find(|t| t.name == name)
            .map(UserType::User)
            .or_else(|| {
                self.result_types
                    .iter()
                    .find(|t| t.name == name)
                    .map(UserType::Result)
            });
        if found.is_none() {
            trace!("User type {:?} not found", name);
        }
        found
    }

    /// Looks up a generated result type by identifier.
    pub fn lookup_generated_result_type(&self, identifier: &str) -> Option<&ResultTypeExpr> {
        let found = self.generated_types.lookup(identifier);
        if found.is_none() {
            trace!("Generated result type {:?} not found", identifier);
        }
        found
    }

    pub fn lookup_service(&self, name: &str) -> Option<&ServiceExpr> {
        let found = self.services.iter().find(|s| s.name == name);
        if found.is_none() {
            trace!("Service {:?} not found", name);
        }
        found
    }

    pub fn lookup_error(&self, name: &str) -> Option<&ErrorExpr> {
        let found = self.errors.iter().find(|e| e.name == name);
        if found.is_none() {
            trace!("Error {:?} not found", name);
        }
        found
    }

    pub fn lookup_scheme(&self, name: &str) -> Option<&SchemeExpr> {
        let found = self.schemes.iter().find(|s| s.name == name);
        if found.is_none() {
            trace!("Security scheme {:?} not found", name);
        }
        found
    }

    /// External type the named user type converts to.
    pub fn conversion(&self, user_type: &str) -> Option<&TypeMap> {
        let found = self.conversions.iter().find(|m| m.user == user_type);
        if found.is_none() {
            trace!("No conversion for user type {:?}", user_type);
        }
        found
    }

    /// External type the named user type is created from.
    pub fn creation(&self, user_type: &str) -> Option<&TypeMap> {
        let found = self.creations.iter().find(|m| m.user == user_type);
        if found.is_none() {
            trace!("No creation for user type {:?}", user_type);
        }
        found
    }

    /// Distinct URL schemes used by the API servers, sorted. Empty when there
    /// is no API node, no server or no parsable URI.
    pub fn http_schemes(&self) -> Vec<String> {
        self.api.as_ref().map(ApiExpr::schemes).unwrap_or_default()
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.api.is_none() {
            errors.add(self, "Missing API declaration");
        }
        errors
    }

    pub fn eval_name(&self) -> &str {
        EVAL_NAME
    }

    /// The design root depends on no other root.
    pub fn depends_on(&self) -> Vec<String> {
        Vec::new()
    }

    pub fn packages(&self) -> Vec<String> {
        PACKAGES.iter().map(|p| p.to_string()).collect()
    }
}

fn api_or_default<'a>(api: &'a mut Option<ApiExpr>, config: &EvalConfig) -> &'a mut ApiExpr {
    api.get_or_insert_with(|| {
        trace!("No API declared, using default {:?}", config.default_api_name);
        ApiExpr::new(config.default_api_name.clone())
    })
}

impl crate::expr::Expr for RootExpr {
    fn eval_name(&self) -> String {
        EVAL_NAME.to_string()
    }
}

impl Root for RootExpr {
    fn eval_name(&self) -> &str {
        RootExpr::eval_name(self)
    }

    fn depends_on(&self) -> Vec<String> {
        RootExpr::depends_on(self)
    }

    fn packages(&self) -> Vec<String> {
        RootExpr::packages(self)
    }

    fn walk_sets(&mut self, walk: &mut SetWalker<'_>) -> EvalResult<()> {
        RootExpr::walk_sets(self, walk)
    }

    fn validate(&self) -> ValidationErrors {
        RootExpr::validate(self)
    }
}
