//! Staged walk of a design.
//!
//! A design is evaluated in fixed stages so that every node is visited only
//! after everything it may reference:
//!
//! ```text
//! API → user types → result types → services → methods
//!     → HTTP services → HTTP endpoints → HTTP file servers
//!     → gRPC services → gRPC endpoints
//! ```
//!
//! Each stage is handed to the caller as one [`ExpressionSet`], even when it
//! is empty. A failing callback stops the walk: later stages never run.
//! Transport services are ordered parents first, see [`ordering`].

pub mod ordering;

use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::{
    config::TransportOrdering,
    eval::EvalResult,
    expr::{ApiExpr, Expression, ResultTypeExpr, ServiceExpr, UserTypeExpr},
};

pub use ordering::order_services;

/// Callback invoked with the batch of every stage, in order.
pub type SetWalker<'w> = dyn FnMut(ExpressionSet<'_>) -> EvalResult<()> + 'w;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Api,
    UserTypes,
    ResultTypes,
    Services,
    Methods,
    HttpServices,
    HttpEndpoints,
    HttpFileServers,
    GrpcServices,
    GrpcEndpoints,
}

impl Stage {
    /// All stages in walk order.
    pub fn all() -> Vec<Stage> {
        Stage::iter().collect()
    }
}

/// The nodes presented to the callback for one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSet<'a> {
    pub stage: Stage,
    pub expressions: Vec<Expression<'a>>,
}

impl<'a> ExpressionSet<'a> {
    pub fn new(stage: Stage, expressions: Vec<Expression<'a>>) -> Self {
        Self { stage, expressions }
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expression<'a>> {
        self.expressions.iter()
    }

    /// Names of the nodes in presentation order.
    pub fn names(&self) -> Vec<&'a str> {
        self.expressions.iter().map(Expression::name).collect()
    }
}

impl<'a> IntoIterator for ExpressionSet<'a> {
    type Item = Expression<'a>;
    type IntoIter = std::vec::IntoIter<Expression<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.expressions.into_iter()
    }
}

/// Produces the stage batches of one design.
///
/// Borrows the collections of a [`RootExpr`](crate::root::RootExpr) whose API
/// node is already present.
pub struct StagedWalker<'a> {
    pub api: &'a ApiExpr,
    pub types: &'a [UserTypeExpr],
    pub result_types: &'a [ResultTypeExpr],
    pub services: &'a [ServiceExpr],
    pub ordering: TransportOrdering,
}

impl<'a> StagedWalker<'a> {
    pub fn run(&self, walk: &mut SetWalker<'_>) -> EvalResult<()> {
        info!("Walking design of API {:?}", self.api.name);

        emit(walk, Stage::Api, vec![Expression::Api(self.api)])?;

        emit(
            walk,
            Stage::UserTypes,
            self.types
                .iter()
                .map(|t| Expression::Attribute {
                    owner: &t.name,
                    attribute: &t.attribute,
                })
                .collect(),
        )?;

        emit(
            walk,
            Stage::ResultTypes,
            self.result_types.iter().map(Expression::ResultType).collect(),
        )?;

        // Services must be complete before any of their methods is visited.
        emit(
            walk,
            Stage::Services,
            self.services.iter().map(Expression::Service).collect(),
        )?;
        emit(
            walk,
            Stage::Methods,
            self.services
                .iter()
                .flat_map(|s| s.methods.iter().map(Expression::Method))
                .collect(),
        )?;

        let http = order_services(&self.api.http.services, self.ordering)?;
        emit(
            walk,
            Stage::HttpServices,
            http.iter().copied().map(Expression::HttpService).collect(),
        )?;
        emit(
            walk,
            Stage::HttpEndpoints,
            http.iter()
                .flat_map(|s| s.endpoints.iter().map(Expression::HttpEndpoint))
                .collect(),
        )?;
        emit(
            walk,
            Stage::HttpFileServers,
            http.iter()
                .flat_map(|s| s.file_servers.iter().map(Expression::FileServer))
                .collect(),
        )?;

        let grpc = order_services(&self.api.grpc.services, self.ordering)?;
        emit(
            walk,
            Stage::GrpcServices,
            grpc.iter().copied().map(Expression::GrpcService).collect(),
        )?;
        emit(
            walk,
            Stage::GrpcEndpoints,
            grpc.iter()
                .flat_map(|s| s.endpoints.iter().map(Expression::GrpcEndpoint))
                .collect(),
        )?;

        info!("Walked design of API {:?}", self.api.name);
        Ok(())
    }
}

fn emit(
    walk: &mut SetWalker<'_>,
    stage: Stage,
    expressions: Vec<Expression<'_>>,
) -> EvalResult<()> {
    debug!("Stage {}: {} expressions", stage, expressions.len());
    walk(ExpressionSet::new(stage, expressions))
}
