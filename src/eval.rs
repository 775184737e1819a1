//! Evaluation roots and the driver that runs them.
//!
//! A root owns a set of design nodes, knows how to present them in
//! evaluation order and how to validate them once evaluated. Roots may
//! depend on other roots, which are then run first.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    expr::Transport,
    validation::ValidationErrors,
    walker::{ordering::stable_topological, SetWalker, Stage},
};

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Failed to evaluate {stage}: {message}")]
    Stage { stage: Stage, message: String },

    #[error("{transport} services form a parent cycle: {}", .names.join(", "))]
    ParentCycle {
        transport: Transport,
        names: Vec<String>,
    },

    #[error("Invalid design:\n{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Root {root:?} depends on unknown root {dependency:?}")]
    UnknownDependency { root: String, dependency: String },

    #[error("Roots depend on each other: {}", .0.join(", "))]
    RootCycle(Vec<String>),
}

impl EvalError {
    /// Error raised by an evaluator while processing `stage`.
    pub fn stage(stage: Stage, message: impl Into<String>) -> Self {
        Self::Stage {
            stage,
            message: message.into(),
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// A collection of design nodes evaluated as a unit.
pub trait Root {
    /// Name of the root, used in diagnostics and to express dependencies.
    fn eval_name(&self) -> &str;

    /// Eval names of the roots that must be run before this one.
    fn depends_on(&self) -> Vec<String> {
        Vec::new()
    }

    /// Module paths where the root and its DSL types live.
    fn packages(&self) -> Vec<String> {
        Vec::new()
    }

    /// Presents the root nodes to `walk`, one batch per stage.
    fn walk_sets(&mut self, walk: &mut SetWalker<'_>) -> EvalResult<()>;

    /// Checks the root once every batch was evaluated.
    fn validate(&self) -> ValidationErrors {
        ValidationErrors::new()
    }
}

/// Runs `roots` in dependency order.
///
/// Every root is walked first, stopping at the first failing batch. Then all
/// roots are validated and every failure is reported in one
/// [`EvalError::Validation`].
pub fn run(roots: &mut [&mut dyn Root], walk: &mut SetWalker<'_>) -> EvalResult<()> {
    let order = sort_roots(roots)?;
    info!("Running {} roots", order.len());

    for &i in &order {
        debug!("Walking root {:?}", roots[i].eval_name());
        roots[i].walk_sets(walk)?;
    }

    let mut errors = ValidationErrors::new();
    for &i in &order {
        errors.merge(roots[i].validate());
    }
    errors.into_result()?;

    info!("Ran {} roots", order.len());
    Ok(())
}

fn sort_roots(roots: &[&mut dyn Root]) -> EvalResult<Vec<usize>> {
    let index: HashMap<&str, usize> = roots
        .iter()
        .enumerate()
        .map(|(i, r)| (r.eval_name(), i))
        .collect();

    let mut edges = Vec::new();
    for (i, root) in roots.iter().enumerate() {
        for dependency in root.depends_on() {
            match index.get(dependency.as_str()) {
                Some(&d) => edges.push((d, i)),
                None => {
                    return Err(EvalError::UnknownDependency {
                        root: root.eval_name().to_string(),
                        dependency,
                    })
                }
            }
        }
    }

    stable_topological(roots.len(), &edges).map_err(|unresolved| {
        EvalError::RootCycle(
            unresolved
                .into_iter()
                .map(|i| roots[i].eval_name().to_string())
                .collect(),
        )
    })
}
