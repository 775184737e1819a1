//! Parent-before-child ordering of transport services.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::{
    config::TransportOrdering,
    eval::{EvalError, EvalResult},
    expr::TransportService,
};

/// Orders `services` so that every service comes after the service named by
/// its `parent_name`.
///
/// Parent names that do not match a service of the same transport are
/// ignored. With [`TransportOrdering::Topological`] independent services
/// keep their declaration order and cycles are reported as
/// [`EvalError::ParentCycle`].
pub fn order_services<T: TransportService>(
    services: &[T],
    ordering: TransportOrdering,
) -> EvalResult<Vec<&T>> {
    match ordering {
        TransportOrdering::Topological => topological(services),
        TransportOrdering::SinglePass => Ok(single_pass(services)),
    }
}

fn topological<T: TransportService>(services: &[T]) -> EvalResult<Vec<&T>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(services.len());
    for (i, service) in services.iter().enumerate() {
        index.entry(service.name()).or_insert(i);
    }

    let edges: Vec<(usize, usize)> = services
        .iter()
        .enumerate()
        .filter_map(|(i, service)| {
            let parent = service.parent_name()?;
            index.get(parent).map(|&p| (p, i))
        })
        .collect();

    match stable_topological(services.len(), &edges) {
        Ok(order) => Ok(order.into_iter().map(|i| &services[i]).collect()),
        Err(unresolved) => {
            let names: Vec<String> = unresolved
                .into_iter()
                .map(|i| services[i].name().to_string())
                .collect();
            warn!(
                "{} services form a parent cycle: {}",
                T::TRANSPORT,
                names.join(", ")
            );
            Err(EvalError::ParentCycle {
                transport: T::TRANSPORT,
                names,
            })
        }
    }
}

/// One insertion pass that moves a service ahead of its direct child.
///
/// Reliable for a lone parent/child pair. A parent separated from its child
/// by an unrelated service, or a grandparent declared after its grandchild,
/// may stay behind.
///
/// This matches the legacy block-insertion ordering only for up to 20
/// services. Above that the legacy sort merged sorted blocks, so its output
/// may differ from this pass.
fn single_pass<T: TransportService>(services: &[T]) -> Vec<&T> {
    let mut ordered: Vec<&T> = services.iter().collect();
    for i in 1..ordered.len() {
        let mut j = i;
        while j > 0 && is_parent_of(ordered[j], ordered[j - 1]) {
            ordered.swap(j, j - 1);
            j -= 1;
        }
    }

    if let Some(child) = first_misplaced(&ordered) {
        warn!(
            "{} service {:?} is ordered before its parent {:?}",
            T::TRANSPORT,
            child.name(),
            child.parent_name().unwrap_or_default()
        );
    }
    ordered
}

fn is_parent_of<T: TransportService>(parent: &T, child: &T) -> bool {
    child.parent_name() == Some(parent.name())
}

fn first_misplaced<'a, T: TransportService>(ordered: &[&'a T]) -> Option<&'a T> {
    ordered.iter().enumerate().find_map(|(i, child)| {
        ordered[i + 1..]
            .iter()
            .any(|later| is_parent_of(*later, *child))
            .then_some(*child)
    })
}

/// Kahn's algorithm over `n` nodes where an edge `(a, b)` requires `a`
/// before `b`. Among ready nodes the lowest index goes first, so an input
/// that already satisfies every edge is returned unchanged.
///
/// On failure returns the nodes that lie on a cycle, ascending. Nodes only
/// blocked by a cycle they depend on are left out.
pub(crate) fn stable_topological(
    n: usize,
    edges: &[(usize, usize)],
) -> Result<Vec<usize>, Vec<usize>> {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0usize; n];
    for &(from, to) in edges {
        successors[from].push(to);
        in_degree[to] += 1;
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(node) = ready.pop_first() {
        order.push(node);
        for &next in &successors[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.insert(next);
            }
        }
    }

    if order.len() == n {
        Ok(order)
    } else {
        let blocked: Vec<bool> = in_degree.iter().map(|&d| d > 0).collect();
        Err((0..n)
            .filter(|&i| blocked[i] && reaches_itself(i, &successors, &blocked))
            .collect())
    }
}

/// Whether `start` can be reached again by following edges through blocked
/// nodes only. Every node of a cycle stays blocked after Kahn's pass.
fn reaches_itself(start: usize, successors: &[Vec<usize>], blocked: &[bool]) -> bool {
    let mut seen = vec![false; successors.len()];
    let mut stack: Vec<usize> = successors[start].clone();
    while let Some(node) = stack.pop() {
        if node == start {
            return true;
        }
        if !blocked[node] || seen[node] {
            continue;
        }
        seen[node] = true;
        stack.extend(successors[node].iter().copied());
    }
    false
}
