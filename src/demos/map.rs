use std::collections::HashSet;

use rand::Rng;

use crate::csp::{different, Csp, Variable, VariableId};

/// Parameters for [`generate_map`].
pub struct MapConfig {
    pub num_regions: usize,
    pub colors: usize,
    /// Extra edges added on top of the spanning chain, to thicken the
    /// graph past a tree and exercise the cutset solver.
    pub extra_edges: usize,
}

/// Builds a CSP standing in for a random planar map: `num_regions`
/// points in the unit square are connected into a nearest-neighbor
/// spanning chain (so the graph is at least connected), then
/// `extra_edges` additional random borders are added to give the
/// cutset solver a non-trivial residual. Each region gets a `different`
/// constraint against every border neighbour.
///
/// This stands in for the original's segment-intersection planarity
/// check, which is a plotting concern with no bearing on solver
/// behavior.
pub fn generate_map<R: Rng + ?Sized>(config: &MapConfig, rng: &mut R) -> Csp<usize> {
    let points: Vec<(f64, f64)> = (0..config.num_regions)
        .map(|_| (rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();

    let mut csp = Csp::new();
    let ids: Vec<VariableId> = (0..config.num_regions)
        .map(|i| {
            let var = Variable::new(format!("R{i}"), 0..config.colors);
            let id = var.id();
            csp.add_variable(var);
            id
        })
        .collect();

    let mut edges = spanning_chain(&points);
    let mut attempts = 0;
    while edges.len() - (config.num_regions.saturating_sub(1)) < config.extra_edges
        && attempts < config.extra_edges * 10 + 10
    {
        attempts += 1;
        if config.num_regions < 2 {
            break;
        }
        let a = rng.gen_range(0..config.num_regions);
        let b = rng.gen_range(0..config.num_regions);
        if a == b {
            continue;
        }
        edges.insert((a.min(b), a.max(b)));
    }

    for (a, b) in edges {
        let name = format!("border-{a}-{b}");
        csp.add_binary_constraint(ids[a], different(name), ids[b], false).unwrap();
    }
    csp
}

/// Connects every point to its nearest not-yet-visited point, starting
/// from point 0, producing a spanning chain over all points.
fn spanning_chain(points: &[(f64, f64)]) -> HashSet<(usize, usize)> {
    let mut edges = HashSet::new();
    if points.len() < 2 {
        return edges;
    }
    let mut visited = vec![false; points.len()];
    let mut chain = vec![0];
    visited[0] = true;
    for _ in 1..points.len() {
        let last = *chain.last().unwrap();
        let next = (0..points.len())
            .filter(|&i| !visited[i])
            .min_by(|&a, &b| {
                distance(points[last], points[a])
                    .partial_cmp(&distance(points[last], points[b]))
                    .unwrap()
            })
            .unwrap();
        visited[next] = true;
        edges.insert((last.min(next), last.max(next)));
        chain.push(next);
    }
    edges
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}
