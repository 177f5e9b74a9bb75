use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::IntoEnumIterator;

use crate::quadrature::GaussOrder;

//=====================================================================
// Gauss-Legendre rule on [-1, 1]. Only the positive half of the
// symmetric node set is stored; node `x` stands for the pair `±x`,
// which share the same weight.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendreRule {
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl GaussLegendreRule {
    // Newton iteration on the Legendre polynomial P_n, starting from the
    // asymptotic estimate of each root.
    fn compute(points: usize) -> Self {
        let n = points as f64;
        let half = points / 2;
        let mut nodes = Vec::with_capacity(half);
        let mut weights = Vec::with_capacity(half);

        for i in 1..=half {
            let mut z = (std::f64::consts::PI * (i as f64 - 0.25) / (n + 0.5)).cos();
            let mut derivative = 0.0;
            for _ in 0..100 {
                // Recurrence for P_n(z), keeping P_{n-1}(z) for the derivative
                let mut p1 = 1.0;
                let mut p2 = 0.0;
                for j in 1..=points {
                    let p3 = p2;
                    p2 = p1;
                    p1 = ((2 * j - 1) as f64 * z * p2 - (j - 1) as f64 * p3) / j as f64;
                }
                derivative = n * (z * p1 - p2) / (z * z - 1.0);
                let previous = z;
                z = previous - p1 / derivative;
                if (z - previous).abs() < 1e-15 {
                    break;
                }
            }
            nodes.push(z);
            weights.push(2.0 / ((1.0 - z * z) * derivative * derivative));
        }

        Self { nodes, weights }
    }
}

lazy_static! {
    static ref GAUSS_LEGENDRE_RULES: HashMap<GaussOrder, GaussLegendreRule> = GaussOrder::iter()
        .map(|order| (order, GaussLegendreRule::compute(order.points())))
        .collect();
}

// Rule for a supported order, built once per process.
pub fn rule(order: GaussOrder) -> &'static GaussLegendreRule {
    &GAUSS_LEGENDRE_RULES[&order]
}
