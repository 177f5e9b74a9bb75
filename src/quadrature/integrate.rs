use crate::errors::DecayError;
use crate::quadrature::{GaussOrder, rule};

//=====================================================================
// Anything that can be handed to the quadrature. Implementors carry
// their own context (frame kinematics, the parent grid, ...) and must
// not have side effects beyond reading it.
//
// A NaN produced by an integrand is not an error here: it flows into
// the sum and it is up to the caller to police the result. Errors are
// reserved for contract violations raised further down (for example an
// azimuth outside of [0, 2π] reaching the interpolator).
//=====================================================================
pub trait Integrand {
    fn evaluate(&self, x: f64) -> Result<f64, DecayError>;
}

impl<F> Integrand for F
where
    F: Fn(f64) -> Result<f64, DecayError>,
{
    fn evaluate(&self, x: f64) -> Result<f64, DecayError> {
        self(x)
    }
}

// Integrate over [lo, hi] with the Gauss-Legendre rule of the given order,
// evaluating the integrand at order/2 symmetric pairs.
pub fn integrate<I: Integrand + ?Sized>(order: GaussOrder, integrand: &I, lo: f64, hi: f64) -> Result<f64, DecayError> {
    let rule = rule(order);
    let offset = 0.5 * (lo + hi);
    let half_width = 0.5 * (hi - lo);

    let mut sum = 0.0;
    for (node, weight) in rule.nodes.iter().zip(rule.weights.iter()) {
        let dx = half_width * node;
        sum += weight * (integrand.evaluate(offset + dx)? + integrand.evaluate(offset - dx)?);
    }
    Ok(sum * half_width)
}
