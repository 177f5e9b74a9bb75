//=====================================================================
// Small kinematic helpers shared by the interpolator and the cascade.
//=====================================================================

pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

// Straight line through (x1, f1) and (x2, f2), evaluated at x. Points
// outside of [x1, x2] are extrapolated.
#[inline]
pub fn linear(x1: f64, x2: f64, f1: f64, f2: f64, x: f64) -> f64 {
    f1 + (f2 - f1) * (x - x1) / (x2 - x1)
}

// Pseudorapidity of a particle of the given mass, rapidity and transverse
// momentum. At pt = 0 the particle runs along the beam axis.
pub fn pseudorapidity_from_rapidity(y: f64, pt: f64, mass: f64) -> f64 {
    if pt <= 0.0 {
        return if y == 0.0 { 0.0 } else { y.signum() * f64::INFINITY };
    }
    let mt = (pt * pt + mass * mass).sqrt();
    (mt * y.sinh() / pt).asinh()
}

// Rapidity of a particle of the given mass, pseudorapidity and transverse
// momentum.
pub fn rapidity_from_pseudorapidity(eta: f64, pt: f64, mass: f64) -> f64 {
    let mt = (pt * pt + mass * mass).sqrt();
    if mt <= 0.0 {
        return eta;
    }
    (pt * eta.sinh() / mt).asinh()
}
