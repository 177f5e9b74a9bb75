use strum_macros::Display;

//=====================================================================
// Interpolation schemes used along the transverse momentum axis.
// Spectra fall off roughly exponentially at high pt, where linear
// interpolation in the yield itself would be badly off; there we
// interpolate log(yield) linearly in pt instead.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PtInterpolation {
    LinLin,
    LogLin,
}

impl PtInterpolation {
    // Log-linear only makes sense above the switch point and when both
    // bracketing yields are strictly positive.
    pub fn select(pt: f64, pt_change: f64, y0: f64, y1: f64) -> Self {
        if pt > pt_change && y0 > 0.0 && y1 > 0.0 {
            PtInterpolation::LogLin
        } else {
            PtInterpolation::LinLin
        }
    }

    pub fn interpolate(&self, x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> f64 {
        match self {
            PtInterpolation::LinLin => y0 + (y1 - y0) * (x - x0) / (x1 - x0),
            PtInterpolation::LogLin => y0 * ((x - x0) * (y1 / y0).ln() / (x1 - x0)).exp(),
        }
    }
}
