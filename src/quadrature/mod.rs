mod gauss_order;
mod gauss_legendre;
mod integrate;

pub use gauss_order::GaussOrder;
pub use gauss_legendre::{GaussLegendreRule, rule};
pub use integrate::{Integrand, integrate};
