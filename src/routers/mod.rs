pub mod root;
pub mod wedding;

pub use root::{health_check_route, root_route};
pub use wedding::wedding_routes;
