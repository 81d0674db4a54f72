// Domain layer: core models and ports (interfaces). No dependencies on
// the concrete HTTP source or the CLI.

pub mod model;
pub mod ports;
