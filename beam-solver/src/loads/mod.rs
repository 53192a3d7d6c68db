//! Point loads and distributed pressure loads

mod point_load;
mod pressure;

pub use point_load::{assemble_point_loads, point_load_energy, resolve_point_loads, PointLoad};
pub use pressure::{
    parse_pressure_text, parse_pressure_tokens, PressureFunction, PressureRegistry, ScalarFunc,
    ScalarFuncHandle,
};
