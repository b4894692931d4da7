pub mod input_spec;
pub mod input_spec_interior_design;
