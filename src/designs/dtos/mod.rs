pub mod generate_design_dto;
