#[allow(non_snake_case)]
pub mod Aqueous;
#[allow(non_snake_case)]
pub mod Balancer;
#[allow(non_snake_case)]
pub mod Examples;
pub mod cli;
pub mod engine_api;
pub mod errors;
pub mod molar_mass_api;
pub mod result_cache;
pub mod settings;
