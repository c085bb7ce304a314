pub mod collector;
pub mod config;
pub mod declaration;
pub mod error;
pub mod format;
pub mod generator;
pub mod models;
pub mod overrides;
pub mod parameters;
pub mod path_params;
pub mod postman;
pub mod responses;
pub mod route;
pub mod swagger;
