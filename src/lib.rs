pub mod api;
pub mod config;
pub mod data_models;
pub mod pagination;
pub mod searcher;
pub mod views;
