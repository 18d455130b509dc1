pub mod app_config;
pub mod proxy;
pub mod static_files;
