pub mod crud_panel;
pub mod fields;
pub mod registration;
