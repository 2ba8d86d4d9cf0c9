pub mod address_input;
pub mod app;
pub mod map_view;
pub mod results_panel;
