pub mod header;
pub mod hints;
pub mod status_bar;
