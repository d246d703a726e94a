pub mod predict;
pub mod reference_catalog;
