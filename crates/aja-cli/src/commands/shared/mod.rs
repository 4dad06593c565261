pub mod filters;
pub mod kpis;
pub mod limit;
pub mod rows;
