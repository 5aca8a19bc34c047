pub mod compute;
pub mod consts;
pub mod dual;
pub mod error;
pub mod filters;
pub mod image;
pub mod io;
pub mod params;
