pub mod gauss;
