pub mod brand;
pub mod compliance;
pub mod sync;
pub mod themes;
