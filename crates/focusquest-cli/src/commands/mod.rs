pub mod badges;
pub mod config;
pub mod stats;
pub mod timer;
