pub mod slot_time;
pub mod state;
