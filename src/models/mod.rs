pub mod column;
pub mod phase;
pub mod sample;
pub mod scan_event;
pub mod table;
