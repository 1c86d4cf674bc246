pub mod backup;
pub mod countdown;
pub mod log;
pub mod next;
pub mod normalize;
pub mod scan;
pub mod schedule;
pub mod start;
pub mod state;
