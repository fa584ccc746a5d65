pub mod event_loop;
pub mod handle;
pub mod scope;
pub mod signal;
