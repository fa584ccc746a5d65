pub mod sequencer;
pub mod state;
