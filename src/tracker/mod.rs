pub mod clock;
pub mod display_loop;
pub mod selection;
pub mod state;
