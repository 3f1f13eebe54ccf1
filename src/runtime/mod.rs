//! Application lifecycle: startup wiring and the server run loop

pub mod lifetime;
pub mod modes;
