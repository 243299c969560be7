pub mod analog_clock;

pub use analog_clock::AnalogClock;
