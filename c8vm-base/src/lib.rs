//! Core of a CHIP-8 interpreter.
//!
//! [`processor::Processor`] is the fetch-decode-execute engine,
//! [`scheduler::Scheduler`] drives it and the timers at independent rates,
//! and [`runner`] runs both in real time on a dedicated thread.

mod font;
pub mod instruction;
pub mod nibble_ints;
pub mod processor;
pub mod runner;
pub mod scheduler;
pub mod screen;
