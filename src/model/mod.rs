// File: ./src/model/mod.rs
pub mod event;
pub mod interval;
pub mod property;

pub use event::{CalendarEvent, ExistingTask, Priority, Recurrence};
pub use interval::TimeInterval;
pub use property::{ParsedProperty, PropertyName};
