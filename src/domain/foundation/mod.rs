//! Foundation - shared value objects and traits.
//!
//! - `Timestamp` - immutable UTC point in time
//! - `Clock` - injectable time source
//! - `AccountId` - account identifier
//! - `StateMachine` - transition validation for status enums
//! - `ValidationError` - value object construction failures

mod clock;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::ValidationError;
pub use ids::AccountId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
