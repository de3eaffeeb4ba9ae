//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod onboard_led;
pub mod relay;

pub use onboard_led::OnboardLed;
pub use relay::RelayDriver;
