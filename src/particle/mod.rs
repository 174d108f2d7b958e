mod client;
mod controller;
mod device_get;
mod discoverer;
mod map_appliances;
#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ParticleClient, ParticleClientError};
pub use controller::{ControlError, set_power};
pub use discoverer::{DiscoverError, discover};
