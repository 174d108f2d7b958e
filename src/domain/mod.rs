pub mod appliance;
pub mod envelope;
pub mod event;
