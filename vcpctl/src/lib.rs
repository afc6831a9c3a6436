//! Monitor control over DDC/CI using MCCS VCP feature codes.
//!
//! The host side of the channel is abstracted as a [`DisplayChannelProvider`];
//! [`Controller`] builds input, USB and KVM switching plus capability probing
//! on top of single get/set exchanges.

mod client;
pub mod codes;
mod controller;
mod delay;
mod error;
#[cfg(test)]
mod fake;
mod probe;
mod provider;
mod registry;
mod types;

pub use client::FeatureClient;
pub use controller::{Controller, ControllerOptions};
pub use delay::{Delay, ThreadDelay};
pub use error::{Error, Result};
pub use probe::CapabilityEntry;
pub use provider::{truncate_description, DisplayChannelProvider, MAX_DESCRIPTION_LEN};
pub use registry::{MonitorHandle, MonitorRegistry};
pub use types::*;
