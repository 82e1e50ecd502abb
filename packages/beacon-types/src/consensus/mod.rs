//! This module contains the types associated with the beacon chain consensus layer.

pub mod beacon_block;
pub mod bellatrix;
pub mod bls;
pub mod bootstrap;
pub mod fork;
pub mod light_client_header;
pub mod merkle;
pub mod slot;
pub mod state;
pub mod state_diff;
pub mod store;
pub mod sync_committee;
pub mod trust;
pub mod wrappers;
