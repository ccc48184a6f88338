pub mod devices;
pub mod health;
pub mod usage;

use std::sync::Arc;

use crate::{
    repositories::DeviceRepository,
    services::{DeviceRegistryService, EnergyLedgerService},
};

#[derive(Clone)]
pub struct AppState {
    pub registry: DeviceRegistryService,
    pub ledger: EnergyLedgerService,
    pub devices: Arc<DeviceRepository>,
    pub jwt_secret: String,
}
