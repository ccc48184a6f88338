pub mod ledger;
pub mod registry;

pub use ledger::EnergyLedgerService;
pub use registry::DeviceRegistryService;
