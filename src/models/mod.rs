pub mod device;
pub mod energy;

pub use device::Device;
pub use energy::{EnergyRecord, Event, MonthlyAggregate, NewEnergyRecord, UsageQueryParams};
