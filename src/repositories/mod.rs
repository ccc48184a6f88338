pub mod aggregates;
pub mod devices;
pub mod events;
pub mod records;

pub use aggregates::MonthlyAggregateRepository;
pub use devices::DeviceRepository;
pub use events::EventRepository;
pub use records::EnergyRecordRepository;
