// StateBeacon — Task Modules

pub mod device;
pub mod scenario;
pub mod sensor;
