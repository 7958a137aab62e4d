//! Application services (driving ports).

pub mod light_state_service;
