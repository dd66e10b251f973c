//! Pollutant event-mean concentrations (EMC) by NLCD reference class.
//!
//! Concentrations are in mg/L of stormwater runoff. Classes absent from
//! the table (none, with the built-in land-cover set) fail the lookup.

/// The pollutants tracked by the water-quality step.
pub const POLLUTANTS: [&str; 4] = ["tn", "tp", "bod", "tss"];

#[derive(Debug, Clone, Copy)]
pub(crate) struct EmcRecord {
    pub tn: f64,
    pub tp: f64,
    pub bod: f64,
    pub tss: f64,
}

impl EmcRecord {
    pub(crate) fn concentration(&self, pollutant: &str) -> Option<f64> {
        match pollutant {
            "tn" => Some(self.tn),
            "tp" => Some(self.tp),
            "bod" => Some(self.bod),
            "tss" => Some(self.tss),
            _ => None,
        }
    }
}

const fn emc(tn: f64, tp: f64, bod: f64, tss: f64) -> EmcRecord {
    EmcRecord { tn, tp, bod, tss }
}

/// EMC by NLCD class.
pub(crate) const POLLUTION_LOADS: &[(u8, EmcRecord)] = &[
    (11, emc(0.0, 0.0, 0.0, 0.0)),
    (21, emc(2.26, 0.32, 5.7, 53.1)),
    (22, emc(2.58, 0.38, 8.4, 69.6)),
    (23, emc(2.82, 0.43, 10.5, 94.6)),
    (24, emc(3.22, 0.47, 13.2, 115.0)),
    (31, emc(1.20, 0.15, 2.0, 70.0)),
    (41, emc(1.05, 0.13, 1.0, 39.0)),
    (42, emc(1.05, 0.13, 1.0, 39.0)),
    (43, emc(1.05, 0.13, 1.0, 39.0)),
    (52, emc(1.10, 0.14, 1.0, 45.0)),
    (71, emc(1.25, 0.21, 1.4, 48.8)),
    (81, emc(2.50, 0.30, 4.0, 55.3)),
    (82, emc(3.47, 0.42, 5.4, 107.0)),
    (90, emc(1.10, 0.14, 1.0, 19.0)),
    (95, emc(1.10, 0.14, 1.0, 19.0)),
];
