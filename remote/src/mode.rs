use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightMode {
    Manual = 0,
    Stabilized = 1,
    Hybrid = 2,
}

impl FlightMode {
    pub const ALL: [FlightMode; 3] = [FlightMode::Manual, FlightMode::Stabilized, FlightMode::Hybrid];

    /// Numeric id understood by the vehicle
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            FlightMode::Manual => "MANUAL",
            FlightMode::Stabilized => "STABILIZED",
            FlightMode::Hybrid => "HYBRID",
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ids_and_labels() {
        let ids: Vec<u8> = FlightMode::ALL.iter().map(|mode| mode.id()).collect();
        assert_eq!(ids, [0, 1, 2]);
        assert_eq!(FlightMode::Stabilized.to_string(), "STABILIZED");
    }
}
