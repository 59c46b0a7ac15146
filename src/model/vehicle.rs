use serde::{Deserialize, Serialize};

/// A selectable vehicle, as returned by the vehicle list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub registration: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl Vehicle {
    /// Selector label, e.g. `AB12 CDE (2019 Ford Transit)`.
    pub fn label(&self) -> String {
        format!(
            "{} ({} {} {})",
            self.registration, self.year, self.make, self.model
        )
    }
}

/// Reference data for the vehicle selector.
///
/// A failed load is kept as [`VehicleDirectory::Unavailable`] so the form can
/// say why there is nothing to pick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VehicleDirectory {
    #[default]
    Loading,
    Loaded(Vec<Vehicle>),
    Unavailable(String),
}

impl VehicleDirectory {
    /// Returns the loaded vehicles, or an empty slice.
    pub fn vehicles(&self) -> &[Vehicle] {
        match self {
            Self::Loaded(vehicles) => vehicles.as_slice(),
            Self::Loading | Self::Unavailable(_) => &[],
        }
    }

    /// Looks up a vehicle by id.
    pub fn find(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles().iter().find(|v| v.id == id)
    }

    /// Returns the option after (or before) `current` in the selector.
    ///
    /// The placeholder (`None`) sits before the first vehicle and the
    /// sequence wraps around. An unknown `current` is treated as the
    /// placeholder.
    pub fn cycle(&self, current: Option<&str>, forward: bool) -> Option<&Vehicle> {
        let vehicles = self.vehicles();
        let slots = vehicles.len() + 1;
        let pos = current
            .and_then(|id| vehicles.iter().position(|v| v.id == id))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (pos + 1) % slots
        } else {
            (pos + slots - 1) % slots
        };
        next.checked_sub(1).map(|i| &vehicles[i])
    }
}
