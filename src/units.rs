//! The catalog of measurement units a value can be shown in.

/// Display metadata for one measurable quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnitDescriptor {
    /// Text shown in the value field before a reading is available.
    pub placeholder: &'static str,
    /// Three character label, space padded so it overwrites any previous label completely.
    pub label: &'static str,
    /// Number of decimal places readings in this unit are shown with.
    pub decimals: u8,
}

/// A unit identifier. The discriminant is the index into the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Unit {
    KiloPascal,
    Bar,
    Celsius,
    Fahrenheit,
    KilometersPerHour,
    MilesPerHour,
    Percent,
    Rpm,
    Volt,
    GramsPerSecond,
    NewtonMeter,
    LitersPerHour,
    Degree,
    Second,
    Minute,
    Liter,
    LitersPerLap,
    Blank,
    /// Sentinel that every out-of-range identifier resolves to.
    Unknown,
}

/// Number of entries in the catalog, the sentinel included.
pub const UNIT_COUNT: usize = 19;

const UNITS: [Unit; UNIT_COUNT] = [
    Unit::KiloPascal,
    Unit::Bar,
    Unit::Celsius,
    Unit::Fahrenheit,
    Unit::KilometersPerHour,
    Unit::MilesPerHour,
    Unit::Percent,
    Unit::Rpm,
    Unit::Volt,
    Unit::GramsPerSecond,
    Unit::NewtonMeter,
    Unit::LitersPerHour,
    Unit::Degree,
    Unit::Second,
    Unit::Minute,
    Unit::Liter,
    Unit::LitersPerLap,
    Unit::Blank,
    Unit::Unknown,
];

macro_rules! unit {
    ($placeholder:expr, $label:expr, $decimals:expr) => {
        UnitDescriptor {
            placeholder: $placeholder,
            label: $label,
            decimals: $decimals,
        }
    };
}

// '#' renders as a degree sign in the smallest font.
static DESCRIPTORS: [UnitDescriptor; UNIT_COUNT] = [
    unit!("-", "kPa", 0),
    unit!("-.--", "bar", 2),
    unit!("-", "#C ", 0),
    unit!("-", "#F ", 0),
    unit!("-", "k/h", 0),
    unit!("-", "mph", 0),
    unit!("-", "%  ", 0),
    unit!("-", "rpm", 0),
    unit!("-.--", "V  ", 2),
    unit!("-", "g/s", 0),
    unit!("-", "Nm ", 0),
    unit!("-", "L/h", 0),
    unit!("-", "#  ", 0),
    unit!("-", "s  ", 0),
    unit!("-", "min", 0),
    unit!("-", "l  ", 0),
    unit!("-", "l/L", 0),
    unit!("-", "   ", 0),
    unit!("-", "   ", 0),
];

impl Unit {
    /// Resolve a raw identifier, clamping anything out of range to `Unit::Unknown`.
    pub fn from_id(id: u8) -> Self {
        UNITS
            .get(id as usize)
            .copied()
            .unwrap_or(Unit::Unknown)
    }

    /// The catalog index of this unit.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn descriptor(self) -> &'static UnitDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn placeholder(self) -> &'static str {
        self.descriptor().placeholder
    }

    pub fn decimals(self) -> u8 {
        self.descriptor().decimals
    }
}

impl From<u8> for Unit {
    fn from(id: u8) -> Self {
        Unit::from_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_catalog_order() {
        for (i, unit) in UNITS.iter().enumerate() {
            assert_eq!(unit.id() as usize, i);
            assert_eq!(Unit::from_id(i as u8), *unit);
        }
    }

    #[test]
    fn out_of_range_clamps_to_sentinel() {
        assert_eq!(Unit::from_id(UNIT_COUNT as u8), Unit::Unknown);
        assert_eq!(Unit::from(200), Unit::Unknown);
        assert_eq!(Unit::from_id(255).label(), "   ");
    }

    #[test]
    fn labels_are_three_wide() {
        for unit in UNITS.iter() {
            assert_eq!(unit.label().len(), 3, "{:?}", unit);
        }
    }

    #[test]
    fn precision() {
        assert_eq!(Unit::Bar.decimals(), 2);
        assert_eq!(Unit::Volt.decimals(), 2);
        assert_eq!(Unit::Volt.placeholder(), "-.--");
        assert_eq!(Unit::KiloPascal.decimals(), 0);
        assert_eq!(Unit::Celsius.label(), "#C ");
    }
}
