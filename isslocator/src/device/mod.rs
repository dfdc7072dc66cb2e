//! Device and orientation collaborator.
//!
//! The tracker only asks two questions of the device: is it handheld, and is
//! it currently in portrait. A handheld device in portrait cannot show the
//! map, so tracking pauses until it is rotated back.

use std::fmt;

/// Screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Derive orientation from surface dimensions. Square counts as landscape.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::Portrait => write!(f, "portrait"),
        }
    }
}

/// Device capabilities queried by the tracker on every tick.
pub trait DeviceProfile: Send + Sync {
    fn is_handheld_device(&self) -> bool;

    fn is_portrait_orientation(&self) -> bool;

    /// True when tracking must pause until the device is rotated.
    fn requires_rotation(&self) -> bool {
        self.is_handheld_device() && self.is_portrait_orientation()
    }
}

/// A desktop: never handheld, always landscape.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopDevice;

impl DeviceProfile for DesktopDevice {
    fn is_handheld_device(&self) -> bool {
        false
    }

    fn is_portrait_orientation(&self) -> bool {
        false
    }
}
