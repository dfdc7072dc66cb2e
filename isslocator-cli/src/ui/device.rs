//! The terminal as a device profile.

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use isslocator::device::{DeviceProfile, Orientation};

/// Terminal size tracked from resize events.
///
/// Cells are roughly twice as tall as they are wide, so rows count double
/// when deciding orientation.
#[derive(Debug)]
pub struct TerminalDevice {
    handheld: AtomicBool,
    columns: AtomicU16,
    rows: AtomicU16,
}

impl TerminalDevice {
    pub fn new(handheld: bool, columns: u16, rows: u16) -> Self {
        Self {
            handheld: AtomicBool::new(handheld),
            columns: AtomicU16::new(columns),
            rows: AtomicU16::new(rows),
        }
    }

    pub fn resize(&self, columns: u16, rows: u16) {
        self.columns.store(columns, Ordering::Relaxed);
        self.rows.store(rows, Ordering::Relaxed);
    }

    pub fn orientation(&self) -> Orientation {
        let columns = u32::from(self.columns.load(Ordering::Relaxed));
        let rows = u32::from(self.rows.load(Ordering::Relaxed));
        Orientation::from_dimensions(columns, rows * 2)
    }
}

impl DeviceProfile for TerminalDevice {
    fn is_handheld_device(&self) -> bool {
        self.handheld.load(Ordering::Relaxed)
    }

    fn is_portrait_orientation(&self) -> bool {
        self.orientation() == Orientation::Portrait
    }
}
