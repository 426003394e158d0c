//! Military units stationed on a tile

/// An army record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Army {
    /// Grid column
    pub x: i32,
    /// Grid row
    pub y: i32,
    /// Infantry unit count
    pub infantry: i32,
    /// Artillery unit count (not stored before format version 2)
    pub artillery: i32,
    pub morale: f32,
}

impl Army {
    pub fn new(x: i32, y: i32, infantry: i32, artillery: i32, morale: f32) -> Self {
        Self {
            x,
            y,
            infantry,
            artillery,
            morale,
        }
    }
}

/// One army slot of a tile (infantry or artillery).
///
/// Files older than format version 3 mark artillery as present without
/// storing its record; that case decodes to [`ArmySlot::Unrecorded`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArmySlot {
    #[default]
    Empty,
    Present(Army),
    Unrecorded,
}

impl ArmySlot {
    pub fn is_present(&self) -> bool {
        !matches!(self, ArmySlot::Empty)
    }

    /// The army record, when one was stored.
    pub fn army(&self) -> Option<&Army> {
        match self {
            ArmySlot::Present(army) => Some(army),
            _ => None,
        }
    }
}

impl From<Option<Army>> for ArmySlot {
    fn from(army: Option<Army>) -> Self {
        match army {
            Some(army) => ArmySlot::Present(army),
            None => ArmySlot::Empty,
        }
    }
}
