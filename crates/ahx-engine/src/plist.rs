//! Performance list command decoding.
//!
//! The song player and the synth voice run the same eight PList commands
//! but apply them to different state, so decoding lives here and each
//! owner matches on the result.

/// Volume register targeted by PList command 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeTarget {
    Note,
    PerfSub,
    TrackMaster,
}

/// A decoded PList command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlistCommand {
    /// Set the filter position (revision 1 only)
    SetFilter(i32),
    SlideUp(i32),
    SlideDown(i32),
    /// Set the square position, in 0x00-0xff square units
    InitSquare(i32),
    /// Toggle the square and/or filter sweeps. `Some(sign)` toggles that sweep.
    /// The sign sets the filter sweep's direction; the square sweep keeps its own.
    ToggleModulation {
        square: Option<i32>,
        filter: Option<i32>,
    },
    Jump(i32),
    Volume(VolumeTarget, i32),
    Speed(i32),
}

impl PlistCommand {
    /// Decode command `fx` with parameter `param` for a song of `revision`.
    ///
    /// Returns `None` for commands that do nothing with this parameter.
    pub fn decode(fx: u8, param: u8, revision: u8) -> Option<Self> {
        let p = param as i32;
        match fx & 7 {
            0 => (revision > 0 && p != 0).then_some(PlistCommand::SetFilter(p)),
            1 => Some(PlistCommand::SlideUp(p)),
            2 => Some(PlistCommand::SlideDown(p)),
            3 => Some(PlistCommand::InitSquare(p)),
            4 => {
                if revision == 0 || p == 0 {
                    return Some(PlistCommand::ToggleModulation {
                        square: Some(1),
                        filter: None,
                    });
                }
                let square = (p & 0x0f != 0).then_some(if p & 0x0f == 0x0f { -1 } else { 1 });
                let filter = (p & 0xf0 != 0).then_some(if p & 0xf0 == 0xf0 { -1 } else { 1 });
                Some(PlistCommand::ToggleModulation { square, filter })
            }
            5 => Some(PlistCommand::Jump(p)),
            6 => decode_volume(p),
            _ => Some(PlistCommand::Speed(p)),
        }
    }
}

fn decode_volume(p: i32) -> Option<PlistCommand> {
    if p <= 0x40 {
        return Some(PlistCommand::Volume(VolumeTarget::Note, p));
    }
    let sub = p - 0x50;
    if (0..=0x40).contains(&sub) {
        return Some(PlistCommand::Volume(VolumeTarget::PerfSub, sub));
    }
    let master = p - 0xa0;
    (0..=0x40)
        .contains(&master)
        .then_some(PlistCommand::Volume(VolumeTarget::TrackMaster, master))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_command_needs_revision_one() {
        assert_eq!(PlistCommand::decode(0, 20, 0), None);
        assert_eq!(PlistCommand::decode(0, 0, 1), None);
        assert_eq!(PlistCommand::decode(0, 20, 1), Some(PlistCommand::SetFilter(20)));
    }

    #[test]
    fn modulation_toggle_nibbles() {
        let square_only = PlistCommand::ToggleModulation {
            square: Some(1),
            filter: None,
        };
        assert_eq!(PlistCommand::decode(4, 0x37, 0), Some(square_only));
        assert_eq!(PlistCommand::decode(4, 0, 1), Some(square_only));
        assert_eq!(
            PlistCommand::decode(4, 0xf1, 1),
            Some(PlistCommand::ToggleModulation {
                square: Some(1),
                filter: Some(-1),
            })
        );
        assert_eq!(
            PlistCommand::decode(4, 0x1f, 1),
            Some(PlistCommand::ToggleModulation {
                square: Some(-1),
                filter: Some(1),
            })
        );
        assert_eq!(
            PlistCommand::decode(4, 0x20, 1),
            Some(PlistCommand::ToggleModulation {
                square: None,
                filter: Some(1),
            })
        );
    }

    #[test]
    fn volume_ranges() {
        use VolumeTarget::*;
        assert_eq!(PlistCommand::decode(6, 0x40, 0), Some(PlistCommand::Volume(Note, 0x40)));
        assert_eq!(PlistCommand::decode(6, 0x45, 0), None);
        assert_eq!(PlistCommand::decode(6, 0x60, 0), Some(PlistCommand::Volume(PerfSub, 0x10)));
        assert_eq!(PlistCommand::decode(6, 0x95, 0), None);
        assert_eq!(PlistCommand::decode(6, 0xb0, 0), Some(PlistCommand::Volume(TrackMaster, 0x10)));
        assert_eq!(PlistCommand::decode(6, 0xf0, 0), None);
    }

    #[test]
    fn remaining_commands() {
        assert_eq!(PlistCommand::decode(1, 3, 0), Some(PlistCommand::SlideUp(3)));
        assert_eq!(PlistCommand::decode(2, 3, 0), Some(PlistCommand::SlideDown(3)));
        assert_eq!(PlistCommand::decode(3, 0x80, 0), Some(PlistCommand::InitSquare(0x80)));
        assert_eq!(PlistCommand::decode(5, 2, 0), Some(PlistCommand::Jump(2)));
        assert_eq!(PlistCommand::decode(7, 9, 0), Some(PlistCommand::Speed(9)));
    }
}
