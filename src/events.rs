/// Decoded input from a performance device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff { pitch: u8 },
    ControlChange { controller: u8, value: u8 },
    Other,
}

impl InputEvent {
    /// Decodes a raw MIDI message. The channel nibble is ignored and a
    /// note-on with zero velocity is a note-off.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let status = *bytes.first()? & 0xF0;

        match status {
            0x90 => {
                let (pitch, velocity) = data_pair(bytes)?;
                if velocity == 0 {
                    Some(InputEvent::NoteOff { pitch })
                } else {
                    Some(InputEvent::NoteOn { pitch, velocity })
                }
            }
            0x80 => data_pair(bytes).map(|(pitch, _)| InputEvent::NoteOff { pitch }),
            0xB0 => data_pair(bytes)
                .map(|(controller, value)| InputEvent::ControlChange { controller, value }),
            _ => Some(InputEvent::Other),
        }
    }
}

fn data_pair(bytes: &[u8]) -> Option<(u8, u8)> {
    match bytes {
        [_, a, b, ..] => Some((a & 0x7F, b & 0x7F)),
        _ => None,
    }
}
