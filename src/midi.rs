use crate::events::InputEvent;
use crate::timing::{Clock, SessionClock};
use crate::tracker::SharedTracker;
use crate::{Error, Result};
use midir::{Ignore, MidiInput, MidiInputConnection};
use tracing::{info, trace, warn};

const CLIENT_NAME: &str = "etude";

/// Open connection to a MIDI input. Events stop when this is dropped.
pub struct MidiListener {
    _connection: MidiInputConnection<()>,
    port_name: String,
}

impl MidiListener {
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

pub fn list_ports() -> Result<Vec<String>> {
    let midi_in = MidiInput::new(CLIENT_NAME)?;
    Ok(midi_in
        .ports()
        .iter()
        .map(|port| midi_in.port_name(port).unwrap_or_default())
        .collect())
}

/// First port whose name contains `filter`, else the first port.
pub fn select_port(names: &[String], filter: Option<&str>) -> Option<usize> {
    if let Some(filter) = filter {
        if let Some(idx) = names.iter().position(|name| name.contains(filter)) {
            return Some(idx);
        }
        warn!(filter, "no MIDI port matches, falling back to the first one");
    }
    if names.is_empty() { None } else { Some(0) }
}

/// Feeds decoded events into the tracker from midir's callback thread,
/// stamped with the session clock on receipt.
pub fn connect(
    filter: Option<&str>,
    tracker: SharedTracker,
    clock: SessionClock,
) -> Result<MidiListener> {
    let mut midi_in = MidiInput::new(CLIENT_NAME)?;
    midi_in.ignore(Ignore::All);

    let ports = midi_in.ports();
    let names: Vec<String> = ports
        .iter()
        .map(|port| midi_in.port_name(port).unwrap_or_default())
        .collect();
    let idx = select_port(&names, filter).ok_or(Error::NoMidiPort)?;
    let port_name = names[idx].clone();
    info!(port = %port_name, "connecting to MIDI input");

    let connection = midi_in
        .connect(
            &ports[idx],
            "etude-input",
            move |_, message, _| {
                let now = clock.now();
                if let Some(event) = InputEvent::from_bytes(message) {
                    trace!(?event, "midi");
                    tracker.lock().handle(event, now);
                }
            },
            (),
        )
        .map_err(|e| Error::MidiConnect(e.to_string()))?;

    Ok(MidiListener {
        _connection: connection,
        port_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_picks_matching_port() {
        let ports = names(&["Midi Through", "Digital Piano MIDI 1"]);
        assert_eq!(select_port(&ports, Some("Piano")), Some(1));
    }

    #[test]
    fn falls_back_to_first_port() {
        let ports = names(&["Midi Through", "Digital Piano MIDI 1"]);
        assert_eq!(select_port(&ports, Some("APC")), Some(0));
        assert_eq!(select_port(&ports, None), Some(0));
    }

    #[test]
    fn no_ports_means_no_selection() {
        assert_eq!(select_port(&[], Some("Piano")), None);
        assert_eq!(select_port(&[], None), None);
    }
}
