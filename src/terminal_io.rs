use std::collections::HashMap;
use std::io;
use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::error;

use crate::constants::{DEBUG_FLAP_INTERVAL, DEBUG_RESTART_INTERVAL};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Flap,
    Restart,
    Resize(u16, u16),
}

/// Translates a raw terminal event. Key releases and unbound keys map to `None`.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Resize(width, height) => Some(InputEvent::Resize(*width, *height)),
        _ => None,
    }
}

fn map_key(key_event: &KeyEvent) -> Option<InputEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(' ') | KeyCode::Up => Some(InputEvent::Flap),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::Restart),
        _ => None,
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Flaps on a steady rhythm, presses restart now and then, and quits at `max_frames`.
    pub fn scripted(max_frames: u64) -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        for frame in (1..max_frames).step_by(DEBUG_FLAP_INTERVAL as usize) {
            events.entry(frame).or_default().push(Event::Key(KeyCode::Char(' ').into()));
        }
        for frame in (DEBUG_RESTART_INTERVAL..max_frames).step_by(DEBUG_RESTART_INTERVAL as usize) {
            events.entry(frame).or_default().push(Event::Key(KeyCode::Char('r').into()));
        }
        events.entry(max_frames).or_default().push(Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> Vec<Event> {
        self.events.remove(&frame_count).unwrap_or_default()
    }
}

// --- InputSource: the real terminal or a script ---
pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl InputSource {
    /// Drains every event pending for this frame without blocking.
    pub fn poll_events(&mut self, frame_count: u64) -> io::Result<Vec<InputEvent>> {
        let raw = match self {
            InputSource::Simulated(sim_input) => sim_input.poll(frame_count),
            InputSource::Terminal => {
                let mut raw = Vec::new();
                while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    raw.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
                }
                raw
            }
        };
        Ok(raw.iter().filter_map(map_event).collect())
    }
}
