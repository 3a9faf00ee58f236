//! Interactive loop: winds, chimes, keyboard controls
//!
//! Controls:
//! - W: Start a new wind (greyed out while all four slots are busy)
//! - +/-: More or fewer chimes (resets the field and drops every wind)
//! - C: Cycle chord
//! - M: Mute
//! - 1-9: Speed
//! - Space: Pause
//! - ?: Help
//! - Q/Esc: Quit

use crate::audio::{ChimeSynth, NoteSink, SilentSink};
use crate::canvas::BrailleCanvas;
use crate::colors::{HUD_MUTED, HUD_TEXT};
use crate::config::{SessionConfig, MAX_CHIMES, WORLD_SIZE};
use crate::help::{show_help_modal, PLAY_HELP};
use crate::pool::SLOTS;
use crate::session::Session;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;

/// Runtime state for interactive controls
struct PlayState {
    speed: f32,
    paused: bool,
    muted: bool,
    show_help: bool,
}

/// Something a key asked the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    AddWind,
    MoreChimes,
    FewerChimes,
    NextChord,
}

impl PlayState {
    fn new(initial_speed: f32, muted: bool) -> Self {
        Self {
            speed: initial_speed,
            paused: false,
            muted,
            show_help: false,
        }
    }

    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('m') | KeyCode::Char('M') => self.muted = !self.muted,
            KeyCode::Char('w') | KeyCode::Char('W') => return Action::AddWind,
            KeyCode::Char('+') | KeyCode::Char('=') => return Action::MoreChimes,
            KeyCode::Char('-') | KeyCode::Char('_') => return Action::FewerChimes,
            KeyCode::Char('c') | KeyCode::Char('C') => return Action::NextChord,
            // Number keys: change speed (1=fastest, 9=slowest)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.speed = match c {
                    '1' => 0.01,
                    '2' => 0.02,
                    '3' => 0.03,
                    '4' => 0.04,
                    '5' => 0.05,
                    '6' => 0.07,
                    '7' => 0.1,
                    '8' => 0.15,
                    '9' => 0.2,
                    _ => self.speed,
                };
            }
            _ => {}
        }
        Action::None
    }
}

fn open_audio(mute: bool) -> Option<ChimeSynth> {
    if mute {
        return None;
    }
    match ChimeSynth::open() {
        Ok(synth) => Some(synth),
        Err(e) => {
            tracing::warn!(error = %e, "audio unavailable, chimes will be silent");
            None
        }
    }
}

fn draw_hud(term: &mut Terminal, session: &Session, state: &PlayState) {
    let (_, height) = term.size();
    let config = session.config();
    let winds = session.pool().occupied();

    let status = format!(
        " winds {}/{}  chimes {}  chord {}  rung {}{}{} ",
        winds,
        SLOTS,
        session.field().len(),
        config.chord,
        session.rung(),
        if state.muted { "  [muted]" } else { "" },
        if state.paused { "  [paused]" } else { "" },
    );
    term.set_str(0, 0, &status, Some(HUD_TEXT));

    let hint_color = if session.is_pool_full() { HUD_MUTED } else { HUD_TEXT };
    term.set_str(0, height as i32 - 1, " [w] wind ", Some(hint_color));
    term.set_str(10, height as i32 - 1, " [+/-] chimes  [c] chord  [?] help ", Some(HUD_MUTED));
}

/// Run the interactive animation until the user quits
pub fn run(config: SessionConfig) -> io::Result<()> {
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    tracing::info!(seed, chimes = config.chime_count, generations = config.wind.generations, "session starting");

    let mut state = PlayState::new(config.time_step, config.mute);
    let mut synth = open_audio(config.mute);
    let mut audio_tried = !config.mute;
    let mut silent = SilentSink::default();
    let mut session = Session::new(config, StdRng::seed_from_u64(seed));

    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    let (w, h) = term.size();
    let mut canvas = BrailleCanvas::new(w, h, WORLD_SIZE);

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width as usize, height as usize) != canvas.size() {
            term.resize(width, height);
            term.clear_screen()?;
            canvas = BrailleCanvas::new(width, height, WORLD_SIZE);
        }

        while let Some((code, mods)) = term.check_key()? {
            match state.handle_key(code, mods) {
                Action::Quit => return Ok(()),
                Action::AddWind => {
                    if let Err(e) = session.add_wind() {
                        tracing::debug!(error = %e, "wind request ignored");
                    }
                }
                Action::MoreChimes => {
                    let count = (session.field().len() + 1).min(MAX_CHIMES);
                    session.set_chime_count(count);
                }
                Action::FewerChimes => {
                    let count = session.field().len().saturating_sub(1).max(1);
                    session.set_chime_count(count);
                }
                Action::NextChord => {
                    let chord = session.config().chord.next();
                    session.set_chord(chord);
                }
                Action::None => {}
            }
        }

        if synth.is_none() && !state.muted && !audio_tried {
            audio_tried = true;
            synth = open_audio(false);
        }

        if state.show_help {
            state.show_help = false;
            if show_help_modal(&mut term, PLAY_HELP)? {
                return Ok(());
            }
            term.render()?;
        }

        if state.paused {
            draw_hud(&mut term, &session, &state);
            term.present()?;
            term.sleep(0.1);
            continue;
        }

        let sink: &mut dyn NoteSink = match synth.as_mut() {
            Some(s) if !state.muted => s,
            _ => &mut silent,
        };
        session.frame(sink);

        canvas.clear();
        session.render(&mut canvas);
        term.clear();
        canvas.blit(&mut term);
        draw_hud(&mut term, &session, &state);
        term.present()?;

        term.sleep(state.speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_map_to_actions() {
        let mut state = PlayState::new(0.05, false);
        let none = KeyModifiers::NONE;
        assert_eq!(state.handle_key(KeyCode::Char('w'), none), Action::AddWind);
        assert_eq!(state.handle_key(KeyCode::Char('+'), none), Action::MoreChimes);
        assert_eq!(state.handle_key(KeyCode::Char('-'), none), Action::FewerChimes);
        assert_eq!(state.handle_key(KeyCode::Char('c'), none), Action::NextChord);
        assert_eq!(state.handle_key(KeyCode::Esc, none), Action::Quit);
    }

    #[test]
    fn test_toggles_and_speed() {
        let mut state = PlayState::new(0.05, false);
        state.handle_key(KeyCode::Char(' '), KeyModifiers::NONE);
        state.handle_key(KeyCode::Char('m'), KeyModifiers::NONE);
        assert!(state.paused);
        assert!(state.muted);

        state.handle_key(KeyCode::Char('1'), KeyModifiers::NONE);
        assert!((state.speed - 0.01).abs() < f32::EPSILON);
        state.handle_key(KeyCode::Char('9'), KeyModifiers::NONE);
        assert!((state.speed - 0.2).abs() < f32::EPSILON);
    }
}
