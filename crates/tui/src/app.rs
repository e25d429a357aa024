use std::time::{Duration, Instant};

use algoviz_core::{AlgorithmKind, Dataset, PlaybackController, Renderer, Session};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::backend::Backend;

use crate::renderer::TerminalRenderer;

/// How long to block on input while nothing is playing.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Host loop: input, timer and drawing all happen on this one thread.
pub struct App<B: Backend> {
    session: Session,
    renderer: TerminalRenderer<B>,
    quit: bool,
}

impl<B: Backend> App<B> {
    pub fn new(session: Session, renderer: TerminalRenderer<B>) -> Self {
        Self {
            session,
            renderer,
            quit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        self.refresh_chrome();
        self.show_idle();

        while !self.quit {
            let timeout = self
                .session
                .time_until_tick(Instant::now())
                .unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Resize(..) => self.renderer.redraw(),
                    _ => {}
                }
            }
            self.session.tick(Instant::now(), &mut self.renderer);
            self.renderer
                .take_error()
                .context("drawing to the terminal")?;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let now = Instant::now();
        self.renderer.chrome_mut().message = None;

        let result = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
                Ok(())
            }
            KeyCode::Char(' ') => {
                if self.session.playback().is_some() {
                    self.with_playback(|p, r| p.toggle(now, r));
                    Ok(())
                } else {
                    self.start(now)
                }
            }
            KeyCode::Enter => self.start(now),
            KeyCode::Right | KeyCode::Char('l') => {
                self.with_playback(|p, r| p.step_forward(r));
                Ok(())
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.with_playback(|p, r| p.step_back(r));
                Ok(())
            }
            KeyCode::Home => {
                self.with_playback(|p, r| p.jump_to_start(r));
                Ok(())
            }
            KeyCode::End => {
                self.with_playback(|p, r| p.jump_to_end(r));
                Ok(())
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.set_delay(self.session.delay() / 2);
                Ok(())
            }
            KeyCode::Char('-') => {
                self.session.set_delay(self.session.delay() * 2);
                Ok(())
            }
            KeyCode::Char('g') => self.session.generate_next().map(|()| self.show_idle()),
            KeyCode::Tab => {
                self.session.set_algorithm(self.session.algorithm().next());
                self.show_idle();
                Ok(())
            }
            KeyCode::Char('s') => {
                self.session.cycle_start_node();
                self.show_idle();
                Ok(())
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.show_idle();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            log::warn!("{err}");
            self.renderer.chrome_mut().message = Some(err.to_string());
        }
        self.refresh_chrome();
        self.renderer.redraw();
    }

    #[cfg(test)]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn start(&mut self, now: Instant) -> algoviz_core::Result<()> {
        self.session.run(now, &mut self.renderer).inspect_err(|_| {
            self.show_idle();
        })
    }

    fn with_playback(&mut self, f: impl FnOnce(&mut PlaybackController, &mut dyn Renderer)) {
        if let Some(playback) = self.session.playback_mut() {
            f(playback, &mut self.renderer);
        }
    }

    fn show_idle(&mut self) {
        self.refresh_chrome();
        self.renderer.show_idle(self.session.idle_snapshot());
    }

    fn refresh_chrome(&mut self) {
        let session = &self.session;
        let data = match session.data() {
            Dataset::Array(values) => format!("{} values", values.len()),
            Dataset::Graph(graph) => format!(
                "{} nodes, {} edges, start {}",
                graph.node_count(),
                graph.edge_count(),
                session.start_node()
            ),
        };
        let chrome = self.renderer.chrome_mut();
        chrome.title = format!(
            " algoviz  {}  |  {data}  |  seed {}",
            session.algorithm(),
            session.seed()
        );
        chrome.graph = match session.algorithm().kind() {
            AlgorithmKind::Traversal => session.data().as_graph().cloned(),
            AlgorithmKind::Sort => None,
        };
        chrome.delay_ms = session.delay().as_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Algorithm, PlaybackState, SessionConfig};
    use ratatui::{Terminal, backend::TestBackend};

    fn app(config: SessionConfig) -> App<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
        let session = Session::new(config).expect("session");
        App::new(session, TerminalRenderer::new(terminal))
    }

    fn state(app: &App<TestBackend>) -> Option<(usize, PlaybackState)> {
        app.session().playback().map(|p| (p.position(), p.state()))
    }

    /// The progress row of the status bar on an 80x24 screen.
    fn progress_line(app: &App<TestBackend>) -> String {
        let buf = app.renderer.terminal().backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, 21)].symbol()).collect()
    }

    #[test]
    fn status_bar_follows_play_and_pause() {
        let mut app = app(SessionConfig::default());
        app.handle_key(KeyCode::Enter);
        assert!(progress_line(&app).contains("Playing"), "{}", progress_line(&app));
        app.handle_key(KeyCode::Char(' '));
        assert!(progress_line(&app).contains("Paused"), "{}", progress_line(&app));
        app.handle_key(KeyCode::Char(' '));
        assert!(progress_line(&app).contains("Playing"), "{}", progress_line(&app));
        app.handle_key(KeyCode::Right);
        assert!(progress_line(&app).contains("frame 2/"), "{}", progress_line(&app));
        assert!(progress_line(&app).contains("Paused"));
    }

    #[test]
    fn space_runs_then_pauses() {
        let mut app = app(SessionConfig::default());
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(state(&app), Some((0, PlaybackState::Playing)));
        app.handle_key(KeyCode::Char(' '));
        assert_eq!(state(&app), Some((0, PlaybackState::Paused)));
    }

    #[test]
    fn stepping_and_jumping() {
        let mut app = app(SessionConfig::default());
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('l'));
        assert_eq!(state(&app), Some((2, PlaybackState::Paused)));
        app.handle_key(KeyCode::Left);
        assert_eq!(state(&app).map(|s| s.0), Some(1));
        app.handle_key(KeyCode::End);
        let last = app.session().playback().map(|p| p.len() - 1);
        assert_eq!(state(&app).map(|s| s.0), last);
        app.handle_key(KeyCode::Home);
        assert_eq!(state(&app).map(|s| s.0), Some(0));
    }

    #[test]
    fn speed_keys_change_delay() {
        let mut app = app(SessionConfig::default());
        let before = app.session().delay();
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.session().delay(), before / 2);
        app.handle_key(KeyCode::Char('-'));
        app.handle_key(KeyCode::Char('-'));
        assert_eq!(app.session().delay(), before * 2);
    }

    #[test]
    fn tab_switches_algorithm_and_cancels() {
        let mut app = app(SessionConfig::default());
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.session().algorithm(), Algorithm::Selection);
        assert!(app.session().playback().is_none());
    }

    #[test]
    fn new_data_and_start_node() {
        let mut app = app(SessionConfig {
            algorithm: Algorithm::Bfs,
            size: 6,
            ..SessionConfig::default()
        });
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.session().seed(), 1);
        assert_eq!(app.session().data().len(), 6);
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.session().start_node(), 1);
        app.handle_key(KeyCode::Enter);
        assert_eq!(state(&app).map(|s| s.1), Some(PlaybackState::Playing));
        app.handle_key(KeyCode::Char('r'));
        assert!(app.session().playback().is_none());
    }

    #[test]
    fn quit_keys() {
        let mut app = app(SessionConfig::default());
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit());
    }
}
