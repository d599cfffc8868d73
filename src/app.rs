use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use crate::{
    components::{FeedColumn, StatusBar},
    config::Config,
    core::{msg::Msg, state::AppState, update::update},
    fetcher::{CmdExecutor, NotificationSource},
    tui,
};

/// The application runner: owns the state, drains terminal events into
/// messages, runs them through the update function, and hands the resulting
/// commands to the executor.
pub struct App {
    pub config: Config,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub state: AppState,
    source: Arc<dyn NotificationSource>,
}

impl App {
    pub fn new(
        config: Config,
        tick_rate: f64,
        frame_rate: f64,
        source: Arc<dyn NotificationSource>,
    ) -> Result<Self> {
        let state = AppState::new(&config);
        Ok(Self {
            config,
            tick_rate,
            frame_rate,
            state,
            source,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();

        let mut tui = tui::Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate);
        tui.enter()?;

        let executor = CmdExecutor::new(Arc::clone(&self.source), msg_tx.clone());

        // Populate every configured column once on startup
        for column in &self.state.columns {
            msg_tx.send(Msg::Refresh {
                column_id: column.id.clone(),
            })?;
        }

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => msg_tx.send(Msg::Quit)?,
                    tui::Event::Render => self.draw(&mut tui)?,
                    tui::Event::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.draw(&mut tui)?;
                    }
                    tui::Event::Key(key) => {
                        if let Some(msg) = self.map_key(key) {
                            msg_tx.send(msg)?;
                        }
                    }
                    _ => {}
                }
            }

            while let Ok(msg) = msg_rx.try_recv() {
                if !msg.is_frequent() {
                    log::debug!("{msg:?}");
                }
                let (new_state, cmds) = update(msg, self.state.clone());
                self.state = new_state;
                executor.execute_all(cmds);
            }

            if self.state.system.should_suspend {
                tui.suspend()?;
                msg_tx.send(Msg::Resume)?;
                tui = tui::Tui::new()?
                    .tick_rate(self.tick_rate)
                    .frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.state.system.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn draw(&self, tui: &mut tui::Tui) -> Result<()> {
        let state = &self.state;
        tui.draw(|f| {
            let area = f.area();
            FeedColumn::new().view(state, f, area);
            StatusBar::new().view(state, f, area);
        })?;
        Ok(())
    }

    /// Maps a key press to a domain message. Fetch triggers target the
    /// active column.
    fn map_key(&self, key: KeyEvent) -> Option<Msg> {
        let column_id = self.state.active_column().map(|column| column.id.clone());
        match key.code {
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Msg::Suspend)
            }
            KeyCode::Char('q') => Some(Msg::Quit),
            KeyCode::Char('r') => column_id.map(|column_id| Msg::Refresh { column_id }),
            KeyCode::Char('m') => column_id.map(|column_id| Msg::FetchNextPage {
                column_id,
                per_page: None,
            }),
            KeyCode::Char('C') => column_id.map(|column_id| Msg::ClearColumn { column_id }),
            KeyCode::Char('p') => Some(Msg::SetPrivateAccess(!self.state.user.has_private_access)),
            KeyCode::Char('j') | KeyCode::Down => Some(Msg::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Msg::ScrollUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Msg::ScrollToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Msg::ScrollToBottom),
            KeyCode::Tab => Some(Msg::NextColumn),
            KeyCode::BackTab => Some(Msg::PrevColumn),
            KeyCode::Esc => Some(Msg::Select(None)),
            _ => None,
        }
    }
}
