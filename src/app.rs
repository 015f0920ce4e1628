//! Application event loop and input dispatch
//!
//! One cooperative loop owns all state: it redraws, then waits on either a
//! terminal event or a settled search. Searches run in spawned tasks and
//! report back over an mpsc channel as [`AppMessage`]s carrying the
//! [`RequestToken`] of their submission, so the view can discard anything
//! superseded.

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use futures_util::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::client::SearchClient;
use crate::error::SearchError;
use crate::models::SearchResponse;
use crate::ui::{self, HitMap};
use crate::view::{Focus, RequestToken, SearchView};

/// Messages delivered to the event loop from background work.
#[derive(Debug)]
pub enum AppMessage {
    SearchFinished {
        token: RequestToken,
        outcome: Result<SearchResponse, SearchError>,
    },
}

pub struct App {
    pub view: SearchView,
    client: SearchClient,
    hits: HitMap,
    tx: mpsc::Sender<AppMessage>,
    rx: mpsc::Receiver<AppMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(client: SearchClient) -> Self {
        let (tx, rx) = mpsc::channel(16);
        Self {
            view: SearchView::new(),
            client,
            hits: HitMap::default(),
            tx,
            rx,
            should_quit: false,
        }
    }

    /// Drive the UI until the user quits.
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = crossterm::event::EventStream::new();
        while !self.should_quit {
            terminal.draw(|frame| {
                self.hits = ui::draw(frame, &self.view);
            })?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(message) = self.rx.recv() => self.handle_message(message),
            }
        }
        Ok(())
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SearchFinished { token, outcome } => self.view.settle(token, outcome),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.view.selected_document().is_some() {
            match key.code {
                KeyCode::Esc => self.view.close_document(),
                KeyCode::Char('o') => self.open_original(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.view.toggle_focus(),
            KeyCode::Up => self.view.cursor_up(),
            KeyCode::Down => self.view.cursor_down(),
            KeyCode::Enter => match self.view.focus() {
                Focus::Input => self.submit(),
                Focus::Results => self.view.open_highlighted(),
            },
            KeyCode::Char(c) if self.view.focus() == Focus::Input => {
                self.view.input.push(c);
            }
            KeyCode::Backspace if self.view.focus() == Focus::Input => {
                self.view.input.pop();
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        if let Some(modal) = self.hits.modal {
            if ui::hit(modal.close, column, row) {
                self.view.close_document();
            } else if ui::hit(modal.visit, column, row) {
                self.open_original();
            } else if !ui::hit(modal.body, column, row) {
                // Overlay background: dismiss. Clicks inside the body fall
                // through to nothing.
                self.view.close_document();
            }
            return;
        }

        for (rect, index) in self.hits.result_rows.clone() {
            if ui::hit(rect, column, row) {
                self.view.open_document(index);
                return;
            }
        }
    }

    fn submit(&mut self) {
        let Some((query, token)) = self.view.submit() else {
            return;
        };
        tracing::info!(%query, "submitting search");
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.search(&query).await;
            let _ = tx.send(AppMessage::SearchFinished { token, outcome }).await;
        });
    }

    /// Launch the selected document's URL in the system browser. Does not
    /// close the modal.
    fn open_original(&mut self) {
        if let Some(doc) = self.view.selected_document() {
            if let Err(e) = open::that(&doc.url) {
                tracing::warn!(url = %doc.url, error = %e, "failed to open browser");
            }
        }
    }
}
