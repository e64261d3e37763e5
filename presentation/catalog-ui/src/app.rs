use std::io::stdout;
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::event::{Event, EventHandler};
use crate::page::products_page::ProductsPage;
use crate::setup::dependency_injection::DependencyContainer;
use crate::ui;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Terminal session hosting the products page
pub struct App {
    page: ProductsPage,
    events: EventHandler,
}

impl App {
    pub fn new(container: DependencyContainer) -> Self {
        let events = EventHandler::new(TICK_RATE, container.products_api.subscribe());
        let page = ProductsPage::new(container.products_api, container.image_probe);
        Self { page, events }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        let restored = disable_raw_mode()
            .and_then(|_| stdout().execute(LeaveAlternateScreen).map(|_| ()));
        result?;
        restored?;
        Ok(())
    }

    async fn event_loop(&mut self) -> anyhow::Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        self.page.mount();
        tracing::info!("products page mounted");

        while !self.page.should_quit() {
            terminal.draw(|frame| ui::draw(frame, &self.page))?;

            match self.events.next().await {
                Some(Event::Key(key)) => self.page.handle_key(key).await,
                Some(Event::Tick) => {
                    self.page.tick();
                }
                Some(Event::ProductsInvalidated) => self.page.on_products_invalidated(),
                None => break,
            }
        }

        Ok(())
    }
}
