pub mod components;
mod views;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::page::products_page::ProductsPage;
use components::product_form::ProductForm;

/// Main draw function
pub fn draw(frame: &mut Frame, page: &ProductsPage) {
    let form_height = if page.is_form_shown() {
        ProductForm::height()
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Header
            Constraint::Length(form_height), // Add form
            Constraint::Min(1),              // Product cards
            Constraint::Length(1),           // Status bar
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], page);

    if page.is_form_shown() {
        page.new_product().render(frame, chunks[1], "Add New Product");
    }

    views::product_list::draw_product_list(frame, chunks[2], page);
    draw_status_bar(frame, chunks[3], page);

    if page.pending_delete().is_some() {
        views::confirm_dialog::draw_confirm_dialog(
            frame,
            frame.area(),
            "Are you sure you want to delete this product? (y/n)",
        );
    }
}

fn draw_header(frame: &mut Frame, area: Rect, page: &ProductsPage) {
    let count = page
        .products_state()
        .data()
        .map(|products| format!(" ({})", products.len()))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(" Products", Style::default().fg(Color::Cyan).bold()),
        Span::styled(count, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, page: &ProductsPage) {
    let (content, style) = if let Some(status) = page.status() {
        (format!(" {}", status), Style::default().fg(Color::Red))
    } else if page.editing().is_some() {
        (
            " Tab:next field  Enter:save  Esc:cancel".to_string(),
            Style::default().fg(Color::Yellow),
        )
    } else if page.is_form_shown() {
        (
            " Tab:next field  Enter:add product  Esc:close".to_string(),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            " a:add  e:edit  d:delete  j/k:nav  q:quit".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let paragraph = Paragraph::new(content).style(Style::default().bg(Color::Black).patch(style));
    frame.render_widget(paragraph, area);
}
