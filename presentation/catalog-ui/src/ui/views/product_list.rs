use business::domain::product::model::Product;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::page::products_page::ProductsPage;
use crate::query::QueryState;
use crate::ui::components::product_form::ProductForm;

pub fn draw_product_list(frame: &mut Frame, area: Rect, page: &ProductsPage) {
    let products = match page.products_state() {
        QueryState::Idle | QueryState::Loading => {
            draw_centered(frame, area, "Loading...", Style::default().fg(Color::Gray));
            return;
        }
        QueryState::Error(_) => {
            draw_centered(
                frame,
                area,
                "Error loading products",
                Style::default().fg(Color::Red),
            );
            return;
        }
        QueryState::Success(products) => products,
    };

    if products.is_empty() {
        draw_centered(
            frame,
            area,
            "No products yet. Add your first product to get started!",
            Style::default().fg(Color::DarkGray),
        );
        return;
    }

    let heights: Vec<u16> = products
        .iter()
        .map(|product| card_height(page, product))
        .collect();
    let first = first_visible(&heights, page.selected(), area.height);

    let mut y = area.y;
    for (index, product) in products.iter().enumerate().skip(first) {
        let remaining = area.bottom().saturating_sub(y);
        if remaining == 0 {
            break;
        }
        let card_area = Rect::new(area.x, y, area.width, heights[index].min(remaining));
        y += card_area.height;

        match page.editing() {
            Some(session) if session.id == product.id => {
                session.form.render(frame, card_area, "Edit Product");
            }
            _ => draw_card(frame, card_area, page, product, index == page.selected()),
        }
    }
}

fn card_height(page: &ProductsPage, product: &Product) -> u16 {
    if page.editing().is_some_and(|session| session.id == product.id) {
        return ProductForm::height();
    }
    // borders + category, description, price
    let mut height = 5;
    if shows_image(page, product) {
        height += 1;
    }
    height
}

fn shows_image(page: &ProductsPage, product: &Product) -> bool {
    product.image_url.is_some() && !page.is_image_hidden(&product.id)
}

/// Index of the first card to draw so the selected card stays on screen.
fn first_visible(heights: &[u16], selected: usize, available: u16) -> usize {
    let selected = selected.min(heights.len().saturating_sub(1));
    let mut first = 0;
    while first < selected {
        let needed: u32 = heights[first..=selected].iter().map(|h| u32::from(*h)).sum();
        if needed <= u32::from(available) {
            break;
        }
        first += 1;
    }
    first
}

fn draw_card(frame: &mut Frame, area: Rect, page: &ProductsPage, product: &Product, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Blue)
    };
    let block = Block::default()
        .title(format!(" {} ", product.name))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines = vec![Line::from(Span::styled(
        product.category.clone(),
        Style::default().fg(Color::Gray).italic(),
    ))];
    if let Some(image_url) = product.image_url.as_ref().filter(|_| shows_image(page, product)) {
        lines.push(Line::from(vec![
            Span::styled("image ", Style::default().fg(Color::DarkGray)),
            Span::styled(image_url.clone(), Style::default().fg(Color::Magenta)),
        ]));
    }
    lines.push(Line::from(product.description.clone()));
    lines.push(Line::from(Span::styled(
        format!("${}", product.price),
        Style::default().fg(Color::Green).bold(),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        line_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_at_top_when_everything_fits() {
        assert_eq!(first_visible(&[5, 5, 5], 2, 20), 0);
    }

    #[test]
    fn should_scroll_to_keep_selection_visible() {
        assert_eq!(first_visible(&[5, 5, 5, 5], 3, 11), 2);
    }

    #[test]
    fn should_handle_empty_list() {
        assert_eq!(first_visible(&[], 0, 10), 0);
    }
}
