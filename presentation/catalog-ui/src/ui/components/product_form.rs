use business::domain::product::model::{Product, ProductChanges};
use business::domain::product::use_cases::create::CreateProductParams;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::input::{InputResult, TextInput};

const LABEL_WIDTH: u16 = 12;

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Price,
    ImageUrl,
    Description,
}

impl Field {
    const ALL: [Field; 5] = [
        Field::Name,
        Field::Category,
        Field::Price,
        Field::ImageUrl,
        Field::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Category => "Category",
            Field::Price => "Price",
            Field::ImageUrl => "Image URL",
            Field::Description => "Description",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Product name",
            Field::Category => "Product category",
            Field::Price => "0.00",
            Field::ImageUrl => "https://example.com/image.jpg",
            Field::Description => "Product description",
        }
    }

    fn index(self) -> usize {
        Field::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// What a key press meant to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Handled,
    NotHandled,
    Submitted,
    Cancelled,
}

/// Scratch buffer for the add and edit flows.
#[derive(Debug, Clone)]
pub struct ProductForm {
    name: TextInput,
    category: TextInput,
    price: TextInput,
    image_url: TextInput,
    description: TextInput,
    focus: Field,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: TextInput::new(),
            category: TextInput::new(),
            price: TextInput::with_value("0"),
            image_url: TextInput::new(),
            description: TextInput::new(),
            focus: Field::Name,
        }
    }
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every field of `product` into a fresh buffer.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: TextInput::with_value(product.name.clone()),
            category: TextInput::with_value(product.category.clone()),
            price: TextInput::with_value(product.price.value().to_string()),
            image_url: TextInput::with_value(product.image_url.clone().unwrap_or_default()),
            description: TextInput::with_value(product.description.clone()),
            focus: Field::Name,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn value(&self, field: Field) -> &str {
        self.input(field).value()
    }

    fn input(&self, field: Field) -> &TextInput {
        match field {
            Field::Name => &self.name,
            Field::Category => &self.category,
            Field::Price => &self.price,
            Field::ImageUrl => &self.image_url,
            Field::Description => &self.description,
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Price => &mut self.price,
            Field::ImageUrl => &mut self.image_url,
            Field::Description => &mut self.description,
        }
    }

    /// Fields the add form refuses to submit without.
    pub fn missing_required(&self) -> Vec<Field> {
        [Field::Name, Field::Category, Field::Price, Field::Description]
            .into_iter()
            .filter(|field| self.input(*field).is_blank())
            .collect()
    }

    /// Unparsable input counts as zero.
    pub fn price(&self) -> f64 {
        self.price.value().trim().parse().unwrap_or(0.0)
    }

    fn image_url(&self) -> Option<String> {
        if self.image_url.is_blank() {
            None
        } else {
            Some(self.image_url.value().trim().to_string())
        }
    }

    pub fn to_create_params(&self) -> CreateProductParams {
        CreateProductParams {
            name: self.name.value().to_string(),
            description: self.description.value().to_string(),
            price: self.price(),
            category: self.category.value().to_string(),
            image_url: self.image_url(),
        }
    }

    /// Every field is sent, so an edit overwrites the whole record.
    pub fn to_changes(&self) -> ProductChanges {
        ProductChanges {
            name: Some(self.name.value().to_string()),
            description: Some(self.description.value().to_string()),
            price: Some(self.price()),
            category: Some(self.category.value().to_string()),
            image_url: Some(self.image_url()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        match key.code {
            KeyCode::Enter => FormKey::Submitted,
            KeyCode::Esc => FormKey::Cancelled,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = Field::ALL[(self.focus.index() + 1) % Field::ALL.len()];
                FormKey::Handled
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = Field::ALL.len();
                self.focus = Field::ALL[(self.focus.index() + len - 1) % len];
                FormKey::Handled
            }
            _ => match self.input_mut(self.focus).handle_key(key) {
                InputResult::Consumed => FormKey::Handled,
                InputResult::NotHandled => FormKey::NotHandled,
            },
        }
    }

    /// Height needed by `render`, borders included.
    pub fn height() -> u16 {
        Field::ALL.len() as u16 + 2
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let lines: Vec<Line> = Field::ALL
            .iter()
            .map(|field| {
                let focused = *field == self.focus;
                let input = self.input(*field);
                let label_style = if focused {
                    Style::default().fg(Color::Yellow).bold()
                } else {
                    Style::default().fg(Color::Gray)
                };

                let mut spans = vec![Span::styled(
                    format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize),
                    label_style,
                )];
                if input.value().is_empty() && !focused {
                    spans.push(Span::styled(
                        field.placeholder(),
                        Style::default().fg(Color::DarkGray),
                    ));
                } else {
                    spans.push(Span::raw(input.value().to_string()));
                }
                Line::from(spans)
            })
            .collect();

        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(lines).block(block), area);

        let row = self.focus.index() as u16;
        let column = LABEL_WIDTH + self.input(self.focus).cursor_position() as u16;
        if row < inner.height && column < inner.width {
            frame.set_cursor_position((inner.x + column, inner.y + row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::product::value_objects::{Price, ProductId};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ProductForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn widget() -> Product {
        Product::from_repository(
            ProductId::new("1700000000000"),
            "Widget".to_string(),
            "A widget".to_string(),
            Price::from_repository(9.99),
            "Tools".to_string(),
            Some("https://example.com/w.png".to_string()),
        )
    }

    #[test]
    fn should_cycle_focus_with_tab_and_back_tab() {
        let mut form = ProductForm::new();

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), Field::Category);

        form.handle_key(key(KeyCode::BackTab));
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), Field::Description);
    }

    #[test]
    fn should_type_into_focused_field() {
        let mut form = ProductForm::new();
        type_text(&mut form, "Widget");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "Tools");

        assert_eq!(form.value(Field::Name), "Widget");
        assert_eq!(form.value(Field::Category), "Tools");
    }

    #[test]
    fn should_treat_unparsable_price_as_zero() {
        let mut form = ProductForm::new();
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Backspace));
        type_text(&mut form, "abc");

        assert_eq!(form.price(), 0.0);
    }

    #[test]
    fn should_report_missing_required_fields() {
        let mut form = ProductForm::new();
        type_text(&mut form, "Widget");

        assert_eq!(
            form.missing_required(),
            vec![Field::Category, Field::Description]
        );
    }

    #[test]
    fn should_copy_product_and_send_every_field_back() {
        let form = ProductForm::from_product(&widget());

        let changes = form.to_changes();

        assert_eq!(changes.name.as_deref(), Some("Widget"));
        assert_eq!(changes.description.as_deref(), Some("A widget"));
        assert_eq!(changes.price, Some(9.99));
        assert_eq!(changes.category.as_deref(), Some("Tools"));
        assert_eq!(
            changes.image_url,
            Some(Some("https://example.com/w.png".to_string()))
        );
    }

    #[test]
    fn should_clear_image_when_buffer_is_blank() {
        let mut form = ProductForm::from_product(&widget());
        for _ in 0..3 {
            form.handle_key(key(KeyCode::Tab));
        }
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));

        assert_eq!(form.to_changes().image_url, Some(None));
        assert_eq!(form.to_create_params().image_url, None);
    }

    #[test]
    fn should_report_enter_and_esc() {
        let mut form = ProductForm::new();

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormKey::Submitted);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormKey::Cancelled);
    }
}
