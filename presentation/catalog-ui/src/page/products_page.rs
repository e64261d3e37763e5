//! View-model of the products page.
//!
//! Owns the list query and the page-local UI state (add form, edit buffer,
//! pending delete confirmation, hidden images). Rendering reads it through the
//! accessors; the event loop drives it through `handle_key`, `tick` and
//! `on_products_invalidated`.

use std::collections::HashSet;
use std::sync::Arc;

use business::application::product::products_api::ProductsApi;
use business::domain::product::errors::ProductError;
use business::domain::product::model::Product;
use business::domain::product::value_objects::ProductId;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::image_probe::ImageProbe;
use crate::error_mapper::IntoErrorResponse;
use crate::query::{Query, QueryState};
use crate::ui::components::product_form::{FormKey, ProductForm};

/// The card currently being edited and its scratch buffer.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub id: ProductId,
    pub form: ProductForm,
}

pub struct ProductsPage {
    api: Arc<ProductsApi>,
    image_probe: Arc<dyn ImageProbe>,
    products: Query<Vec<Product>>,
    selected: usize,
    show_form: bool,
    new_product: ProductForm,
    editing: Option<EditSession>,
    pending_delete: Option<ProductId>,
    /// Session-only; never persisted.
    hidden_images: HashSet<ProductId>,
    probed_images: HashSet<(ProductId, String)>,
    status: Option<String>,
    should_quit: bool,
}

impl ProductsPage {
    pub fn new(api: Arc<ProductsApi>, image_probe: Arc<dyn ImageProbe>) -> Self {
        let fetch_api = api.clone();
        let products = Query::new(move || {
            let api = fetch_api.clone();
            async move { api.get_products().await.map_err(|e| e.to_string()) }
        });

        Self {
            api,
            image_probe,
            products,
            selected: 0,
            show_form: false,
            new_product: ProductForm::new(),
            editing: None,
            pending_delete: None,
            hidden_images: HashSet::new(),
            probed_images: HashSet::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn mount(&mut self) {
        self.products.fetch();
    }

    pub fn on_products_invalidated(&mut self) {
        self.products.refetch();
    }

    /// Applies a finished list fetch. Returns `true` if anything changed.
    pub fn tick(&mut self) -> bool {
        let changed = self.products.poll();
        if changed {
            self.after_products_changed();
        }
        changed
    }

    #[cfg(test)]
    pub async fn settle(&mut self) {
        self.products.settle().await;
        self.after_products_changed();
    }

    fn after_products_changed(&mut self) {
        let Some(products) = self.products.data() else {
            return;
        };

        self.selected = self.selected.min(products.len().saturating_sub(1));

        let unprobed: Vec<(ProductId, String)> = products
            .iter()
            .filter_map(|p| p.image_url.as_ref().map(|url| (p.id.clone(), url.clone())))
            .filter(|key| !self.probed_images.contains(key))
            .collect();
        for (id, url) in unprobed {
            if !self.image_probe.can_load(&url) {
                self.mark_image_failed(id.clone());
            }
            self.probed_images.insert((id, url));
        }
    }

    // ----- accessors -----

    pub fn products_state(&self) -> &QueryState<Vec<Product>> {
        self.products.state()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_form_shown(&self) -> bool {
        self.show_form
    }

    pub fn new_product(&self) -> &ProductForm {
        &self.new_product
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&ProductId> {
        self.pending_delete.as_ref()
    }

    pub fn is_image_hidden(&self, id: &ProductId) -> bool {
        self.hidden_images.contains(id)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected_product(&self) -> Option<&Product> {
        self.products.data().and_then(|p| p.get(self.selected))
    }

    // ----- add flow -----

    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
    }

    /// Creates a product from the add form. The form is cleared and hidden
    /// whatever the outcome, unless a required field is still blank.
    pub async fn submit_new_product(&mut self) {
        let missing = self.new_product.missing_required();
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            self.status = Some(format!("Required: {}", labels.join(", ")));
            return;
        }

        let params = self.new_product.to_create_params();
        match self.api.create_product(params).await {
            Ok(product) => {
                tracing::info!(id = %product.id, "product created");
                self.status = None;
            }
            Err(e) => self.report_failure("create", &e),
        }

        self.new_product.clear();
        self.show_form = false;
    }

    // ----- edit flow -----

    pub fn begin_edit(&mut self) {
        if let Some(product) = self.selected_product() {
            self.editing = Some(EditSession {
                id: product.id.clone(),
                form: ProductForm::from_product(product),
            });
        }
    }

    /// Sends every buffered field, then leaves edit mode whatever the outcome.
    pub async fn save_edit(&mut self) {
        let Some(session) = self.editing.take() else {
            return;
        };

        match self
            .api
            .update_product(session.id.clone(), session.form.to_changes())
            .await
        {
            Ok(_) => self.status = None,
            Err(e) => self.report_failure("update", &e),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ----- delete flow -----

    pub fn request_delete(&mut self) {
        if let Some(product) = self.selected_product() {
            self.pending_delete = Some(product.id.clone());
        }
    }

    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        match self.api.delete_product(id).await {
            Ok(()) => self.status = None,
            Err(e) => self.report_failure("delete", &e),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn mark_image_failed(&mut self, id: ProductId) {
        tracing::debug!(id = %id, "hiding product image");
        self.hidden_images.insert(id);
    }

    fn select_next(&mut self) {
        let len = self.products.data().map_or(0, Vec::len);
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn report_failure(&mut self, action: &str, error: &ProductError) {
        let response = error.into_error_response();
        tracing::error!(
            action,
            status = response.status,
            name = response.name,
            message = %response.message,
            "product action failed"
        );
        self.status = Some("Action failed".to_string());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Confirmation prompt is modal
        if self.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete().await,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel_delete(),
                _ => {}
            }
            return;
        }

        if let Some(session) = self.editing.as_mut() {
            let outcome = session.form.handle_key(key);
            match outcome {
                FormKey::Submitted => self.save_edit().await,
                FormKey::Cancelled => self.cancel_edit(),
                FormKey::Handled | FormKey::NotHandled => {}
            }
            return;
        }

        if self.show_form {
            match self.new_product.handle_key(key) {
                FormKey::Submitted => self.submit_new_product().await,
                FormKey::Cancelled => self.show_form = false,
                FormKey::Handled | FormKey::NotHandled => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.toggle_form(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            _ => {}
        }
    }
}
