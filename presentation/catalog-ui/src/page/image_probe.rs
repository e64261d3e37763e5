use url::Url;

/// Decides whether a product image can be shown.
///
/// A terminal cannot render the picture, so "loading" an image means checking
/// that its URL points somewhere fetchable.
pub trait ImageProbe: Send + Sync {
    fn can_load(&self, image_url: &str) -> bool;
}

pub struct UrlImageProbe;

impl ImageProbe for UrlImageProbe {
    fn can_load(&self, image_url: &str) -> bool {
        match Url::parse(image_url.trim()) {
            Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
            Err(e) => {
                tracing::debug!(image_url, error = %e, "image url rejected");
                false
            }
        }
    }
}
