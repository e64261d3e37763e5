/// Logging port used by the use cases.
///
/// Infrastructure decides where messages go; the domain only picks a level.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
