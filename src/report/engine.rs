use crate::error::ReportError;
use tera::Tera;

/// Tera-backed engine holding the report templates.
///
/// Templates whose names end in `.html` are auto-escaped by Tera.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Create with inline templates (no filesystem).
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Register a template from a string.
    pub fn add_template(&mut self, name: &str, content: &str) -> Result<(), ReportError> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Render a named template with the given context.
    pub fn render(
        &self,
        template_name: &str,
        context: &tera::Context,
    ) -> Result<String, ReportError> {
        Ok(self.tera.render(template_name, context)?)
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new()
    }
}
