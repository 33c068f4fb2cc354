use tera::{Context, Tera};

const ERROR_PAGE: &str = "<h1>{{ status }}</h1><h3>{{ message }}</h3>";

const LISTING_PAGE: &str = "<ul>{% for entry in entries %}<li>{{ entry.name }} - {{ entry.size }} - {{ entry.modified }}</li>{% endfor %}</ul>";

lazy_static::lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        // Names ending in .html are autoescaped
        match tera.add_raw_templates(vec![
            ("error.html", ERROR_PAGE),
            ("listing.html", LISTING_PAGE),
        ]) {
            Ok(()) => tera,
            Err(e) => {
                tracing::error!("Template parsing error: {}", e);
                std::process::exit(1);
            }
        }
    };
}

/// Render a template, falling back to plain text if rendering fails
pub fn render(template: &str, context: &Context) -> String {
    TEMPLATES.render(template, context).unwrap_or_else(|e| {
        tracing::error!(error = %e, template = template, "Failed to render template");
        "Internal Server Error".to_string()
    })
}
