//! Template loading and rendering using Tera.
//!
//! User-facing menu and message text lives in external template files, with
//! embedded fallbacks for when the files don't exist.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tera::{Context, Tera};

/// Default templates directory relative to the working directory.
const TEMPLATES_DIR: &str = "templates";

/// Embedded default templates for fallback when files don't exist.
static EMBEDDED_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("messages/intro.tera", include_str!("../templates/messages/intro.tera"));
    m.insert("messages/auth_menu.tera", include_str!("../templates/messages/auth_menu.tera"));
    m.insert("messages/task_menu.tera", include_str!("../templates/messages/task_menu.tera"));

    m
});

/// Global template engine with caching.
static TERA: Lazy<RwLock<Option<Tera>>> = Lazy::new(|| RwLock::new(None));

/// Initialize the template engine with templates from the specified directory.
///
/// If the directory doesn't exist, templates will be loaded from embedded
/// defaults.
///
/// # Errors
///
/// Returns an error if the templates directory exists but contains invalid
/// templates.
///
/// # Panics
///
/// Panics if an embedded template fails to add to the engine. This should
/// never happen as embedded templates are verified by
/// `test_all_embedded_templates_render`.
pub fn init_templates(templates_dir: Option<&Path>) -> Result<()> {
    let dir = templates_dir.map_or_else(
        || std::env::current_dir().unwrap_or_default().join(TEMPLATES_DIR),
        Path::to_path_buf,
    );

    let mut tera = Tera::default();

    if dir.exists() {
        let glob_pattern = format!("{}/**/*.tera", dir.display());
        match Tera::new(&glob_pattern) {
            Ok(t) => {
                tera = t;
            }
            Err(e) => {
                return Err(Error::Template(format!(
                    "Failed to load templates from {}: {e}",
                    dir.display()
                )));
            }
        }
    }

    // Add any missing templates from embedded defaults.
    for (name, content) in EMBEDDED_TEMPLATES.iter() {
        if tera.get_template(name).is_err() {
            tera.add_raw_template(name, content)
                .expect("embedded template should be valid - verified by tests");
        }
    }

    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = Some(tera);

    Ok(())
}

/// Render a template with the given context.
///
/// Templates are lazy-loaded on first use, with embedded defaults as
/// fallback.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let needs_init = TERA.read().map_err(|e| Error::Template(e.to_string()))?.is_none();

    if needs_init {
        init_templates(None)?;
    }

    let guard = TERA.read().map_err(|e| Error::Template(e.to_string()))?;
    let tera = guard.as_ref().ok_or_else(|| Error::Template("Templates not initialized".into()))?;
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    drop(guard);

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_embedded_templates_render() {
        let mut tera = Tera::default();
        for (name, content) in EMBEDDED_TEMPLATES.iter() {
            tera.add_raw_template(name, content).unwrap();
        }

        let mut context = Context::new();
        context.insert("username", "alice");

        for name in EMBEDDED_TEMPLATES.keys() {
            let rendered = tera.render(name, &context).unwrap();
            assert!(!rendered.is_empty(), "template {name} rendered empty");
        }
    }

    #[test]
    fn test_task_menu_includes_username() {
        let mut context = Context::new();
        context.insert("username", "alice");

        let rendered = render("messages/task_menu.tera", &context).unwrap();
        assert!(rendered.contains("User: alice"));
        assert!(rendered.contains("1) Add Task"));
        assert!(rendered.contains("0) Logout"));
    }

    #[test]
    fn test_auth_menu_lists_options() {
        let rendered = render("messages/auth_menu.tera", &Context::new()).unwrap();
        assert!(rendered.contains("1) Register"));
        assert!(rendered.contains("2) Login"));
        assert!(rendered.contains("3) Exit"));
    }

    #[test]
    fn test_render_missing_template_fails() {
        let result = render("messages/does_not_exist.tera", &Context::new());
        assert!(matches!(result, Err(Error::Template(_))));
    }
}
