//! Embedded HTML templates
//!
//! Templates are compiled into the binary and registered on a single Tera
//! instance at startup.

use tera::Tera;

/// Build the template engine with every embedded template registered
pub fn build() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("layout.html", include_str!("../templates/layout.html")),
        ("talks.html", include_str!("../templates/talks.html")),
        ("talk.html", include_str!("../templates/talk.html")),
        ("planning.html", include_str!("../templates/planning.html")),
    ])?;
    Ok(tera)
}
