//! Template emission adapters.
//!
//! `{{variable}}` substitution over the built-in template table, with
//! a local-filesystem sink for production and an in-memory sink for
//! tests. The `currentYear` variable is supplied here — the core knows
//! nothing about wall clocks.

mod local;
mod memory;

pub use local::LocalEmitter;
pub use memory::MemoryEmitter;

use chrono::Datelike;

use mason_core::application::ApplicationError;
use mason_core::domain::{PropertyBag, TemplateId, Value};
use mason_core::error::MasonResult;

use crate::builtin_templates::{self, TemplateSpec};

/// Substitute every `{{key}}` the context defines; unknown placeholders
/// are left verbatim (a rendered file should make the gap obvious
/// rather than hide it).
pub(crate) fn render(text: &str, context: &PropertyBag) -> String {
    let mut rendered = text.to_string();
    for (name, value) in context.iter() {
        let needle = format!("{{{{{name}}}}}");
        if !rendered.contains(&needle) {
            continue;
        }
        let replacement = match value {
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Bag(_) => continue,
        };
        rendered = rendered.replace(&needle, &replacement);
    }
    rendered.replace("{{currentYear}}", &chrono::Utc::now().year().to_string())
}

/// Resolve a template id to its spec, or an emission error.
pub(crate) fn lookup(template: TemplateId) -> MasonResult<&'static TemplateSpec> {
    builtin_templates::spec(template).ok_or_else(|| {
        ApplicationError::EmissionFailed {
            template: template.to_string(),
            reason: "no such template in the built-in table".into(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_core::domain::keys;

    #[test]
    fn render_substitutes_strings_and_bools() {
        let context = PropertyBag::new()
            .with(keys::ARTIFACT_ID, "mysite")
            .with(keys::PUBLISH, true);

        let rendered = render("id={{artifactId}} publish={{publish}}", &context);
        assert_eq!(rendered, "id=mysite publish=true");
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let rendered = render("{{mystery}}", &PropertyBag::new());
        assert_eq!(rendered, "{{mystery}}");
    }

    #[test]
    fn current_year_is_supplied_by_the_adapter() {
        let rendered = render("year={{currentYear}}", &PropertyBag::new());
        assert_ne!(rendered, "year={{currentYear}}");
        assert!(rendered.len() >= "year=2025".len());
    }

    #[test]
    fn lookup_unknown_template_is_an_emission_error() {
        assert!(lookup(TemplateId::new("no/such")).is_err());
    }
}
