//! Template selection.
//!
//! Given a module's resolved flags, decide *which* template identifiers
//! to emit and in what order. What a template identifier expands to —
//! output path, file content, variable substitution — is the emission
//! collaborator's contract, not ours.
//!
//! Selection is deterministic and I/O-free: the shared set always, then
//! each feature-gated set iff its flag is truthy, in declaration order.

use std::fmt;

use crate::domain::properties::{PropertyBag, keys};
use crate::domain::value_objects::ModuleKind;

/// Opaque identifier the emission collaborator resolves to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateId(&'static str);

impl TemplateId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

const fn t(id: &'static str) -> TemplateId {
    TemplateId::new(id)
}

/// A feature-gated group: included iff `flag` is truthy in the bag.
struct Gated {
    flag: &'static str,
    ids: &'static [TemplateId],
}

struct SelectionTable {
    shared: &'static [TemplateId],
    gated: &'static [Gated],
}

impl SelectionTable {
    fn select(&self, flags: &PropertyBag) -> Vec<TemplateId> {
        let mut ids: Vec<TemplateId> = self.shared.to_vec();
        for group in self.gated {
            if flags.truthy(group.flag) {
                ids.extend_from_slice(group.ids);
            }
        }
        ids
    }
}

// ── tables ────────────────────────────────────────────────────────────────────

static PROJECT: SelectionTable = SelectionTable {
    shared: &[
        t("project/pom"),
        t("project/gitignore"),
        t("project/readme"),
    ],
    gated: &[],
};

static APP: SelectionTable = SelectionTable {
    shared: &[t("app/pom"), t("app/package-info")],
    gated: &[
        Gated {
            flag: keys::EXAMPLES,
            ids: &[t("app/sample-servlet"), t("app/sample-servlet-test")],
        },
        Gated {
            flag: keys::PUBLISH,
            ids: &[t("app/publish-runmode-config")],
        },
    ],
};

static IT_TESTS: SelectionTable = SelectionTable {
    shared: &[
        t("tests-it/pom"),
        t("tests-it/test-base"),
        t("tests-it/create-page-it"),
    ],
    gated: &[Gated {
        flag: keys::PUBLISH,
        ids: &[t("tests-it/publish-smoke-it")],
    }],
};

static UI_CONFIG: SelectionTable = SelectionTable {
    shared: &[t("ui-config/pom"), t("ui-config/logging-config")],
    gated: &[Gated {
        flag: keys::PUBLISH,
        ids: &[t("ui-config/publish-logging-config")],
    }],
};

static DISPATCHER: SelectionTable = SelectionTable {
    shared: &[t("dispatcher/pom"), t("dispatcher/author-farm")],
    gated: &[Gated {
        flag: keys::PUBLISH,
        ids: &[t("dispatcher/publish-farm")],
    }],
};

// ── selectors ─────────────────────────────────────────────────────────────────

/// Templates for the project root itself.
pub fn project_templates(flags: &PropertyBag) -> Vec<TemplateId> {
    PROJECT.select(flags)
}

/// Templates for one module of the given kind.
pub fn module_templates(kind: ModuleKind, flags: &PropertyBag) -> Vec<TemplateId> {
    match kind {
        ModuleKind::App => APP.select(flags),
        ModuleKind::ItTests => IT_TESTS.select(flags),
        ModuleKind::UiConfig => UI_CONFIG.select(flags),
        ModuleKind::Dispatcher => DISPATCHER.select(flags),
    }
}
