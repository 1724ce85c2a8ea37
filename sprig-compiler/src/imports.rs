use std::fmt;

/// One ES import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub from: String,
    pub default: Option<String>,
    pub named: Vec<String>,
    pub type_only: bool,
}

impl Import {
    pub fn named(from: &str, names: impl IntoIterator<Item = String>) -> Self {
        Self {
            from: from.to_string(),
            default: None,
            named: names.into_iter().collect(),
            type_only: false,
        }
    }

    pub fn default_import(from: &str, name: &str) -> Self {
        Self {
            from: from.to_string(),
            default: Some(name.to_string()),
            named: Vec::new(),
            type_only: false,
        }
    }

    pub fn types(from: &str, names: impl IntoIterator<Item = String>) -> Self {
        Self {
            type_only: true,
            ..Self::named(from, names)
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("import ")?;
        if self.type_only {
            f.write_str("type ")?;
        }
        let mut clauses = Vec::new();
        if let Some(d) = &self.default {
            clauses.push(d.clone());
        }
        if !self.named.is_empty() {
            clauses.push(format!("{{ {} }}", self.named.join(", ")));
        }
        write!(f, "{} from \"{}\";", clauses.join(", "), self.from)
    }
}

/// Render an import block, merging declarations from the same module and
/// dropping duplicate names. First-seen order is kept.
pub fn render_imports(imports: &[Import]) -> String {
    let mut merged: Vec<Import> = Vec::new();
    for import in imports {
        match merged
            .iter_mut()
            .find(|m| m.from == import.from && m.type_only == import.type_only)
        {
            Some(existing) => {
                if existing.default.is_none() {
                    existing.default = import.default.clone();
                }
                for name in &import.named {
                    if !existing.named.contains(name) {
                        existing.named.push(name.clone());
                    }
                }
            }
            None => merged.push(import.clone()),
        }
    }
    merged.iter().map(|i| format!("{i}\n")).collect()
}
