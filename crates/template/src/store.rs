//! Persisted invoice templates
//!
//! Templates are the only state that outlives a print session. Saving is a
//! write path and needs a logged-in session: the user's display name is
//! recorded on the template.

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::schema::{Design, DocumentKind, InvoiceTemplate};
use crate::session::SessionContext;
use crate::{Result, TemplateError};

/// Storage for named designs
pub trait TemplateStore {
    /// Templates in save order, optionally restricted to one document kind
    fn list(&self, kind: Option<DocumentKind>) -> Result<Vec<InvoiceTemplate>>;

    fn get(&self, id: &str) -> Result<InvoiceTemplate>;

    /// Save a design under a name
    ///
    /// A template with the same name and kind is overwritten in place and
    /// keeps its id. Ids of deleted templates are not handed out again while
    /// the store is open; a reopened file store continues after the highest
    /// stored id.
    fn save(
        &mut self,
        name: &str,
        kind: DocumentKind,
        design: &Design,
        session: &SessionContext,
    ) -> Result<InvoiceTemplate>;

    fn delete(&mut self, id: &str) -> Result<()>;
}

/// Template list shared by the store implementations
#[derive(Debug, Clone, Default)]
struct TemplateSet {
    templates: Vec<InvoiceTemplate>,
    /// Highest numeric id handed out so far
    last_id: u64,
}

impl TemplateSet {
    fn from_templates(templates: Vec<InvoiceTemplate>) -> Self {
        let last_id = templates
            .iter()
            .filter_map(|t| t.id.strip_prefix("tpl-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { templates, last_id }
    }

    fn list(&self, kind: Option<DocumentKind>) -> Vec<InvoiceTemplate> {
        self.templates
            .iter()
            .filter(|t| kind.map_or(true, |k| t.document_kind == k))
            .cloned()
            .collect()
    }

    fn get(&self, id: &str) -> Result<InvoiceTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TemplateError::TemplateNotFound(id.to_string()))
    }

    fn next_id(&mut self) -> String {
        self.last_id += 1;
        format!("tpl-{}", self.last_id)
    }

    fn upsert(
        &mut self,
        name: &str,
        kind: DocumentKind,
        design: &Design,
        session: &SessionContext,
    ) -> Result<InvoiceTemplate> {
        let user = session.require_user()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::InvalidTemplate(
                "template name is empty".to_string(),
            ));
        }

        let existing = self
            .templates
            .iter()
            .position(|t| t.name == name && t.document_kind == kind);

        let template = match existing {
            Some(index) => {
                let template = &mut self.templates[index];
                template.design = design.clone();
                template.created_by = Some(user);
                template.created_at = Some(Utc::now());
                log::info!("updated template {} ({})", template.id, template.name);
                template.clone()
            }
            None => {
                let template = InvoiceTemplate {
                    id: self.next_id(),
                    name: name.to_string(),
                    document_kind: kind,
                    design: design.clone(),
                    created_by: Some(user),
                    created_at: Some(Utc::now()),
                };
                log::info!("created template {} ({})", template.id, template.name);
                self.templates.push(template.clone());
                template
            }
        };
        Ok(template)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TemplateError::TemplateNotFound(id.to_string()))?;
        let removed = self.templates.remove(index);
        log::info!("deleted template {} ({})", removed.id, removed.name);
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    set: TemplateSet,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.set.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.templates.is_empty()
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn list(&self, kind: Option<DocumentKind>) -> Result<Vec<InvoiceTemplate>> {
        Ok(self.set.list(kind))
    }

    fn get(&self, id: &str) -> Result<InvoiceTemplate> {
        self.set.get(id)
    }

    fn save(
        &mut self,
        name: &str,
        kind: DocumentKind,
        design: &Design,
        session: &SessionContext,
    ) -> Result<InvoiceTemplate> {
        self.set.upsert(name, kind, design, session)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.set.delete(id)
    }
}

/// Store backed by a pretty-printed JSON array, rewritten on every change
#[derive(Debug)]
pub struct JsonFileTemplateStore {
    path: PathBuf,
    set: TemplateSet,
}

impl JsonFileTemplateStore {
    /// Open a store file; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let templates = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            if json.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&json)
                    .map_err(|e| TemplateError::ParseError(format!("{}: {e}", path.display())))?
            }
        } else {
            Vec::new()
        };

        log::debug!(
            "opened template store {} ({} templates)",
            path.display(),
            templates.len()
        );

        Ok(Self {
            path,
            set: TemplateSet::from_templates(templates),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, set: &TemplateSet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&set.templates)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TemplateStore for JsonFileTemplateStore {
    fn list(&self, kind: Option<DocumentKind>) -> Result<Vec<InvoiceTemplate>> {
        Ok(self.set.list(kind))
    }

    fn get(&self, id: &str) -> Result<InvoiceTemplate> {
        self.set.get(id)
    }

    fn save(
        &mut self,
        name: &str,
        kind: DocumentKind,
        design: &Design,
        session: &SessionContext,
    ) -> Result<InvoiceTemplate> {
        // the in-memory set only changes once the file is written
        let mut set = self.set.clone();
        let template = set.upsert(name, kind, design, session)?;
        self.flush(&set)?;
        self.set = set;
        Ok(template)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut set = self.set.clone();
        set.delete(id)?;
        self.flush(&set)?;
        self.set = set;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> SessionContext {
        let session = SessionContext::new();
        session.login("Amina");
        session
    }

    #[test]
    fn test_save_requires_login() {
        let mut store = MemoryTemplateStore::new();
        let result = store.save(
            "Bleu",
            DocumentKind::Sale,
            &Design::default(),
            &SessionContext::new(),
        );
        assert!(matches!(result, Err(TemplateError::NotLoggedIn)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_records_author() {
        let mut store = MemoryTemplateStore::new();
        let template = store
            .save("Bleu", DocumentKind::Sale, &Design::default(), &session())
            .unwrap();
        assert_eq!(template.id, "tpl-1");
        assert_eq!(template.created_by.as_deref(), Some("Amina"));
        assert!(template.created_at.is_some());
    }

    #[test]
    fn test_save_same_name_overwrites() {
        let session = session();
        let mut store = MemoryTemplateStore::new();
        let mut design = Design::default();
        store
            .save("Bleu", DocumentKind::Sale, &design, &session)
            .unwrap();

        design.header_padding = 60;
        let updated = store
            .save("Bleu", DocumentKind::Sale, &design, &session)
            .unwrap();
        assert_eq!(updated.id, "tpl-1");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("tpl-1").unwrap().design.header_padding, 60);

        // same name, other kind
        let other = store
            .save("Bleu", DocumentKind::Receipt, &design, &session)
            .unwrap();
        assert_eq!(other.id, "tpl-2");
    }

    #[test]
    fn test_list_by_kind_and_delete() {
        let session = session();
        let mut store = MemoryTemplateStore::new();
        for (name, kind) in [
            ("A", DocumentKind::Sale),
            ("B", DocumentKind::Inspection),
            ("C", DocumentKind::Sale),
        ] {
            store
                .save(name, kind, &Design::for_kind(kind), &session)
                .unwrap();
        }

        let names: Vec<String> = store
            .list(Some(DocumentKind::Sale))
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(store.list(None).unwrap().len(), 3);

        store.delete("tpl-1").unwrap();
        assert!(matches!(
            store.get("tpl-1"),
            Err(TemplateError::TemplateNotFound(_))
        ));
        assert!(store.delete("tpl-1").is_err());

        // next id follows the highest one
        let next = store
            .save("D", DocumentKind::Sale, &Design::default(), &session)
            .unwrap();
        assert_eq!(next.id, "tpl-4");
    }

    #[test]
    fn test_deleted_highest_id_not_reused() {
        let session = session();
        let mut store = MemoryTemplateStore::new();
        for name in ["A", "B", "C"] {
            store
                .save(name, DocumentKind::Sale, &Design::default(), &session)
                .unwrap();
        }

        store.delete("tpl-3").unwrap();
        let next = store
            .save("D", DocumentKind::Sale, &Design::default(), &session)
            .unwrap();
        assert_eq!(next.id, "tpl-4");
        assert!(matches!(
            store.get("tpl-3"),
            Err(TemplateError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        // parent of the store file is a regular file
        let mut store = JsonFileTemplateStore::open(blocker.join("templates.json")).unwrap();
        let result = store.save("Bleu", DocumentKind::Sale, &Design::default(), &session());
        assert!(matches!(result, Err(TemplateError::IoError(_))));
        assert!(store.list(None).unwrap().is_empty());
        assert!(store.get("tpl-1").is_err());
    }

    #[test]
    fn test_failed_delete_keeps_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store").join("templates.json");
        let mut store = JsonFileTemplateStore::open(&path).unwrap();
        store
            .save("Bleu", DocumentKind::Sale, &Design::default(), &session())
            .unwrap();

        // replace the store directory by a regular file
        std::fs::remove_dir_all(dir.path().join("store")).unwrap();
        std::fs::write(dir.path().join("store"), "x").unwrap();

        assert!(store.delete("tpl-1").is_err());
        assert_eq!(store.list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut store = MemoryTemplateStore::new();
        let result = store.save("  ", DocumentKind::Sale, &Design::default(), &session());
        assert!(matches!(result, Err(TemplateError::InvalidTemplate(_))));
    }
}
