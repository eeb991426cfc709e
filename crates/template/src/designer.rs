//! Interactive designer
//!
//! Selection-driven editing of a design. Every edit applies immediately to
//! the owned design; there is no undo and no draft state. Bindings re-render
//! through [`Designer::preview`] after each change.

use crate::config::{RenderOptions, ShowroomProfile};
use crate::records::DocumentRecord;
use crate::renderer::{DocumentRenderer, RenderedDocument};
use crate::schema::*;
use crate::session::SessionContext;
use crate::store::TemplateStore;
use crate::{Result, TemplateError};

/// Default content of a newly added free text
pub const NEW_TEXT_CONTENT: &str = "Nouveau texte";

const EXTRA_PREFIX: &str = "extra:";

/// Currently selected block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Logo,
    Title,
    PartnerInfo,
    SubjectInfo,
    Financials,
    /// A custom text, by id
    Extra(String),
}

impl Selection {
    /// The `data-element` tag of the selected block
    pub fn tag(&self) -> Option<String> {
        match self {
            Selection::None => None,
            Selection::Extra(id) => Some(format!("{EXTRA_PREFIX}{id}")),
            other => other.section().map(|s| s.tag().to_string()),
        }
    }

    /// Parse a `data-element` tag; unknown tags select nothing
    pub fn from_tag(tag: &str) -> Selection {
        if let Some(id) = tag.strip_prefix(EXTRA_PREFIX) {
            return Selection::Extra(id.to_string());
        }
        Section::from_tag(tag).map(Selection::from).unwrap_or_default()
    }

    /// The fixed section, if one is selected
    pub fn section(&self) -> Option<Section> {
        match self {
            Selection::Logo => Some(Section::Logo),
            Selection::Title => Some(Section::Title),
            Selection::PartnerInfo => Some(Section::PartnerInfo),
            Selection::SubjectInfo => Some(Section::SubjectInfo),
            Selection::Financials => Some(Section::Financials),
            Selection::None | Selection::Extra(_) => None,
        }
    }

    /// Slider bounds per axis for the position editor
    pub fn slider_range(&self) -> (i32, i32) {
        match self {
            Selection::Logo | Selection::Title => (-300, 300),
            _ => (-400, 400),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

impl From<Section> for Selection {
    fn from(section: Section) -> Self {
        match section {
            Section::Logo => Selection::Logo,
            Section::Title => Selection::Title,
            Section::PartnerInfo => Selection::PartnerInfo,
            Section::SubjectInfo => Selection::SubjectInfo,
            Section::Financials => Selection::Financials,
        }
    }
}

/// Editor state: a design, its document kind and the selection
#[derive(Debug, Clone)]
pub struct Designer {
    design: Design,
    kind: DocumentKind,
    selection: Selection,
}

impl Designer {
    /// Start from the default design of a document kind
    pub fn new(kind: DocumentKind) -> Self {
        Self::with_design(kind, Design::for_kind(kind))
    }

    /// Edit an existing design; repeated custom text ids get fresh ones
    pub fn with_design(kind: DocumentKind, mut design: Design) -> Self {
        let renamed = design.repair_text_ids();
        if renamed > 0 {
            log::warn!("renamed {renamed} custom texts with repeated ids");
        }
        Self {
            design,
            kind,
            selection: Selection::None,
        }
    }

    /// Start from a saved template
    pub fn from_template(template: &InvoiceTemplate) -> Self {
        Self::with_design(template.document_kind, template.design.clone())
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn into_design(self) -> Design {
        self.design
    }

    /// Select a block; an unknown custom text id selects nothing
    pub fn select(&mut self, selection: Selection) {
        self.selection = match selection {
            Selection::Extra(id) if self.design.custom_text(&id).is_none() => {
                log::debug!("ignoring selection of unknown text {id}");
                Selection::None
            }
            other => other,
        };
    }

    /// Select by `data-element` tag
    pub fn select_tag(&mut self, tag: &str) {
        self.select(Selection::from_tag(tag));
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    /// Position of the selected block
    pub fn selected_position(&self) -> Option<Position> {
        match &self.selection {
            Selection::None => None,
            Selection::Extra(id) => self
                .design
                .custom_text(id)
                .map(|t| Position::new(t.x, t.y)),
            other => other.section().map(|s| self.design.position(s)),
        }
    }

    /// Move the selected block; returns false when nothing is selected
    pub fn set_position(&mut self, x: i32, y: i32) -> bool {
        match &self.selection {
            Selection::None => false,
            Selection::Extra(id) => match self.design.custom_text_mut(id) {
                Some(text) => {
                    text.x = x;
                    text.y = y;
                    true
                }
                None => false,
            },
            other => match other.section() {
                Some(section) => {
                    self.design.set_position(section, Position::new(x, y));
                    true
                }
                None => false,
            },
        }
    }

    /// Shift the selected block by a delta
    pub fn nudge(&mut self, dx: i32, dy: i32) -> bool {
        match self.selected_position() {
            Some(p) => self.set_position(p.x.saturating_add(dx), p.y.saturating_add(dy)),
            None => false,
        }
    }

    pub fn set_label(&mut self, key: LabelKey, value: &str) {
        self.design.labels.set(key, value);
    }

    /// Store a color token as typed; invalid values are replaced at render time
    pub fn set_color(&mut self, token: ColorToken, value: &str) {
        self.design.colors.set(token, value.trim());
    }

    pub fn set_font_size_base(&mut self, size: f64) {
        self.design.font_size_base = size;
    }

    pub fn set_header_padding(&mut self, padding: i32) {
        self.design.header_padding = padding;
    }

    /// Switch between checklist and ledger; positions are untouched
    pub fn toggle_checklist(&mut self) -> bool {
        self.design.show_checklist = !self.design.show_checklist;
        self.design.show_checklist
    }

    /// Add a free text at the document center and select it
    pub fn add_text(&mut self) -> String {
        let id = self.design.insert_text(NEW_TEXT_CONTENT, 0, 0);
        log::debug!("added custom text {id}");
        self.selection = Selection::Extra(id.clone());
        id
    }

    fn selected_text_mut(&mut self) -> Option<&mut CustomText> {
        match &self.selection {
            Selection::Extra(id) => self.design.custom_text_mut(id),
            _ => None,
        }
    }

    /// Edit the selected free text; returns false when none is selected
    pub fn set_text_content(&mut self, content: &str) -> bool {
        self.selected_text_mut()
            .map(|t| t.content = content.to_string())
            .is_some()
    }

    pub fn set_text_font_size(&mut self, size: f64) -> bool {
        self.selected_text_mut().map(|t| t.font_size = size).is_some()
    }

    pub fn set_text_color(&mut self, color: &str) -> bool {
        self.selected_text_mut()
            .map(|t| t.color = color.trim().to_string())
            .is_some()
    }

    pub fn set_text_bold(&mut self, bold: bool) -> bool {
        self.selected_text_mut().map(|t| t.is_bold = bold).is_some()
    }

    /// Delete the selected free text
    pub fn delete_selected_text(&mut self) -> Option<CustomText> {
        let id = match &self.selection {
            Selection::Extra(id) => id.clone(),
            _ => return None,
        };
        self.delete_text(&id)
    }

    /// Delete a free text by id; the selection always resets
    pub fn delete_text(&mut self, id: &str) -> Option<CustomText> {
        self.selection = Selection::None;
        let removed = self.design.remove_text(id);
        if removed.is_some() {
            log::debug!("deleted custom text {id}");
        }
        removed
    }

    /// Render with the selected block highlighted
    pub fn preview(&self, record: &DocumentRecord, profile: &ShowroomProfile) -> RenderedDocument {
        self.preview_with(record, profile, RenderOptions::default())
    }

    pub fn preview_with(
        &self,
        record: &DocumentRecord,
        profile: &ShowroomProfile,
        options: RenderOptions,
    ) -> RenderedDocument {
        DocumentRenderer::new(&self.design, profile)
            .with_selection(&self.selection)
            .with_options(options)
            .render(record)
    }

    /// Persist the current design as a named template
    pub fn save_as_template(
        &self,
        name: &str,
        store: &mut dyn TemplateStore,
        session: &SessionContext,
    ) -> Result<InvoiceTemplate> {
        if name.trim().is_empty() {
            return Err(TemplateError::InvalidTemplate(
                "template name is empty".to_string(),
            ));
        }
        store.save(name.trim(), self.kind, &self.design, session)
    }
}
