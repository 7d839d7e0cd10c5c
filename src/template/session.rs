//! Interactive editing session for a single template.
//!
//! A session is an explicit value object: it owns the in-progress template
//! and the selection, and is handed to the layout engine on each call.
//! There is no process-wide mutable store; one template instance is edited
//! by at most one session at a time, and persistence is last-write-wins
//! outside this crate.

use super::field::{FieldType, LabelTemplateField};
use super::LabelTemplate;

/// Mutable editing state around one [`LabelTemplate`].
#[derive(Debug, Clone)]
pub struct TemplateEditSession {
    template: LabelTemplate,
    selected: Option<String>,
}

impl TemplateEditSession {
    pub fn new(template: LabelTemplate) -> Self {
        Self {
            template,
            selected: None,
        }
    }

    pub fn template(&self) -> &LabelTemplate {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut LabelTemplate {
        &mut self.template
    }

    /// Give up the session, yielding the edited template for persistence.
    pub fn into_template(self) -> LabelTemplate {
        self.template
    }

    /// Currently selected field id, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a field by id; selecting an unknown id clears the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.template.field(id).is_some())
            .map(str::to_owned);
    }

    /// Add a field with defaults; `sort_order` lands after every existing
    /// field. Returns the new field's id.
    pub fn add_field(&mut self, field_type: FieldType) -> String {
        let mut field = LabelTemplateField::new(field_type);
        field.sort_order = self
            .template
            .fields
            .iter()
            .map(|f| f.sort_order + 1)
            .max()
            .unwrap_or(0);
        let id = field.id.clone();
        self.template.fields.push(field);
        id
    }

    /// Remove a field immediately (no undo), renumbering `sort_order`
    /// to stay dense and unique. Returns false for an unknown id.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.template.fields.len();
        self.template.fields.retain(|f| f.id != id);
        if self.template.fields.len() == before {
            return false;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.renumber();
        true
    }

    /// Move a field one slot earlier in the flow stack.
    pub fn move_field_up(&mut self, id: &str) -> bool {
        self.swap_with_neighbor(id, -1)
    }

    /// Move a field one slot later in the flow stack.
    pub fn move_field_down(&mut self, id: &str) -> bool {
        self.swap_with_neighbor(id, 1)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut LabelTemplateField> {
        self.template.fields.iter_mut().find(|f| f.id == id)
    }

    fn swap_with_neighbor(&mut self, id: &str, direction: i32) -> bool {
        let mut order: Vec<(u32, String)> = self
            .template
            .fields
            .iter()
            .map(|f| (f.sort_order, f.id.clone()))
            .collect();
        order.sort();

        let Some(pos) = order.iter().position(|(_, fid)| fid == id) else {
            return false;
        };
        let neighbor = pos as i32 + direction;
        if neighbor < 0 || neighbor as usize >= order.len() {
            return false;
        }
        order.swap(pos, neighbor as usize);

        for (new_order, (_, fid)) in order.iter().enumerate() {
            if let Some(f) = self.field_mut(fid) {
                f.sort_order = new_order as u32;
            }
        }
        true
    }

    fn renumber(&mut self) {
        let mut ids: Vec<(u32, String)> = self
            .template
            .fields
            .iter()
            .map(|f| (f.sort_order, f.id.clone()))
            .collect();
        ids.sort();
        for (new_order, (_, fid)) in ids.iter().enumerate() {
            if let Some(f) = self.field_mut(fid) {
                f.sort_order = new_order as u32;
            }
        }
    }
}
