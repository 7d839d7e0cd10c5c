//! Batch label generation.
//!
//! Produces N labels from one template in a single all-or-nothing run:
//! the quantity is validated before any rendering happens, every label
//! gets a fresh unique token, and any render failure aborts the whole
//! batch so a printer never receives a partial document.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EtiquetaError;
use crate::render::document::{LabelDocument, LabelPage};
use crate::template::{FieldType, LabelTemplate};

/// Immutable record of one generated label, for the caller's store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedLabel {
    pub token: String,
    pub source_template_id: String,
    /// Zero-based page inside the batch document.
    pub page_index: usize,
    /// The data values baked into this label, keyed by field name.
    pub bound: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// A completed batch: the printable document and one record per label.
#[derive(Debug)]
pub struct BatchOutput {
    pub document: LabelDocument,
    pub labels: Vec<GeneratedLabel>,
}

/// Generate `quantity` labels from `template`.
///
/// `bound_data` supplies per-label values: entry `i` is merged into label
/// `i`'s text fields by field name. Labels past the end of the slice (or
/// an empty slice) render the template's own values unchanged.
pub fn generate(
    template: &LabelTemplate,
    quantity: usize,
    bound_data: &[BTreeMap<String, String>],
    config: &EngineConfig,
) -> Result<BatchOutput, EtiquetaError> {
    config.validate()?;
    if quantity == 0 || quantity > config.batch_quantity_max {
        return Err(EtiquetaError::BatchQuantity {
            requested: quantity,
            max: config.batch_quantity_max,
        });
    }

    let tokens: Vec<String> = (0..quantity)
        .map(|_| Uuid::new_v4().to_string())
        .collect();
    let unique: BTreeSet<&String> = tokens.iter().collect();
    if unique.len() != tokens.len() {
        return Err(EtiquetaError::Render(
            "token collision inside batch".into(),
        ));
    }

    // Any page failure here surfaces as the batch's error; no document,
    // no records.
    let mut pages = Vec::with_capacity(quantity);
    for (i, token) in tokens.iter().enumerate() {
        let page = match bound_data.get(i) {
            Some(data) => LabelPage::render(&bind_template(template, data), token)?,
            None => LabelPage::render(template, token)?,
        };
        pages.push(page);
    }
    let document = LabelDocument::from_pages(pages);

    let created_at = Utc::now();
    let labels = tokens
        .into_iter()
        .enumerate()
        .map(|(page_index, token)| GeneratedLabel {
            token,
            source_template_id: template.id.clone(),
            page_index,
            bound: bound_data.get(page_index).cloned().unwrap_or_default(),
            created_at,
        })
        .collect();

    Ok(BatchOutput { document, labels })
}

/// Copy of the template with bound values merged into text field values.
fn bind_template(template: &LabelTemplate, bound_data: &BTreeMap<String, String>) -> LabelTemplate {
    let mut bound = template.clone();
    for field in &mut bound.fields {
        if field.field_type != FieldType::Text {
            continue;
        }
        if let Some(value) = bound_data.get(&field.field_name) {
            field.field_value = value.clone();
        }
    }
    bound
}
