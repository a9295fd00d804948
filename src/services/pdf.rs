//! Certificate PDF rendering.
//!
//! Takes the configured template PDF and overlays the holder name and the
//! verification id onto its first page. The template is read from disk on
//! every call so it can be swapped without restarting the service.

use std::path::PathBuf;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use thiserror::Error;

use crate::domain::certificate::Certificate;
use crate::models::config::{StampConfig, StampPosition};

/// Resource name under which the overlay font is registered on the page.
const STAMP_FONT: &str = "FStamp";
/// US Letter height, used when the template carries no usable MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;
/// Upper bound when walking Parent links, in case the page tree has a cycle.
const PAGE_TREE_DEPTH: usize = 16;

/// Failures while producing a stamped certificate PDF.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("failed to read the certificate template: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to process the certificate template: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("the certificate template has no pages")]
    EmptyTemplate,
}

/// A rendered PDF ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct StampedCertificate {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Stamps certificate details onto the configured template.
#[derive(Clone)]
pub struct CertificateStamper {
    template_path: PathBuf,
    holder_name: StampPosition,
    verification_id: StampPosition,
}

impl CertificateStamper {
    pub fn new(config: &StampConfig) -> Self {
        Self {
            template_path: PathBuf::from(&config.template_path),
            holder_name: config.holder_name,
            verification_id: config.verification_id,
        }
    }

    /// Overlay `certificate`'s details onto the first page of the template.
    pub fn stamp(&self, certificate: &Certificate) -> Result<StampedCertificate, StampError> {
        let mut document = Document::load(&self.template_path)?;
        let page_id = document
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or(StampError::EmptyTemplate)?;

        let height = page_height(&document, page_id);
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        attach_stamp_font(&mut document, page_id, font_id)?;

        let raw = document.get_page_content(page_id)?;
        let mut content = Content::decode(&raw)?;
        // Fence off whatever graphics state the template leaves behind so
        // the overlay always starts from the default state.
        content.operations.insert(0, Operation::new("q", vec![]));
        content.operations.push(Operation::new("Q", vec![]));
        push_text(
            &mut content.operations,
            &certificate.holder_name,
            self.holder_name,
            height,
        );
        let verification_line = format!("Verification ID : {}", certificate.number);
        push_text(
            &mut content.operations,
            &verification_line,
            self.verification_id,
            height,
        );
        document.change_page_content(page_id, content.encode()?)?;

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;

        Ok(StampedCertificate {
            file_name: format!(
                "Certificate-{}-{}.pdf",
                file_name_component(&certificate.holder_name),
                file_name_component(certificate.number.as_str()),
            ),
            content_type: "application/pdf",
            bytes,
        })
    }
}

fn push_text(
    operations: &mut Vec<Operation>,
    text: &str,
    position: StampPosition,
    page_height: f32,
) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![STAMP_FONT.into(), position.size.into()],
    ));
    operations.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));
    operations.push(Operation::new(
        "Td",
        vec![
            position.x.into(),
            (page_height - position.y_from_top).into(),
        ],
    ));
    operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    operations.push(Operation::new("ET", vec![]));
}

/// Register the overlay font on the page itself.
///
/// Resources may sit on the page, be inherited through the page tree, or be
/// a shared indirect object; cloning the effective dictionary onto the page
/// keeps every case purely additive.
fn attach_stamp_font(
    document: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<(), lopdf::Error> {
    let mut resources = effective_resources(document, page_id).unwrap_or_else(Dictionary::new);
    let mut fonts = match resources.get(b"Font") {
        Ok(object) => resolved_dictionary(document, object).unwrap_or_else(Dictionary::new),
        Err(_) => Dictionary::new(),
    };
    fonts.set(STAMP_FONT, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let page = document.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// The Resources dictionary that applies to `page_id`, resolved and cloned.
fn effective_resources(document: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut current = page_id;
    for _ in 0..PAGE_TREE_DEPTH {
        let node = document.get_dictionary(current).ok()?;
        if let Ok(object) = node.get(b"Resources") {
            return resolved_dictionary(document, object);
        }
        match node.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
    None
}

fn resolved_dictionary(document: &Document, object: &Object) -> Option<Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict.clone()),
        Object::Reference(id) => match document.get_object(*id) {
            Ok(Object::Dictionary(dict)) => Some(dict.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Height of the page in points, walking Parent links for an inherited
/// MediaBox.
fn page_height(document: &Document, page_id: ObjectId) -> f32 {
    let mut current = page_id;
    for _ in 0..PAGE_TREE_DEPTH {
        let node = match document.get_dictionary(current) {
            Ok(node) => node,
            Err(_) => break,
        };
        if let Ok(object) = node.get(b"MediaBox") {
            if let Some(height) = media_box_height(document, object) {
                return height;
            }
            break;
        }
        match node.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => break,
        }
    }
    DEFAULT_PAGE_HEIGHT
}

fn media_box_height(document: &Document, object: &Object) -> Option<f32> {
    let object = match object {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    let bounds = object.as_array().ok()?;
    if bounds.len() != 4 {
        return None;
    }
    Some(number(&bounds[3])? - number(&bounds[1])?)
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

/// Reduce a value to characters that are safe inside a download file name.
fn file_name_component(value: &str) -> String {
    let mut component = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            component.push(c);
        } else if !component.ends_with('_') {
            component.push('_');
        }
    }
    let component = component.trim_matches('_');
    if component.is_empty() {
        "certificate".to_string()
    } else {
        component.to_string()
    }
}
