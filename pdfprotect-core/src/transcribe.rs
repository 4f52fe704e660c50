//! Copying pages and metadata from a loaded document into a fresh one.
//!
//! The output document gets a flat page tree: every object of the source is
//! carried over except the old catalog, page-tree and outline nodes, and a
//! new `Pages` node adopts the pages in their original order. Attributes a
//! page inherited from a dropped tree node (resources, boxes, rotation) are
//! materialized onto the page itself first.

use std::collections::HashSet;

use lopdf::{dictionary, Document, Error as PdfError, Object, ObjectId};

use crate::error::{ProtectError, ProtectResult};

const INHERITABLE_PAGE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Build a new document containing every page of `source`, in order.
pub fn transcribe_pages(source: &Document) -> ProtectResult<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(ProtectError::PageCopy("document has no pages".to_string()));
    }

    let mut output = Document::with_version(source.version.clone());

    // Carry over everything except the old document skeleton; the page tree
    // is rebuilt below. The source metadata dictionary is skipped too, so
    // it only reaches the output through an explicit `copy_metadata` call.
    let info_id = source_info_id(source);
    for (object_id, object) in &source.objects {
        if Some(*object_id) == info_id {
            continue;
        }
        match dict_type(object) {
            b"Catalog" | b"Pages" | b"Outlines" | b"Outline" => {}
            _ => {
                output.objects.insert(*object_id, object.clone());
            }
        }
    }

    output.max_id = source.max_id;
    let pages_id = output.new_object_id();

    for page_id in &page_ids {
        let inherited = inherited_page_attributes(source, *page_id);

        let page = output.objects.get_mut(page_id).ok_or_else(|| {
            ProtectError::PageCopy(format!(
                "page object {} {} missing from input",
                page_id.0, page_id.1
            ))
        })?;
        let dict = page
            .as_dict_mut()
            .map_err(|err| ProtectError::PageCopy(err.to_string()))?;

        for (key, value) in inherited {
            if dict.get(key).is_err() {
                dict.set(key, value);
            }
        }
        dict.set("Parent", pages_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    output.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as u32,
        }),
    );

    let catalog_id = output.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    output.trailer.set("Root", catalog_id);

    output.renumber_objects();

    Ok(output)
}

/// Copy the source `Info` dictionary into `output`.
///
/// Failures here are downgraded to a warning by the caller; a document
/// without usable metadata is still worth protecting.
pub fn copy_metadata(source: &Document, output: &mut Document) -> Result<(), PdfError> {
    let info = match source.trailer.get(b"Info") {
        Ok(object) => object,
        Err(_) => return Ok(()),
    };

    let info_dict = match info {
        Object::Reference(id) => source.get_dictionary(*id)?.clone(),
        other => other.as_dict()?.clone(),
    };

    let info_id = output.add_object(Object::Dictionary(info_dict));
    output.trailer.set("Info", info_id);

    Ok(())
}

fn source_info_id(source: &Document) -> Option<ObjectId> {
    source.trailer.get(b"Info").ok()?.as_reference().ok()
}

fn dict_type(object: &Object) -> &[u8] {
    object
        .as_dict()
        .and_then(|dict| dict.get(b"Type"))
        .and_then(Object::as_name)
        .unwrap_or(b"")
}

/// Attributes the page inherits from its ancestors in the source page tree,
/// nearest ancestor first.
fn inherited_page_attributes(source: &Document, page_id: ObjectId) -> Vec<(&'static [u8], Object)> {
    let mut attributes: Vec<(&'static [u8], Object)> = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(page_id);

    let mut current = parent_of(source, page_id);
    while let Some(node_id) = current {
        if !seen.insert(node_id) {
            // Malformed parent cycle; stop rather than loop forever.
            break;
        }
        if let Ok(dict) = source.get_dictionary(node_id) {
            for key in INHERITABLE_PAGE_KEYS {
                if attributes.iter().all(|(k, _)| *k != key) {
                    if let Ok(value) = dict.get(key) {
                        attributes.push((key, value.clone()));
                    }
                }
            }
        }
        current = parent_of(source, node_id);
    }

    attributes
}

fn parent_of(source: &Document, id: ObjectId) -> Option<ObjectId> {
    source
        .get_dictionary(id)
        .ok()?
        .get(b"Parent")
        .ok()?
        .as_reference()
        .ok()
}
