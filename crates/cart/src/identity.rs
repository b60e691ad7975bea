//! Deterministic line-item identity.
//!
//! Two cart lines for the same product and the same variant selection must
//! always merge, regardless of the order the buyer picked options in. The
//! canonical key makes that comparison a plain string equality.

use marigold_core::{LineItemId, ProductId};

use crate::types::VariantSelection;

/// Delimiter between a variant name and its option value.
///
/// Must not occur in variant names or option values.
const PAIR_DELIMITER: char = ':';

/// Delimiter between `name:value` pairs.
const ENTRY_DELIMITER: char = '|';

/// Canonical, order-independent key for a variant selection.
///
/// `name:value` pairs sorted lexicographically by variant name and joined
/// with `|`. Set-equal selections always produce identical keys; an empty
/// selection produces an empty key.
#[must_use]
pub fn canonical_key(selection: &VariantSelection) -> String {
    let mut key = String::new();
    for (name, value) in selection.iter() {
        if !key.is_empty() {
            key.push(ENTRY_DELIMITER);
        }
        key.push_str(name);
        key.push(PAIR_DELIMITER);
        key.push_str(value);
    }
    key
}

/// Derive the deterministic line-item identity for a (product, selection)
/// pairing: `<product id>-<canonical key>`.
#[must_use]
pub fn line_item_id(product_id: &ProductId, selection: &VariantSelection) -> LineItemId {
    LineItemId::new(format!("{product_id}-{}", canonical_key(selection)))
}
