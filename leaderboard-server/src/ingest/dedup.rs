//! Deduplication & precedence resolution
//!
//! Webhooks are redelivered and a single payment emits several event types,
//! so every entity id collapses to one record: the highest
//! [`PaymentEventKind::precedence`](shared::models::PaymentEventKind::precedence),
//! first arrival on ties.

use shared::models::{CanonicalTransaction, EntityKey};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Deduplicated {
    /// One record per entity, in order of each entity's first arrival
    pub transactions: Vec<CanonicalTransaction>,
    /// Records folded into an earlier record with the same entity id
    pub collapsed: usize,
    /// Records with a synthetic row key that could not be deduplicated
    pub unkeyed: usize,
}

pub fn resolve(candidates: Vec<CanonicalTransaction>) -> Deduplicated {
    let mut slots: HashMap<EntityKey, usize> = HashMap::with_capacity(candidates.len());
    let mut out = Deduplicated::default();

    for tx in candidates {
        if tx.entity_id.is_synthetic() {
            out.unkeyed += 1;
        }
        let existing = slots.get(&tx.entity_id).copied();
        match existing {
            Some(slot) => {
                out.collapsed += 1;
                let kept = &mut out.transactions[slot];
                if tx.event_type.precedence() > kept.event_type.precedence() {
                    *kept = tx;
                }
            }
            None => {
                slots.insert(tx.entity_id.clone(), out.transactions.len());
                out.transactions.push(tx);
            }
        }
    }

    out
}
