//! Operations over the whole patient collection.
//!
//! The collection is the unit of persistence: every edit produces a new
//! `Vec<Child>` that replaces the stored one wholesale.

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::Child;

pub fn find(children: &[Child], id: Uuid) -> Option<&Child> {
    children.iter().find(|c| c.id == id)
}

/// Append a newly registered child. Ids are unique across the collection.
pub fn insert(children: &mut Vec<Child>, child: Child) -> Result<(), CoreError> {
    if find(children, child.id).is_some() {
        return Err(CoreError::DuplicateChild(child.id));
    }
    children.push(child);
    Ok(())
}

/// Replace the child with the same id, appending it if absent.
pub fn upsert(children: &mut Vec<Child>, child: Child) {
    match children.iter_mut().find(|c| c.id == child.id) {
        Some(existing) => *existing = child,
        None => children.push(child),
    }
}

/// Remove a child together with all of its assessments.
pub fn remove(children: &mut Vec<Child>, id: Uuid) -> Result<Child, CoreError> {
    let index = children
        .iter()
        .position(|c| c.id == id)
        .ok_or(CoreError::ChildNotFound(id))?;
    let removed = children.remove(index);
    tracing::debug!(
        child_id = %id,
        assessments = removed.assessments.len(),
        "child removed from collection"
    );
    Ok(removed)
}

/// Case-insensitive substring match on the child's name.
pub fn search_by_name<'a>(children: &'a [Child], term: &str) -> Vec<&'a Child> {
    let needle = term.trim().to_lowercase();
    children
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}
