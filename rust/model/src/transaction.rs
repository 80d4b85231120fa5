// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped write batches.
//!
//! A [`Transaction`] holds exclusive access to the document for as long as it
//! lives. It either commits explicitly or rolls back when dropped, so early
//! returns through `?` never leave a half-applied batch behind.

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::host::Transactional;

/// An open write batch on a document.
///
/// Derefs to the document so repository methods can be called directly.
///
/// # Example
///
/// ```
/// use planroom_model::{MemoryDocument, RoomRepository, Transaction};
///
/// let mut doc = MemoryDocument::new();
/// {
///     let tx = Transaction::start(&mut doc, "Inspect").unwrap();
///     assert!(tx.rooms().is_empty());
///     // dropped without commit: rolled back
/// }
/// assert!(doc.committed_transactions().is_empty());
/// ```
pub struct Transaction<'d, D: Transactional + ?Sized> {
    doc: &'d mut D,
    name: String,
    open: bool,
}

impl<'d, D: Transactional + ?Sized> Transaction<'d, D> {
    /// Opens a named batch on the document.
    pub fn start(doc: &'d mut D, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        doc.begin_transaction(&name)?;
        tracing::trace!(transaction = %name, "Transaction started");
        Ok(Self {
            doc,
            name,
            open: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Commits every change made in this batch.
    ///
    /// If the host refuses the commit, the batch is rolled back on drop.
    pub fn commit(mut self) -> Result<()> {
        self.doc.commit_transaction()?;
        self.open = false;
        tracing::trace!(transaction = %self.name, "Transaction committed");
        Ok(())
    }

    /// Discards every change made in this batch.
    pub fn rollback(mut self) -> Result<()> {
        self.open = false;
        self.doc.rollback_transaction()
    }
}

impl<D: Transactional + ?Sized> Deref for Transaction<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.doc
    }
}

impl<D: Transactional + ?Sized> DerefMut for Transaction<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.doc
    }
}

impl<D: Transactional + ?Sized> Drop for Transaction<'_, D> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        tracing::warn!(transaction = %self.name, "Rolling back uncommitted transaction");
        if let Err(err) = self.doc.rollback_transaction() {
            tracing::error!(transaction = %self.name, error = %err, "Rollback failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::RoomRepository;
    use crate::MemoryDocument;
    use nalgebra::Point2;

    fn doc_with_region() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let level = doc.add_level("Level 1", 0.0, 3.0);
        doc.add_region(
            level,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 0.0),
                Point2::new(5.0, 4.0),
                Point2::new(0.0, 4.0),
            ],
        )
        .unwrap();
        doc
    }

    fn first_free_circuit(doc: &MemoryDocument) -> crate::Circuit {
        use crate::host::{LevelRepository, PlanTopology};
        let level = doc.levels()[0].id;
        doc.circuits(level).unwrap().remove(0)
    }

    #[test]
    fn commit_keeps_changes() {
        let mut doc = doc_with_region();
        let circuit = first_free_circuit(&doc);

        let mut tx = Transaction::start(&mut doc, "Create").unwrap();
        tx.create_room(&circuit).unwrap();
        tx.commit().unwrap();

        assert_eq!(doc.rooms().len(), 1);
        assert_eq!(doc.committed_transactions(), ["Create"]);
        assert!(doc.active_transaction().is_none());
    }

    #[test]
    fn drop_rolls_back() {
        let mut doc = doc_with_region();
        let circuit = first_free_circuit(&doc);

        {
            let mut tx = Transaction::start(&mut doc, "Create").unwrap();
            tx.create_room(&circuit).unwrap();
        }

        assert!(doc.rooms().is_empty());
        assert!(doc.active_transaction().is_none());
    }

    #[test]
    fn early_return_rolls_back() {
        fn create_twice(doc: &mut MemoryDocument, circuit: &crate::Circuit) -> Result<()> {
            let mut tx = Transaction::start(doc, "Create")?;
            tx.create_room(circuit)?;
            tx.create_room(circuit)?;
            tx.commit()
        }

        let mut doc = doc_with_region();
        let circuit = first_free_circuit(&doc);

        let err = create_twice(&mut doc, &circuit).unwrap_err();
        assert!(matches!(err, Error::RegionOccupied(_)));
        assert!(doc.rooms().is_empty());
    }

    #[test]
    fn nested_start_is_rejected() {
        let mut doc = MemoryDocument::new();
        let mut tx = Transaction::start(&mut doc, "Outer").unwrap();
        let err = Transaction::start(&mut *tx, "Inner").err().unwrap();
        assert!(matches!(err, Error::TransactionAlreadyActive(name) if name == "Outer"));
        assert_eq!(tx.name(), "Outer");
        tx.rollback().unwrap();
    }
}
