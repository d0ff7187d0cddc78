//! Selection store: the single owned source of truth for the estimate.
//!
//! Both the package cards and the calculator write here. The store is passed
//! to them by reference; each mutation bumps the revision and broadcasts a
//! [`SelectionChanged`] snapshot so every view re-renders the same state.

use serde::Serialize;

use cursorcat_events::{EventBus, InMemoryEventBus, Subscription};

use crate::catalog::Catalog;
use crate::selection::{LeadGenType, Selection, SelectionPatch, Toggle};
use crate::totals::Totals;

/// What triggered a change.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    Patch,
    Toggle(Toggle),
    Reset,
}

/// Broadcast after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionChanged {
    pub revision: u64,
    pub cause: ChangeCause,
    pub selection: Selection,
    pub totals: Totals,
}

/// Owned selection state with explicit update operations.
///
/// Single writer: every mutation takes `&mut self`.
#[derive(Debug)]
pub struct SelectionStore {
    catalog: Catalog,
    selection: Selection,
    revision: u64,
    bus: InMemoryEventBus<SelectionChanged>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(*Catalog::standard())
    }
}

impl SelectionStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::default(),
            revision: 0,
            bus: InMemoryEventBus::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current selection.
    pub fn snapshot(&self) -> &Selection {
        &self.selection
    }

    /// Number of mutations applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Totals for the current selection (recomputed on every call).
    pub fn totals(&self) -> Totals {
        self.catalog.compute_totals(&self.selection)
    }

    /// Change notifications for a view.
    ///
    /// Each subscription buffers a bounded number of changes and drops the
    /// oldest when full; views should render from [`Subscription::latest`].
    pub fn subscribe(&self) -> Subscription<SelectionChanged> {
        self.bus.subscribe()
    }

    /// Merge `patch` into the selection.
    pub fn patch(&mut self, patch: &SelectionPatch) -> Totals {
        self.selection.apply(patch);
        self.commit(ChangeCause::Patch)
    }

    /// Add or remove a package/add-on (the "Add to estimate" button).
    pub fn toggle(&mut self, toggle: Toggle) -> Totals {
        let on = self.selection.toggle(toggle);
        tracing::debug!(?toggle, on, "selection toggled");
        self.commit(ChangeCause::Toggle(toggle))
    }

    /// Campaign dropdown: "None" prices zero campaigns, any type prices one.
    pub fn set_lead_gen_type(&mut self, kind: LeadGenType) -> Totals {
        self.patch(&SelectionPatch {
            lead_gen_campaigns: Some(i64::from(kind.campaign_count())),
            ..SelectionPatch::default()
        })
    }

    /// Back to the initial selection.
    pub fn reset(&mut self) -> Totals {
        self.selection = Selection::default();
        self.commit(ChangeCause::Reset)
    }

    fn commit(&mut self, cause: ChangeCause) -> Totals {
        self.revision += 1;
        let totals = self.totals();
        let change = SelectionChanged {
            revision: self.revision,
            cause,
            selection: self.selection.clone(),
            totals,
        };
        if let Err(err) = self.bus.publish(change) {
            tracing::warn!(?err, revision = self.revision, "failed to broadcast selection change");
        }
        totals
    }
}
