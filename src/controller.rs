//! Form-state controller: working copy, baseline, dirtiness and save/reset.
//!
//! [`FormController`] owns the loaded document exclusively. Rendered fields
//! and override editors call back into it by path; nothing else mutates the
//! tree. The controller talks to the persistence collaborator through the
//! [`ConfigStore`] trait, so multiple independent editing sessions (and test
//! doubles) are trivially supported.

use std::collections::HashSet;

use anyhow::Context;
use log::{debug, info};

use crate::data::{CommentMap, ConfigNode, Path, TreeError};

/// A loaded configuration document: the tree plus its comments.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    /// The configuration tree; the root is always an object.
    pub tree: ConfigNode,
    /// Human-authored descriptions, keyed by path string.
    pub comments: CommentMap,
}

/// Persistence collaborator contract, transport-agnostic.
pub trait ConfigStore {
    /// Fetch the document.
    ///
    /// # Errors
    ///
    /// Any transport error; the controller surfaces it and stays loadable.
    fn load(&self) -> impl Future<Output = anyhow::Result<ConfigDocument>>;

    /// Persist the full tree.
    ///
    /// # Errors
    ///
    /// Any transport error; the controller keeps the working copy intact
    /// so the operator can retry.
    fn save(&self, tree: &ConfigNode) -> impl Future<Output = anyhow::Result<()>>;
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No document yet; a load is required (or has failed and can retry).
    Loading,
    /// Baseline and working copy agree; reset/submit are no-ops.
    Clean,
    /// At least one path differs from the baseline.
    Dirty,
    /// A save is in flight; edits, reset and re-submit are all rejected.
    Saving,
}

/// Owns the working copy, the baseline snapshot and per-path dirtiness.
pub struct FormController<S> {
    store: S,
    state: EditorState,
    baseline: Option<ConfigNode>,
    working: Option<ConfigNode>,
    comments: CommentMap,
    dirty: HashSet<String>,
}

impl<S: ConfigStore> FormController<S> {
    /// A controller in the `Loading` state, before any document exists.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: EditorState::Loading,
            baseline: None,
            working: None,
            comments: CommentMap::new(),
            dirty: HashSet::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Whether any path differs from the baseline.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// The working copy, once loaded.
    pub fn tree(&self) -> Option<&ConfigNode> {
        self.working.as_ref()
    }

    /// The loaded comments.
    pub fn comments(&self) -> &CommentMap {
        &self.comments
    }

    /// Fetch the document and adopt it as both baseline and working copy.
    ///
    /// Rejected while a save is in flight. On failure the controller
    /// returns to `Loading` with no partial document; the caller surfaces
    /// the error as a retryable empty state.
    ///
    /// # Errors
    ///
    /// The store's transport error, with context.
    pub async fn load(&mut self) -> anyhow::Result<()> {
        if self.state == EditorState::Saving {
            anyhow::bail!("cannot reload while a save is in flight");
        }
        match self.store.load().await.context("failed to load configuration") {
            Ok(doc) => {
                info!("configuration loaded");
                self.baseline = Some(doc.tree.clone());
                self.working = Some(doc.tree);
                self.comments = doc.comments;
                self.dirty.clear();
                self.state = EditorState::Clean;
                Ok(())
            }
            Err(e) => {
                self.baseline = None;
                self.working = None;
                self.dirty.clear();
                self.state = EditorState::Loading;
                Err(e)
            }
        }
    }

    /// Replace the node at `path` in the working copy.
    ///
    /// Returns `Ok(false)` without touching anything when no document is
    /// loaded or a save is in flight. Dirtiness for the path is recomputed
    /// against the baseline, so editing a value back to its original clears
    /// it; `Clean` ⇄ `Dirty` transitions follow.
    ///
    /// # Errors
    ///
    /// [`TreeError`] when the path does not resolve; the working copy is
    /// unchanged in that case.
    pub fn set_value(&mut self, path: &Path, value: ConfigNode) -> Result<bool, TreeError> {
        if !matches!(self.state, EditorState::Clean | EditorState::Dirty) {
            debug!("edit at `{path}` ignored in {:?} state", self.state);
            return Ok(false);
        }
        let (Some(working), Some(baseline)) = (self.working.as_mut(), self.baseline.as_ref())
        else {
            return Ok(false);
        };

        working.set(path, value)?;

        let key = path.to_string();
        let unchanged = match (baseline.get(path), working.get(path)) {
            (Ok(before), Ok(after)) => before == after,
            _ => false,
        };
        if unchanged {
            self.dirty.remove(&key);
        } else {
            self.dirty.insert(key);
        }
        // A broad subtree edit can mask narrower entries; the whole-tree
        // comparison keeps the flag exact.
        if !self.dirty.is_empty() && *working == *baseline {
            self.dirty.clear();
        }
        self.state = if self.dirty.is_empty() {
            EditorState::Clean
        } else {
            EditorState::Dirty
        };
        Ok(true)
    }

    /// Discard the working copy and restore a structural copy of the
    /// baseline. Pure: never touches the store. No-op unless loaded and
    /// not saving.
    pub fn reset(&mut self) {
        if !matches!(self.state, EditorState::Clean | EditorState::Dirty) {
            return;
        }
        if let Some(baseline) = &self.baseline {
            self.working = Some(baseline.clone());
            self.dirty.clear();
            self.state = EditorState::Clean;
        }
    }

    /// Submit the working copy to the store.
    ///
    /// No-op (`Ok(false)`) unless `Dirty`, which also means a second
    /// submit while one is in flight has no additional side effect. On
    /// success the submitted copy becomes the new baseline and the state
    /// returns to `Clean`; on failure the state returns to `Dirty` with
    /// the working copy and dirty set preserved verbatim.
    ///
    /// # Errors
    ///
    /// The store's transport error, with context.
    pub async fn submit(&mut self) -> anyhow::Result<bool> {
        if self.state != EditorState::Dirty {
            debug!("submit ignored in {:?} state", self.state);
            return Ok(false);
        }
        let Some(working) = self.working.as_ref() else {
            return Ok(false);
        };

        self.state = EditorState::Saving;
        let result = self
            .store
            .save(working)
            .await
            .context("failed to save configuration");
        match result {
            Ok(()) => {
                info!("configuration saved");
                self.baseline = self.working.clone();
                self.dirty.clear();
                self.state = EditorState::Clean;
                Ok(true)
            }
            Err(e) => {
                self.state = EditorState::Dirty;
                Err(e)
            }
        }
    }

    #[cfg(test)]
    fn force_state(&mut self, state: EditorState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    /// In-memory store with injectable failures.
    struct MockStore {
        document: serde_json::Value,
        fail_save: Cell<bool>,
        saved: RefCell<Vec<serde_json::Value>>,
    }

    impl MockStore {
        fn new(document: serde_json::Value) -> Self {
            Self {
                document,
                fail_save: Cell::new(false),
                saved: RefCell::new(Vec::new()),
            }
        }
    }

    impl ConfigStore for MockStore {
        async fn load(&self) -> anyhow::Result<ConfigDocument> {
            Ok(ConfigDocument {
                tree: ConfigNode::from(self.document.clone()),
                comments: CommentMap::new(),
            })
        }

        async fn save(&self, tree: &ConfigNode) -> anyhow::Result<()> {
            if self.fail_save.get() {
                anyhow::bail!("backend unavailable");
            }
            self.saved
                .borrow_mut()
                .push(serde_json::Value::from(tree.clone()));
            Ok(())
        }
    }

    struct FailingLoad;

    impl ConfigStore for FailingLoad {
        async fn load(&self) -> anyhow::Result<ConfigDocument> {
            anyhow::bail!("connection refused")
        }

        async fn save(&self, _tree: &ConfigNode) -> anyhow::Result<()> {
            Ok(())
        }
    }

    async fn loaded(document: serde_json::Value) -> FormController<MockStore> {
        let mut controller = FormController::new(MockStore::new(document));
        controller.load().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn load_transitions_to_clean() {
        let controller = loaded(json!({ "a": 1 })).await;
        assert_eq!(controller.state(), EditorState::Clean);
        assert!(!controller.is_dirty());
        assert!(controller.tree().is_some());
    }

    #[tokio::test]
    async fn load_failure_stays_loading_with_no_partial_document() {
        let mut controller = FormController::new(FailingLoad);
        assert!(controller.load().await.is_err());
        assert_eq!(controller.state(), EditorState::Loading);
        assert!(controller.tree().is_none());
    }

    #[tokio::test]
    async fn edits_before_load_are_ignored() {
        let mut controller = FormController::new(MockStore::new(json!({})));
        let applied = controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(1)))
            .unwrap();
        assert!(!applied);
    }

    #[tokio::test]
    async fn dirty_monotonicity_and_reset() {
        let mut controller = loaded(json!({ "a": { "b": 5 }, "c": "x" })).await;

        controller
            .set_value(&Path::parse("a.b"), ConfigNode::from(json!(7)))
            .unwrap();
        assert_eq!(controller.state(), EditorState::Dirty);

        controller
            .set_value(&Path::parse("c"), ConfigNode::from(json!("y")))
            .unwrap();
        assert_eq!(controller.state(), EditorState::Dirty);

        controller.reset();
        assert_eq!(controller.state(), EditorState::Clean);
        assert_eq!(
            controller.tree().unwrap(),
            &ConfigNode::from(json!({ "a": { "b": 5 }, "c": "x" }))
        );
    }

    #[tokio::test]
    async fn editing_back_to_baseline_clears_dirty() {
        let mut controller = loaded(json!({ "a": 1 })).await;
        controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(2)))
            .unwrap();
        assert!(controller.is_dirty());
        controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(1)))
            .unwrap();
        assert_eq!(controller.state(), EditorState::Clean);
    }

    #[tokio::test]
    async fn submit_adopts_working_copy_as_baseline() {
        let mut controller = loaded(json!({ "a": { "b": 5, "c__HIDDEN": "s" } })).await;
        controller
            .set_value(&Path::parse("a.b"), ConfigNode::from(json!(7)))
            .unwrap();

        assert!(controller.submit().await.unwrap());
        assert_eq!(controller.state(), EditorState::Clean);

        // Hidden keys ride along unmodified.
        let saved = controller.store.saved.borrow();
        assert_eq!(saved.as_slice(), [json!({ "a": { "b": 7, "c__HIDDEN": "s" } })]);

        // The new baseline means reset is now a no-op on the saved value.
        drop(saved);
        controller.reset();
        assert_eq!(
            controller.tree().unwrap(),
            &ConfigNode::from(json!({ "a": { "b": 7, "c__HIDDEN": "s" } }))
        );
    }

    #[tokio::test]
    async fn submit_when_clean_is_a_no_op() {
        let mut controller = loaded(json!({ "a": 1 })).await;
        assert!(!controller.submit().await.unwrap());
        assert!(controller.store.saved.borrow().is_empty());
    }

    #[tokio::test]
    async fn submit_while_saving_has_no_side_effect() {
        let mut controller = loaded(json!({ "a": 1 })).await;
        controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(2)))
            .unwrap();
        controller.force_state(EditorState::Saving);

        assert!(!controller.submit().await.unwrap());
        assert!(controller.store.saved.borrow().is_empty());
    }

    #[tokio::test]
    async fn edits_and_reset_are_blocked_while_saving() {
        let mut controller = loaded(json!({ "a": 1 })).await;
        controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(2)))
            .unwrap();
        controller.force_state(EditorState::Saving);

        let applied = controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(3)))
            .unwrap();
        assert!(!applied);
        controller.reset();
        assert_eq!(
            controller.tree().unwrap(),
            &ConfigNode::from(json!({ "a": 2 }))
        );
    }

    #[tokio::test]
    async fn save_failure_preserves_edits_verbatim() {
        let mut controller = loaded(json!({ "a": 1 })).await;
        controller
            .set_value(&Path::parse("a"), ConfigNode::from(json!(2)))
            .unwrap();
        controller.store.fail_save.set(true);

        assert!(controller.submit().await.is_err());
        assert_eq!(controller.state(), EditorState::Dirty);
        assert_eq!(
            controller.tree().unwrap(),
            &ConfigNode::from(json!({ "a": 2 }))
        );

        // Retry succeeds without re-entering data.
        controller.store.fail_save.set(false);
        assert!(controller.submit().await.unwrap());
        assert_eq!(controller.state(), EditorState::Clean);
        assert_eq!(
            controller.store.saved.borrow().as_slice(),
            [json!({ "a": 2 })]
        );
    }

    #[tokio::test]
    async fn invalid_path_leaves_working_copy_unchanged() {
        let mut controller = loaded(json!({ "a": 1 })).await;
        let err = controller
            .set_value(&Path::parse("missing.deep"), ConfigNode::Null)
            .unwrap_err();
        assert!(matches!(err, TreeError::NotFound { .. }));
        assert_eq!(controller.state(), EditorState::Clean);
    }
}
