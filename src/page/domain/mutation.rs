//! Mutation records delivered by the host page's observer machinery.
//!
//! The host batches mutations; record order within a batch follows
//! occurrence order, but batch delivery itself is asynchronous with respect
//! to the mutations it describes.

use super::NodeId;

/// The kind of change a mutation record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Children were added to or removed from the target.
    ChildList,
    /// Text content under the target changed.
    CharacterData,
    /// An attribute of the target changed.
    Attributes,
}

/// One observed change to the page tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    kind: MutationKind,
    target: NodeId,
    added: Vec<NodeId>,
    removed: Vec<NodeId>,
    attribute_name: Option<String>,
}

impl MutationRecord {
    /// Creates a child-list record.
    #[must_use]
    pub const fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            added,
            removed,
            attribute_name: None,
        }
    }

    /// Creates a character-data record for text changes under `target`.
    #[must_use]
    pub const fn character_data(target: NodeId) -> Self {
        Self {
            kind: MutationKind::CharacterData,
            target,
            added: Vec::new(),
            removed: Vec::new(),
            attribute_name: None,
        }
    }

    /// Creates an attribute record for a change to the named attribute.
    #[must_use]
    pub fn attributes(target: NodeId, attribute_name: impl Into<String>) -> Self {
        Self {
            kind: MutationKind::Attributes,
            target,
            added: Vec::new(),
            removed: Vec::new(),
            attribute_name: Some(attribute_name.into()),
        }
    }

    /// Returns the record kind.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        self.kind
    }

    /// Returns the element the change occurred on or under.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// Returns handles of elements added by a child-list change.
    #[must_use]
    pub fn added(&self) -> &[NodeId] {
        &self.added
    }

    /// Returns handles of elements removed by a child-list change.
    #[must_use]
    pub fn removed(&self) -> &[NodeId] {
        &self.removed
    }

    /// Returns the changed attribute name for attribute records.
    #[must_use]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute_name.as_deref()
    }
}

/// An ordered batch of mutation records as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    records: Vec<MutationRecord>,
}

impl MutationBatch {
    /// Creates a batch from records in occurrence order.
    #[must_use]
    pub const fn new(records: Vec<MutationRecord>) -> Self {
        Self { records }
    }

    /// Creates a batch holding a single record.
    #[must_use]
    pub fn single(record: MutationRecord) -> Self {
        Self {
            records: vec![record],
        }
    }

    /// Returns the records in occurrence order.
    #[must_use]
    pub fn records(&self) -> &[MutationRecord] {
        &self.records
    }

    /// Returns `true` when the batch carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Options the host should configure its primary observer with.
///
/// The breadth (child list, subtree, character data, and a whitelisted set
/// of attributes) is required because platforms signal new turns,
/// streaming text updates, and completion through all three mutation
/// kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserveOptions {
    child_list: bool,
    subtree: bool,
    character_data: bool,
    attribute_filter: Vec<String>,
}

impl ObserveOptions {
    /// Creates the conversation-observer option set with the given
    /// attribute whitelist.
    #[must_use]
    pub fn conversation(attribute_filter: impl IntoIterator<Item = String>) -> Self {
        Self {
            child_list: true,
            subtree: true,
            character_data: true,
            attribute_filter: attribute_filter.into_iter().collect(),
        }
    }

    /// Returns whether child-list changes are observed.
    #[must_use]
    pub const fn child_list(&self) -> bool {
        self.child_list
    }

    /// Returns whether the whole subtree is observed.
    #[must_use]
    pub const fn subtree(&self) -> bool {
        self.subtree
    }

    /// Returns whether character-data changes are observed.
    #[must_use]
    pub const fn character_data(&self) -> bool {
        self.character_data
    }

    /// Returns the observed attribute whitelist.
    #[must_use]
    pub fn attribute_filter(&self) -> &[String] {
        &self.attribute_filter
    }
}
