//! Owned snapshots of tree branches
//!
//! A [`Branch`] records what is needed to rebuild a key and its
//! descendants: the construction options of every node, twin pairs and
//! button slots. Capturing borrows the source tree only for the duration
//! of the call, so a branch can be pasted into the same tree or another.

use plume_rdf::{Iri, PropertyPath};

use crate::error::{KeyError, Result};
use crate::options::KeyOptions;
use crate::types::{KeyId, KeyKind};
use crate::WidgetTree;

/// Snapshot of a key and everything below it
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    kind: KeyKind,
    options: KeyOptions,
    is_hidden_m: bool,
    children: Vec<Branch>,
    twin: Option<Box<Branch>>,
    button: Option<Box<Branch>>,
    /// The captured key is the twin of the snapshot root
    yield_twin: bool,
    path: Option<PropertyPath>,
    rdftype: Option<Iri>,
    is_hidden: bool,
}

impl Branch {
    /// Snapshot the branch rooted at `id`
    ///
    /// An empty snapshot keeps the structure and settings but drops
    /// values, and keeps a single child per group of values. A value with
    /// a twin is captured through its property group so that the pair is
    /// rebuilt together.
    ///
    /// # Errors
    /// `ForbiddenOperation` for the root or a ghost key, `UnknownKey` for
    /// an id outside the tree.
    pub fn capture(tree: &WidgetTree, id: KeyId, empty: bool) -> Result<Self> {
        let key = tree.node(id)?;
        let path = tree.path(id);
        let rdftype = tree.effective_rdftype(id).cloned();
        let is_hidden = tree.is_hidden(id);
        let mut branch = match key.m_twin() {
            Some(twin) if key.kind == KeyKind::Value => {
                let mut branch = Self::capture_key(tree, twin, empty)?;
                branch.yield_twin = true;
                branch
            }
            _ => Self::capture_key(tree, id, empty)?,
        };
        branch.path = path;
        branch.rdftype = rdftype;
        branch.is_hidden = is_hidden;
        Ok(branch)
    }

    fn capture_key(tree: &WidgetTree, id: KeyId, empty: bool) -> Result<Self> {
        let key = tree.node(id)?;
        if key.kind == KeyKind::Root {
            return Err(KeyError::forbidden(Some(id), "the root can't be copied"));
        }
        if key.is_ghost {
            return Err(KeyError::forbidden(Some(id), "ghost keys can't be copied"));
        }

        let options = copy_options(tree, id, empty)?;
        let mut children = Vec::new();
        for child in tree.real_children(id) {
            let child_key = tree.node(child)?;
            if child_key.is_secondary_twin() {
                continue;
            }
            let snapshot = match child_key.m_twin() {
                Some(twin) if child_key.kind == KeyKind::Value => {
                    let mut snapshot = Self::capture_key(tree, twin, empty)?;
                    snapshot.yield_twin = true;
                    snapshot
                }
                _ => Self::capture_key(tree, child, empty)?,
            };
            children.push(snapshot);
            if empty && key.kind.is_value_group() {
                break;
            }
        }
        let button = match key.button() {
            Some(button) if tree.node(button)?.is_real() => {
                Some(Box::new(Self::capture_key(tree, button, empty)?))
            }
            _ => None,
        };
        let twin = match key.m_twin() {
            Some(twin) if key.kind == KeyKind::GroupOfProperties => {
                Some(Box::new(Self::capture_key(tree, twin, empty)?))
            }
            _ => None,
        };

        Ok(Self {
            kind: key.kind,
            options,
            is_hidden_m: key.is_hidden_m,
            children,
            twin,
            button,
            yield_twin: false,
            path: None,
            rdftype: None,
            is_hidden: false,
        })
    }

    /// Rebuild the branch under `parent`
    ///
    /// Returns the key standing for the captured one, or nothing when its
    /// factory declined to create it.
    ///
    /// # Errors
    /// Whatever the factories and twin linking raise.
    pub fn instantiate(&self, tree: &mut WidgetTree, parent: KeyId) -> Result<Option<KeyId>> {
        let opts = self.options.clone().with_parent(parent);
        let Some(id) = tree.create(self.kind, opts)? else {
            return Ok(None);
        };
        for child in &self.children {
            child.instantiate(tree, id)?;
        }
        if let Some(button) = &self.button {
            button.instantiate(tree, id)?;
        }
        if let Some(twin) = &self.twin {
            if let Some(twin_id) = twin.instantiate(tree, parent)? {
                tree.set_m_twin(id, Some(twin_id))?;
                tree.set_is_hidden_m(id, Some(self.is_hidden_m))?;
                if self.yield_twin {
                    return Ok(Some(twin_id));
                }
            }
        }
        Ok(Some(id))
    }

    /// Kind of the captured key
    #[inline]
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        if self.yield_twin {
            KeyKind::Value
        } else {
            self.kind
        }
    }

    /// Path of the captured key in its tree
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&PropertyPath> {
        self.path.as_ref()
    }

    /// RDF class of the captured key
    #[inline]
    #[must_use]
    pub fn rdftype(&self) -> Option<&Iri> {
        self.rdftype.as_ref()
    }

    /// Check if the captured key was hidden
    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Number of keys the branch rebuilds
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
            + self.twin.as_ref().map_or(0, |t| t.len())
            + self.button.as_ref().map_or(0, |b| b.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Construction options reproducing a key
///
/// Twin link and mask flag are left out, [`Branch::instantiate`] restores
/// them once both twins exist.
fn copy_options(tree: &WidgetTree, id: KeyId, empty: bool) -> Result<KeyOptions> {
    let key = tree.node(id)?;
    let mut opts = KeyOptions {
        order_idx: key.order_idx.clone(),
        ..KeyOptions::default()
    };
    match key.kind {
        KeyKind::Root | KeyKind::PlusButton | KeyKind::TranslationButton => {}
        KeyKind::Tab => opts.label.clone_from(&key.label),
        KeyKind::GroupOfProperties => {
            opts.predicate = tree.effective_predicate(id).cloned();
            opts.label.clone_from(&key.label);
            opts.description.clone_from(&key.description);
            opts.rdftype = tree.effective_rdftype(id).cloned();
        }
        KeyKind::GroupOfValues | KeyKind::TranslationGroup | KeyKind::Value => {
            opts.predicate = tree.effective_predicate(id).cloned();
            opts.label.clone_from(&key.label);
            opts.description.clone_from(&key.description);
            if let Some(config) = tree.effective_config(id) {
                opts.rdftype.clone_from(&config.rdftype);
                opts.xsdtype.clone_from(&config.xsdtype);
                opts.sources.clone_from(&config.sources);
                opts.transform = config.transform;
                opts.placeholder.clone_from(&config.placeholder);
                opts.input_mask.clone_from(&config.input_mask);
                opts.is_mandatory = config.is_mandatory;
                opts.is_read_only = config.is_read_only;
                opts.regex_validator.clone_from(&config.regex_validator);
                opts.regex_validator_flags
                    .clone_from(&config.regex_validator_flags);
            }
            if key.kind.is_value_group() {
                opts.with_minus_buttons = Some(key.with_minus_buttons());
            }
        }
    }
    if let Some(data) = key.value_data() {
        opts.do_not_save = data.do_not_save;
        opts.rowspan = Some(data.rowspan);
        opts.is_long_text = data.is_long_text;
        opts.independant_label = data.independant_label;
        if !empty {
            opts.value.clone_from(&data.value);
            opts.value_language.clone_from(&data.value_language);
            opts.value_source.clone_from(&data.value_source);
        }
    }
    Ok(opts)
}
