//! Form construction
//!
//! [`WidgetsDictBuilder`] walks the schema from `dcat:Dataset` down through
//! the blank nodes, reads the values of each property from the override
//! data or the metagraph, and creates the matching keys:
//!
//! - one group of values, or translation group, for several values
//! - a group of properties and its twin value for blank-node-or-IRI
//!   properties
//! - a plus or translation button for properties that take more values
//!
//! Once the tree is complete, empty groups are removed and the hints of
//! every real key are computed.

use indexmap::{IndexMap, IndexSet};
use plume_rdf::{
    datasetid_from_uuid, sort_by_language, uuid_from_datasetid, DatasetId, Iri, Literal,
    Metagraph, NamespaceManager, NoThesaurus, PropertyPath, Term, Thesaurus, DCAT_DATASET,
    DCT_IDENTIFIER, RDF_LANG_STRING, RDF_TYPE, SNUM_COLUMN, XSD_STRING,
};
use plume_widgetkey::{KeyError, KeyId, KeyOptions, OrderIdx, WidgetTree};
use tracing::{debug, info, warn};

use crate::config::DictConfig;
use crate::dict::{FormData, WidgetsDict};
use crate::error::Result;
use crate::hints::internalize;
use crate::schema::{NodeKind, Origin, PropertyDescriptor, PropertySchema};
use crate::template::Template;

/// Tab for the first template tab when the template declares none
pub const DEFAULT_TAB: &str = "Général";
/// Tab gathering the properties the template doesn't list
pub const OTHERS_TAB: &str = "Autres";
/// Tab listing the columns of the described table
pub const COLUMNS_TAB: &str = "Champs";

const COLUMN_DESCRIPTION: &str = "Description du champ";

/// One property about to be laid out
#[derive(Debug, Clone)]
struct Property {
    descriptor: PropertyDescriptor,
    path: PropertyPath,
    order_idx: OrderIdx,
    tab: Option<String>,
    unlisted: bool,
}

/// Builder for a [`WidgetsDict`]
pub struct WidgetsDictBuilder<'a> {
    schema: &'a dyn PropertySchema,
    metagraph: Option<&'a Metagraph>,
    template: Option<&'a Template>,
    data: IndexMap<String, Vec<Term>>,
    columns: Vec<(String, String)>,
    config: DictConfig,
    thesaurus: Box<dyn Thesaurus>,
    nsm: NamespaceManager,
}

impl<'a> WidgetsDictBuilder<'a> {
    /// Builder reading class properties from `schema`
    #[must_use]
    pub fn new(schema: &'a dyn PropertySchema) -> Self {
        Self {
            schema,
            metagraph: None,
            template: None,
            data: IndexMap::new(),
            columns: Vec::new(),
            config: DictConfig::default(),
            thesaurus: Box::new(NoThesaurus),
            nsm: NamespaceManager::default(),
        }
    }

    /// Record to edit
    #[must_use]
    pub fn with_metagraph(mut self, metagraph: &'a Metagraph) -> Self {
        self.metagraph = Some(metagraph);
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: &'a Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Values overriding the metagraph, keyed by N3 path
    #[must_use]
    pub fn with_data(mut self, data: IndexMap<String, Vec<Term>>) -> Self {
        self.data = data;
        self
    }

    /// Column labels and descriptions of the described table
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<(String, String)>) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DictConfig) -> Self {
        self.config = config.normalized();
        self
    }

    #[must_use]
    pub fn with_thesaurus(mut self, thesaurus: impl Thesaurus + 'static) -> Self {
        self.thesaurus = Box::new(thesaurus);
        self
    }

    /// Namespaces used to read the data keys
    #[must_use]
    pub fn with_namespaces(mut self, nsm: NamespaceManager) -> Self {
        self.nsm = nsm;
        self
    }

    /// Build the form
    ///
    /// # Errors
    /// `Tree` when the schema describes keys the tree refuses, such as a
    /// blank-node property without class
    pub fn build(self) -> Result<WidgetsDict> {
        let Self {
            schema,
            metagraph,
            template,
            data,
            columns,
            config,
            thesaurus,
            nsm,
        } = self;
        info!(
            mode = ?config.mode,
            translation = config.translation_enabled(),
            language = config.main_language(),
            "Building form"
        );

        let mut data = resolve_data(data, &nsm);
        let graph_subject = metagraph.and_then(Metagraph::datasetid).cloned();
        let graph_id = graph_subject.as_ref().and_then(Term::as_iri).cloned();
        let datasetid = resolve_datasetid(&mut data, graph_id.as_ref());

        let mut tree = WidgetTree::with_datasetid(config.session(), graph_id);
        tree.suspend_computation();
        let root = tree.root();
        create_tabs(&mut tree, template, &columns, &config)?;

        let mut walker = Walker {
            tree: &mut tree,
            schema,
            metagraph,
            template,
            data: &data,
            config: &config,
            thesaurus: thesaurus.as_ref(),
        };
        walker.walk(root, &DCAT_DATASET, graph_subject.as_ref(), None)?;

        tree.resume_computation();
        let cleaned = tree.clean()?;
        if !cleaned.dropped.is_empty() {
            debug!("Removed {} empty groups", cleaned.dropped.len());
        }
        tree.set_datasetid(datasetid.clone());
        tree.clear_actionsbook();

        let mut hints = IndexMap::with_capacity(tree.len());
        for id in tree.keys().filter(|k| k.is_real()).map(|k| k.id()).collect::<Vec<_>>() {
            hints.insert(id, internalize(&tree, id, thesaurus.as_ref())?);
        }
        info!(keys = tree.len(), widgets = hints.len(), %datasetid, "Form built");

        Ok(WidgetsDict::from_parts(
            tree, hints, config, datasetid, data, nsm, thesaurus,
        ))
    }
}

fn resolve_data(data: IndexMap<String, Vec<Term>>, nsm: &NamespaceManager) -> FormData {
    let mut resolved = FormData::with_capacity(data.len());
    for (key, values) in data {
        match PropertyPath::from_n3(&key, nsm) {
            Ok(path) => {
                resolved.insert(path, values);
            }
            Err(err) => debug!("Ignored data for {:?}: {}", key, err),
        }
    }
    resolved
}

/// Dataset identifier from the data, the metagraph or a fresh UUID
///
/// When the data doesn't carry a usable identifier, the one chosen is
/// written back into it.
fn resolve_datasetid(data: &mut FormData, graph_id: Option<&Iri>) -> Iri {
    let identifier = PropertyPath::single(DCT_IDENTIFIER.clone());
    if let Some(found) = data
        .get(&identifier)
        .and_then(|values| values.first())
        .and_then(|value| datasetid_from_uuid(&value.to_string()))
    {
        return found;
    }
    let (datasetid, uuid) = graph_id
        .and_then(|id| uuid_from_datasetid(id.as_str()).map(|uuid| (id.clone(), uuid)))
        .unwrap_or_else(|| {
            let fresh = DatasetId::new();
            (fresh.to_iri(), fresh.uuid())
        });
    data.insert(identifier, vec![Literal::new(uuid.to_string()).into()]);
    datasetid
}

fn create_tabs(
    tree: &mut WidgetTree,
    template: Option<&Template>,
    columns: &[(String, String)],
    config: &DictConfig,
) -> Result<()> {
    let root = tree.root();
    match template.filter(|t| !t.tabs().is_empty()) {
        Some(template) => {
            for tab in template.tabs() {
                tree.create_tab(
                    KeyOptions::child_of(root)
                        .with_label(tab.label.clone())
                        .with_order_idx(tab.order_idx),
                )?;
            }
        }
        None => {
            tree.create_tab(
                KeyOptions::child_of(root)
                    .with_label(DEFAULT_TAB)
                    .with_order_idx(0),
            )?;
        }
    }
    tree.create_tab(
        KeyOptions::child_of(root)
            .with_label(OTHERS_TAB)
            .with_order_idx(OrderIdx::LAST),
    )?;
    if columns.is_empty() {
        return Ok(());
    }
    let tab = tree.create_tab(
        KeyOptions::child_of(root)
            .with_label(COLUMNS_TAB)
            .with_order_idx(OrderIdx::LAST - 1),
    )?;
    for (label, description) in columns {
        tree.create_value(
            KeyOptions::child_of(tab)
                .with_predicate(SNUM_COLUMN.clone())
                .with_label(label.clone())
                .with_description(COLUMN_DESCRIPTION)
                .with_xsdtype(XSD_STRING.clone())
                .with_value(Literal::new(description.clone()))
                .with_long_text(true)
                .with_independant_label(true)
                .with_rowspan(config.text_edit_row_span.min(config.max_rowspan()))
                .with_read_only(!config.edit())
                .with_do_not_save(true),
        )?;
    }
    Ok(())
}

fn is_blank(values: &[Option<Term>]) -> bool {
    values.iter().all(Option::is_none)
}

struct Walker<'w> {
    tree: &'w mut WidgetTree,
    schema: &'w dyn PropertySchema,
    metagraph: Option<&'w Metagraph>,
    template: Option<&'w Template>,
    data: &'w FormData,
    config: &'w DictConfig,
    thesaurus: &'w dyn Thesaurus,
}

impl Walker<'_> {
    /// Properties of `rdfclass` with their template settings
    ///
    /// Schema properties come first, then the template paths one level
    /// below `base` that the schema ignores and, for the dataset itself,
    /// the predicates only found in the metagraph.
    fn properties(
        &self,
        rdfclass: &Iri,
        subject: Option<&Term>,
        base: Option<&PropertyPath>,
    ) -> Vec<Property> {
        let path_of = |predicate: &Iri| match base {
            Some(base) => base.child(predicate.clone()),
            None => PropertyPath::single(predicate.clone()),
        };
        let mut seen: IndexSet<Iri> = IndexSet::new();
        let mut properties = Vec::new();

        for mut descriptor in self.schema.class_properties(rdfclass) {
            if !seen.insert(descriptor.predicate.clone()) {
                continue;
            }
            let path = path_of(&descriptor.predicate);
            let field = self.template.and_then(|t| t.get(&path));
            if let Some(field) = field {
                descriptor.merge(field);
            }
            let unlisted = self.template.is_some() && field.is_none();
            let order_idx = OrderIdx::new([
                field.and_then(|f| f.order_idx).unwrap_or(OrderIdx::LAST),
                descriptor.order.unwrap_or(OrderIdx::LAST),
            ]);
            properties.push(Property {
                tab: field.and_then(|f| f.tab.clone()),
                descriptor,
                path,
                order_idx,
                unlisted,
            });
        }

        if let Some(template) = self.template {
            for path in template.children_of(base) {
                let Some(predicate) = path.last() else {
                    continue;
                };
                if !seen.insert(predicate.clone()) {
                    continue;
                }
                let mut descriptor = PropertyDescriptor::new(predicate.clone(), Origin::Local);
                let field = template.get(path);
                if let Some(field) = field {
                    descriptor.merge(field);
                }
                properties.push(Property {
                    tab: field.and_then(|f| f.tab.clone()),
                    order_idx: OrderIdx::new([
                        field.and_then(|f| f.order_idx).unwrap_or(OrderIdx::LAST),
                        OrderIdx::LAST,
                    ]),
                    path: path.clone(),
                    descriptor,
                    unlisted: false,
                });
            }
        }

        if base.is_none() {
            if let (Some(graph), Some(subject)) = (self.metagraph, subject) {
                for (predicate, _) in graph.predicate_objects(subject) {
                    if *predicate == *RDF_TYPE || !seen.insert(predicate.clone()) {
                        continue;
                    }
                    debug!("Property {} only found in the metagraph", predicate);
                    properties.push(Property {
                        descriptor: PropertyDescriptor::new(predicate.clone(), Origin::Unknown),
                        path: path_of(predicate),
                        order_idx: OrderIdx::new([OrderIdx::LAST, OrderIdx::LAST]),
                        tab: None,
                        unlisted: true,
                    });
                }
            }
        }
        properties
    }

    fn values(&self, property: &Property, subject: Option<&Term>) -> Vec<Option<Term>> {
        let values: Vec<Option<Term>> = match self.data.get(&property.path) {
            Some(values) => values.iter().cloned().map(Some).collect(),
            None => match (self.metagraph, subject) {
                (Some(graph), Some(subject)) => graph
                    .objects(subject, &property.descriptor.predicate)
                    .cloned()
                    .map(Some)
                    .collect(),
                _ => Vec::new(),
            },
        };
        if values.is_empty() {
            vec![None]
        } else {
            values
        }
    }

    /// Options shared by every key of a property
    fn options(&self, property: &Property, parent: KeyId, is_ghost: bool) -> KeyOptions {
        let d = &property.descriptor;
        KeyOptions {
            parent: Some(parent),
            is_ghost,
            order_idx: Some(property.order_idx.clone()),
            predicate: Some(d.predicate.clone()),
            label: d.label.clone(),
            description: d.description.clone(),
            rdftype: d.rdfclass.clone(),
            xsdtype: d.datatype.clone(),
            sources: d.sources.clone(),
            transform: d.transform,
            placeholder: d.placeholder.clone(),
            input_mask: d.input_mask.clone(),
            is_mandatory: d.is_mandatory,
            is_read_only: d.is_read_only || !self.config.edit(),
            regex_validator: d.regex_validator.clone(),
            regex_validator_flags: d.regex_validator_flags.clone(),
            is_long_text: d.is_long_text,
            rowspan: d.rowspan,
            ..KeyOptions::default()
        }
    }

    fn property_parent(&self, parent: KeyId, property: &Property) -> Result<KeyId> {
        let root = self.tree.root();
        if parent != root {
            return Ok(parent);
        }
        let tab = if property.unlisted {
            self.tree.search_tab(root, Some(OTHERS_TAB))
        } else {
            property
                .tab
                .as_deref()
                .and_then(|label| self.tree.search_tab(root, Some(label)))
                .or_else(|| self.tree.search_tab(root, None))
        };
        Ok(tab.ok_or_else(|| KeyError::integrity(Some(root), "the form has no tab"))?)
    }

    fn walk(
        &mut self,
        parent: KeyId,
        rdfclass: &Iri,
        subject: Option<&Term>,
        base: Option<&PropertyPath>,
    ) -> Result<()> {
        let config = self.config;
        let edit = config.edit();
        let hide_blank = config.hide_blank();
        let main_language = config.main_language().to_string();

        for property in self.properties(rdfclass, subject, base) {
            let d = &property.descriptor;
            let mut values = self.values(&property, subject);
            let blank = is_blank(&values);
            if blank && (hide_blank || property.unlisted) && !(edit && d.is_mandatory) {
                debug!("Skipped empty property {}", d.predicate);
                continue;
            }
            let ghost =
                !blank && property.unlisted && config.hide_unlisted() && !d.is_mandatory;
            let multilingual = d.unilang && config.translation_enabled();
            let multiple = d.is_multiple && edit && !d.unilang;
            let by_language =
                d.datatype.as_ref() == Some(&*RDF_LANG_STRING) && config.only_current_language();
            if by_language {
                sort_by_language(&mut values, &config.lang_list);
            }

            let mut value_parent = self.property_parent(parent, &property)?;
            let mut group = None;
            if values.len() > 1 || ((multilingual || multiple) && !hide_blank) {
                let opts = self.options(&property, value_parent, ghost);
                let id = if multilingual && !ghost {
                    self.tree.create_translation_group(opts)?
                } else {
                    self.tree.create_group_of_values(opts)?
                };
                value_parent = id;
                group = Some(id);
            }

            let mut shown = false;
            for value in values {
                let is_bnode = value.as_ref().is_some_and(Term::is_blank_node);
                if is_bnode && !d.kind.allows_blank_node() {
                    warn!("Blank node ignored for {}, which takes no blank nodes", d.predicate);
                    continue;
                }
                let mut value_ghost = ghost;
                if by_language && shown {
                    if let Some(value) = &value {
                        if value.language() != Some(main_language.as_str()) {
                            value_ghost = true;
                        }
                    }
                }

                let mut twin = None;
                if d.kind.allows_blank_node() && (is_bnode || (!hide_blank && !value_ghost)) {
                    let mut opts = self.options(&property, value_parent, value_ghost);
                    opts.node = value.as_ref().and_then(Term::as_blank_node).cloned();
                    let gop = self.tree.create_group_of_properties(opts)?;
                    shown |= !value_ghost;
                    let class = self.tree.effective_rdftype(gop).cloned();
                    let node = self.tree.get(gop).and_then(|k| k.node()).cloned().map(Term::from);
                    match class {
                        Some(class) => self.walk(gop, &class, node.as_ref(), Some(&property.path))?,
                        None => warn!("No class for the blank nodes of {}", d.predicate),
                    }
                    if d.kind == NodeKind::BlankNodeOrIri {
                        twin = Some(gop);
                    }
                }

                let is_term = value.as_ref().is_some_and(|v| !v.is_blank_node());
                if d.kind.allows_value() && (is_term || (!hide_blank && !value_ghost)) {
                    let mut opts = self.options(&property, value_parent, value_ghost);
                    if let Some(gop) = twin {
                        opts.m_twin = Some(gop);
                        opts.is_hidden_m = Some(is_bnode);
                    }
                    if d.kind == NodeKind::Literal
                        && value
                            .as_ref()
                            .is_some_and(|v| v.to_string().chars().count() > config.value_length_limit)
                    {
                        opts.is_long_text = true;
                    }
                    if opts.is_long_text && opts.rowspan.is_none() {
                        opts.rowspan = Some(config.text_edit_row_span);
                    }
                    opts.rowspan = opts.rowspan.map(|r| r.min(config.max_rowspan()));
                    opts.independant_label = opts.label.as_ref().is_some_and(|label| {
                        opts.is_long_text || label.chars().count() > config.label_length_limit
                    });
                    if d.sources.is_some() {
                        opts.value_source =
                            value.as_ref().and_then(|v| self.thesaurus.concept_source(v));
                    }
                    opts.value = value.filter(|v| !v.is_blank_node());
                    if self.tree.create_value(opts)?.is_some() {
                        shown |= !value_ghost;
                    }
                }
            }

            if let Some(group) = group {
                let opts = self.options(&property, group, ghost);
                if multilingual {
                    self.tree.create_translation_button(opts)?;
                } else if multiple {
                    self.tree.create_plus_button(opts)?;
                }
            }
        }
        Ok(())
    }
}
