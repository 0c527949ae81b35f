//! Normalized, immutable in-memory view of an introspected content schema.
//!
//! The schema is built once per audit run from data supplied by an external
//! introspection layer and is read-only afterwards. All lookups are
//! name-indexed and O(1). Incomplete input is expected: a relation field may
//! point at a type name that was never introspected, which resolves to "no
//! relation" rather than an error.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One declared field on a model or component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name as declared in the schema
    pub name: String,
    /// Declared type name (scalar, enum, or related type)
    pub type_name: String,
    /// Whether the field is required
    #[serde(default)]
    pub is_required: bool,
    /// Whether the field holds a list of values
    #[serde(default)]
    pub is_list: bool,
    /// Whether the field carries a uniqueness constraint
    #[serde(default)]
    pub is_unique: bool,
    /// Name of the referenced model/component, for relation fields
    #[serde(default)]
    pub related_model: Option<String>,
    /// Declared values, for fields typed by an enumeration
    #[serde(default)]
    pub enum_values: Option<Vec<String>>,
}

impl Field {
    /// Create a scalar field of the given type.
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_required: false,
            is_list: false,
            is_unique: false,
            related_model: None,
            enum_values: None,
        }
    }

    /// Create a relation field pointing at another type.
    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            name: name.into(),
            type_name: target.clone(),
            is_required: false,
            is_list: false,
            is_unique: false,
            related_model: Some(target),
            enum_values: None,
        }
    }

    /// Create a field typed by an enumeration.
    pub fn enumeration(name: impl Into<String>, enum_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: enum_name.into(),
            is_required: false,
            is_list: false,
            is_unique: false,
            related_model: None,
            enum_values: None,
        }
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark the field as a list.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark the field unique.
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Whether this field declares a relation to another type.
    pub fn is_relation(&self) -> bool {
        self.related_model.is_some()
    }
}

/// A content model or embeddable component.
///
/// Models are independently queryable top-level types; components are
/// reusable field groups embedded inside models. Both share this shape and
/// are told apart by `is_component`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelType {
    /// Type name
    pub name: String,
    /// Ordered field list as declared
    pub fields: Vec<Field>,
    /// Whether this is an embeddable component rather than a model
    #[serde(default)]
    pub is_component: bool,
    /// Whether this is a platform-managed system type
    #[serde(default)]
    pub is_system: bool,
}

impl ModelType {
    /// Create a content model.
    pub fn model(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            is_component: false,
            is_system: false,
        }
    }

    /// Create an embeddable component.
    pub fn component(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            is_component: true,
            is_system: false,
        }
    }

    /// Names of all fields, in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Fields that declare a relation to another type.
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_relation())
    }
}

/// A named, closed set of string values usable as a field type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    /// Enumeration name
    pub name: String,
    /// Declared values, in declaration order
    pub values: Vec<String>,
}

impl EnumType {
    /// Create an enumeration from string values.
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Cardinality of a relation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Single-valued reference
    One,
    /// List-valued reference
    Many,
}

/// Directionality of a relation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directionality {
    /// Only the `from` side declares the relation
    OneWay,
    /// Both sides declare a relation to each other
    Bidirectional,
}

/// What kind of type a relation target resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A content model
    Model,
    /// An embeddable component
    Component,
}

/// A derived relation edge between two schema types.
///
/// Edges are derived from relation fields each time they are requested; they
/// are never stored on the schema. Edges whose target is absent from the
/// schema are skipped during derivation.
#[derive(Debug, Clone, Serialize)]
pub struct RelationEdge {
    /// Source model/component name
    pub from_model: String,
    /// Target type name
    pub to_target: String,
    /// Field declaring the relation
    pub via_field: String,
    /// One or many
    pub cardinality: Cardinality,
    /// Whether the reverse relation is also declared
    pub directionality: Directionality,
}

/// Raw introspection payload as produced by the external query layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDocument {
    /// Content models
    #[serde(default)]
    pub models: Vec<ModelType>,
    /// Embeddable components
    #[serde(default)]
    pub components: Vec<ModelType>,
    /// Enumerations
    #[serde(default)]
    pub enums: Vec<EnumType>,
}

/// Immutable, name-indexed view of the introspected schema.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    models: IndexMap<String, ModelType>,
    components: IndexMap<String, ModelType>,
    enums: IndexMap<String, EnumType>,
}

impl Schema {
    /// Build the indexed schema from raw type lists.
    ///
    /// Later duplicates of a name shadow earlier ones; introspection layers
    /// do not normally produce duplicates, so no diagnostic is raised.
    pub fn new(models: Vec<ModelType>, components: Vec<ModelType>, enums: Vec<EnumType>) -> Self {
        let models = models
            .into_iter()
            .map(|mut m| {
                m.is_component = false;
                (m.name.clone(), m)
            })
            .collect();
        let components = components
            .into_iter()
            .map(|mut c| {
                c.is_component = true;
                (c.name.clone(), c)
            })
            .collect();
        let enums = enums.into_iter().map(|e| (e.name.clone(), e)).collect();
        Self {
            models,
            components,
            enums,
        }
    }

    /// Build an empty schema.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Whether the schema declares no types at all.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.components.is_empty() && self.enums.is_empty()
    }

    /// Look up a model by name.
    pub fn model_by_name(&self, name: &str) -> Option<&ModelType> {
        self.models.get(name)
    }

    /// Look up a component by name.
    pub fn component_by_name(&self, name: &str) -> Option<&ModelType> {
        self.components.get(name)
    }

    /// Look up an enumeration by name.
    pub fn enum_by_name(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(name)
    }

    /// Look up any field-bearing type (model or component) by name.
    pub fn type_by_name(&self, name: &str) -> Option<&ModelType> {
        self.models.get(name).or_else(|| self.components.get(name))
    }

    /// Resolve a relation target name to its kind, if present.
    pub fn resolve_target(&self, name: &str) -> Option<TargetKind> {
        if self.models.contains_key(name) {
            Some(TargetKind::Model)
        } else if self.components.contains_key(name) {
            Some(TargetKind::Component)
        } else {
            None
        }
    }

    /// All models, in introspection order.
    pub fn models(&self) -> impl Iterator<Item = &ModelType> {
        self.models.values()
    }

    /// All components, in introspection order.
    pub fn components(&self) -> impl Iterator<Item = &ModelType> {
        self.components.values()
    }

    /// All enumerations, in introspection order.
    pub fn enums(&self) -> impl Iterator<Item = &EnumType> {
        self.enums.values()
    }

    /// Number of declared models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Number of declared components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of declared enumerations.
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Fields of the given type, in declaration order.
    pub fn fields_of<'a>(&self, model: &'a ModelType) -> &'a [Field] {
        &model.fields
    }

    /// Derive all resolvable relation edges in the schema.
    ///
    /// Edges whose target name is absent are skipped. An edge is marked
    /// bidirectional when the target type declares a relation field back to
    /// the source.
    pub fn relation_edges(&self) -> Vec<RelationEdge> {
        let mut edges = Vec::new();
        for source in self.models.values().chain(self.components.values()) {
            for field in source.relation_fields() {
                let target = field.related_model.as_deref().unwrap_or_default();
                if self.resolve_target(target).is_none() {
                    debug!(
                        from = %source.name,
                        field = %field.name,
                        target = %target,
                        "skipping relation with unresolved target"
                    );
                    continue;
                }
                let reverse = self
                    .type_by_name(target)
                    .map(|t| {
                        t.relation_fields()
                            .any(|f| f.related_model.as_deref() == Some(source.name.as_str()))
                    })
                    .unwrap_or(false);
                edges.push(RelationEdge {
                    from_model: source.name.clone(),
                    to_target: target.to_string(),
                    via_field: field.name.clone(),
                    cardinality: if field.is_list {
                        Cardinality::Many
                    } else {
                        Cardinality::One
                    },
                    directionality: if reverse {
                        Directionality::Bidirectional
                    } else {
                        Directionality::OneWay
                    },
                });
            }
        }
        edges
    }

    /// Count, per enumeration name, how many distinct types use it as a
    /// field type.
    pub fn enum_usage(&self) -> HashMap<String, usize> {
        let mut usage: HashMap<String, usize> = HashMap::new();
        for owner in self.models.values().chain(self.components.values()) {
            let mut seen: Vec<&str> = Vec::new();
            for field in &owner.fields {
                if self.enums.contains_key(&field.type_name) && !seen.contains(&field.type_name.as_str())
                {
                    seen.push(&field.type_name);
                    *usage.entry(field.type_name.clone()).or_insert(0) += 1;
                }
            }
        }
        usage
    }

    /// Count, per component name, how many distinct models embed it.
    pub fn component_usage(&self) -> HashMap<String, usize> {
        let mut usage: HashMap<String, usize> = HashMap::new();
        for model in self.models.values() {
            let mut seen: Vec<&str> = Vec::new();
            for field in model.relation_fields() {
                let target = field.related_model.as_deref().unwrap_or_default();
                if self.components.contains_key(target) && !seen.contains(&target) {
                    seen.push(target);
                    *usage.entry(target.to_string()).or_insert(0) += 1;
                }
            }
        }
        usage
    }
}

impl From<SchemaDocument> for Schema {
    fn from(doc: SchemaDocument) -> Self {
        Self::new(doc.models, doc.components, doc.enums)
    }
}

/// Draft/published entry counts for one model.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCount {
    /// Number of draft entries
    #[serde(default)]
    pub draft_count: u64,
    /// Number of published entries
    #[serde(default)]
    pub published_count: u64,
}

impl EntryCount {
    /// Combined draft + published volume.
    pub fn total(&self) -> u64 {
        self.draft_count + self.published_count
    }
}

/// Per-model entry counts supplied by the introspection layer.
///
/// Models absent from the map count as zero entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryCounts(pub HashMap<String, EntryCount>);

impl EntryCounts {
    /// Build an empty count map.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no counts were supplied at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts for the given model, zero when unknown.
    pub fn for_model(&self, name: &str) -> EntryCount {
        self.0.get(name).copied().unwrap_or_default()
    }

    /// Total entry volume for the given model.
    pub fn total(&self, name: &str) -> u64 {
        self.for_model(name).total()
    }

    /// Insert counts for a model (builder-style, mostly for tests).
    pub fn with(mut self, name: impl Into<String>, draft: u64, published: u64) -> Self {
        self.0.insert(
            name.into(),
            EntryCount {
                draft_count: draft,
                published_count: published,
            },
        );
        self
    }
}
