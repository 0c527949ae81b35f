//! Shared name-classification predicate registry.
//!
//! Every analyzer that needs to answer "does this type name look like a
//! taxonomy / presentation / tenancy / ... thing" asks this registry instead
//! of rolling its own string matching. Matchers per category are ordered and
//! evaluated first-match-wins; categories themselves are evaluated in a fixed
//! priority order so ambiguous names resolve the same way everywhere.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Registry revision; bump when matcher lists change in a way that can
/// reclassify existing schemas.
pub const REGISTRY_VERSION: u32 = 3;

/// Classification tags assigned to schema type and field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Multi-brand/site/tenant segmentation
    Tenancy,
    /// Workflow or lifecycle state
    Status,
    /// Categories, tags, and other classification vocabularies
    Taxonomy,
    /// Site or application configuration
    Configuration,
    /// Visual styling (colors, themes)
    Styling,
    /// Structural layout controls
    Layout,
    /// Menus and navigation
    Navigation,
    /// Search-engine metadata
    Seo,
    /// Presentation building blocks (heroes, banners, cards)
    Presentation,
    /// People and organizational types
    People,
    /// Commerce types (products, orders, pricing)
    Commerce,
    /// Media and asset types
    Media,
    /// Editorial content types
    Content,
    /// Technical helper types
    Utility,
}

impl PatternCategory {
    /// Stable lowercase label used in findings and issue categories.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tenancy => "tenancy",
            Self::Status => "status",
            Self::Taxonomy => "taxonomy",
            Self::Configuration => "configuration",
            Self::Styling => "styling",
            Self::Layout => "layout",
            Self::Navigation => "navigation",
            Self::Seo => "seo",
            Self::Presentation => "presentation",
            Self::People => "people",
            Self::Commerce => "commerce",
            Self::Media => "media",
            Self::Content => "content",
            Self::Utility => "utility",
        }
    }
}

/// Evaluation order for ambiguous names; earlier categories win.
///
/// Tenancy outranks taxonomy on purpose: a `Brand` enum is a tenancy signal
/// even though brands also classify content. Status outranks configuration so
/// `PublishState` is not mistaken for a settings type.
pub const CATEGORY_PRIORITY: &[PatternCategory] = &[
    PatternCategory::Tenancy,
    PatternCategory::Status,
    PatternCategory::Taxonomy,
    PatternCategory::Configuration,
    PatternCategory::Styling,
    PatternCategory::Layout,
    PatternCategory::Navigation,
    PatternCategory::Seo,
    PatternCategory::Presentation,
    PatternCategory::People,
    PatternCategory::Commerce,
    PatternCategory::Media,
    PatternCategory::Content,
    PatternCategory::Utility,
];

/// Optional evaluation context for value-aware predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchContext<'a> {
    /// Declared values, when classifying an enumeration
    pub values: Option<&'a [String]>,
}

impl<'a> MatchContext<'a> {
    /// Context carrying enumeration values.
    pub fn with_values(values: &'a [String]) -> Self {
        Self {
            values: Some(values),
        }
    }
}

/// One pure classification predicate over a (lowercased) name.
enum NameMatcher {
    /// Case-insensitive whole-name match
    Exact(&'static str),
    /// Case-insensitive prefix match
    Prefix(&'static str),
    /// Case-insensitive suffix match
    Suffix(&'static str),
    /// Any of the given substrings occurs in the name
    ContainsAny(AhoCorasick),
    /// Enumeration values look like a roster of proper nouns
    /// (brand/site/tenant lists rather than constant-style states)
    ProperNounValues {
        /// Minimum number of values required
        min_values: usize,
        /// Minimum proper-noun ratio required
        min_ratio: f64,
    },
}

impl NameMatcher {
    fn contains_any(patterns: &[&str]) -> Self {
        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostFirst)
            .ascii_case_insensitive(true)
            .build(patterns)
            .expect("static pattern list is valid");
        Self::ContainsAny(ac)
    }

    fn matches(&self, lower_name: &str, context: &MatchContext<'_>) -> bool {
        match self {
            Self::Exact(expected) => lower_name == *expected,
            Self::Prefix(prefix) => lower_name.starts_with(prefix),
            Self::Suffix(suffix) => lower_name.ends_with(suffix),
            Self::ContainsAny(ac) => ac.is_match(lower_name),
            Self::ProperNounValues {
                min_values,
                min_ratio,
            } => context
                .values
                .map(|values| {
                    values.len() >= *min_values && proper_noun_ratio(values) >= *min_ratio
                })
                .unwrap_or(false),
        }
    }
}

/// The shared, ordered catalogue of classification predicates.
pub struct PatternRegistry {
    rules: Vec<(PatternCategory, Vec<NameMatcher>)>,
}

impl PatternRegistry {
    fn build() -> Self {
        use NameMatcher::{Exact, Prefix, Suffix};
        use PatternCategory as C;

        let rules = vec![
            (
                C::Tenancy,
                vec![
                    Exact("brand"),
                    Exact("site"),
                    Exact("tenant"),
                    Exact("channel"),
                    Exact("market"),
                    Exact("storefront"),
                    Suffix("brand"),
                    Suffix("tenant"),
                    NameMatcher::ProperNounValues {
                        min_values: 4,
                        min_ratio: 0.75,
                    },
                ],
            ),
            (
                C::Status,
                vec![
                    Exact("status"),
                    Exact("state"),
                    Exact("stage"),
                    Exact("workflow"),
                    Suffix("status"),
                    Suffix("state"),
                    Suffix("stage"),
                ],
            ),
            (
                C::Taxonomy,
                vec![
                    Exact("category"),
                    Exact("tag"),
                    Exact("topic"),
                    Exact("genre"),
                    Exact("collection"),
                    Suffix("category"),
                    Suffix("tag"),
                    NameMatcher::contains_any(&["taxonom", "categor"]),
                ],
            ),
            (
                C::Configuration,
                vec![
                    Exact("config"),
                    Exact("configuration"),
                    Exact("settings"),
                    Exact("options"),
                    Exact("preferences"),
                    Prefix("global"),
                    Suffix("config"),
                    Suffix("settings"),
                    Suffix("options"),
                ],
            ),
            (
                C::Styling,
                vec![
                    Exact("theme"),
                    Exact("style"),
                    Exact("appearance"),
                    Suffix("color"),
                    Suffix("colour"),
                    Suffix("theme"),
                    NameMatcher::contains_any(&["color", "colour", "theme"]),
                ],
            ),
            (
                C::Layout,
                vec![
                    Exact("layout"),
                    Exact("grid"),
                    Exact("alignment"),
                    Suffix("layout"),
                    Suffix("alignment"),
                    NameMatcher::contains_any(&["layout", "column", "align"]),
                ],
            ),
            (
                C::Navigation,
                vec![
                    Exact("menu"),
                    Exact("nav"),
                    Exact("navigation"),
                    Exact("breadcrumb"),
                    Suffix("menu"),
                    Suffix("nav"),
                    NameMatcher::contains_any(&["navigation"]),
                ],
            ),
            (
                C::Seo,
                vec![
                    Exact("seo"),
                    Exact("meta"),
                    Exact("metadata"),
                    Prefix("seo"),
                    Suffix("seo"),
                    Suffix("meta"),
                ],
            ),
            (
                C::Presentation,
                vec![
                    Exact("hero"),
                    Exact("banner"),
                    Exact("card"),
                    Exact("section"),
                    Exact("cta"),
                    Suffix("section"),
                    Suffix("block"),
                    Suffix("banner"),
                    Suffix("card"),
                    NameMatcher::contains_any(&["hero", "carousel", "slider", "teaser"]),
                ],
            ),
            (
                C::People,
                vec![
                    Exact("author"),
                    Exact("user"),
                    Exact("person"),
                    Exact("team"),
                    Exact("member"),
                    Exact("contact"),
                    Suffix("author"),
                    Suffix("member"),
                    NameMatcher::contains_any(&["person", "employee"]),
                ],
            ),
            (
                C::Commerce,
                vec![
                    Exact("product"),
                    Exact("order"),
                    Exact("cart"),
                    Exact("price"),
                    Exact("sku"),
                    Exact("checkout"),
                    Suffix("product"),
                    Suffix("order"),
                    NameMatcher::contains_any(&["product", "price", "payment", "cart"]),
                ],
            ),
            (
                C::Media,
                vec![
                    Exact("asset"),
                    Exact("image"),
                    Exact("video"),
                    Exact("gallery"),
                    Exact("media"),
                    Suffix("image"),
                    Suffix("video"),
                    Suffix("asset"),
                    NameMatcher::contains_any(&["gallery", "media"]),
                ],
            ),
            (
                C::Content,
                vec![
                    Exact("article"),
                    Exact("page"),
                    Exact("post"),
                    Exact("blog"),
                    Exact("news"),
                    Suffix("page"),
                    Suffix("article"),
                    NameMatcher::contains_any(&["article", "story", "post"]),
                ],
            ),
            (
                C::Utility,
                vec![
                    Exact("redirect"),
                    Exact("link"),
                    Exact("misc"),
                    Suffix("redirect"),
                    NameMatcher::contains_any(&["util", "helper", "wrapper"]),
                ],
            ),
        ];

        debug_assert_eq!(rules.len(), CATEGORY_PRIORITY.len());
        Self { rules }
    }

    /// The process-wide shared registry.
    pub fn global() -> &'static PatternRegistry {
        static REGISTRY: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::build);
        &REGISTRY
    }

    /// Whether `name` matches the given category.
    pub fn matches(&self, category: PatternCategory, name: &str) -> bool {
        self.matches_with(category, name, &MatchContext::default())
    }

    /// Whether `name` (with context) matches the given category.
    pub fn matches_with(
        &self,
        category: PatternCategory,
        name: &str,
        context: &MatchContext<'_>,
    ) -> bool {
        let lower = name.to_lowercase();
        self.rules
            .iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, matchers)| matchers.iter().any(|m| m.matches(&lower, context)))
            .unwrap_or(false)
    }

    /// Classify a bare name; first matching category in priority order wins.
    pub fn classify(&self, name: &str) -> Option<PatternCategory> {
        self.classify_with(name, &MatchContext::default())
    }

    /// Classify a name with context (e.g. enumeration values).
    pub fn classify_with(
        &self,
        name: &str,
        context: &MatchContext<'_>,
    ) -> Option<PatternCategory> {
        let lower = name.to_lowercase();
        for category in CATEGORY_PRIORITY {
            if let Some((_, matchers)) = self.rules.iter().find(|(cat, _)| cat == category) {
                if matchers.iter().any(|m| m.matches(&lower, context)) {
                    return Some(*category);
                }
            }
        }
        None
    }
}

/// Fraction of values that read like proper nouns ("Nike", "Acme Corp")
/// rather than constant-style states ("DRAFT", "in_review").
pub fn proper_noun_ratio(values: &[String]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let proper = values.iter().filter(|v| is_proper_noun_like(v)).count();
    proper as f64 / values.len() as f64
}

fn is_proper_noun_like(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_uppercase()
        && value.chars().any(|c| c.is_ascii_lowercase())
        && !value.contains('_')
}

/// Whether a type name looks like a platform-generated embed/union wrapper.
///
/// Wrapper types inflate duplicate similarity and are filtered before any
/// field-overlap comparison.
pub fn is_generated_wrapper(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("union") || lower.ends_with("wrapper") || lower.starts_with("c_")
}
