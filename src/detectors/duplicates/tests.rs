use super::*;
use crate::core::schema::{EnumType, Field, ModelType, Schema};

fn detector() -> DuplicateDetector {
    DuplicateDetector::new(DuplicateConfig::default())
}

fn model_with_fields(name: &str, fields: &[&str]) -> ModelType {
    ModelType::model(
        name,
        fields.iter().map(|f| Field::scalar(*f, "String")).collect(),
    )
}

fn component_with_fields(name: &str, fields: &[&str]) -> ModelType {
    ModelType::component(
        name,
        fields.iter().map(|f| Field::scalar(*f, "String")).collect(),
    )
}

#[test]
fn version_suffix_rule_groups_product_and_product_v2() {
    let schema = Schema::new(
        vec![
            ModelType::model(
                "Product",
                vec![
                    Field::scalar("title", "String"),
                    Field::scalar("price", "Float"),
                    Field::scalar("sku", "String").unique(),
                ],
            ),
            ModelType::model(
                "ProductV2",
                vec![
                    Field::scalar("title", "String"),
                    Field::scalar("price", "Float"),
                    Field::scalar("sku", "String").unique(),
                ],
            ),
        ],
        vec![],
        vec![],
    );

    let groups = detector().detect_model_groups(&schema);
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.reason, GroupingReason::VersionSuffix);
    assert_eq!(group.members, vec!["Product", "ProductV2"]);
    assert!(group.similarity >= 90.0, "similarity was {}", group.similarity);
}

#[test]
fn version_suffix_parsing_recognizes_common_markers() {
    assert_eq!(strip_version_suffix("ProductV2").as_deref(), Some("Product"));
    assert_eq!(strip_version_suffix("Product2").as_deref(), Some("Product"));
    assert_eq!(strip_version_suffix("Product_v3").as_deref(), Some("Product"));
    assert_eq!(
        strip_version_suffix("ProductVersion2").as_deref(),
        Some("Product")
    );
    assert_eq!(strip_version_suffix("Product"), None);
    assert_eq!(strip_version_suffix("404"), None);
}

#[test]
fn field_overlap_groups_models_above_threshold() {
    let fields = &["body", "summary", "heroImage", "author", "publishDate", "readTime"];
    let schema = Schema::new(
        vec![
            model_with_fields("Article", fields),
            model_with_fields("BlogEntry", fields),
            model_with_fields(
                "Recipe",
                &["ingredients", "steps", "servings", "cookTime", "difficulty"],
            ),
        ],
        vec![],
        vec![],
    );

    let groups = detector().detect_model_groups(&schema);
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.reason, GroupingReason::FieldOverlap);
    assert_eq!(group.members, vec!["Article", "BlogEntry"]);
    assert_eq!(group.shared_attributes.len(), 6);
    assert!(group.similarity > 99.0);
}

#[test]
fn universal_fields_do_not_inflate_similarity() {
    // Only universal fields overlap; meaningful overlap is zero.
    let schema = Schema::new(
        vec![
            model_with_fields(
                "Event",
                &["id", "title", "slug", "createdAt", "venue", "startsAt", "capacity"],
            ),
            model_with_fields(
                "Webinar",
                &["id", "title", "slug", "createdAt", "host", "streamUrl", "duration"],
            ),
        ],
        vec![],
        vec![],
    );
    assert!(detector().detect_model_groups(&schema).is_empty());
}

#[test]
fn small_models_are_excluded_from_field_overlap() {
    let schema = Schema::new(
        vec![
            model_with_fields("Tiny", &["alpha", "beta"]),
            model_with_fields("Mini", &["alpha", "beta"]),
        ],
        vec![],
        vec![],
    );
    assert!(detector().detect_model_groups(&schema).is_empty());
}

#[test]
fn grouping_is_single_assignment() {
    let fields = &["body", "summary", "heroImage", "author", "publishDate"];
    let schema = Schema::new(
        vec![
            model_with_fields("Article", fields),
            model_with_fields("BlogEntry", fields),
            model_with_fields("NewsItem", fields),
        ],
        vec![],
        vec![],
    );

    let groups = detector().detect_model_groups(&schema);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members.len(), 3);

    // No member may appear twice across groups of the same kind.
    let mut seen = std::collections::HashSet::new();
    for group in &groups {
        for member in &group.members {
            assert!(seen.insert(member.clone()), "{member} assigned twice");
        }
    }
}

#[test]
fn chained_version_stems_keep_membership_single_assignment() {
    // Product2 is both a versioned copy of Product and the base of
    // Product2V2; it must land in exactly one group.
    let fields = &["title", "price", "sku", "weight", "inventory"];
    let schema = Schema::new(
        vec![
            model_with_fields("Product", fields),
            model_with_fields("Product2", fields),
            model_with_fields("Product2V2", fields),
        ],
        vec![],
        vec![],
    );

    let groups = detector().detect_model_groups(&schema);
    let mut seen = std::collections::HashSet::new();
    for group in &groups {
        for member in &group.members {
            assert!(seen.insert(member.clone()), "{member} assigned twice");
        }
    }
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec!["Product", "Product2"]);
}

#[test]
fn grouping_is_stable_under_input_reordering() {
    let fields = &["body", "summary", "heroImage", "author", "publishDate"];
    let forward = Schema::new(
        vec![
            model_with_fields("Article", fields),
            model_with_fields("BlogEntry", fields),
            model_with_fields("Recipe", &["ingredients", "steps", "servings", "cookTime", "oven"]),
        ],
        vec![],
        vec![],
    );
    let reversed = Schema::new(
        vec![
            model_with_fields("Recipe", &["ingredients", "steps", "servings", "cookTime", "oven"]),
            model_with_fields("BlogEntry", fields),
            model_with_fields("Article", fields),
        ],
        vec![],
        vec![],
    );

    let a = detector().detect_model_groups(&forward);
    let b = detector().detect_model_groups(&reversed);
    assert_eq!(a.len(), b.len());
    for (ga, gb) in a.iter().zip(&b) {
        assert_eq!(ga.members, gb.members);
        assert_eq!(ga.shared_attributes, gb.shared_attributes);
    }
}

#[test]
fn component_duplicates_use_looser_threshold() {
    let schema = Schema::new(
        vec![],
        vec![
            component_with_fields("HeroBanner", &["headline", "subline", "image", "ctaLabel"]),
            component_with_fields("TopBanner", &["headline", "subline", "image", "badge"]),
        ],
        vec![],
    );
    let groups = detector().detect_component_groups(&schema);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec!["HeroBanner", "TopBanner"]);
    // 3 shared out of min(4,4) = 0.75 >= 0.6 with >= 3 shared fields.
    assert!(groups[0].similarity >= 74.0 && groups[0].similarity <= 76.0);
}

#[test]
fn generated_wrapper_components_are_filtered() {
    let schema = Schema::new(
        vec![],
        vec![
            component_with_fields("BodyRichTextEmbedUnion", &["a", "b", "c", "d"]),
            component_with_fields("FooterRichTextEmbedUnion", &["a", "b", "c", "d"]),
        ],
        vec![],
    );
    assert!(detector().detect_component_groups(&schema).is_empty());
}

#[test]
fn enum_value_sets_group_on_half_overlap() {
    let schema = Schema::new(
        vec![],
        vec![],
        vec![
            EnumType::new("ArticleStatus", &["DRAFT", "REVIEW", "PUBLISHED", "ARCHIVED"]),
            EnumType::new("PageStatus", &["DRAFT", "REVIEW", "PUBLISHED", "SCHEDULED"]),
            EnumType::new("Alignment", &["LEFT", "CENTER", "RIGHT"]),
        ],
    );
    let groups = detector().detect_enum_groups(&schema);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec!["ArticleStatus", "PageStatus"]);
    assert_eq!(
        groups[0].shared_attributes,
        vec!["DRAFT", "PUBLISHED", "REVIEW"]
    );
}

#[test]
fn empty_schema_produces_no_groups() {
    assert!(detector().detect(&Schema::empty()).is_empty());
}
