//! End-to-end audit scenarios over hand-built schema snapshots.

use schemascope::api::results::Effort;
use schemascope::core::schema::{EntryCounts, EnumType, Field, ModelType, Schema};
use schemascope::core::scoring::{reconstruct_score, AuditCategory, Severity};
use schemascope::AuditEngine;

fn engine() -> AuditEngine {
    AuditEngine::with_defaults()
}

#[test]
fn versioned_product_models_are_grouped_and_critical() {
    let fields = || {
        vec![
            Field::scalar("sku", "String"),
            Field::scalar("price", "Float"),
            Field::scalar("currency", "String"),
            Field::scalar("stock", "Int"),
            Field::scalar("weight", "Float"),
            Field::scalar("taxClass", "String"),
        ]
    };
    let schema = Schema::new(
        vec![
            ModelType::model("Product", fields()),
            ModelType::model("ProductV2", fields()),
        ],
        vec![],
        vec![],
    );
    let counts = EntryCounts::empty()
        .with("Product", 5, 200)
        .with("ProductV2", 2, 30);

    let report = engine().audit(&schema, &counts);
    let issue = report
        .issues
        .iter()
        .find(|i| i.id.contains(":versioned-models:"))
        .expect("versioned duplicate issue");
    assert_eq!(issue.severity, Severity::Critical);
    assert_eq!(issue.effort, Effort::Strategic);
    assert_eq!(
        issue.affected_items,
        vec!["Product".to_string(), "ProductV2".to_string()]
    );
    // Identical field sets: similarity is reported at full strength.
    assert!(issue.title.contains("100%"));

    let duplication = dimension(&report, AuditCategory::Duplication);
    assert_eq!(duplication.score, 92.0);
}

#[test]
fn brand_tenancy_enum_is_the_top_issue() {
    let brand = EnumType::new(
        "Brand",
        &[
            "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Tyrell", "Cyberdyne",
        ],
    );
    let models: Vec<ModelType> = ["Article", "Page", "Product", "Campaign"]
        .iter()
        .map(|name| {
            ModelType::model(
                *name,
                vec![
                    Field::scalar("headline", "String"),
                    Field::enumeration("brand", "Brand"),
                ],
            )
        })
        .collect();
    let schema = Schema::new(models, vec![], vec![brand]);
    let counts = EntryCounts::empty()
        .with("Article", 3, 120)
        .with("Page", 1, 40)
        .with("Product", 0, 300)
        .with("Campaign", 2, 15);

    let report = engine().audit(&schema, &counts);
    let top = &report.issues[0];
    assert_eq!(top.id, "enums:tenancy:brand");
    assert_eq!(top.severity, Severity::Critical);
    assert!(top.recommendation.contains("dedicated model"));

    let enums = dimension(&report, AuditCategory::Enums);
    assert_eq!(enums.score, 85.0);
    assert!(report.summary.headline.contains("critical"));
}

#[test]
fn five_model_relation_chain_is_one_critical_finding() {
    let chain = [
        ("PageType", Some("SectionType")),
        ("SectionType", Some("BlockType")),
        ("BlockType", Some("MediaType")),
        ("MediaType", Some("AssetType")),
        ("AssetType", None),
    ];
    let models: Vec<ModelType> = chain
        .iter()
        .map(|(name, next)| {
            let mut fields = vec![Field::scalar("name", "String")];
            if let Some(target) = next {
                fields.push(Field::reference("child", *target));
            }
            ModelType::model(*name, fields)
        })
        .collect();
    let schema = Schema::new(models, vec![], vec![]);
    let counts = EntryCounts::empty().with("PageType", 0, 50);

    let report = engine().audit(&schema, &counts);
    let nesting: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.id.starts_with("structure:deep-nesting:"))
        .collect();
    assert_eq!(nesting.len(), 1);
    assert_eq!(nesting[0].severity, Severity::Critical);
    assert_eq!(nesting[0].effort, Effort::Strategic);

    let structure = dimension(&report, AuditCategory::Structure);
    assert_eq!(structure.score, 90.0);
}

#[test]
fn empty_schema_gets_a_perfect_report() {
    let report = engine().audit(&Schema::empty(), &EntryCounts::empty());
    assert_eq!(report.overall_score, 100.0);
    assert!(report.issues.is_empty());
    assert!(report.roadmap.is_empty());
    assert!(report.relationship_graph.nodes.is_empty());
    assert!(report.summary.headline.contains("no issues"));
}

#[test]
fn every_dimension_breakdown_reconstructs_its_score() {
    // A messy schema touching all six dimensions at once.
    let mut page_fields: Vec<Field> = (0..26)
        .map(|i| Field::scalar(format!("field{i}"), "String"))
        .collect();
    page_fields.push(Field::enumeration("brand", "Brand"));
    let schema = Schema::new(
        vec![
            ModelType::model("LandingPage", page_fields),
            ModelType::model(
                "Article",
                vec![
                    Field::scalar("title", "String"),
                    Field::enumeration("brand", "Brand"),
                    Field::reference("author", "Author"),
                ],
            ),
            ModelType::model(
                "Author",
                vec![
                    Field::scalar("name", "String"),
                    Field::reference("articles", "Article").list(),
                ],
            ),
            ModelType::model("Ghost", vec![Field::scalar("x", "String")]),
        ],
        vec![ModelType::component(
            "OrphanBlock",
            vec![Field::scalar("text", "String")],
        )],
        vec![EnumType::new(
            "Brand",
            &["Acme", "Globex", "Initech", "Umbrella", "Stark"],
        )],
    );
    let counts = EntryCounts::empty()
        .with("LandingPage", 0, 12)
        .with("Article", 4, 80)
        .with("Author", 0, 9)
        .with("Ghost", 3, 0);

    let report = engine().audit(&schema, &counts);
    assert_eq!(report.dimensions.len(), 6);
    for dimension in &report.dimensions {
        assert_eq!(
            reconstruct_score(dimension.base, dimension.floor, &dimension.breakdown),
            dimension.score,
            "breakdown must reconstruct the {} score",
            dimension.category.label()
        );
    }
    assert!(report.overall_score < 100.0);

    // The roadmap covers every issue exactly once.
    let roadmap_tasks: usize = report.roadmap.iter().map(|p| p.tasks.len()).sum();
    assert_eq!(roadmap_tasks, report.issues.len());
}

fn dimension<'a>(
    report: &'a schemascope::StrategicAuditReport,
    category: AuditCategory,
) -> &'a schemascope::api::results::DimensionAnalysis {
    report
        .dimensions
        .iter()
        .find(|d| d.category == category)
        .expect("dimension present")
}
