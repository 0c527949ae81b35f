//! Property tests for the scoring card and duplicate grouping.

use proptest::prelude::*;

use schemascope::core::schema::{Field, ModelType, Schema};
use schemascope::core::scoring::{reconstruct_score, weighted_overall, ScoreCard};
use schemascope::detectors::duplicates::{DuplicateConfig, DuplicateDetector};

proptest! {
    #[test]
    fn score_is_always_clamped_between_floor_and_max(
        deltas in prop::collection::vec(-30.0f64..10.0, 0..40),
        floor in 0.0f64..50.0,
    ) {
        let mut card = ScoreCard::standard().with_floor(floor);
        for (i, delta) in deltas.iter().enumerate() {
            card.add(format!("contribution {i}"), *delta);
        }
        let score = card.score();
        prop_assert!(score >= floor);
        prop_assert!(score <= 100.0);
    }

    #[test]
    fn breakdown_always_reconstructs_the_score(
        deltas in prop::collection::vec(-30.0f64..10.0, 0..40),
        floor in 0.0f64..50.0,
    ) {
        let mut card = ScoreCard::standard().with_floor(floor);
        for (i, delta) in deltas.iter().enumerate() {
            card.add(format!("contribution {i}"), *delta);
        }
        let base = card.base();
        let card_floor = card.floor();
        let (score, breakdown) = card.finalize();
        prop_assert_eq!(reconstruct_score(base, card_floor, &breakdown), score);
    }

    #[test]
    fn weighted_overall_stays_in_range(
        scores in prop::collection::vec((0.0f64..1.0, 0.0f64..=100.0), 0..10),
    ) {
        let overall = weighted_overall(&scores);
        prop_assert!((0.0..=100.0).contains(&overall));
    }

    #[test]
    fn duplicate_grouping_ignores_declaration_order(
        seed in 0u64..500,
    ) {
        // Three near-identical models plus two unrelated ones, presented in
        // a seed-dependent order.
        let overlapping = |name: &str| {
            ModelType::model(
                name,
                vec![
                    Field::scalar("body", "String"),
                    Field::scalar("summary", "String"),
                    Field::scalar("heroImage", "String"),
                    Field::scalar("publishDate", "Date"),
                    Field::scalar("authorName", "String"),
                    Field::scalar("readingTime", "Int"),
                ],
            )
        };
        let mut models = vec![
            overlapping("BlogPost"),
            overlapping("NewsPost"),
            overlapping("PressPost"),
            ModelType::model(
                "Venue",
                vec![
                    Field::scalar("address", "String"),
                    Field::scalar("capacity", "Int"),
                    Field::scalar("latitude", "Float"),
                    Field::scalar("longitude", "Float"),
                    Field::scalar("phone", "String"),
                ],
            ),
            ModelType::model(
                "Ticket",
                vec![
                    Field::scalar("price", "Float"),
                    Field::scalar("seat", "String"),
                    Field::scalar("tier", "String"),
                    Field::scalar("barcode", "String"),
                    Field::scalar("validFrom", "Date"),
                ],
            ),
        ];
        models.rotate_left((seed % 5) as usize);
        if seed % 2 == 0 {
            models.reverse();
        }

        let schema = Schema::new(models, vec![], vec![]);
        let groups = DuplicateDetector::new(DuplicateConfig::default()).detect(&schema);
        prop_assert_eq!(groups.len(), 1);
        prop_assert_eq!(
            groups[0].members.clone(),
            vec![
                "BlogPost".to_string(),
                "NewsPost".to_string(),
                "PressPost".to_string()
            ]
        );
    }
}
