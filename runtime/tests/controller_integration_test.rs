//! Widget controller integration tests
//!
//! Time is paused, so debounce windows elapse deterministically.

mod common;

use bmi_widget_shared::{CalorieGoal, FieldValues, Gender, ToggleOutcome, UnitSystem};
use common::{settle, test_widget};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_initial_render_is_placeholder() {
    let widget = test_widget();

    let renderer = widget.renderer();
    assert_eq!(renderer.render_count(), 1);
    assert_eq!(renderer.last_report().bmi, "-");
    assert_eq!(renderer.last_report().category_label, "-");
}

#[tokio::test(start_paused = true)]
async fn test_input_burst_renders_once_with_latest_values() {
    let mut widget = test_widget();

    widget.on_fields("1", "75", "30", "sedentary").unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    widget.on_fields("18", "75", "30", "sedentary").unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    widget.on_fields("180", "75", "30", "sedentary").unwrap();
    assert!(widget.is_pending());
    assert_eq!(widget.renderer().render_count(), 1);

    settle().await;

    let renderer = widget.renderer();
    assert_eq!(renderer.render_count(), 2);
    let report = renderer.last_report();
    assert_eq!(report.bmi, "23.1");
    assert_eq!(report.category_label, "Normal");
    assert_eq!(report.healthy_weight_range, "59.9 - 80.7 kg");
    assert_eq!(
        report.calories.slot_text(CalorieGoal::Maintain),
        Some("2076 kcal/day")
    );
}

#[tokio::test(start_paused = true)]
async fn test_invalid_input_renders_placeholder() {
    let mut widget = test_widget();

    widget.on_fields("180", "75", "", "").unwrap();
    settle().await;
    assert_eq!(widget.renderer().last_report().bmi, "23.1");

    widget.on_fields("", "75", "", "").unwrap();
    settle().await;
    let report = widget.renderer().last_report();
    assert_eq!(report.bmi, "-");
    assert_eq!(report.fitness_advice, "Enter your details to get personalized fitness advice.");
}

#[tokio::test(start_paused = true)]
async fn test_unit_toggle_flushes_and_rewrites_fields() {
    let mut widget = test_widget();

    widget.on_fields("180", "75", "30", "sedentary").unwrap();
    let outcome = widget.select_unit(UnitSystem::Imperial).unwrap();

    let expected = FieldValues {
        height: Some("70.9".to_string()),
        weight: Some("165.3".to_string()),
    };
    assert_eq!(
        outcome,
        ToggleOutcome::Updated {
            rewritten_fields: Some(expected.clone())
        }
    );

    let renderer = widget.renderer();
    assert_eq!(renderer.rewrites(), vec![expected]);
    assert_eq!(renderer.render_count(), 2);

    let report = renderer.last_report();
    assert_eq!(report.unit, UnitSystem::Imperial);
    assert_eq!(report.bmi, "23.1");
    assert_eq!(report.bmi_unit_label, "lb/in²");

    // the flushed input must not fire again later
    settle().await;
    assert_eq!(widget.renderer().render_count(), 2);
    assert_eq!(widget.settings().unwrap().unit, UnitSystem::Imperial);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_toggle_is_a_no_op() {
    let mut widget = test_widget();

    assert_eq!(
        widget.select_unit(UnitSystem::Metric).unwrap(),
        ToggleOutcome::Unchanged
    );
    assert_eq!(
        widget.select_gender(Gender::Male).unwrap(),
        ToggleOutcome::Unchanged
    );

    let renderer = widget.renderer();
    assert_eq!(renderer.render_count(), 1);
    assert!(renderer.rewrites().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_gender_toggle_updates_calories_only() {
    let mut widget = test_widget();

    widget.on_fields("180", "75", "30", "sedentary").unwrap();
    settle().await;
    let before = widget.renderer().last_report();

    let outcome = widget.select_gender(Gender::Female).unwrap();
    assert!(outcome.is_changed());

    let after = widget.renderer().last_report();
    assert_eq!(after.bmi, before.bmi);
    assert_eq!(after.category_label, before.category_label);
    assert_eq!(
        after.calories.slot_text(CalorieGoal::Maintain),
        Some("1877 kcal/day")
    );
    assert!(widget.renderer().rewrites().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_flush_applies_pending_input_immediately() {
    let mut widget = test_widget();

    assert!(!widget.flush().unwrap());
    widget.on_fields("70", "200", "40", "lightly-active").unwrap();
    assert!(widget.flush().unwrap());
    assert!(!widget.is_pending());

    // metric settings interpret the numbers as cm and kg
    let report = widget.report().unwrap();
    assert_eq!(report.category_label, "Morbidly Obese");
    settle().await;
    assert_eq!(widget.renderer().render_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_burst_on_multi_thread_runtime_renders_latest_once() {
    let mut widget = test_widget();

    for height in 160..=180 {
        widget
            .on_fields(&height.to_string(), "75", "30", "sedentary")
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(widget.renderer().render_count(), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;

    let renderer = widget.renderer();
    assert_eq!(renderer.render_count(), 2);
    assert_eq!(renderer.last_report().bmi, "23.1");
}
