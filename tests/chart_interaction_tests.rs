use approx::assert_relative_eq;
use health_scatter::api::{
    DispatchOutcome, ScatterChart, ScatterChartConfig, SelectionChange, SelectionState,
};
use health_scatter::core::{AxisField, XField, YField};
use health_scatter::data::parse_dataset_str;
use health_scatter::interaction::ChartEvent;
use health_scatter::render::{Attr, PointerEventKind, RetainedSurface, StyleTag};
use health_scatter::ScatterError;

const TWO_STATES: &str = "state,abbr,poverty,age,income,healthcare,smokes,obesity\n\
                          Alpha,AA,10,30,40000,5,15,25\n\
                          Beta,BB,20,40,50000,15,20,30\n";

fn mount_two_states() -> ScatterChart<RetainedSurface> {
    let dataset = parse_dataset_str(TWO_STATES).expect("dataset");
    ScatterChart::mount(
        RetainedSurface::new(),
        dataset,
        ScatterChartConfig::default(),
    )
    .expect("chart mounts")
}

fn active_caption_count(chart: &ScatterChart<RetainedSurface>, fields: &[AxisField]) -> usize {
    let scene = chart.surface().scene();
    fields
        .iter()
        .filter(|field| {
            let id = chart.scene().captions.element(**field);
            scene
                .element(id)
                .is_some_and(|element| element.has_tag(StyleTag::Active))
        })
        .count()
}

/// Every caption is tagged active exactly when its field is selected.
fn assert_caption_flags(chart: &ScatterChart<RetainedSurface>) {
    let scene = chart.surface().scene();
    let selection = chart.selection();
    for field in x_fields().into_iter().chain(y_fields()) {
        let element = scene
            .element(chart.scene().captions.element(field))
            .expect("caption");
        let active = selection.is_active(field);
        assert_eq!(element.has_tag(StyleTag::Active), active, "{field}");
        assert_eq!(element.has_tag(StyleTag::Inactive), !active, "{field}");
    }
    assert_eq!(active_caption_count(chart, &x_fields()), 1);
    assert_eq!(active_caption_count(chart, &y_fields()), 1);
}

/// Circles and labels sit where the current scales put them, labels shifted
/// down by `label_offset` data units.
fn assert_marks_at_targets(chart: &ScatterChart<RetainedSurface>, label_offset: f64) {
    let scene = chart.surface().scene();
    let selection = chart.selection();
    for (index, record) in chart.dataset().iter().enumerate() {
        let x = record.x_value(selection.x);
        let y = record.y_value(selection.y);
        let expected_x = chart.x_scale().domain_to_pixel(x).expect("to pixel");
        let expected_y = chart.y_scale().domain_to_pixel(y).expect("to pixel");

        let circle = scene
            .element(chart.scene().marks.circles()[index])
            .expect("circle");
        assert_relative_eq!(circle.number(Attr::Cx).expect("cx"), expected_x, epsilon = 1e-9);
        assert_relative_eq!(circle.number(Attr::Cy).expect("cy"), expected_y, epsilon = 1e-9);

        let label = scene
            .element(chart.scene().marks.labels()[index])
            .expect("label");
        assert_relative_eq!(label.number(Attr::X).expect("x"), expected_x, epsilon = 1e-9);
        let expected_label_y = chart
            .y_scale()
            .domain_to_pixel(y - label_offset)
            .expect("to pixel");
        assert_relative_eq!(label.number(Attr::Y).expect("y"), expected_label_y, epsilon = 1e-9);
    }
}

fn x_fields() -> Vec<AxisField> {
    XField::ALL.into_iter().map(AxisField::X).collect()
}

fn y_fields() -> Vec<AxisField> {
    YField::ALL.into_iter().map(AxisField::Y).collect()
}

#[test]
fn mount_draws_initial_poverty_healthcare_chart() {
    let chart = mount_two_states();

    assert_eq!(chart.selection(), SelectionState::default());
    assert_eq!(chart.surface().batches_applied, 1);

    let scene = chart.surface().scene();
    let circles = chart.scene().marks.circles();
    assert_eq!(circles.len(), 2);

    let alpha = scene.element(circles[0]).expect("alpha circle");
    assert_relative_eq!(
        alpha.number(Attr::Cx).expect("cx"),
        940.0 / 13.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        alpha.number(Attr::Cy).expect("cy"),
        500.0 - 1.25 / 12.0 * 500.0,
        epsilon = 1e-9
    );
    assert_eq!(alpha.number(Attr::R), Some(20.0));
    assert!(alpha.has_tag(StyleTag::StateCircle));
}

#[test]
fn mark_labels_sit_below_circle_centre_by_initial_offset() {
    let chart = mount_two_states();
    let scene = chart.surface().scene();

    let label = scene
        .element(chart.scene().marks.labels()[0])
        .expect("alpha label");
    let expected = chart
        .y_scale()
        .domain_to_pixel(5.0 - 0.22)
        .expect("to pixel");

    assert_eq!(label.text(), Some("AA"));
    assert_relative_eq!(label.number(Attr::Y).expect("y"), expected, epsilon = 1e-9);
    assert_eq!(label.number(Attr::FontSize), Some(14.0));
}

#[test]
fn exactly_one_caption_is_active_per_axis_after_mount() {
    let chart = mount_two_states();

    assert_eq!(active_caption_count(&chart, &x_fields()), 1);
    assert_eq!(active_caption_count(&chart, &y_fields()), 1);

    let scene = chart.surface().scene();
    let poverty = chart.scene().captions.element(AxisField::X(XField::Poverty));
    let age = chart.scene().captions.element(AxisField::X(XField::Age));
    assert_eq!(
        scene.element(poverty).and_then(|element| element.text()),
        Some("In Poverty (%)")
    );
    assert!(scene
        .element(age)
        .is_some_and(|element| element.has_tag(StyleTag::Inactive)));
}

#[test]
fn clicking_active_caption_is_a_no_op() {
    let mut chart = mount_two_states();
    let before = chart.snapshot();

    let change = chart
        .click_label(AxisField::X(XField::Poverty))
        .expect("click succeeds");

    assert_eq!(change, SelectionChange::Unchanged);
    assert_eq!(chart.surface().batches_applied, 1);
    assert_eq!(chart.surface().transitions_started, 0);
    assert_eq!(chart.snapshot(), before);
}

#[test]
fn clicking_age_rescales_x_and_moves_circles() {
    let mut chart = mount_two_states();
    let y_before = chart.y_scale();

    let change = chart
        .click_label(AxisField::X(XField::Age))
        .expect("click succeeds");

    assert_eq!(
        change,
        SelectionChange::X {
            from: XField::Poverty,
            to: XField::Age
        }
    );
    assert_eq!(chart.selection().x, XField::Age);
    assert_eq!(chart.selection().y, YField::Healthcare);
    assert_eq!(chart.y_scale(), y_before);

    let (start, end) = chart.x_scale().domain();
    assert_relative_eq!(start, 27.0, epsilon = 1e-9);
    assert_relative_eq!(end, 44.0, epsilon = 1e-9);

    chart.surface_mut().settle();
    let scene = chart.surface().scene();
    let alpha = scene
        .element(chart.scene().marks.circles()[0])
        .expect("alpha circle");
    let expected = chart.x_scale().domain_to_pixel(30.0).expect("to pixel");
    assert_relative_eq!(alpha.number(Attr::Cx).expect("cx"), expected, epsilon = 1e-9);
    assert_eq!(active_caption_count(&chart, &x_fields()), 1);
    assert!(scene
        .element(chart.scene().captions.element(AxisField::X(XField::Age)))
        .is_some_and(|element| element.has_tag(StyleTag::Active)));
}

#[test]
fn transitions_run_for_configured_duration() {
    let mut chart = mount_two_states();
    chart
        .click_label(AxisField::Y(YField::Obesity))
        .expect("click succeeds");

    let circle = chart.scene().marks.circles()[1];
    let target = chart.y_scale().domain_to_pixel(30.0).expect("to pixel");

    chart.surface_mut().advance(500.0);
    let midway = chart
        .surface()
        .scene()
        .element(circle)
        .and_then(|element| element.number(Attr::Cy))
        .expect("cy");
    assert!((midway - target).abs() > 1e-6);

    chart.surface_mut().advance(500.0);
    let element = chart.surface().scene().element(circle).expect("circle");
    assert!(!element.is_transitioning());
    assert_relative_eq!(element.number(Attr::Cy).expect("cy"), target, epsilon = 1e-9);
}

#[test]
fn y_rebinding_uses_update_label_offset() {
    let mut chart = mount_two_states();
    chart
        .click_label(AxisField::Y(YField::Smokes))
        .expect("click succeeds");
    chart.surface_mut().settle();

    let label = chart
        .surface()
        .scene()
        .element(chart.scene().marks.labels()[0])
        .expect("alpha label");
    let expected = chart
        .y_scale()
        .domain_to_pixel(15.0 - 0.2)
        .expect("to pixel");

    assert_relative_eq!(label.number(Attr::Y).expect("y"), expected, epsilon = 1e-9);
}

#[test]
fn switching_back_restores_initial_positions_and_captions() {
    let mut chart = mount_two_states();
    let initial = chart.mark_positions().clone();
    let initial_selection = chart.selection();
    let initial_x = chart.x_scale();
    let initial_y = chart.y_scale();

    chart
        .click_label(AxisField::X(XField::Income))
        .expect("click income");
    chart
        .click_label(AxisField::Y(YField::Obesity))
        .expect("click obesity");
    chart.surface_mut().settle();
    assert_caption_flags(&chart);

    chart
        .click_label(AxisField::X(XField::Poverty))
        .expect("click poverty");
    chart
        .click_label(AxisField::Y(YField::Healthcare))
        .expect("click healthcare");
    chart.surface_mut().settle();

    assert_eq!(chart.selection(), initial_selection);
    assert_eq!(chart.x_scale(), initial_x);
    assert_eq!(chart.y_scale(), initial_y);
    assert_eq!(chart.mark_positions(), &initial);
    assert_caption_flags(&chart);
    assert_marks_at_targets(&chart, chart.config().mark_label_offsets.update);
}

#[test]
fn overlapping_x_and_y_clicks_both_reach_their_targets() {
    for head_start_ms in [0.0, 100.0, 600.0] {
        let mut chart = mount_two_states();

        chart
            .click_label(AxisField::X(XField::Age))
            .expect("click age");
        chart.surface_mut().advance(head_start_ms);
        chart
            .click_label(AxisField::Y(YField::Smokes))
            .expect("click smokes");
        chart.surface_mut().settle();

        assert_eq!(chart.surface().scene().in_flight_transitions(), 0);
        assert_marks_at_targets(&chart, chart.config().mark_label_offsets.update);
    }
}

#[test]
fn y_click_keeps_running_x_motion_animated() {
    let mut chart = mount_two_states();
    chart
        .click_label(AxisField::X(XField::Age))
        .expect("click age");
    chart.surface_mut().advance(100.0);
    chart
        .click_label(AxisField::Y(YField::Obesity))
        .expect("click obesity");

    let circle = chart.scene().marks.circles()[0];
    let target_cx = chart.x_scale().domain_to_pixel(30.0).expect("to pixel");
    let element = chart.surface().scene().element(circle).expect("circle");
    assert_eq!(element.target_number(Attr::Cx), Some(target_cx));

    chart.surface_mut().advance(900.0);
    let element = chart.surface().scene().element(circle).expect("circle");
    assert_relative_eq!(element.number(Attr::Cx).expect("cx"), target_cx, epsilon = 1e-9);
    assert!(element.is_transitioning());
}

#[test]
fn tooltip_reflects_current_selection() {
    let mut chart = mount_two_states();
    chart
        .click_label(AxisField::X(XField::Income))
        .expect("click income");

    let outcome = chart
        .dispatch(ChartEvent::PointerEntered { record: 1 })
        .expect("hover succeeds");

    let DispatchOutcome::TooltipShown(content) = outcome else {
        panic!("expected tooltip, got {outcome:?}");
    };
    assert_eq!(content.title, "Beta");
    assert_eq!(content.x_line, "Income ($): 50000");
    assert_eq!(content.y_line, "Healthcare (%) 15");
    assert_eq!(chart.tooltip().hovered(), Some(1));
    assert_eq!(chart.tooltip().binding().generation, 2);

    let panel = chart
        .surface()
        .scene()
        .element(chart.tooltip().panel())
        .expect("tooltip panel");
    assert_eq!(panel.number(Attr::Opacity), Some(1.0));
    assert_eq!(panel.text(), Some("Beta\nIncome ($): 50000\nHealthcare (%) 15"));
}

#[test]
fn tooltip_is_anchored_above_the_circle() {
    let mut chart = mount_two_states();
    chart
        .dispatch(ChartEvent::PointerEntered { record: 0 })
        .expect("hover succeeds");

    let (cx, cy) = chart.mark_positions().get(0).expect("position");
    let panel = chart
        .surface()
        .scene()
        .element(chart.tooltip().panel())
        .expect("tooltip panel");

    assert_relative_eq!(
        panel.number(Attr::X).expect("x"),
        cx + 100.0 - 60.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        panel.number(Attr::Y).expect("y"),
        cy - 20.0 + 20.0 + 80.0,
        epsilon = 1e-9
    );

    let outcome = chart
        .dispatch(ChartEvent::PointerLeft { record: 0 })
        .expect("leave succeeds");
    assert_eq!(outcome, DispatchOutcome::TooltipHidden);
    assert_eq!(chart.tooltip().hovered(), None);
}

#[test]
fn surface_events_resolve_to_chart_events() {
    let mut chart = mount_two_states();
    let caption = chart.scene().captions.element(AxisField::Y(YField::Obesity));
    let circle = chart.scene().marks.circles()[1];

    assert_eq!(
        chart.resolve_event(caption, PointerEventKind::Click),
        Some(ChartEvent::LabelClicked(AxisField::Y(YField::Obesity)))
    );
    assert_eq!(
        chart.resolve_event(circle, PointerEventKind::PointerEnter),
        Some(ChartEvent::PointerEntered { record: 1 })
    );
    assert_eq!(chart.resolve_event(circle, PointerEventKind::Click), None);

    let outcome = chart
        .handle_pointer_event(caption, PointerEventKind::Click)
        .expect("caption click");
    assert!(matches!(outcome, DispatchOutcome::SelectionChanged(_)));
    assert_eq!(chart.selection().y, YField::Obesity);

    let err = chart
        .handle_pointer_event(chart.scene().chart_group, PointerEventKind::Click)
        .expect_err("group has no handler");
    assert!(matches!(err, ScatterError::UnknownElement(_)));
}

#[test]
fn circles_listen_for_hover_after_rebinding() {
    let mut chart = mount_two_states();
    chart
        .click_label(AxisField::Y(YField::Smokes))
        .expect("click");

    let scene = chart.surface().scene();
    for circle in chart.scene().marks.circles() {
        let element = scene.element(*circle).expect("circle");
        assert!(element.listens(PointerEventKind::PointerEnter));
        assert!(element.listens(PointerEventKind::PointerLeave));
    }
}

#[test]
fn hover_on_unknown_record_is_rejected() {
    let mut chart = mount_two_states();

    assert!(chart
        .dispatch(ChartEvent::PointerEntered { record: 9 })
        .is_err());
    assert_eq!(chart.tooltip().hovered(), None);
}

#[test]
fn invalid_config_is_rejected_before_drawing() {
    let dataset = parse_dataset_str(TWO_STATES).expect("dataset");
    let config = ScatterChartConfig::default().with_transition_duration_ms(0);

    let result = ScatterChart::mount(RetainedSurface::new(), dataset, config);

    assert!(matches!(result, Err(ScatterError::Config(_))));
}
