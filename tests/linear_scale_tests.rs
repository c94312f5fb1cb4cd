use approx::assert_relative_eq;
use health_scatter::ScatterError;
use health_scatter::core::LinearScale;

#[test]
fn maps_domain_endpoints_to_range_endpoints() {
    let scale = LinearScale::new((9.0, 22.0), (0.0, 940.0)).expect("valid scale");

    assert_relative_eq!(scale.domain_to_pixel(9.0).expect("to pixel"), 0.0);
    assert_relative_eq!(scale.domain_to_pixel(22.0).expect("to pixel"), 940.0);
    assert_relative_eq!(
        scale.domain_to_pixel(10.0).expect("to pixel"),
        940.0 / 13.0,
        epsilon = 1e-9
    );
}

#[test]
fn inverted_range_puts_larger_values_higher() {
    let scale = LinearScale::new((3.75, 15.75), (500.0, 0.0)).expect("valid scale");

    let low = scale.domain_to_pixel(5.0).expect("to pixel");
    let high = scale.domain_to_pixel(15.0).expect("to pixel");

    assert!(high < low);
    assert_relative_eq!(low, 500.0 - 1.25 / 12.0 * 500.0, epsilon = 1e-9);
}

#[test]
fn pixel_round_trip_recovers_value() {
    let scale = LinearScale::new((27.0, 44.0), (0.0, 940.0)).expect("valid scale");

    let px = scale.domain_to_pixel(38.2).expect("to pixel");
    let value = scale.pixel_to_domain(px).expect("from pixel");

    assert_relative_eq!(value, 38.2, epsilon = 1e-9);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let scale = LinearScale::new((12.0, 12.0), (0.0, 940.0)).expect("degenerate is accepted");

    assert!(scale.is_degenerate());
    assert_relative_eq!(scale.domain_to_pixel(12.0).expect("to pixel"), 470.0);
    assert_relative_eq!(scale.domain_to_pixel(99.0).expect("to pixel"), 470.0);
}

#[test]
fn non_finite_inputs_are_rejected() {
    assert!(matches!(
        LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)),
        Err(ScatterError::InvalidData(_))
    ));
    assert!(matches!(
        LinearScale::new((0.0, 1.0), (0.0, f64::INFINITY)),
        Err(ScatterError::InvalidData(_))
    ));

    let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("valid scale");
    assert!(scale.domain_to_pixel(f64::NAN).is_err());
}

#[test]
fn ticks_are_round_and_inside_the_domain() {
    let scale = LinearScale::new((9.0, 22.0), (0.0, 940.0)).expect("valid scale");

    let ticks = scale.ticks(10);

    assert_eq!(ticks.first().copied(), Some(9.0));
    assert_eq!(ticks.last().copied(), Some(22.0));
    assert_eq!(ticks.len(), 14);
    assert_eq!(scale.format_tick(12.0, 10), "12");
}

#[test]
fn income_ticks_use_thousands_grouping() {
    let scale = LinearScale::new((35_698.5, 82_006.1), (0.0, 940.0)).expect("valid scale");

    let labels: Vec<String> = scale
        .ticks(10)
        .into_iter()
        .map(|value| scale.format_tick(value, 10))
        .collect();

    assert_eq!(labels.first().map(String::as_str), Some("40,000"));
    assert!(labels.iter().all(|label| label.ends_with(",000")));
}
