use approx::assert_relative_eq;
use health_scatter::api::{
    DomainPadding, X_DOMAIN_PADDING, Y_DOMAIN_PADDING, compute_x_scale, compute_y_scale,
    padded_domain,
};
use health_scatter::core::{ChartLayout, Margins, Metric, Viewport, XField, YField};
use health_scatter::data::parse_dataset_str;

const TWO_STATES: &str = "state,abbr,poverty,age,income,healthcare,smokes,obesity\n\
                          Alpha,AA,10,30,40000,5,15,25\n\
                          Beta,BB,20,40,50000,15,20,30\n";

fn default_layout() -> ChartLayout {
    ChartLayout::new(Viewport::default(), Margins::default()).expect("default layout")
}

#[test]
fn default_layout_leaves_940_by_500_plot() {
    let layout = default_layout();

    assert_eq!(layout.plot_width, 940.0);
    assert_eq!(layout.plot_height, 500.0);
}

#[test]
fn x_scale_pads_poverty_extent() {
    let dataset = parse_dataset_str(TWO_STATES).expect("dataset");

    let scale = compute_x_scale(&dataset, XField::Poverty, default_layout()).expect("x scale");

    let (start, end) = scale.domain();
    assert_relative_eq!(start, 9.0, epsilon = 1e-9);
    assert_relative_eq!(end, 22.0, epsilon = 1e-9);
    assert_eq!(scale.range(), (0.0, 940.0));
}

#[test]
fn y_scale_pads_lower_bound_harder_and_inverts_range() {
    let dataset = parse_dataset_str(TWO_STATES).expect("dataset");

    let scale = compute_y_scale(&dataset, YField::Healthcare, default_layout()).expect("y scale");

    let (start, end) = scale.domain();
    assert_relative_eq!(start, 3.75, epsilon = 1e-9);
    assert_relative_eq!(end, 15.75, epsilon = 1e-9);
    assert_eq!(scale.range(), (500.0, 0.0));
}

#[test]
fn age_domain_follows_same_padding() {
    let dataset = parse_dataset_str(TWO_STATES).expect("dataset");

    let scale = compute_x_scale(&dataset, XField::Age, default_layout()).expect("x scale");

    let (start, end) = scale.domain();
    assert_relative_eq!(start, 27.0, epsilon = 1e-9);
    assert_relative_eq!(end, 44.0, epsilon = 1e-9);
}

#[test]
fn single_record_gives_padded_non_degenerate_domain() {
    let dataset = parse_dataset_str(
        "state,abbr,poverty,age,income,healthcare,smokes,obesity\n\
         Solo,SO,12,38,50000,10,18,28\n",
    )
    .expect("dataset");

    let (start, end) = padded_domain(&dataset, Metric::Poverty, X_DOMAIN_PADDING);

    assert!(start < end);
    let scale = compute_y_scale(&dataset, YField::Obesity, default_layout()).expect("y scale");
    assert!(!scale.is_degenerate());
}

#[test]
fn zero_extent_produces_degenerate_scale() {
    let dataset = parse_dataset_str(
        "state,abbr,poverty,age,income,healthcare,smokes,obesity\n\
         Solo,SO,0,38,50000,10,18,28\n",
    )
    .expect("dataset");

    let scale = compute_x_scale(&dataset, XField::Poverty, default_layout()).expect("x scale");

    assert!(scale.is_degenerate());
    assert_eq!(scale.domain_to_pixel(0.0).expect("to pixel"), 470.0);
}

#[test]
fn custom_padding_is_multiplicative() {
    let dataset = parse_dataset_str(TWO_STATES).expect("dataset");
    let padding = DomainPadding {
        lower: 0.5,
        upper: 2.0,
    };

    assert_eq!(
        padded_domain(&dataset, Metric::Income, padding),
        (20_000.0, 100_000.0)
    );
    assert_eq!(Y_DOMAIN_PADDING.lower, 0.75);
}
