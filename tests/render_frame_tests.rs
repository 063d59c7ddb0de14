use campaign_charts::ChartError;
use campaign_charts::api::{BarChart, BubbleMap, BubbleMapOptions, ChartOptions, LineChart};
use campaign_charts::core::{BubblePoint, ChartSeries, Viewport};
use campaign_charts::render::{
    Color, LayerKind, LinePrimitive, NullRenderer, RenderFrame, Renderer, SvgRenderer,
    TextHAlign, TextPrimitive,
};

fn device_spend() -> ChartSeries {
    [("Desktop", 4200.0), ("Mobile", 3100.5)].into_iter().collect()
}

#[test]
fn null_renderer_counts_every_layer() {
    let mut chart = LineChart::new(
        [("Jan 1", 10.0), ("Jan 8", 30.0), ("Jan 15", 20.0)]
            .into_iter()
            .collect(),
        ChartOptions::default(),
    );
    let x = chart.layout().points[2].x;
    chart.pointer_move(x, 100.0);

    let mut renderer = NullRenderer::default();
    renderer.render(&chart.frame()).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 2, "background plus tooltip box");
    assert_eq!(renderer.last_line_count, 23 + 6 + 1, "grid, value axis, guide");
    assert_eq!(renderer.last_path_count, 1);
    assert_eq!(renderer.last_circle_count, 3);
    assert_eq!(renderer.last_text_count, 6 + 3 + 2);
}

#[test]
fn layers_paint_in_canonical_order() {
    let frame = BarChart::new(device_spend(), ChartOptions::default()).frame();
    let kinds: Vec<LayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(kinds, LayerKind::CANONICAL);
}

#[test]
fn svg_output_is_byte_identical_across_renders() {
    let first = SvgRenderer::render_to_string(
        &BarChart::new(device_spend(), ChartOptions::titled("Spend by Device")).frame(),
    )
    .expect("first render");
    let second = SvgRenderer::render_to_string(
        &BarChart::new(device_spend(), ChartOptions::titled("Spend by Device")).frame(),
    )
    .expect("second render");
    assert_eq!(first, second);

    assert!(
        first.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="300""#)
    );
    assert!(first.contains("<title>Spend by Device</title>"));
    assert!(first.contains(r#"<g class="series">"#));
    assert!(!first.contains(r#"<g class="tooltip">"#));
    assert!(first.ends_with("</svg>\n"));
}

#[test]
fn svg_bubble_map_is_reproducible_and_translucent() {
    let points = vec![
        BubblePoint::new("Europe", 900.0, 300.0),
        BubblePoint::new("Asia & Pacific", 400.0, 200.0),
    ];
    let render = || {
        let map = BubbleMap::new(points.clone(), BubbleMapOptions::default());
        SvgRenderer::render_to_string(&map.frame()).expect("render")
    };
    let markup = render();
    assert_eq!(markup, render());
    assert!(markup.contains("fill-opacity=\"0.80\""));
    assert!(markup.contains("Asia &amp; P..."));
}

#[test]
fn svg_renderer_tracks_frames() {
    let mut renderer = SvgRenderer::new();
    renderer
        .render(&LineChart::new(ChartSeries::default(), ChartOptions::default()).frame())
        .expect("placeholder renders");
    assert_eq!(renderer.frames_rendered(), 1);
    assert!(renderer.markup().contains("No data available"));
}

#[test]
fn invalid_frames_are_rejected_before_drawing() {
    let mut frame = RenderFrame::new(Viewport::new(100, 100));
    frame.push_line(
        LayerKind::Axis,
        LinePrimitive::new(0.0, f64::NAN, 10.0, 10.0, 1.0, Color::rgb(1.0, 1.0, 1.0)),
    );
    let mut renderer = NullRenderer::default();
    assert!(matches!(renderer.render(&frame), Err(ChartError::InvalidData(_))));
    assert_eq!(renderer.frames_rendered, 0);

    let zero = RenderFrame::new(Viewport::new(0, 100));
    assert!(matches!(
        SvgRenderer::render_to_string(&zero),
        Err(ChartError::InvalidViewport { width: 0, height: 100 })
    ));
}

#[test]
fn empty_text_primitives_are_invalid() {
    let mut frame = RenderFrame::new(Viewport::new(100, 100));
    frame.push_text(
        LayerKind::Labels,
        TextPrimitive::new("", 1.0, 1.0, 12.0, Color::rgb(0.0, 0.0, 0.0), TextHAlign::Left),
    );
    assert!(frame.validate().is_err());
}
