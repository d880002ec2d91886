use std::num::NonZeroUsize;
use std::sync::Arc;

use kiln_core::{
    CachePolicy, Color, ColorStop, FillRule, GradientOptions, KilnError, LinearGradientOptions,
    PaintOptions, PaintStyle, ParagraphStyle, RadialGradientOptions, Rect, TextSegment, TextStyle,
};

use crate::testing::{DrawCall, MockEngine, MockHostCanvas, CHAR_WIDTH, LINE_HEIGHT};
use crate::*;

fn kiln() -> Kiln<MockEngine> {
    Kiln::init(MockEngine::new(), KilnConfig::default())
}

fn uncached() -> Kiln<MockEngine> {
    Kiln::init(MockEngine::new(), KilnConfig::default().with_cache_enabled(false))
}

fn boxed(width: f64, height: f64, key: &'static str) -> CallbackProducer<MockEngine> {
    CallbackProducer::<MockEngine>::new(move |canvas| {
        canvas.draw_rect(Rect::from_xywh(0.0, 0.0, width, height), &dummy_paint())
    })
    .with_size(width, height)
    .with_fingerprint(move || kiln_core::fingerprint(key).ok())
}

fn dummy_paint() -> crate::testing::MockPaint {
    crate::testing::MockPaint {
        options: PaintOptions::new(),
        shader: None,
    }
}

fn square(producer: &mut PathProducer<MockEngine>) {
    producer.move_to(0.0, 0.0);
    producer.line_to(10.0, 0.0);
    producer.line_to(10.0, 10.0);
    producer.line_to(0.0, 10.0);
    producer.close();
}

fn linear(width: f64, height: f64, rotation: f64) -> GradientOptions {
    GradientOptions::Linear(LinearGradientOptions {
        width,
        height,
        rotation,
        stops: vec![
            ColorStop::new(0.0, Color::RED),
            ColorStop::new(1.0, Color::BLUE),
        ],
        tile_mode: None,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Texture production
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn cached_texture_is_the_same_object() {
    let mut kiln = kiln();
    let mut producer = boxed(20.0, 10.0, "box");
    let options = ProduceOptions::new();

    let first = kiln.produce_texture(&mut producer, &options).unwrap();
    let second = kiln.produce_texture(&mut producer, &options).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(kiln.engine().surfaces_allocated.get(), 1);
    assert_eq!(kiln.texture_cache().stats().hits, 1);
}

#[test]
fn cache_hit_skips_drawing() {
    let mut kiln = kiln();
    let mut producer = boxed(20.0, 10.0, "box");
    let options = ProduceOptions::new();

    kiln.produce_texture(&mut producer, &options).unwrap();
    assert!(!kiln.engine().take_draws().is_empty());
    kiln.produce_texture(&mut producer, &options).unwrap();
    assert!(kiln.engine().take_draws().is_empty());
}

#[test]
fn disabled_cache_produces_fresh_textures() {
    let mut kiln = uncached();
    let mut producer = boxed(20.0, 10.0, "box");
    let options = ProduceOptions::new();

    let first = kiln.produce_texture(&mut producer, &options).unwrap();
    let second = kiln.produce_texture(&mut producer, &options).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(kiln.engine().surfaces_allocated.get(), 2);
    assert!(kiln.texture_cache().is_empty());
}

#[test]
fn producer_without_fingerprint_is_never_cached() {
    let mut kiln = kiln();
    let mut producer = CallbackProducer::<MockEngine>::new(|_| {}).with_size(4.0, 4.0);
    let options = ProduceOptions::new();

    kiln.produce_texture(&mut producer, &options).unwrap();
    kiln.produce_texture(&mut producer, &options).unwrap();

    assert_eq!(kiln.engine().surfaces_allocated.get(), 2);
    assert!(kiln.texture_cache().is_empty());
}

#[test]
fn request_options_are_part_of_the_key() {
    let mut kiln = kiln();
    let mut producer = boxed(20.0, 10.0, "box");

    let single = kiln
        .produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    let double = kiln
        .produce_texture(&mut producer, &ProduceOptions::new().with_multisample(2.0))
        .unwrap();
    let tinted = kiln
        .produce_texture(&mut producer, &ProduceOptions::new().with_background(Color::WHITE))
        .unwrap();

    assert!(!Arc::ptr_eq(&single, &double));
    assert!(!Arc::ptr_eq(&single, &tinted));
    assert_eq!(kiln.texture_cache().len(), 3);
}

#[test]
fn unsized_producer_is_not_ready() {
    let mut kiln = kiln();
    let mut producer = CallbackProducer::<MockEngine>::new(|_| {});
    let result = kiln.produce_texture(&mut producer, &ProduceOptions::new());
    assert!(matches!(result, Err(KilnError::NotReady(_))));

    producer.set_size(0.0, 10.0);
    let result = kiln.produce_texture(&mut producer, &ProduceOptions::new());
    assert!(matches!(result, Err(KilnError::NotReady(_))));

    producer.set_size(f64::NAN, 10.0);
    let result = kiln.produce_texture(&mut producer, &ProduceOptions::new());
    assert!(matches!(result, Err(KilnError::NotReady(_))));

    assert_eq!(kiln.engine().surfaces_allocated.get(), 0);
}

#[test]
fn invalid_request_options_are_rejected() {
    let mut kiln = kiln();
    let mut producer = boxed(4.0, 4.0, "box");

    for options in [
        ProduceOptions::new().with_multisample(0.5),
        ProduceOptions::new().with_multisample(f64::INFINITY),
        ProduceOptions::new().with_resolution(0.0),
    ] {
        let result = kiln.produce_texture(&mut producer, &options);
        assert!(matches!(result, Err(KilnError::UnsupportedConfiguration(_))));
    }
}

#[test]
fn host_surface_requires_a_canvas() {
    let mut kiln = kiln();
    let mut producer = boxed(4.0, 4.0, "box");
    let options = ProduceOptions::new().with_surface(SurfaceKind::HostCanvasBacked);

    let result = kiln.produce_texture(&mut producer, &options);
    assert!(matches!(result, Err(KilnError::CanvasRequired)));
}

#[test]
fn host_canvas_is_resized_and_referenced() {
    let mut kiln = kiln();
    let mut producer = boxed(10.5, 4.0, "box");
    let canvas = MockHostCanvas::default();
    let options = ProduceOptions::new()
        .with_multisample(2.0)
        .with_host_canvas(canvas.clone());

    let texture = kiln.produce_texture(&mut producer, &options).unwrap();

    assert_eq!(canvas.size(), (21, 8));
    assert_eq!(texture.host_canvas().map(|c| c.size()), Some((21, 8)));
    assert!(texture.pixels().is_none());
}

#[test]
fn surface_is_cleared_and_scaled_before_render() {
    let mut kiln = kiln();
    let mut producer = boxed(10.0, 5.0, "box");
    let options = ProduceOptions::new().with_multisample(2.0);

    let texture = kiln.produce_texture(&mut producer, &options).unwrap();

    assert_eq!((texture.width, texture.height), (20, 10));
    assert_eq!(texture.logical_size(), (10.0, 5.0));
    assert_eq!(texture.pixels().map(<[u8]>::len), Some(20 * 10 * 4));
    assert_eq!(
        kiln.engine().take_draws(),
        vec![
            DrawCall::Clear(Color::TRANSPARENT),
            DrawCall::Scale(2.0, 2.0),
            DrawCall::Rect(Rect::from_xywh(0.0, 0.0, 10.0, 5.0)),
        ]
    );
}

#[test]
fn offscreen_surfaces_are_released() {
    let mut kiln = kiln();
    let mut producer = boxed(8.0, 8.0, "box");
    kiln.produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    assert_eq!(kiln.engine().live_surfaces(), 0);
}

#[test]
fn surface_failure_propagates_and_caches_nothing() {
    let mut kiln = kiln();
    kiln.engine().fail_surfaces.set(true);
    let mut producer = boxed(8.0, 8.0, "box");

    let result = kiln.produce_texture(&mut producer, &ProduceOptions::new());
    assert!(matches!(result, Err(KilnError::ResourceCreationFailed(_))));
    assert!(kiln.texture_cache().is_empty());
    assert_eq!(kiln.engine().live_surfaces(), 0);

    kiln.engine().fail_surfaces.set(false);
    assert!(kiln
        .produce_texture(&mut producer, &ProduceOptions::new())
        .is_ok());
}

#[test]
fn before_render_hook_runs_on_every_request() {
    let mut kiln = kiln();
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let seen = calls.clone();
    let mut producer = boxed(4.0, 4.0, "box").with_before_render(move |_| {
        seen.set(seen.get() + 1);
        Ok(())
    });

    kiln.produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    kiln.produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn before_render_hook_runs_even_for_rejected_options() {
    let mut kiln = kiln();
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let seen = calls.clone();
    let mut producer = boxed(4.0, 4.0, "box").with_before_render(move |_| {
        seen.set(seen.get() + 1);
        Ok(())
    });

    let result = kiln.produce_texture(&mut producer, &ProduceOptions::new().with_multisample(0.0));
    assert!(matches!(result, Err(KilnError::UnsupportedConfiguration(_))));
    assert_eq!(calls.get(), 1);
    assert_eq!(kiln.engine().surfaces_allocated.get(), 0);
}

#[test]
fn unencodable_content_is_left_uncached() {
    use crate::texture::content_fingerprint;
    use std::collections::BTreeMap;

    // JSON object keys must be strings
    let mut unencodable = BTreeMap::new();
    unencodable.insert(vec![1u8, 2], 3u8);
    assert!(content_fingerprint(&unencodable, "test").is_none());

    let mut encodable = BTreeMap::new();
    encodable.insert("key", 3u8);
    assert_eq!(
        content_fingerprint(&encodable, "test"),
        kiln_core::fingerprint(&encodable).ok()
    );
}

#[test]
fn lru_texture_cache_evicts() {
    let config = KilnConfig::default()
        .with_texture_cache(CachePolicy::Lru(NonZeroUsize::new(1).unwrap()));
    let mut kiln = Kiln::init(MockEngine::new(), config);
    let mut a = boxed(4.0, 4.0, "a");
    let mut b = boxed(4.0, 4.0, "b");

    kiln.produce_texture(&mut a, &ProduceOptions::new()).unwrap();
    kiln.produce_texture(&mut b, &ProduceOptions::new()).unwrap();
    kiln.produce_texture(&mut a, &ProduceOptions::new()).unwrap();

    assert_eq!(kiln.engine().surfaces_allocated.get(), 3);
    assert_eq!(kiln.texture_cache().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Paints and shaders
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn equal_paint_options_share_a_paint() {
    let mut kiln = kiln();
    let first = kiln.paint(&PaintOptions::fill(Color::RED)).unwrap();
    let second = kiln.paint(&PaintOptions::fill(Color::RED)).unwrap();
    let other = kiln.paint(&PaintOptions::fill(Color::BLUE)).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(kiln.engine().paints_created.get(), 2);
}

#[test]
fn shader_joins_the_paint_key() {
    let mut kiln = kiln();
    let producer = GradientProducer::new(&mut kiln, linear(10.0, 10.0, 0.0)).unwrap();
    let options = PaintOptions::new().with_style(PaintStyle::Fill);

    let plain = kiln.paint(&options).unwrap();
    let shaded = kiln.paint_with_shader(&options, producer.shader()).unwrap();

    assert!(!Arc::ptr_eq(&plain, &shaded));
    assert!(Arc::ptr_eq(&shaded, producer.paint()));
    assert!(shaded.shader.is_some());
}

#[test]
fn clearing_paints_forces_recreation() {
    let mut kiln = kiln();
    let first = kiln.paint(&PaintOptions::fill(Color::RED)).unwrap();
    kiln.clear_paint_cache();
    let second = kiln.paint(&PaintOptions::fill(Color::RED)).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(kiln.engine().paints_created.get(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Gradients
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn radial_gradient_is_unsupported() {
    let mut kiln = kiln();
    let options = GradientOptions::Radial(RadialGradientOptions {
        width: 10.0,
        height: 10.0,
        rotation: 0.0,
    });
    let result = GradientProducer::new(&mut kiln, options);
    assert!(matches!(result, Err(KilnError::UnsupportedConfiguration(_))));
    assert_eq!(kiln.engine().shaders_created.get(), 0);
}

#[test]
fn gradient_shader_is_cached() {
    let mut kiln = kiln();
    let a = GradientProducer::new(&mut kiln, linear(100.0, 50.0, 90.0)).unwrap();
    let b = GradientProducer::new(&mut kiln, linear(100.0, 50.0, 90.0)).unwrap();

    assert!(a.shader().ptr_eq(b.shader()));
    assert_eq!(kiln.engine().shaders_created.get(), 1);

    let desc = &a.shader().shader().desc;
    assert_eq!((desc.start.x, desc.start.y), (50.0, 50.0));
    assert_eq!((desc.end.x, desc.end.y), (50.0, 0.0));
    assert_eq!(desc.tile_mode, kiln_core::TileMode::Clamp);
}

#[test]
fn gradient_fills_its_rectangle() {
    let mut kiln = kiln();
    let mut producer = GradientProducer::new(&mut kiln, linear(30.0, 20.0, 45.0)).unwrap();
    let texture = kiln
        .produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();

    assert_eq!((texture.width, texture.height), (30, 20));
    assert!(kiln
        .engine()
        .take_draws()
        .contains(&DrawCall::Rect(Rect::from_xywh(0.0, 0.0, 30.0, 20.0))));
}

#[test]
fn gradient_textures_differ_by_rotation() {
    let mut kiln = kiln();
    let mut a = GradientProducer::new(&mut kiln, linear(30.0, 20.0, 0.0)).unwrap();
    let mut b = GradientProducer::new(&mut kiln, linear(30.0, 20.0, 180.0)).unwrap();

    let ta = kiln.produce_texture(&mut a, &ProduceOptions::new()).unwrap();
    let tb = kiln.produce_texture(&mut b, &ProduceOptions::new()).unwrap();
    assert!(!Arc::ptr_eq(&ta, &tb));
}

// ─────────────────────────────────────────────────────────────────────────────
// Paragraphs
// ─────────────────────────────────────────────────────────────────────────────

fn paragraph_builder(kiln: &Kiln<MockEngine>, style: ParagraphStyle) -> ParagraphBuilder<MockEngine> {
    ParagraphBuilder::new(kiln, &[vec![1, 2, 3]], style).unwrap()
}

fn styled() -> ParagraphStyle {
    ParagraphStyle::new().with_text_style(TextStyle::new().with_font_size(12.0))
}

#[test]
fn paragraph_needs_fonts() {
    let kiln = kiln();
    let result = ParagraphBuilder::new(&kiln, &[], styled());
    assert!(matches!(result, Err(KilnError::MissingDependency(_))));
}

#[test]
fn segment_without_style_needs_a_default() {
    let mut kiln = kiln();
    let builder = paragraph_builder(&kiln, ParagraphStyle::new());

    let result = builder.build(&mut kiln, &[TextSegment::new("hello")], None);
    assert!(matches!(result, Err(KilnError::MissingDependency(_))));

    let styled_segment = TextSegment::styled("hello", TextStyle::new());
    assert!(builder.build(&mut kiln, &[styled_segment], None).is_ok());
}

#[test]
fn unbounded_paragraph_shrinks_to_content() {
    let mut kiln = kiln();
    let builder = paragraph_builder(&kiln, styled());

    let producer = builder
        .build(&mut kiln, &[TextSegment::new("hello")], None)
        .unwrap();

    let hello = 5.0 * CHAR_WIDTH;
    assert_eq!(*kiln.engine().layouts.borrow(), vec![UNBOUNDED_WIDTH, hello]);
    assert_eq!(producer.size(), Some((hello, LINE_HEIGHT)));
}

#[test]
fn bounded_paragraph_wraps_at_max_width() {
    let mut kiln = kiln();
    let builder = paragraph_builder(&kiln, styled());

    let producer = builder
        .build(&mut kiln, &[TextSegment::new("0123456789")], Some(40.0))
        .unwrap();

    assert_eq!(*kiln.engine().layouts.borrow(), vec![40.0]);
    assert_eq!(producer.metrics().line_count, 2);
    assert_eq!(producer.size(), Some((40.0, 2.0 * LINE_HEIGHT)));
}

#[test]
fn paragraphs_are_cached_by_content() {
    let mut kiln = kiln();
    let builder = paragraph_builder(&kiln, styled());
    let segments = [TextSegment::new("one"), TextSegment::new(" two")];

    let a = builder.build(&mut kiln, &segments, None).unwrap();
    let b = builder.build(&mut kiln, &segments, None).unwrap();
    let c = builder.build(&mut kiln, &segments, Some(16.0)).unwrap();

    assert!(Arc::ptr_eq(a.paragraph(), b.paragraph()));
    assert!(!Arc::ptr_eq(a.paragraph(), c.paragraph()));
    assert_eq!(kiln.engine().paragraphs_built.get(), 2);
}

#[test]
fn paragraph_draws_at_origin() {
    let mut kiln = kiln();
    let builder = paragraph_builder(&kiln, styled());
    let mut producer = builder
        .build(&mut kiln, &[TextSegment::new("hi")], None)
        .unwrap();

    kiln.produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    assert!(kiln
        .engine()
        .take_draws()
        .contains(&DrawCall::Paragraph(0.0, 0.0)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stroked_square_grows_by_mitres() {
    let mut kiln = kiln();
    let stroke = PaintOptions::stroke(Color::BLACK, 4.0).with_stroke_miter(10.0);
    let mut producer = PathProducer::new(&mut kiln, PathOptions::new().with_stroke(stroke)).unwrap();
    square(&mut producer);

    let texture = kiln
        .produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    let bounds = producer.bounds().unwrap();

    assert_eq!((bounds.width(), bounds.height()), (14.0, 14.0));
    assert!((bounds.offset().x - 2.0).abs() < 1e-9);
    assert_eq!((texture.width, texture.height), (14, 14));

    let draws = kiln.engine().take_draws();
    assert!(matches!(draws[2], DrawCall::Translate(x, y) if (x - 2.0).abs() < 1e-9 && (y - 2.0).abs() < 1e-9));
}

#[test]
fn unset_stroke_width_uses_engine_default() {
    let mut kiln = kiln();
    let stroke = PaintOptions::new().with_color(Color::BLACK);
    let producer = PathProducer::new(&mut kiln, PathOptions::new().with_stroke(stroke)).unwrap();

    let geometry = producer.stroke_geometry();
    assert_eq!(geometry.width(), DEFAULT_STROKE_WIDTH);
    assert_eq!(geometry.mitre_limit, DEFAULT_MITRE_LIMIT);
}

#[test]
fn paint_styles_are_forced() {
    let mut kiln = kiln();
    let options = PathOptions::new()
        .with_stroke(PaintOptions::fill(Color::RED))
        .with_fill(PaintOptions::stroke(Color::BLUE, 3.0));
    let producer = PathProducer::new(&mut kiln, options).unwrap();

    assert_eq!(producer.stroke().and_then(|s| s.style), Some(PaintStyle::Stroke));
    assert_eq!(producer.fill().and_then(|f| f.style), Some(PaintStyle::Fill));
}

#[test]
fn fill_is_drawn_before_stroke() {
    let mut kiln = kiln();
    let options = PathOptions::new()
        .with_stroke(PaintOptions::stroke(Color::BLACK, 2.0))
        .with_fill(PaintOptions::fill(Color::WHITE));
    let mut producer = PathProducer::new(&mut kiln, options).unwrap();
    square(&mut producer);

    kiln.produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    let styles: Vec<_> = kiln
        .engine()
        .take_draws()
        .into_iter()
        .filter_map(|call| match call {
            DrawCall::Path { style, .. } => style,
            _ => None,
        })
        .collect();
    assert_eq!(styles, vec![PaintStyle::Fill, PaintStyle::Stroke]);
}

#[test]
fn empty_path_is_not_ready() {
    let mut kiln = kiln();
    let mut producer = PathProducer::new(&mut kiln, PathOptions::new()).unwrap();
    let result = kiln.produce_texture(&mut producer, &ProduceOptions::new());
    assert!(matches!(result, Err(KilnError::NotReady(_))));
}

#[test]
fn restroking_changes_bounds_and_texture() {
    let mut kiln = kiln();
    let mut producer = PathProducer::new(
        &mut kiln,
        PathOptions::new().with_stroke(PaintOptions::stroke(Color::BLACK, 2.0)),
    )
    .unwrap();
    square(&mut producer);

    let thin = kiln
        .produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();
    producer
        .set_stroke(&mut kiln, Some(PaintOptions::stroke(Color::BLACK, 6.0)))
        .unwrap();
    let thick = kiln
        .produce_texture(&mut producer, &ProduceOptions::new())
        .unwrap();

    assert!(!Arc::ptr_eq(&thin, &thick));
    assert!(thick.width > thin.width);
    // geometry did not change, so the engine path is reused
    assert_eq!(kiln.engine().paths_created.get(), 1);
}

#[test]
fn path_geometry_joins_the_key() {
    let mut kiln = kiln();
    let options = PathOptions::new().with_fill(PaintOptions::fill(Color::RED));
    let mut a = PathProducer::new(&mut kiln, options.clone()).unwrap();
    let mut b = PathProducer::new(&mut kiln, options).unwrap();
    square(&mut a);
    square(&mut b);
    b.line_to(20.0, 20.0);

    assert_ne!(
        TextureProducer::<MockEngine>::fingerprint(&a),
        TextureProducer::<MockEngine>::fingerprint(&b)
    );

    let mut c = PathProducer::new(&mut kiln, PathOptions::new().with_fill(PaintOptions::fill(Color::RED))).unwrap();
    square(&mut c);
    c.set_fill_rule(FillRule::EvenOdd);
    assert_ne!(
        TextureProducer::<MockEngine>::fingerprint(&a),
        TextureProducer::<MockEngine>::fingerprint(&c)
    );
}

#[test]
fn path_options_parse_leniently() {
    let options: PathOptions = serde_json::from_str(
        r#"{ "stroke": { "stroke_width": 3.0, "stroke_join": "Pointy" }, "fill_rule": "EvenOdd" }"#,
    )
    .unwrap();
    assert_eq!(options.fill_rule, Some(FillRule::EvenOdd));
    let stroke = options.stroke.unwrap();
    assert_eq!(stroke.stroke_width, Some(3.0));
    assert_eq!(stroke.stroke_join, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn clear_caches_empties_everything() {
    let mut kiln = kiln();
    let mut gradient = GradientProducer::new(&mut kiln, linear(10.0, 10.0, 0.0)).unwrap();
    kiln.produce_texture(&mut gradient, &ProduceOptions::new())
        .unwrap();
    assert!(!kiln.paint_cache().is_empty());
    assert!(!kiln.shader_cache().is_empty());
    assert!(!kiln.texture_cache().is_empty());

    kiln.clear_caches();
    assert!(kiln.paint_cache().is_empty());
    assert!(kiln.shader_cache().is_empty());
    assert!(kiln.paragraph_cache().is_empty());
    assert!(kiln.texture_cache().is_empty());
}

#[test]
fn teardown_returns_the_engine() {
    let mut kiln = kiln();
    kiln.paint(&PaintOptions::fill(Color::RED)).unwrap();
    let engine = kiln.teardown();
    assert_eq!(engine.paints_created.get(), 1);
}
