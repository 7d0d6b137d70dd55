use timegrid::{
    encode, render::course_rect, CanvasConfig, ColorAssignment, CourseRecord, FontSet,
    GridGeometry, RenderRequest, SplitMix64, Style,
};

fn course(name: &str, day: u8, start: &str, end: &str, location: &str) -> CourseRecord {
    CourseRecord {
        name: name.to_string(),
        day,
        start: start.parse().unwrap(),
        end: end.parse().unwrap(),
        location: location.to_string(),
    }
}

/// Small canvas to keep the blur passes cheap; same aspect as the default.
fn small_canvas() -> CanvasConfig {
    CanvasConfig {
        width: 500,
        height: 640,
        ..CanvasConfig::default()
    }
}

fn request(style: &str, courses: Vec<CourseRecord>, seed: u64) -> RenderRequest {
    RenderRequest {
        style: style.to_string(),
        courses,
        canvas: Some(small_canvas()),
        seed: Some(seed),
    }
}

fn decode(png: &[u8]) -> image::RgbImage {
    image::load_from_memory(png).unwrap().to_rgb8()
}

#[test]
fn decoded_image_has_configured_dimensions() {
    let req = RenderRequest {
        style: "cool".to_string(),
        courses: vec![course("Algorithms", 1, "8:00", "9:40", "Room A")],
        canvas: None,
        seed: Some(1),
    };
    let png = timegrid::render_png(&req, &FontSet::builtin()).unwrap();
    let img = decode(&png);
    let default = CanvasConfig::default();
    assert_eq!(img.width(), default.width);
    assert_eq!(img.height(), default.height);
}

#[test]
fn unknown_style_renders_as_the_default_theme() {
    let fonts = FontSet::builtin();
    let known = request(Style::DEFAULT.as_str(), vec![], 5);
    let unknown = request("definitely-not-a-style", vec![], 5);
    let a = timegrid::render_png(&known, &fonts).unwrap();
    let b = timegrid::render_png(&unknown, &fonts).unwrap();
    assert_eq!(a, b);

    let envelope = timegrid::render_timetable(&unknown, &fonts).unwrap();
    assert_eq!(envelope.filename, "timetable_cool.png");
}

#[test]
fn same_seed_same_courses_is_pixel_identical() {
    let fonts = FontSet::builtin();
    let courses = vec![
        course("Algorithms", 1, "8:00", "9:40", "Room A"),
        course("Physics", 3, "10:00", "12:00", "Hall 2"),
    ];
    let a = timegrid::render_png(&request("warm", courses.clone(), 99), &fonts).unwrap();
    let b = timegrid::render_png(&request("warm", courses, 99), &fonts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_change_colors_but_not_geometry() {
    let fonts = FontSet::builtin();
    let theme = Style::Cool.theme();

    // Pick a second seed whose shuffled palette leads with a different color.
    let first = ColorAssignment::new(theme, &mut SplitMix64::new(0)).shuffled_palette()[0];
    let other_seed = (1..64)
        .find(|&s| {
            ColorAssignment::new(theme, &mut SplitMix64::new(s)).shuffled_palette()[0] != first
        })
        .unwrap();

    let courses = vec![course("Algorithms", 2, "9:00", "11:00", "Room A")];
    let a = decode(&timegrid::render_png(&request("cool", courses.clone(), 0), &fonts).unwrap());
    let b = decode(
        &timegrid::render_png(&request("cool", courses, other_seed), &fonts).unwrap(),
    );
    assert_ne!(a.as_raw(), b.as_raw());

    // Geometry invariance: the set of pixels carrying an exact palette color
    // (the block fills) is identical across seeds.
    let is_palette = |px: &image::Rgb<u8>| {
        theme
            .palette
            .iter()
            .any(|c| px.0 == [c.r, c.g, c.b])
    };
    let mask = |img: &image::RgbImage| -> Vec<bool> {
        img.pixels().map(|p| is_palette(p)).collect()
    };
    assert_eq!(mask(&a), mask(&b));
}

#[test]
fn block_fill_lands_at_computed_coordinates_with_assigned_color() {
    let fonts = FontSet::builtin();
    let seed = 11;
    let req = request("cool", vec![course("Algorithms", 1, "8:00", "9:40", "Room A")], seed);

    let theme = Style::Cool.theme();
    let expected =
        ColorAssignment::new(theme, &mut SplitMix64::new(seed)).shuffled_palette()[0];

    let geometry = GridGeometry::compute(&small_canvas()).unwrap();
    let (x1, y1, x2, y2) =
        course_rect(&geometry, &req.courses[0]).unwrap();

    let img = decode(&timegrid::render_png(&req, &fonts).unwrap());

    // The block interior (below the labels) carries the assigned fill color.
    let cx = ((x1 + x2) / 2.0) as u32;
    let probe_y = (y2 - 6.0) as u32;
    assert_eq!(
        img.get_pixel(cx, probe_y).0,
        [expected.r, expected.g, expected.b]
    );

    // Just outside the block's top-left corner there is no fill color.
    let outside = img.get_pixel(x1 as u32 - 3, (y1 + 1.0) as u32);
    assert_ne!(outside.0, [expected.r, expected.g, expected.b]);

    // Label ink: the name row near the top deviates from the plain fill.
    let label_y = (y1 + 8.0 + 2.0) as u32;
    let label_row_has_ink = (x1 as u32..x2 as u32)
        .any(|x| img.get_pixel(x, label_y).0 != [expected.r, expected.g, expected.b]);
    assert!(label_row_has_ink);

    // Location ink ("@Room A") below the name line.
    let name_h = FontSet::builtin().bold.measure("Algorithms", 16.0).height;
    let loc_y = (y1 + 8.0 + name_h + 4.0) as u32;
    let loc_row_has_ink = (x1 as u32..x2 as u32)
        .any(|x| img.get_pixel(x, loc_y).0 != [expected.r, expected.g, expected.b]);
    assert!(loc_row_has_ink);
}

#[test]
fn envelope_base64_roundtrips_to_the_png_bytes() {
    let fonts = FontSet::builtin();
    let req = request("dark", vec![course("Lab", 5, "14:00", "16:00", "B-12")], 4);
    let envelope = timegrid::render_timetable(&req, &fonts).unwrap();
    assert_eq!(envelope.filename, "timetable_dark.png");

    let bytes = encode::from_base64(&envelope.filedata_encoded).unwrap();
    let direct = timegrid::render_png(&req, &fonts).unwrap();
    assert_eq!(bytes, direct);
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn last_day_last_slot_block_stays_inside_the_padding() {
    let fonts = FontSet::builtin();
    let config = small_canvas();
    let seed = 2;
    let req = request("cool", vec![course("Late", 7, "21:00", "22:00", "")], seed);

    let theme = Style::Cool.theme();
    let fill = ColorAssignment::new(theme, &mut SplitMix64::new(seed)).shuffled_palette()[0];
    let img = decode(&timegrid::render_png(&req, &fonts).unwrap());

    let limit_x = config.width - config.padding;
    let limit_y = config.height - config.padding;
    for (x, y, px) in img.enumerate_pixels() {
        if px.0 == [fill.r, fill.g, fill.b] {
            assert!(x < limit_x, "fill pixel at x={x} overflows {limit_x}");
            assert!(y < limit_y, "fill pixel at y={y} overflows {limit_y}");
        }
    }
}

#[test]
fn shadow_darkens_below_the_block() {
    let fonts = FontSet::builtin();
    let courses = vec![course("Algorithms", 4, "10:00", "11:00", "")];
    let with_block = decode(&timegrid::render_png(&request("cool", courses, 3), &fonts).unwrap());
    let empty = decode(&timegrid::render_png(&request("cool", vec![], 3), &fonts).unwrap());

    let geometry = GridGeometry::compute(&small_canvas()).unwrap();
    let (x1, _, x2, y2) = course_rect(
        &geometry,
        &course("Algorithms", 4, "10:00", "11:00", ""),
    )
    .unwrap();
    let x = ((x1 + x2) / 2.0) as u32;
    let y = (y2 + 8.0) as u32;

    let shadowed = with_block.get_pixel(x, y);
    let plain = empty.get_pixel(x, y);
    assert!(
        shadowed.0[0] < plain.0[0] && shadowed.0[1] < plain.0[1] && shadowed.0[2] < plain.0[2],
        "expected a darker pixel under the block: {shadowed:?} vs {plain:?}"
    );
}

#[test]
fn degenerate_geometry_surfaces_a_configuration_error() {
    let req = RenderRequest {
        style: "cool".to_string(),
        courses: vec![],
        canvas: Some(CanvasConfig {
            width: 100,
            height: 100,
            padding: 60,
            ..CanvasConfig::default()
        }),
        seed: Some(0),
    };
    let err = timegrid::render_png(&req, &FontSet::builtin()).unwrap_err();
    assert!(err.to_string().contains("configuration error:"));
}

#[test]
fn huge_canvas_override_is_an_error_not_a_panic() {
    let req = RenderRequest {
        style: "cool".to_string(),
        courses: vec![],
        canvas: Some(CanvasConfig {
            width: u32::MAX,
            height: u32::MAX,
            ..CanvasConfig::default()
        }),
        seed: Some(0),
    };
    let err = timegrid::render_png(&req, &FontSet::builtin()).unwrap_err();
    assert!(err.to_string().contains("configuration error:"));
}

#[test]
fn font_degradation_warning_reaches_the_subscriber() {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let sink = Capture(Arc::new(Mutex::new(Vec::new())));
    let subscriber = tracing_subscriber::fmt()
        .with_writer({
            let sink = sink.clone();
            move || sink.clone()
        })
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let _ = FontSet::load(Some(std::path::Path::new("/nonexistent/regular.ttf")), None);
    });

    let log = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    assert!(log.contains("font unavailable"));
}

#[test]
fn missing_fonts_degrade_but_still_render() {
    let fonts = FontSet::load(
        Some(std::path::Path::new("/nonexistent/regular.ttf")),
        Some(std::path::Path::new("/nonexistent/bold.ttf")),
    );
    let req = request("paper", vec![course("Seminar", 2, "13:00", "14:30", "C-1")], 8);
    let png = timegrid::render_png(&req, &fonts).unwrap();
    assert_eq!(decode(&png).width(), small_canvas().width);
}

#[test]
fn identical_names_share_a_color_across_days() {
    let fonts = FontSet::builtin();
    let seed = 21;
    let courses = vec![
        course("Algorithms", 1, "9:00", "10:00", ""),
        course("Algorithms", 4, "15:00", "16:00", ""),
    ];
    let req = request("cool", courses.clone(), seed);
    let img = decode(&timegrid::render_png(&req, &fonts).unwrap());

    let geometry = GridGeometry::compute(&small_canvas()).unwrap();
    // Sample below the labels so the probe hits bare fill, not text ink.
    let probe = |c: &CourseRecord| {
        let (x1, _, x2, y2) = course_rect(&geometry, c).unwrap();
        (((x1 + x2) / 2.0) as u32, (y2 - 6.0) as u32)
    };
    let (ax, ay) = probe(&courses[0]);
    let (bx, by) = probe(&courses[1]);
    assert_eq!(img.get_pixel(ax, ay), img.get_pixel(bx, by));
    let theme = Style::Cool.theme();
    assert!(theme
        .palette
        .iter()
        .any(|c| img.get_pixel(ax, ay).0 == [c.r, c.g, c.b]));
}
