//! Walk through the snap modes on an arc and a circle.

use figgeom::{
    Arc, ArcKind, Config, Document, Ellipse, Feedback, Point, Polyline, SnapMode, SnapRequest,
    SnapSession,
};

struct Console;

impl Feedback for Console {
    fn put_msg(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn beep(&mut self) {
        println!("*beep*");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let p = Point::new;
    let mut doc = Document::new();
    let arc = doc.insert(
        Arc::new(ArcKind::Open, [p(100, 0), p(0, -100), p(-100, 0)]).expect("three points"),
    );
    let circle = doc.insert(Ellipse::circle(p(300, 0), 50).expect("positive radius"));
    let chord = doc.insert(Polyline::line(vec![p(200, 20), p(400, 20)]).expect("two points"));

    let cfg = Config::default();
    let mut console = Console;
    let cursor = p(60, -90);
    let anchor = p(200, -50);

    for mode in [
        SnapMode::Endpoint,
        SnapMode::Midpoint,
        SnapMode::Nearest,
        SnapMode::Focus,
        SnapMode::Tangent,
        SnapMode::Normal,
        SnapMode::Diameter,
    ] {
        let mut session = SnapSession::new(mode);
        let mut req = SnapRequest::new(arc, cursor);
        if mode.is_anchored() {
            req = req.with_anchor(anchor);
        }
        // failures have already been reported on the console
        let _ = session.pick(&doc, &req, &cfg, &mut console);
    }

    let mut session = SnapSession::new(SnapMode::Intersect);
    let _ = session.pick(&doc, &SnapRequest::new(circle, p(300, 50)), &cfg, &mut console);
    let _ = session.pick(&doc, &SnapRequest::new(chord, p(260, 20)), &cfg, &mut console);
}
