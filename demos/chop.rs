//! Chop a square with two crossing lines and print the pieces.
//!
//! Run with `RUST_LOG=figgeom=debug cargo run --example chop --features tracing`
//! to see the engine's debug output.

use figgeom::{ChopSession, Config, Document, Feedback, Point, Polyline, Shape};

/// Prints the status line to stdout
struct Console;

impl Feedback for Console {
    fn put_msg(&mut self, msg: &str) {
        println!("status: {msg}");
    }

    fn beep(&mut self) {
        println!("status: *beep*");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let p = Point::new;
    let mut doc = Document::new();
    let square = doc.insert(
        Polyline::polygon(vec![p(0, 0), p(100, 0), p(100, 100), p(0, 100)])
            .expect("a square has four points"),
    );
    let axes = [
        doc.insert(Polyline::line(vec![p(50, -20), p(50, 120)]).expect("two points")),
        doc.insert(Polyline::line(vec![p(-20, 20), p(120, 20)]).expect("two points")),
    ];

    let cfg = Config::default();
    let mut console = Console;
    let mut session = ChopSession::new();
    for axe in axes {
        if session.add_axe(&doc, axe, &mut console).is_err() {
            return;
        }
    }
    match session.chop(&mut doc, square, &cfg, &mut console) {
        Ok(report) => {
            for id in report.pieces {
                if let Some(piece) = doc.get(id) {
                    println!("{id} {} bbox {:?}", piece.label(), piece.bbox());
                }
            }
        }
        Err(e) => eprintln!("Error: {e}"),
    }
}
